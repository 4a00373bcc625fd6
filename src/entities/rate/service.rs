//! Rate registry: name uniqueness, validity existence and joined reads

use super::model::{Rate, RateDraft, RateView};
use crate::core::error::{ConflictError, GymError, GymResult};
use crate::core::service::{Criteria, DataService};
use crate::entities::validity::Validity;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct RateService {
    rates: Arc<dyn DataService<Rate>>,
    validities: Arc<dyn DataService<Validity>>,
}

impl RateService {
    pub fn new(
        rates: Arc<dyn DataService<Rate>>,
        validities: Arc<dyn DataService<Validity>>,
    ) -> Self {
        Self { rates, validities }
    }

    /// All rates joined with their validity, newest first
    pub async fn list(&self) -> GymResult<Vec<RateView>> {
        let mut rates = self.rates.list().await?;
        rates.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let validities: HashMap<Uuid, Validity> = self
            .validities
            .list()
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        Ok(rates
            .into_iter()
            .map(|rate| {
                let validity = validities.get(&rate.validity).cloned();
                rate.joined(validity)
            })
            .collect())
    }

    pub async fn get(&self, id: &Uuid) -> GymResult<Rate> {
        self.rates
            .get(id)
            .await?
            .ok_or_else(|| GymError::not_found("Rate", *id))
    }

    async fn ensure_unique_name(&self, name: &str, exclude: Option<&Uuid>) -> GymResult<()> {
        let taken = self
            .rates
            .search(&Criteria::new().eq("name", name))
            .await?
            .into_iter()
            .any(|r| Some(&r.id) != exclude);

        if taken {
            return Err(ConflictError::DuplicateRateName {
                name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn ensure_validity_exists(&self, id: &Uuid) -> GymResult<()> {
        match self.validities.get(id).await? {
            Some(_) => Ok(()),
            None => Err(GymError::invalid("Selected validity does not exist")),
        }
    }

    fn check_amount(draft: &RateDraft) -> GymResult<()> {
        if !draft.amount.is_finite() || draft.amount < 1.0 {
            return Err(GymError::invalid("Amount must be greater than 0"));
        }
        Ok(())
    }

    /// Re-read the stored rate together with its validity
    async fn read_joined(&self, rate: Rate) -> GymResult<RateView> {
        let stored = self.get(&rate.id).await?;
        let validity = self.validities.get(&stored.validity).await?;
        Ok(stored.joined(validity))
    }

    pub async fn create(&self, draft: RateDraft) -> GymResult<RateView> {
        Self::check_amount(&draft)?;
        self.ensure_unique_name(&draft.name, None).await?;
        self.ensure_validity_exists(&draft.validity).await?;

        let created = self
            .rates
            .create(Rate::new(draft.name, draft.amount, draft.validity))
            .await?;

        tracing::info!(id = %created.id, name = %created.name, "rate created");
        self.read_joined(created).await
    }

    pub async fn update(&self, id: &Uuid, draft: RateDraft) -> GymResult<RateView> {
        let mut rate = self.get(id).await?;
        Self::check_amount(&draft)?;
        self.ensure_unique_name(&draft.name, Some(id)).await?;
        self.ensure_validity_exists(&draft.validity).await?;

        rate.apply(draft);
        let updated = self.rates.update(id, rate).await?;

        tracing::info!(id = %updated.id, name = %updated.name, "rate updated");
        self.read_joined(updated).await
    }

    pub async fn delete(&self, id: &Uuid) -> GymResult<()> {
        self.get(id).await?;
        self.rates.delete(id).await?;
        tracing::info!(id = %id, "rate deleted");
        Ok(())
    }
}
