//! Validity business rules: duration uniqueness and the delete guard
//!
//! Every check reads the current store state and then writes without a
//! transaction. Two concurrent creates of the same duration can both pass
//! the uniqueness check, and a rate created while its validity is being
//! deleted can end up dangling; rate listings tolerate the latter.

use super::model::{Period, Validity};
use crate::core::error::{ConflictError, GymError, GymResult};
use crate::core::service::{Criteria, DataService};
use crate::entities::rate::Rate;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ValidityService {
    validities: Arc<dyn DataService<Validity>>,
    rates: Arc<dyn DataService<Rate>>,
}

impl ValidityService {
    pub fn new(
        validities: Arc<dyn DataService<Validity>>,
        rates: Arc<dyn DataService<Rate>>,
    ) -> Self {
        Self { validities, rates }
    }

    /// All validities, shortest first (months, then days)
    pub async fn list(&self) -> GymResult<Vec<Validity>> {
        let mut validities = self.validities.list().await?;
        validities.sort_by_key(|v| (v.months, v.days));
        Ok(validities)
    }

    pub async fn get(&self, id: &Uuid) -> GymResult<Validity> {
        self.validities
            .get(id)
            .await?
            .ok_or_else(|| GymError::not_found("Validity", *id))
    }

    async fn ensure_unique(&self, period: Period, exclude: Option<&Uuid>) -> GymResult<()> {
        let criteria = Criteria::new()
            .eq("months", period.months)
            .eq("days", period.days);
        let clash = self
            .validities
            .search(&criteria)
            .await?
            .into_iter()
            .any(|v| Some(&v.id) != exclude);

        if clash {
            return Err(ConflictError::DuplicateDuration {
                months: period.months,
                days: period.days,
            }
            .into());
        }
        Ok(())
    }

    pub async fn create(&self, period: Period) -> GymResult<Validity> {
        self.ensure_unique(period, None).await?;

        let mut validity = Validity::new(period);
        validity.relabel();
        let created = self.validities.create(validity).await?;

        tracing::info!(id = %created.id, label = %created.validity, "validity created");
        Ok(created)
    }

    pub async fn update(&self, id: &Uuid, period: Period) -> GymResult<Validity> {
        let mut validity = self.get(id).await?;
        self.ensure_unique(period, Some(id)).await?;

        validity.set_period(period);
        validity.relabel();
        let updated = self.validities.update(id, validity).await?;

        tracing::info!(id = %updated.id, label = %updated.validity, "validity updated");
        Ok(updated)
    }

    /// Refuses while any rate still references the validity
    pub async fn delete(&self, id: &Uuid) -> GymResult<()> {
        self.get(id).await?;

        let rate_count = self
            .rates
            .count(&Criteria::new().eq("validity", id.to_string()))
            .await?;
        if rate_count > 0 {
            return Err(ConflictError::ValidityInUse {
                id: *id,
                rate_count,
            }
            .into());
        }

        self.validities.delete(id).await?;
        tracing::info!(id = %id, "validity deleted");
        Ok(())
    }
}
