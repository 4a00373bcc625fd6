//! Rate document, its joined view and request payload

use crate::core::error::GymResult;
use crate::core::validation::extractor::parse_id;
use crate::core::validation::filters::{lenient_number, non_empty, trimmed};
use crate::entities::validity::Validity;
use crate::{document_struct, impl_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

document_struct! {
    /// A named price bound to one validity
    pub struct Rate {
        pub name: String,
        pub amount: f64,
        /// Id of the referenced validity
        pub validity: Uuid,
    }
}

impl_entity!(Rate, "rates", "Rate");

impl Rate {
    pub fn new(name: String, amount: f64, validity: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
            validity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every client-supplied field
    pub fn apply(&mut self, draft: RateDraft) {
        self.name = draft.name;
        self.amount = draft.amount;
        self.validity = draft.validity;
        self.updated_at = Utc::now();
    }

    /// Join with the referenced validity; `None` when it no longer exists
    pub fn joined(self, validity: Option<Validity>) -> RateView {
        RateView {
            id: self.id,
            name: self.name,
            amount: self.amount,
            validity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Rate as returned to clients, with the validity document inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub validity: Option<Validity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of create/update rate requests
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RateInput {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Rate name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(
        required(message = "Amount is required"),
        range(min = 1.0, message = "Amount must be greater than 0")
    )]
    pub amount: Option<f64>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(required(message = "Validity is required"))]
    pub validity: Option<String>,
}

/// Validated rate fields with the validity reference parsed
#[derive(Debug, Clone, PartialEq)]
pub struct RateDraft {
    pub name: String,
    pub amount: f64,
    pub validity: Uuid,
}

impl RateInput {
    /// Convert an already validated input; fails only on a malformed validity id
    pub fn into_draft(self) -> GymResult<RateDraft> {
        let validity = parse_id(self.validity.as_deref().unwrap_or_default())?;
        Ok(RateDraft {
            name: self.name,
            amount: self.amount.unwrap_or_default(),
            validity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::validity::Period;
    use serde_json::json;

    fn input(value: serde_json::Value) -> RateInput {
        serde_json::from_value(value).unwrap()
    }

    fn messages(input: &RateInput) -> Vec<String> {
        let err: crate::core::error::ValidationError = input.validate().unwrap_err().into();
        match err {
            crate::core::error::ValidationError::FieldErrors(fields) => {
                fields.into_iter().map(|f| f.message).collect()
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_amount_lower_bound() {
        let validity = Uuid::new_v4().to_string();

        let zero = input(json!({"name": "Basic", "amount": 0, "validity": validity}));
        assert_eq!(messages(&zero), vec!["Amount must be greater than 0"]);

        let one = input(json!({"name": "Basic", "amount": "1", "validity": validity}));
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let empty = input(json!({"name": "   "}));
        assert_eq!(
            messages(&empty),
            vec![
                "Amount is required",
                "Rate name is required",
                "Validity is required"
            ]
        );
    }

    #[test]
    fn test_into_draft_parses_validity() {
        let id = Uuid::new_v4();
        let draft = input(json!({"name": " Basic ", "amount": 500, "validity": id.to_string()}))
            .into_draft()
            .unwrap();
        assert_eq!(
            draft,
            RateDraft {
                name: "Basic".to_string(),
                amount: 500.0,
                validity: id
            }
        );

        let bad = input(json!({"name": "Basic", "amount": 500, "validity": "nope"}));
        assert_eq!(bad.into_draft().unwrap_err().error_code(), "INVALID_ID");
    }

    #[test]
    fn test_joined_view_inlines_validity() {
        let validity = Validity::new(Period::new(1, 0));
        let rate = Rate::new("Basic".to_string(), 500.0, validity.id);

        let view = serde_json::to_value(rate.clone().joined(Some(validity))).unwrap();
        assert_eq!(view["validity"]["validity"], json!("1 Month"));
        assert_eq!(view["_id"], json!(rate.id.to_string()));

        let dangling = serde_json::to_value(rate.joined(None)).unwrap();
        assert!(dangling["validity"].is_null());
    }
}
