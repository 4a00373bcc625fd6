//! Validity document and its request payload

use super::normalizer::validity_label;
use crate::core::error::{GymError, GymResult};
use crate::core::validation::filters::lenient_count;
use crate::{document_struct, impl_entity};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

document_struct! {
    /// A membership duration with its derived label
    pub struct Validity {
        pub months: u32,
        pub days: u32,
        /// Derived from `(months, days)`; never accepted from callers
        pub validity: String,
    }
}

impl_entity!(Validity, "validities", "Validity");

/// A `(months, days)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub months: u32,
    pub days: u32,
}

impl Period {
    pub fn new(months: u32, days: u32) -> Self {
        Self { months, days }
    }

    pub fn label(&self) -> String {
        validity_label(self.months, self.days)
    }
}

impl Validity {
    pub fn new(period: Period) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            months: period.months,
            days: period.days,
            validity: period.label(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.months, self.days)
    }

    /// Replace the duration and bump `updatedAt`
    pub fn set_period(&mut self, period: Period) {
        self.months = period.months;
        self.days = period.days;
        self.updated_at = Utc::now();
    }

    /// Recompute the stored label from the current counts
    pub fn relabel(&mut self) {
        self.validity = self.period().label();
    }
}

/// Body of create/update validity requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidityInput {
    #[serde(default, deserialize_with = "lenient_count")]
    pub months: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub days: u32,
}

impl ValidityInput {
    /// A stored duration needs at least one positive component
    pub fn into_period(self) -> GymResult<Period> {
        if self.months == 0 && self.days == 0 {
            return Err(GymError::invalid("Please enter at least days or months"));
        }
        Ok(Period::new(self.months, self.days))
    }
}
