//! Validation and filtering system
//!
//! Request payloads are normalized by serde filters, checked by
//! `validator` rules, and extracted through [`Validated`] so handlers only
//! ever see well-formed input.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::{EntityId, JsonBody, Validated};
