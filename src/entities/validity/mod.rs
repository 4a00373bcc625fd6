//! Validity entity: membership durations with a derived label

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod normalizer;
pub mod service;

pub use descriptor::ValidityDescriptor;
pub use model::{Period, Validity, ValidityInput};
pub use normalizer::validity_label;
pub use service::ValidityService;
