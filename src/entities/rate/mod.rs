//! Rate entity: named prices bound to a validity

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;

pub use descriptor::RateDescriptor;
pub use model::{Rate, RateDraft, RateInput, RateView};
pub use service::RateService;
