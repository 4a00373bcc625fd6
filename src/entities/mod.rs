//! Entity modules and the macros they are built with

pub mod macros;

pub mod auth;
pub mod rate;
pub mod user;
pub mod validity;

pub use auth::AuthDescriptor;
pub use rate::{Rate, RateDescriptor};
pub use user::{User, UserDescriptor};
pub use validity::{Validity, ValidityDescriptor};
