//! Authentication endpoints

pub mod descriptor;
pub mod handlers;
pub mod service;

pub use descriptor::AuthDescriptor;
pub use service::{AuthService, BootstrapAdmin, Credentials};
