//! User entity: staff, members and the admin account

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;

pub use descriptor::UserDescriptor;
pub use model::{CreateUserInput, PublicUser, UpdateProfileInput, User, UserSummary};
pub use service::UserService;
