// Services layer - Business logic and orchestration
pub mod crypto;
pub mod permissions;
pub mod scheduling;
pub mod token_service;

pub use permissions::PermissionTable;
pub use scheduling::ConflictPolicy;
pub use token_service::TokenService;
