//! Application Layer
//!
//! Use cases and application services.

pub mod authorization;
pub mod config;
pub mod consistency_guard;
pub mod delete_account;
pub mod login;
pub mod logout;
pub mod principal_resolver;
pub mod register;
pub mod roles;
pub mod token_codec;
pub mod update_account;

// Re-exports
pub use authorization::{Action, Allow, Requirement, authorize, authorize_action};
pub use config::AuthConfig;
pub use consistency_guard::{Guarded, guarded_insert};
pub use delete_account::DeleteAccountUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use principal_resolver::PrincipalResolver;
pub use register::{RegisterInput, RegisterUseCase};
pub use roles::RoleUseCase;
pub use token_codec::{Token, TokenClaims, TokenCodec, TokenError};
pub use update_account::{UpdateAccountInput, UpdateAccountUseCase};
