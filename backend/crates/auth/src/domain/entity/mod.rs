//! Entity Module

pub mod account;
pub mod principal;
pub mod role;

pub use account::{Account, NewAccount};
pub use principal::Principal;
pub use role::{NewRole, Role};
