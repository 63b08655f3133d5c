//! Value Object Module

pub mod account_name;
pub mod account_password;
pub mod email;
pub mod role_name;
pub mod user_role;
