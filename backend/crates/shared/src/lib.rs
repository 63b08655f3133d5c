//! Shared Kernel - vocabulary every catalog crate agrees on
//!
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP classification
//! - Typed integer identifiers for catalog entities
//!
//! Only things whose meaning is identical in `auth`, `catalog` and the API
//! binary belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
