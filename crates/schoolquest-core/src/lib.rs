//! # schoolquest-core
//!
//! Core crate for the SchoolQuest companion. Contains configuration
//! schemas, typed identifiers, user roles, the XP/level system, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other SchoolQuest crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
