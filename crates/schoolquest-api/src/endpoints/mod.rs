//! Typed wrappers over the documented HTTP contract, one module per
//! resource.

pub mod auth;
pub mod clans;
pub mod missions;
pub mod mural;
pub mod push;
pub mod shop;
