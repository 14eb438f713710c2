//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (`SessionClient`, `Store`).

pub mod http;
pub mod matrix;
pub mod store;
pub mod updates;
