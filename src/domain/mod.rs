//! # Domain Layer
//!
//! Core definitions, types, and traits of the dispatch core.
//! Independent of the Matrix SDK, serving as the contract for other layers.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;
