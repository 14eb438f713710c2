//! # Interface Layer
//!
//! Command handlers invoked by the router.

pub mod commands;
