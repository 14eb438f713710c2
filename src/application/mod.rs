//! # Application Layer
//!
//! The dispatch core: command registry, identity bootstrap, the per-event
//! interaction facade, body classification and the router tying them together.

pub mod identity;
pub mod interaction;
pub mod parsing;
pub mod registry;
pub mod router;
