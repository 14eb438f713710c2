//! # Command Handlers
//!
//! Built-in commands. `builtin()` is the registration table the registry is
//! loaded from at startup; add a module and list its `unit()` here.

pub mod add;
pub mod help;
pub mod kick;
pub mod ping;
pub mod tid;
pub mod uid;

use crate::application::registry::CommandUnit;

pub fn builtin() -> Vec<CommandUnit> {
    vec![
        add::unit(),
        help::unit(),
        kick::unit(),
        ping::unit(),
        tid::unit(),
        uid::unit(),
    ]
}
