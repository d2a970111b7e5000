//! Interactive prompt flow using cliclack (Charm-style inline prompts)
//!
//! Only available when the `tui` feature is enabled; headless consumers
//! of the core crate can turn it off and drive the library directly.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
