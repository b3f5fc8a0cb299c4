//! Command-line handling for the proxy application.
//!
//! ```text
//! Registry → SwitchMap → clap Command → bind → ResolvedConfig
//! ```
//!
//! The registry is the only place switches are declared; the binder and the
//! help text are derived from it.

mod binder;
mod registry;

pub use binder::{bind, command, BindError};
pub use registry::{get_mapping, switch_registry, SwitchDef, SwitchMap};
