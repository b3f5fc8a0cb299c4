mod types;

pub use types::{ConfigKey, ResolvedConfig};
