//! Argument binder — raw args → resolved configuration.
//!
//! The clap command is generated from the switch registry, so adding a row
//! there is all it takes to bind a new switch.

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;
use tracing::{debug, warn};

use crate::args::registry::{get_mapping, switch_registry, SwitchMap};
use crate::config::{ConfigKey, ResolvedConfig};

/// Errors that can occur when binding the command line.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("Unknown switch '{0}'")]
    UnknownSwitch(String),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("Switch '{switch}' requires a value for {key}")]
    MissingValue {
        switch: &'static str,
        key: ConfigKey,
    },

    #[error("Argument is not valid UTF-8")]
    InvalidUtf8,

    /// `--help` or `--version` was requested; carries the rendered text.
    #[error("{0}")]
    DisplayRequested(String),

    #[error("Failed to parse arguments: {0}")]
    Parse(#[source] clap::Error),
}

impl BindError {
    /// Whether this is a help/version request rather than a failure.
    pub fn is_display_request(&self) -> bool {
        matches!(self, BindError::DisplayRequested(_))
    }
}

/// Build the clap command for the switch registry.
pub fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Binds rebuild request switches to configuration keys")
        .args_override_self(true);

    for def in switch_registry() {
        let mut arg = Arg::new(def.key.as_str())
            .long(def.key.as_str())
            .value_name(def.value_name)
            .help(def.description)
            .action(ArgAction::Set)
            .num_args(1)
            .allow_hyphen_values(true)
            .required(false);
        if let Some(short) = def.short() {
            arg = arg.short(short);
        }
        cmd = cmd.arg(arg);
    }

    cmd
}

/// Bind an argument vector (program name first) to a [`ResolvedConfig`].
pub fn bind<I, T>(args: I) -> Result<ResolvedConfig, BindError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let map = get_mapping();
    let matches = command().try_get_matches_from(args).map_err(|err| {
        let err = classify_error(err, map);
        if !err.is_display_request() {
            warn!(error = %err, "failed to bind command line");
        }
        err
    })?;

    let config = ResolvedConfig::from_pairs(bound_values(&matches));
    debug!(
        ?config,
        missing = ?config.missing_keys(),
        "bound command line"
    );
    Ok(config)
}

fn bound_values(matches: &ArgMatches) -> Vec<(ConfigKey, String)> {
    switch_registry()
        .iter()
        .filter_map(|def| {
            matches
                .get_one::<String>(def.key.as_str())
                .map(|value| (def.key, value.clone()))
        })
        .collect()
}

fn classify_error(err: clap::Error, map: &SwitchMap) -> BindError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            BindError::DisplayRequested(err.render().to_string())
        }
        ErrorKind::UnknownArgument => match invalid_arg(&err) {
            Some(arg) if arg.starts_with('-') => BindError::UnknownSwitch(arg),
            Some(arg) => BindError::UnexpectedArgument(arg),
            None => BindError::Parse(err),
        },
        ErrorKind::InvalidValue | ErrorKind::NoEquals => {
            // The context names the arg as rendered in usage: "--InputFilepath <PATH>".
            let key = invalid_arg(&err)
                .as_deref()
                .and_then(|arg| arg.split_whitespace().next())
                .and_then(|flag| map.resolve_flag(flag));
            match key {
                Some(key) => BindError::MissingValue {
                    switch: map.switch_for(key),
                    key,
                },
                None => BindError::Parse(err),
            }
        }
        ErrorKind::InvalidUtf8 => BindError::InvalidUtf8,
        _ => BindError::Parse(err),
    }
}

fn invalid_arg(err: &clap::Error) -> Option<String> {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("cloud-proxy-app")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn command_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn command_exposes_one_arg_per_switch() {
        let cmd = command();
        let shorts: Vec<_> = cmd.get_arguments().filter_map(|a| a.get_short()).collect();
        assert!(shorts.contains(&'i'));
        assert!(shorts.contains(&'o'));
        assert!(shorts.contains(&'f'));
    }

    #[test]
    fn binds_all_three_switches() {
        let config = bind(argv(&["-f", "id-1", "-i", "/in", "-o", "/out"])).unwrap();
        assert_eq!(config.file_id.as_deref(), Some("id-1"));
        assert_eq!(config.input_filepath.as_deref(), Some(Path::new("/in")));
        assert_eq!(config.output_filepath.as_deref(), Some(Path::new("/out")));
    }

    #[test]
    fn no_args_binds_nothing() {
        let config = bind(argv(&[])).unwrap();
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn trailing_switch_is_missing_value() {
        let err = bind(argv(&["-o", "/out", "-i"])).unwrap_err();
        assert!(
            matches!(
                err,
                BindError::MissingValue {
                    switch: "-i",
                    key: ConfigKey::InputFilepath
                }
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn hyphen_value_binds_verbatim() {
        let config = bind(argv(&["-f", "-abc"])).unwrap();
        assert_eq!(config.file_id.as_deref(), Some("-abc"));
    }

    #[test]
    fn help_is_a_display_request() {
        let err = bind(argv(&["--help"])).unwrap_err();
        assert!(err.is_display_request());
        let text = err.to_string();
        assert!(text.contains("--InputFilepath"));
        assert!(text.contains("Path of the file to rebuild"));
    }
}
