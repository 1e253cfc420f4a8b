//! Error types for flag binding and parsing.

use thiserror::Error;

/// Open error type returned by value parsers, including user-defined
/// [`FlagValue`](crate::FlagValue) implementations.
pub type ValueError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported while parsing command-line arguments or applying
/// environment overrides.
///
/// Programmer errors (duplicate registrations, unsupported field types)
/// are not represented here: they abort the build step instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The underlying engine rejected the argument sequence.
    #[error("failed to parse command-line arguments: {0}")]
    Cli(#[from] Box<clap::Error>),

    /// A flag received a value its binding could not parse.
    #[error("invalid value '{value}' for --{flag}: {source}")]
    InvalidValue {
        /// Name of the flag that rejected the value.
        flag: String,
        /// The raw value as supplied.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ValueError,
    },

    /// A value was addressed to a flag that was never registered.
    #[error("no flag registered as --{name}")]
    UnknownFlag {
        /// The name that failed to resolve.
        name: String,
    },

    /// An environment variable carried a value the flag rejected.
    #[error("environment variable {name}={value}: {source}")]
    EnvOverride {
        /// Derived environment variable name.
        name: String,
        /// The offending value.
        value: String,
        /// The underlying flag error.
        #[source]
        source: Box<Error>,
    },
}
