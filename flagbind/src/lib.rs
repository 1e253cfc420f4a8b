//! Declarative binding of record fields to command-line flags and
//! environment variables.
//!
//! Deriving [`Record`] on a configuration struct lets a [`Builder`] walk
//! its fields, derive flag names, shorthands and help text from
//! `#[flag(...)]` tags, and register every field with the underlying
//! engine bound directly to the field's storage, so parsing mutates the
//! original struct in place. After a successful parse, an environment
//! overlay applies derived environment variables as overrides.
//!
//! ```
//! use flagbind::{Builder, Config, ErrorHandling, Record};
//!
//! #[derive(Record, Default)]
//! struct Settings {
//!     #[flag(flag = "name", short = "n", help = "display name")]
//!     name: String,
//!     #[flag(flag = "port", help = "listen port")]
//!     port: i64,
//! }
//!
//! # fn main() -> Result<(), flagbind::Error> {
//! let mut settings = Settings::default();
//! let builder = Builder {
//!     name: "demo".to_owned(),
//!     config: Config {
//!         handling: ErrorHandling::Continue,
//!         env_support: false,
//!         ..Config::default()
//!     },
//! };
//! let mut flags = builder.build(&mut settings);
//! flags.parse(["--name", "svc", "--port", "8080"])?;
//! drop(flags);
//! assert_eq!(settings.name, "svc");
//! assert_eq!(settings.port, 8080);
//! # Ok(())
//! # }
//! ```
//!
//! Domain types plug into the same pipeline by implementing
//! [`FlagValue`]; such a type is bound as a single leaf value even when
//! it is itself a record. Nested record fields flatten their flag names
//! under a dotted prefix unless marked `#[flag(flatten)]`.

pub use flagbind_macros::Record;

mod bind;
mod builder;
mod config;
mod env;
mod error;
mod flagset;
mod meta;
mod value;
mod walk;

pub use bind::{BindCustom, BindField, Bindable, FieldTarget, Probe};
pub use builder::Builder;
pub use config::{Config, ErrorHandling, NameFn};
pub use error::{Error, ValueError};
pub use flagset::{FlagInfo, FlagSet};
pub use meta::FieldMeta;
pub use value::{FlagValue, format_duration, parse_duration};
pub use walk::{FieldVisitor, Record};
