//! The bound flag set: a thin wrapper over the underlying `clap` engine
//! plus the bindings that alias record storage.
//!
//! `clap` owns tokenization, shorthand handling and unknown-flag
//! detection; values travel through it as plain strings and are parsed by
//! the typed bindings, so malformed values surface as this crate's own
//! parse errors. Its automatic help flag is disabled: rendering help
//! screens is out of scope here.

use clap::{Arg, ArgAction, Command};

use crate::builder::Builder;
use crate::config::ErrorHandling;
use crate::env;
use crate::error::Error;
use crate::value::{Atom, FlagValue, Scalar, Seq};

/// Registration details for one flag, assembled by the walker.
pub(crate) struct Registration {
    pub name: String,
    pub shorthand: Option<char>,
    pub help: String,
}

/// One registered flag and the binding that aliases its field's storage.
pub(crate) struct Flag<'a> {
    pub(crate) name: String,
    pub(crate) shorthand: Option<char>,
    pub(crate) help: String,
    pub(crate) value: Box<dyn FlagValue + 'a>,
}

/// Read-only view of a registered flag.
pub struct FlagInfo<'s> {
    /// Flag name (dotted for nested fields).
    pub name: &'s str,
    /// One-character shorthand, when registered.
    pub shorthand: Option<char>,
    /// Help text, including the derived environment variable name when
    /// environment support is on.
    pub help: &'s str,
    /// Value type identifier.
    pub kind: &'static str,
    /// The current value, rendered.
    pub value: String,
}

/// The flag collection produced for one record.
///
/// Every flag aliases the original record's field storage, so parsing
/// mutates the record in place; there is no apply step. The set borrows
/// the record (and its builder) for its whole lifetime.
pub struct FlagSet<'a> {
    command: Command,
    flags: Vec<Flag<'a>>,
    builder: &'a Builder,
}

impl<'a> FlagSet<'a> {
    pub(crate) fn new(name: &str, builder: &'a Builder) -> Self {
        Self {
            command: Command::new(name.to_owned())
                .no_binary_name(true)
                .disable_help_flag(true),
            flags: Vec::new(),
            builder,
        }
    }

    /// The flag-set name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.command.get_name()
    }

    fn add(
        &mut self,
        value: Box<dyn FlagValue + 'a>,
        registration: Registration,
        takes_value: bool,
    ) {
        let Registration {
            name,
            shorthand,
            help,
        } = registration;
        if self.flags.iter().any(|flag| flag.name == name) {
            panic!("flag --{name} registered twice");
        }
        if let Some(short) = shorthand {
            if self.flags.iter().any(|flag| flag.shorthand == Some(short)) {
                panic!("shorthand -{short} registered twice");
            }
        }
        let mut arg = Arg::new(name.clone())
            .long(name.clone())
            .help(help.clone())
            .action(ArgAction::Append);
        if let Some(short) = shorthand {
            arg = arg.short(short);
        }
        if !takes_value {
            // Switch flags: `--flag` means true, `--flag=false` is allowed.
            arg = arg
                .num_args(0..=1)
                .default_missing_value("true")
                .require_equals(true);
        }
        let command = std::mem::replace(&mut self.command, Command::new(""));
        self.command = command.arg(arg);
        tracing::debug!(flag = %name, kind = value.kind(), "registered flag");
        self.flags.push(Flag {
            name,
            shorthand,
            help,
            value,
        });
    }

    fn scalar_var<T: Atom>(
        &mut self,
        target: &'a mut T,
        registration: Registration,
        takes_value: bool,
    ) {
        self.add(Box::new(Scalar(target)), registration, takes_value);
    }

    fn seq_var<T: Atom>(&mut self, target: &'a mut Vec<T>, registration: Registration) {
        self.add(Box::new(Seq::new(target)), registration, true);
    }

    pub(crate) fn bool_var(&mut self, target: &'a mut bool, registration: Registration) {
        self.scalar_var(target, registration, false);
    }

    pub(crate) fn f64_var(&mut self, target: &'a mut f64, registration: Registration) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn int_var(&mut self, target: &'a mut isize, registration: Registration) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn i64_var(&mut self, target: &'a mut i64, registration: Registration) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn uint_var(&mut self, target: &'a mut usize, registration: Registration) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn u64_var(&mut self, target: &'a mut u64, registration: Registration) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn duration_var(
        &mut self,
        target: &'a mut std::time::Duration,
        registration: Registration,
    ) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn string_var(&mut self, target: &'a mut String, registration: Registration) {
        self.scalar_var(target, registration, true);
    }

    pub(crate) fn bool_seq_var(&mut self, target: &'a mut Vec<bool>, registration: Registration) {
        self.seq_var(target, registration);
    }

    pub(crate) fn f64_seq_var(&mut self, target: &'a mut Vec<f64>, registration: Registration) {
        self.seq_var(target, registration);
    }

    pub(crate) fn int_seq_var(&mut self, target: &'a mut Vec<isize>, registration: Registration) {
        self.seq_var(target, registration);
    }

    pub(crate) fn i64_seq_var(&mut self, target: &'a mut Vec<i64>, registration: Registration) {
        self.seq_var(target, registration);
    }

    pub(crate) fn uint_seq_var(&mut self, target: &'a mut Vec<usize>, registration: Registration) {
        self.seq_var(target, registration);
    }

    pub(crate) fn u64_seq_var(&mut self, target: &'a mut Vec<u64>, registration: Registration) {
        self.seq_var(target, registration);
    }

    pub(crate) fn duration_seq_var(
        &mut self,
        target: &'a mut Vec<std::time::Duration>,
        registration: Registration,
    ) {
        self.seq_var(target, registration);
    }

    pub(crate) fn string_seq_var(
        &mut self,
        target: &'a mut Vec<String>,
        registration: Registration,
    ) {
        self.seq_var(target, registration);
    }

    /// Generic registration for a self-describing value.
    pub(crate) fn var(&mut self, target: &'a mut dyn FlagValue, registration: Registration) {
        self.add(Box::new(target), registration, true);
    }

    /// Parse an argument sequence, then apply environment overrides.
    ///
    /// Delegates tokenization to the underlying engine. A command-line
    /// failure returns immediately; no overlay is attempted. When
    /// environment support is on, every registered flag is then visited in
    /// registration order and a set, non-empty environment variable of the
    /// derived name overrides the command-line value. Overlay failures do
    /// not stop the overlay; the last one is returned.
    ///
    /// # Errors
    ///
    /// With [`ErrorHandling::Continue`], returns the parse or overlay
    /// error. The other modes exit or panic instead of returning.
    ///
    /// # Panics
    ///
    /// With [`ErrorHandling::Panic`], panics on any parse failure.
    pub fn parse<I, S>(&mut self, args: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = args.into_iter().map(Into::into).collect();
        match self.try_parse(&argv) {
            Ok(()) => Ok(()),
            Err(error) => match self.builder.config.handling {
                ErrorHandling::Continue => Err(error),
                ErrorHandling::Exit => match error {
                    Error::Cli(cli) => (*cli).exit(),
                    other => {
                        eprintln!("{other}");
                        std::process::exit(2);
                    }
                },
                ErrorHandling::Panic => panic!("{error}"),
            },
        }
    }

    fn try_parse(&mut self, argv: &[String]) -> Result<(), Error> {
        let matches = self
            .command
            .clone()
            .try_get_matches_from(argv)
            .map_err(|error| Error::Cli(Box::new(error)))?;
        for flag in &mut self.flags {
            let Some(values) = matches.get_many::<String>(&flag.name) else {
                continue;
            };
            for raw in values {
                flag.value.set(raw).map_err(|source| Error::InvalidValue {
                    flag: flag.name.clone(),
                    value: raw.clone(),
                    source,
                })?;
            }
        }
        if self.builder.config.env_support {
            env::overlay(&self.builder.config, &mut self.flags)?;
        }
        Ok(())
    }

    /// Apply a value to a registered flag by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlag`] when no such flag exists and
    /// [`Error::InvalidValue`] when the binding rejects the value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let flag = self
            .flags
            .iter_mut()
            .find(|flag| flag.name == name)
            .ok_or_else(|| Error::UnknownFlag {
                name: name.to_owned(),
            })?;
        flag.value.set(value).map_err(|source| Error::InvalidValue {
            flag: name.to_owned(),
            value: value.to_owned(),
            source,
        })
    }

    /// Iterate over all registered flags in registration order.
    pub fn flags(&self) -> impl Iterator<Item = FlagInfo<'_>> {
        self.flags.iter().map(|flag| FlagInfo {
            name: &flag.name,
            shorthand: flag.shorthand,
            help: &flag.help,
            kind: flag.value.kind(),
            value: flag.value.render(),
        })
    }

    /// Look up one registered flag by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FlagInfo<'_>> {
        self.flags().find(|flag| flag.name == name)
    }
}
