//! The environment overlay: a post-parse pass re-applying values from the
//! process environment as overrides.

use crate::config::Config;
use crate::error::Error;
use crate::flagset::Flag;

/// Visit every registered flag in order and, when a non-empty environment
/// variable of the derived name is set, apply it over the command-line
/// value.
///
/// A failing override does not stop the pass: remaining flags are still
/// attempted so one bad variable cannot hide problems with others. The
/// last failure is returned, wrapped with the variable name and value.
pub(crate) fn overlay(config: &Config, flags: &mut [Flag<'_>]) -> Result<(), Error> {
    let mut failure = None;
    for flag in flags.iter_mut() {
        let env_name = config.env_name(&flag.name);
        let Ok(raw) = std::env::var(&env_name) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        flag.value.reset();
        match flag.value.set(&raw) {
            Ok(()) => {
                tracing::debug!(env = %env_name, flag = %flag.name, "environment override applied");
            }
            Err(source) => {
                failure = Some(Error::EnvOverride {
                    name: env_name,
                    value: raw.clone(),
                    source: Box::new(Error::InvalidValue {
                        flag: flag.name.clone(),
                        value: raw,
                        source,
                    }),
                });
            }
        }
    }
    failure.map_or(Ok(()), Err)
}
