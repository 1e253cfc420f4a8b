//! The top-level entry point pairing a flag-set name with a
//! [`Config`].

use crate::config::Config;
use crate::flagset::FlagSet;
use crate::walk::{Record, Walker};

/// Builds bound flag sets from records.
///
/// A builder is stateless across calls: one builder may produce several
/// independent flag sets. Adjust [`Config`] fields freely before calling
/// [`build`](Builder::build).
pub struct Builder {
    /// Flag-set name; when empty, the record's type name is used.
    pub name: String,
    /// Naming and behaviour configuration.
    pub config: Config,
}

impl Builder {
    /// A builder named after the current executable, with default
    /// configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: std::env::args().next().unwrap_or_default(),
            config: Config::default(),
        }
    }

    /// Walk `record` and produce a flag set bound to its fields.
    ///
    /// The record must be passed by mutable reference: every registered
    /// flag aliases the field it was derived from, so parsing mutates the
    /// record in place. Unsupported field types are rejected when the
    /// record's `Record` derive is compiled, not here.
    ///
    /// # Panics
    ///
    /// Panics on defects in the record declaration discovered during
    /// registration: duplicate flag names or shorthands, or a
    /// multi-character shorthand tag.
    pub fn build<'a, R: Record + ?Sized>(&'a self, record: &'a mut R) -> FlagSet<'a> {
        let name = if self.name.is_empty() {
            record.type_name().to_owned()
        } else {
            self.name.clone()
        };
        let mut set = FlagSet::new(&name, self);
        let mut walker = Walker::new(self, &mut set);
        record.visit(&mut walker);
        set
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
