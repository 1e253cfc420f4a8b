//! Flag value contract and the typed adapters that implement it for the
//! built-in leaf kinds.
//!
//! [`FlagValue`] is the extension seam: any type implementing it is bound
//! through the engine's generic value registration, bypassing kind dispatch
//! entirely. The private [`Atom`] trait backs the built-in scalar and
//! sequence adapters.

use std::time::Duration;

use crate::error::ValueError;

/// A self-describing flag value.
///
/// Implement this for domain types (enumerations, endpoints, identifiers)
/// that should plug into flag binding with their own parsing and
/// validation. Implementations on record types take priority over nested
/// walking: such a record is bound as a single leaf value.
pub trait FlagValue {
    /// Parse `raw` and replace the current value.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not a valid rendition of the value;
    /// the previous value must be left in place.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Render the current value as text.
    fn render(&self) -> String;

    /// Short identifier for the value's type, shown in flag listings.
    fn kind(&self) -> &'static str;

    /// Optional self-description used as help text when the field carries
    /// no help tag.
    fn help_text(&self) -> Option<String> {
        None
    }

    /// Forget any accumulated parse state so the next successful `set`
    /// replaces the value wholesale instead of appending to it.
    ///
    /// Scalar values need no action; sequence values drop their
    /// replaced-defaults marker. Called before an environment override is
    /// applied.
    fn reset(&mut self) {}
}

impl<V: FlagValue + ?Sized> FlagValue for &mut V {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        (**self).set(raw)
    }

    fn render(&self) -> String {
        (**self).render()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn help_text(&self) -> Option<String> {
        (**self).help_text()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// A leaf scalar the engine knows how to parse and render.
pub(crate) trait Atom: Sized {
    const KIND: &'static str;
    const SEQ_KIND: &'static str;

    fn parse_atom(raw: &str) -> Result<Self, ValueError>;
    fn render_atom(&self) -> String;
}

macro_rules! numeric_atom {
    ($ty:ty, $kind:literal, $seq_kind:literal) => {
        impl Atom for $ty {
            const KIND: &'static str = $kind;
            const SEQ_KIND: &'static str = $seq_kind;

            fn parse_atom(raw: &str) -> Result<Self, ValueError> {
                raw.parse().map_err(Into::into)
            }

            fn render_atom(&self) -> String {
                self.to_string()
            }
        }
    };
}

numeric_atom!(f64, "float64", "[float64]");
numeric_atom!(isize, "int", "[int]");
numeric_atom!(i64, "int64", "[int64]");
numeric_atom!(usize, "uint", "[uint]");
numeric_atom!(u64, "uint64", "[uint64]");

impl Atom for bool {
    const KIND: &'static str = "bool";
    const SEQ_KIND: &'static str = "[bool]";

    fn parse_atom(raw: &str) -> Result<Self, ValueError> {
        match raw.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Ok(true),
            "0" | "f" | "false" => Ok(false),
            _ => Err(format!("invalid boolean value {raw:?}").into()),
        }
    }

    fn render_atom(&self) -> String {
        self.to_string()
    }
}

impl Atom for String {
    const KIND: &'static str = "string";
    const SEQ_KIND: &'static str = "[string]";

    fn parse_atom(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_owned())
    }

    fn render_atom(&self) -> String {
        self.clone()
    }
}

impl Atom for Duration {
    const KIND: &'static str = "duration";
    const SEQ_KIND: &'static str = "[duration]";

    fn parse_atom(raw: &str) -> Result<Self, ValueError> {
        parse_duration(raw)
    }

    fn render_atom(&self) -> String {
        format_duration(*self)
    }
}

/// Parse a unit-suffixed duration such as `250ms`, `10s` or `1h30m`.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`; segments may
/// carry fractional values (`1.5h`). The bare string `0` is accepted.
///
/// # Errors
///
/// Returns an error for empty input, unknown units, missing units, or
/// values out of range.
pub fn parse_duration(raw: &str) -> Result<Duration, ValueError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err("empty duration".into());
    }
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    let mut rest = text;
    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let split = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if split == 0 {
            return Err(format!("invalid duration {raw:?}").into());
        }
        let (number, tail) = rest.split_at(split);
        let value: f64 = number
            .parse()
            .map_err(|_| ValueError::from(format!("invalid duration {raw:?}")))?;
        let (scale, remainder) = duration_unit(tail)
            .ok_or_else(|| ValueError::from(format!("missing unit in duration {raw:?}")))?;
        let segment = Duration::try_from_secs_f64(value * scale)
            .map_err(|_| ValueError::from(format!("duration {raw:?} out of range")))?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| ValueError::from(format!("duration {raw:?} out of range")))?;
        rest = remainder;
    }
    Ok(total)
}

fn duration_unit(tail: &str) -> Option<(f64, &str)> {
    // "ms" must be probed before "m" and "s".
    let units: [(&str, f64); 7] = [
        ("ns", 1e-9),
        ("us", 1e-6),
        ("µs", 1e-6),
        ("ms", 1e-3),
        ("s", 1.0),
        ("m", 60.0),
        ("h", 3600.0),
    ];
    units
        .iter()
        .find_map(|(unit, scale)| tail.strip_prefix(unit).map(|rest| (*scale, rest)))
}

/// Render a duration with unit suffixes, inverse of [`parse_duration`].
#[must_use]
pub fn format_duration(value: Duration) -> String {
    if value.is_zero() {
        return "0s".to_owned();
    }
    if value < Duration::from_secs(1) {
        let nanos = value.subsec_nanos();
        return if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!("{}us", nanos / 1_000)
        } else {
            format!("{nanos}ns")
        };
    }
    let mut out = String::new();
    let mut secs = value.as_secs();
    let nanos = value.subsec_nanos();
    let hours = secs / 3600;
    secs %= 3600;
    let minutes = secs / 60;
    secs %= 60;
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if secs > 0 || nanos > 0 {
        if nanos == 0 {
            out.push_str(&format!("{secs}s"));
        } else {
            let mut frac = format!("{nanos:09}");
            while frac.ends_with('0') {
                frac.pop();
            }
            out.push_str(&format!("{secs}.{frac}s"));
        }
    }
    out
}

/// Adapter binding a scalar field's storage as a flag value.
pub(crate) struct Scalar<'a, T: Atom>(pub(crate) &'a mut T);

impl<T: Atom> FlagValue for Scalar<'_, T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        *self.0 = T::parse_atom(raw)?;
        Ok(())
    }

    fn render(&self) -> String {
        self.0.render_atom()
    }

    fn kind(&self) -> &'static str {
        T::KIND
    }
}

/// Adapter binding a sequence field's storage as an accumulating flag
/// value.
///
/// The first successful `set` after construction (or after [`reset`])
/// replaces the pre-existing default contents; later calls append. Each
/// raw value may itself be a comma-separated list, so one environment
/// variable can populate the whole sequence.
///
/// [`reset`]: FlagValue::reset
pub(crate) struct Seq<'a, T: Atom> {
    items: &'a mut Vec<T>,
    replaced: bool,
}

impl<'a, T: Atom> Seq<'a, T> {
    pub(crate) fn new(items: &'a mut Vec<T>) -> Self {
        Self {
            items,
            replaced: false,
        }
    }
}

impl<T: Atom> FlagValue for Seq<'_, T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let parsed = raw
            .split(',')
            .map(|part| T::parse_atom(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        if !self.replaced {
            self.items.clear();
            self.replaced = true;
        }
        self.items.extend(parsed);
        Ok(())
    }

    fn render(&self) -> String {
        let rendered: Vec<String> = self.items.iter().map(Atom::render_atom).collect();
        format!("[{}]", rendered.join(","))
    }

    fn kind(&self) -> &'static str {
        T::SEQ_KIND
    }

    fn reset(&mut self) {
        self.replaced = false;
    }
}
