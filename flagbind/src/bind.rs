//! Field dispatch: the closed union of bindable storage shapes and the
//! probe that resolves a field into it.
//!
//! Resolution order for a field of type `T`:
//!
//! 1. `T: FlagValue`: the field opts out of generic handling and is bound
//!    through the engine's generic value registration, even when `T` is a
//!    record.
//! 2. `T: Bindable`: built-in leaf kinds, their `Vec` sequences, and
//!    derived records (which dispatch to recursive walking).
//!
//! Anything else fails to compile: an unsupported field type is a defect
//! in the record declaration and must never silently receive a flag. The
//! precedence is decided by method resolution on [`Probe`]: generated code
//! calls `(&probe).resolve()`, and the [`BindCustom`] impl (on `Probe`) is
//! found before the [`BindField`] impl (on `&Probe`).

use std::cell::Cell;
use std::time::Duration;

use crate::value::FlagValue;
use crate::walk::Record;

/// Mutable alias into a record field, tagged with its binding kind.
///
/// Every variant borrows the caller's storage directly, so flag mutation
/// is record mutation with no copy-back step.
pub enum FieldTarget<'a> {
    /// Plain switch flag.
    Bool(&'a mut bool),
    /// 64-bit float flag.
    F64(&'a mut f64),
    /// Machine-width signed integer flag.
    Int(&'a mut isize),
    /// 64-bit signed integer flag.
    I64(&'a mut i64),
    /// Machine-width unsigned integer flag.
    Uint(&'a mut usize),
    /// 64-bit unsigned integer flag.
    U64(&'a mut u64),
    /// Duration flag with unit-suffixed values.
    Duration(&'a mut Duration),
    /// Text flag.
    Text(&'a mut String),
    /// Accumulating switch sequence.
    BoolSeq(&'a mut Vec<bool>),
    /// Accumulating float sequence.
    F64Seq(&'a mut Vec<f64>),
    /// Accumulating machine-width integer sequence.
    IntSeq(&'a mut Vec<isize>),
    /// Accumulating 64-bit integer sequence.
    I64Seq(&'a mut Vec<i64>),
    /// Accumulating machine-width unsigned sequence.
    UintSeq(&'a mut Vec<usize>),
    /// Accumulating 64-bit unsigned sequence.
    U64Seq(&'a mut Vec<u64>),
    /// Accumulating duration sequence.
    DurationSeq(&'a mut Vec<Duration>),
    /// Accumulating text sequence.
    TextSeq(&'a mut Vec<String>),
    /// A self-describing value bound through the generic registration.
    Custom(&'a mut dyn FlagValue),
    /// A nested record to walk recursively.
    Nested(&'a mut dyn Record),
}

/// Storage shapes with a built-in [`FieldTarget`] mapping.
///
/// Derived records also implement this (dispatching to
/// [`FieldTarget::Nested`]); a `#[derive(Record)]` emits the impl.
pub trait Bindable {
    /// Tag this storage location with its binding kind.
    fn field_target(&mut self) -> FieldTarget<'_>;
}

macro_rules! bindable {
    ($ty:ty, $variant:ident) => {
        impl Bindable for $ty {
            fn field_target(&mut self) -> FieldTarget<'_> {
                FieldTarget::$variant(self)
            }
        }
    };
}

bindable!(bool, Bool);
bindable!(f64, F64);
bindable!(isize, Int);
bindable!(i64, I64);
bindable!(usize, Uint);
bindable!(u64, U64);
bindable!(Duration, Duration);
bindable!(String, Text);
bindable!(Vec<bool>, BoolSeq);
bindable!(Vec<f64>, F64Seq);
bindable!(Vec<isize>, IntSeq);
bindable!(Vec<i64>, I64Seq);
bindable!(Vec<usize>, UintSeq);
bindable!(Vec<u64>, U64Seq);
bindable!(Vec<Duration>, DurationSeq);
bindable!(Vec<String>, TextSeq);

/// Single-use wrapper through which generated code resolves a field.
pub struct Probe<'a, T: ?Sized>(Cell<Option<&'a mut T>>);

impl<'a, T: ?Sized> Probe<'a, T> {
    /// Wrap a mutable alias of a field's storage.
    pub fn new(target: &'a mut T) -> Self {
        Self(Cell::new(Some(target)))
    }

    fn take(&self) -> &'a mut T {
        match self.0.take() {
            Some(target) => target,
            None => panic!("field probe resolved twice"),
        }
    }
}

/// Preferred resolution: the field type implements [`FlagValue`].
pub trait BindCustom<'a> {
    /// Resolve the probed field into a [`FieldTarget`].
    fn resolve(&self) -> FieldTarget<'a>;
}

impl<'a, T: FlagValue> BindCustom<'a> for Probe<'a, T> {
    fn resolve(&self) -> FieldTarget<'a> {
        FieldTarget::Custom(self.take())
    }
}

/// Fallback resolution through the built-in [`Bindable`] kinds.
pub trait BindField<'a> {
    /// Resolve the probed field into a [`FieldTarget`].
    fn resolve(&self) -> FieldTarget<'a>;
}

impl<'a, T: Bindable> BindField<'a> for &Probe<'a, T> {
    fn resolve(&self) -> FieldTarget<'a> {
        Bindable::field_target(self.take())
    }
}
