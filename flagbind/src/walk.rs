//! Record traversal: the visitable [`Record`] contract produced by the
//! derive macro, and the walker that turns visited fields into flag
//! registrations.

use crate::bind::FieldTarget;
use crate::builder::Builder;
use crate::flagset::{FlagSet, Registration};
use crate::meta::{self, FieldMeta};

/// A structured value whose fields can be visited for binding.
///
/// Implemented via `#[derive(Record)]`; the derive reports every field in
/// declaration order together with its static metadata.
pub trait Record {
    /// The record type's name, used as a fallback flag-set name.
    fn type_name(&self) -> &'static str;

    /// Visit every field, handing the visitor a mutable alias of each
    /// field's storage.
    fn visit<'a>(&'a mut self, visitor: &mut dyn FieldVisitor<'a>);
}

/// Receiver for visited record fields.
pub trait FieldVisitor<'a> {
    /// Whether an absent optional field should be materialized with its
    /// default value before binding. True only for fields carrying an
    /// explicit flag-name tag; unannotated `None` fields are skipped.
    fn materialize_absent(&mut self, meta: &FieldMeta) -> bool;

    /// Bind one field.
    fn visit_field(&mut self, meta: &'static FieldMeta, target: FieldTarget<'a>);
}

/// Walks a record's field graph and registers flags for its leaves.
pub(crate) struct Walker<'w, 'a> {
    builder: &'a Builder,
    set: &'w mut FlagSet<'a>,
    prefix: String,
}

impl<'w, 'a> Walker<'w, 'a> {
    pub(crate) fn new(builder: &'a Builder, set: &'w mut FlagSet<'a>) -> Self {
        Self {
            builder,
            set,
            prefix: String::new(),
        }
    }
}

impl<'a> FieldVisitor<'a> for Walker<'_, 'a> {
    fn materialize_absent(&mut self, meta: &FieldMeta) -> bool {
        meta::resolve_name(&self.builder.config, meta, &self.prefix)
            .is_some_and(|resolved| resolved.annotated)
    }

    fn visit_field(&mut self, meta: &'static FieldMeta, target: FieldTarget<'a>) {
        let config = &self.builder.config;
        let Some(resolved) = meta::resolve_name(config, meta, &self.prefix) else {
            return;
        };

        if let FieldTarget::Nested(record) = target {
            let prefix = if meta.flatten {
                self.prefix.clone()
            } else {
                format!("{}.", resolved.name)
            };
            let mut child = Walker {
                builder: self.builder,
                set: &mut *self.set,
                prefix,
            };
            record.visit(&mut child);
            return;
        }

        let capability_help = if let FieldTarget::Custom(value) = &target {
            value.help_text()
        } else {
            None
        };
        let registration = Registration {
            shorthand: meta::shorthand(config, meta, &self.prefix),
            help: meta::help_text(config, meta, &resolved.name, capability_help),
            name: resolved.name,
        };

        match target {
            FieldTarget::Bool(v) => self.set.bool_var(v, registration),
            FieldTarget::F64(v) => self.set.f64_var(v, registration),
            FieldTarget::Int(v) => self.set.int_var(v, registration),
            FieldTarget::I64(v) => self.set.i64_var(v, registration),
            FieldTarget::Uint(v) => self.set.uint_var(v, registration),
            FieldTarget::U64(v) => self.set.u64_var(v, registration),
            FieldTarget::Duration(v) => self.set.duration_var(v, registration),
            FieldTarget::Text(v) => self.set.string_var(v, registration),
            FieldTarget::BoolSeq(v) => self.set.bool_seq_var(v, registration),
            FieldTarget::F64Seq(v) => self.set.f64_seq_var(v, registration),
            FieldTarget::IntSeq(v) => self.set.int_seq_var(v, registration),
            FieldTarget::I64Seq(v) => self.set.i64_seq_var(v, registration),
            FieldTarget::UintSeq(v) => self.set.uint_seq_var(v, registration),
            FieldTarget::U64Seq(v) => self.set.u64_seq_var(v, registration),
            FieldTarget::DurationSeq(v) => self.set.duration_seq_var(v, registration),
            FieldTarget::TextSeq(v) => self.set.string_seq_var(v, registration),
            FieldTarget::Custom(v) => self.set.var(v, registration),
            // Handled above; kept for exhaustiveness.
            FieldTarget::Nested(_) => {}
        }
    }
}
