//! Field metadata and the resolver that turns it into flag registrations.
//!
//! The derive macro emits one static [`FieldMeta`] per field; which tag
//! keys carry the flag name, shorthand and help text is decided at runtime
//! by the [`Config`], mirroring how serialization-style tags work.

use crate::config::Config;

/// Compile-time metadata for one record field.
pub struct FieldMeta {
    /// The raw field name as declared.
    pub name: &'static str,
    /// Tag key/value pairs from the field's `#[flag(...)]` attribute.
    pub tags: &'static [(&'static str, &'static str)],
    /// Whether the field is declared `pub`.
    pub public: bool,
    /// Whether the field is embedded (`#[flag(flatten)]`): its subtree is
    /// walked without a name prefix.
    pub flatten: bool,
}

impl FieldMeta {
    /// Look up a tag value by key.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }
}

/// Outcome of name resolution for a visited field.
pub(crate) struct ResolvedName {
    /// Full dotted flag name, prefix applied and normalized.
    pub name: String,
    /// Whether any configured flag-name tag matched.
    pub annotated: bool,
}

/// Resolve a field's external name, or `None` when the field (and any
/// subtree under it) is skipped.
///
/// Configured flag-name tags are consulted in order with the last match
/// winning. The sentinel value `-` excludes the field. Untagged fields are
/// only visible when declared `pub`, in which case the raw field name is
/// used.
pub(crate) fn resolve_name(
    config: &Config,
    meta: &FieldMeta,
    prefix: &str,
) -> Option<ResolvedName> {
    let mut name = meta.name;
    let mut annotated = false;
    for tag in &config.flag_name_tags {
        if let Some(value) = meta.tag(tag) {
            name = value;
            annotated = true;
        }
    }
    if name == "-" {
        return None;
    }
    if !annotated && !meta.public {
        return None;
    }
    Some(ResolvedName {
        name: config.normalize_name(&format!("{prefix}{name}")),
        annotated,
    })
}

/// Resolve a field's shorthand. Only top-level fields may carry one.
///
/// # Panics
///
/// Panics when the shorthand tag holds anything but a single character:
/// that is a defect in the record declaration, caught at build time.
pub(crate) fn shorthand(config: &Config, meta: &FieldMeta, prefix: &str) -> Option<char> {
    if !prefix.is_empty() {
        return None;
    }
    meta.tag(&config.shorthand_tag).map(|tag| {
        let mut chars = tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => panic!(
                "shorthand for field '{}' must be a single character, got {tag:?}",
                meta.name
            ),
        }
    })
}

/// Assemble help text: the help tag, else the value's self-description,
/// else a placeholder; prefixed with the derived environment variable name
/// when environment support is on.
pub(crate) fn help_text(
    config: &Config,
    meta: &FieldMeta,
    name: &str,
    capability: Option<String>,
) -> String {
    let base = meta
        .tag(&config.help_text_tag)
        .map(str::to_owned)
        .or(capability)
        .unwrap_or_else(|| "-".to_owned());
    if config.env_support {
        format!("ENV: {}\t{base}", config.env_name(name))
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorHandling;
    use rstest::rstest;

    fn config() -> Config {
        Config {
            handling: ErrorHandling::Continue,
            env_support: false,
            env_prefix: String::new(),
            flag_name_tags: vec!["json".to_owned(), "flag".to_owned()],
            ..Config::default()
        }
    }

    const fn meta(
        name: &'static str,
        tags: &'static [(&'static str, &'static str)],
        public: bool,
    ) -> FieldMeta {
        FieldMeta {
            name,
            tags,
            public,
            flatten: false,
        }
    }

    #[test]
    fn later_tags_override_earlier_ones() {
        let field = meta("addr", &[("json", "address"), ("flag", "listen")], true);
        let resolved = resolve_name(&config(), &field, "").expect("visible");
        assert_eq!(resolved.name, "listen");
        assert!(resolved.annotated);
    }

    #[test]
    fn earlier_tag_applies_when_later_is_absent() {
        let field = meta("addr", &[("json", "address,omitempty")], true);
        let resolved = resolve_name(&config(), &field, "").expect("visible");
        assert_eq!(resolved.name, "address");
    }

    #[rstest]
    #[case::excluded(&[("flag", "-")], true)]
    #[case::private_untagged(&[], false)]
    fn skips_field(#[case] tags: &'static [(&'static str, &'static str)], #[case] public: bool) {
        let field = meta("hidden", tags, public);
        assert!(resolve_name(&config(), &field, "").is_none());
    }

    #[test]
    fn private_field_with_tag_is_visible() {
        let field = meta("secret", &[("flag", "secret")], false);
        assert!(resolve_name(&config(), &field, "").is_some());
    }

    #[test]
    fn untagged_public_field_uses_raw_name() {
        let field = meta("Verbose", &[], true);
        let resolved = resolve_name(&config(), &field, "").expect("visible");
        assert_eq!(resolved.name, "Verbose");
        assert!(!resolved.annotated);
    }

    #[test]
    fn prefix_is_applied_before_normalization() {
        let field = meta("port", &[("flag", "port")], true);
        let resolved = resolve_name(&config(), &field, "server.").expect("visible");
        assert_eq!(resolved.name, "server.port");
    }

    #[test]
    fn shorthand_ignored_under_prefix() {
        let cfg = config();
        let field = meta("port", &[("short", "p")], true);
        assert_eq!(shorthand(&cfg, &field, ""), Some('p'));
        assert_eq!(shorthand(&cfg, &field, "server."), None);
    }

    #[test]
    #[should_panic(expected = "single character")]
    fn multi_character_shorthand_is_a_build_fault() {
        let field = meta("port", &[("short", "po")], true);
        shorthand(&config(), &field, "");
    }

    #[test]
    fn help_text_prefers_tag_then_capability_then_placeholder() {
        let cfg = config();
        let tagged = meta("a", &[("help", "from tag")], true);
        assert_eq!(help_text(&cfg, &tagged, "a", Some("self".into())), "from tag");
        let untagged = meta("a", &[], true);
        assert_eq!(help_text(&cfg, &untagged, "a", Some("self".into())), "self");
        assert_eq!(help_text(&cfg, &untagged, "a", None), "-");
    }

    #[test]
    fn help_text_carries_env_name_when_enabled() {
        let mut cfg = config();
        cfg.env_support = true;
        cfg.env_prefix = "APP_".to_owned();
        let field = meta("port", &[("help", "listen port")], true);
        assert_eq!(
            help_text(&cfg, &field, "server.port", None),
            "ENV: APP_SERVER_PORT\tlisten port"
        );
    }
}
