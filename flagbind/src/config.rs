//! Builder configuration: naming rules, environment support and error
//! handling mode.

/// Caller-supplied naming function, e.g. for custom environment variable
/// derivation.
pub type NameFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// How the flag set reacts to a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Return the error to the caller.
    Continue,
    /// Report the error and exit the process.
    #[default]
    Exit,
    /// Panic with the error.
    Panic,
}

/// Settings consulted while walking a record and while parsing.
///
/// All fields are public and may be adjusted freely before
/// [`Builder::build`](crate::Builder::build) is called; the configuration
/// is read-only during traversal and parsing.
pub struct Config {
    /// Parse failure reaction.
    pub handling: ErrorHandling,
    /// Whether the environment overlay runs after a successful parse.
    pub env_support: bool,
    /// Prefix prepended by the default environment name derivation.
    pub env_prefix: String,
    /// Custom environment name derivation; overrides the default
    /// (prefix + upper-cased flag name with `-` and `.` replaced by `_`).
    pub env_name_fn: Option<NameFn>,
    /// Tag keys consulted for the external flag name, in order; the last
    /// matching tag wins.
    pub flag_name_tags: Vec<String>,
    /// Custom flag-name normalization; overrides the default, which
    /// truncates at the first comma so serialization-style tag values
    /// such as `addr,omitempty` yield `addr`.
    pub flag_name_fn: Option<NameFn>,
    /// Tag key consulted for the one-character shorthand.
    pub shorthand_tag: String,
    /// Tag key consulted for help text.
    pub help_text_tag: String,
}

impl Default for Config {
    /// Zero-configuration defaults: `flag`/`short`/`help` tags,
    /// environment support on, exit on parse errors. The ambient
    /// `ENV_PREFIX` variable seeds the environment prefix; reading it
    /// happens here, once, rather than in hidden global state.
    fn default() -> Self {
        Self {
            handling: ErrorHandling::default(),
            env_support: true,
            env_prefix: std::env::var("ENV_PREFIX").unwrap_or_default(),
            env_name_fn: None,
            flag_name_tags: vec!["flag".to_owned()],
            flag_name_fn: None,
            shorthand_tag: "short".to_owned(),
            help_text_tag: "help".to_owned(),
        }
    }
}

impl Config {
    /// Derive the environment variable name for a flag.
    #[must_use]
    pub fn env_name(&self, flag: &str) -> String {
        if let Some(custom) = &self.env_name_fn {
            return custom(flag);
        }
        let upper = flag.to_uppercase().replace(['-', '.'], "_");
        format!("{}{upper}", self.env_prefix)
    }

    /// Normalize a resolved flag name.
    #[must_use]
    pub fn normalize_name(&self, raw: &str) -> String {
        if let Some(custom) = &self.flag_name_fn {
            return custom(raw);
        }
        match raw.split_once(',') {
            Some((head, _)) => head.trim().to_owned(),
            None => raw.to_owned(),
        }
    }
}
