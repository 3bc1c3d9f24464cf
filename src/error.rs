//! Error types for variant configuration.
//!
//! Configuration problems are never fatal: in lenient mode they are logged
//! and skipped, in strict mode they are collected and handed back to the
//! caller of the loader.

/// A single problem found while reading or validating a variant definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Line that is neither a section header, a `key = value` pair nor a comment
    #[error("line {line}: cannot parse '{text}'")]
    Syntax { line: usize, text: String },

    /// Key/value pair outside of any `[variant]` section
    #[error("line {line}: key '{key}' outside of a variant section")]
    NoSection { line: usize, key: String },

    #[error("{variant}: unknown key '{key}' (line {line})")]
    UnknownKey { variant: String, key: String, line: usize },

    #[error("{variant}: invalid value '{value}' for '{key}' (line {line})")]
    InvalidValue {
        variant: String,
        key: String,
        value: String,
        line: usize,
    },

    #[error("{variant}: unknown parent variant '{parent}'")]
    UnknownParent { variant: String, parent: String },

    #[error("variant '{variant}' defined more than once (line {line})")]
    DuplicateVariant { variant: String, line: usize },

    /// A piece letter was claimed by a second piece type
    #[error("{variant}: letter '{letter}' of {evicted} taken over by {incoming}")]
    PieceConflict {
        variant: String,
        letter: char,
        evicted: String,
        incoming: String,
    },

    #[error("{variant}: {reason}")]
    Inconsistent { variant: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum VariantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} configuration error(s), first: {}", .0.len(), first_message(.0))]
    Config(Vec<ConfigError>),
}

fn first_message(errors: &[ConfigError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl VariantError {
    /// Configuration errors carried by this error, empty for I/O failures.
    pub fn config_errors(&self) -> &[ConfigError] {
        match self {
            VariantError::Config(errors) => errors,
            VariantError::Io(_) => &[],
        }
    }
}

pub type VariantResult<T> = Result<T, VariantError>;
