//! Error types for spider_html_cleaner.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors surfaced by a cleaning call.
///
/// A call either returns the whole cleaned document or one of these; partial
/// output is never handed back.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The streaming rewriter failed while writing or flushing.
    #[error("rewriting error: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
    /// The rewriter produced bytes that are not UTF-8.
    #[error("rewritten output is not valid UTF-8: {0}")]
    Encoding(#[source] FromUtf8Error),
    /// The minifier failed. There is no fallback to the un-minified text.
    #[error("minification failed: {0}")]
    Minify(String),
    /// The cleaner could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building a [`Ruleset`](crate::Ruleset).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A tag was placed in two tables whose outcomes contradict each other.
    #[error("tag `{tag}` cannot be both {first} and {second}")]
    Conflict {
        /// The offending tag name.
        tag: String,
        /// The first table it belongs to.
        first: &'static str,
        /// The second table it belongs to.
        second: &'static str,
    },
    /// A tag or attribute name contains characters the rewriter cannot match.
    #[error("invalid {kind} name: `{name}`")]
    InvalidName {
        /// `tag` or `attribute`.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },
    /// The removal selector did not parse.
    #[error("invalid removal selector `{selector}`: {reason}")]
    Selector {
        /// The joined selector.
        selector: String,
        /// Parser message.
        reason: String,
    },
    /// JSON configuration could not be read.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type CleanResult<T> = Result<T, CleanError>;
