//! # Spider HTML Cleaner
//!
//! Reduces an HTML document to what an agent needs to read and act on it:
//! interactive controls, document structure and identifying attributes.
//! Scripts, styles and decorative wrappers are dropped, event handlers are
//! kept with a masked value, and images, graphics and frames become short
//! placeholder tokens.
//!
//! Uses `lol_html` for the streaming rewrite and `minify-html` for the final
//! compaction.
//!
//! ```no_run
//! let cleaned = spider_html_cleaner::cleanse(r#"<div><button onclick="buy()">Buy</button></div>"#)?;
//! assert!(cleaned.contains("[handler]"));
//! # Ok::<(), spider_html_cleaner::CleanError>(())
//! ```
//!
//! ## Dependencies
//!
//! - `lol_html`: streaming HTML rewriter
//! - `minify-html`: output compaction
//! - `aho-corasick` / `memchr`: the iframe disguise literals

mod attributes;
mod cleaning;
mod config;
mod disguise;
mod error;
mod media;
mod minify;
mod tables;

use lazy_static::lazy_static;

pub use attributes::{decide, AttributeDecision, HANDLER_MASK};
pub use cleaning::Cleaner;
pub use config::{CleanerConfig, IframePolicy, Ruleset, RulesetVersion};
pub use disguise::{disguise, restore, IFRAME_MARKER};
pub use error::{CleanError, CleanResult, ConfigError};
pub use media::{
    image_placeholder, iframe_placeholder, MediaKind, CANVAS_PLACEHOLDER, SVG_PLACEHOLDER,
};
pub use minify::{HtmlMinifier, Minifier, MinifyOptions};
pub use tables::{classify, TagCategory};

lazy_static! {
    static ref DEFAULT_CLEANER: Cleaner = Cleaner::default();
}

/// Clean and minify with the default lean ruleset.
#[inline]
pub fn cleanse(html: &str) -> CleanResult<String> {
    DEFAULT_CLEANER.cleanse(html)
}

/// Rewrite with the default lean ruleset, without minifying.
#[inline]
pub fn rewrite(html: &str) -> CleanResult<String> {
    DEFAULT_CLEANER.rewrite(html)
}
