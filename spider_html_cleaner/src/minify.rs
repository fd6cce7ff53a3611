//! Final whitespace and markup compaction.
//!
//! This module uses [`minify_html`] under the hood.

use crate::error::{CleanError, CleanResult};
use minify_html::Cfg;
use serde::{Deserialize, Serialize};

/// Minifier toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyOptions {
    /// Collapse runs of whitespace.
    pub collapse_whitespace: bool,
    /// Drop comments.
    pub remove_comments: bool,
    /// Drop attributes with empty values.
    pub remove_empty_attributes: bool,
    /// Omit optional opening and closing tags.
    pub remove_optional_tags: bool,
    /// Drop attributes equal to their default.
    pub remove_redundant_attributes: bool,
    /// Unquote attribute values where allowed.
    pub remove_attribute_quotes: bool,
    /// Emit `<!doctype html>`.
    pub use_short_doctype: bool,
    /// Minify `<style>` content.
    pub minify_css: bool,
    /// Minify `<script>` content.
    pub minify_js: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            remove_comments: true,
            remove_empty_attributes: true,
            remove_optional_tags: true,
            remove_redundant_attributes: true,
            remove_attribute_quotes: true,
            use_short_doctype: true,
            minify_css: false,
            minify_js: false,
        }
    }
}

impl MinifyOptions {
    /// Map the toggles onto a `minify_html` configuration.
    pub fn to_cfg(&self) -> Cfg {
        let always_applied = [
            ("collapse_whitespace", self.collapse_whitespace),
            ("remove_empty_attributes", self.remove_empty_attributes),
            ("remove_redundant_attributes", self.remove_redundant_attributes),
            ("remove_attribute_quotes", self.remove_attribute_quotes),
            ("use_short_doctype", self.use_short_doctype),
        ];

        for (name, enabled) in always_applied {
            if !enabled {
                log::debug!("minify_html always applies `{name}`, ignoring the disabled toggle");
            }
        }

        Cfg {
            keep_comments: !self.remove_comments,
            keep_closing_tags: !self.remove_optional_tags,
            keep_html_and_head_opening_tags: !self.remove_optional_tags,
            minify_css: self.minify_css,
            minify_js: self.minify_js,
            ..Cfg::default()
        }
    }
}

/// A markup compactor run after the rewrite pass.
pub trait Minifier: Send + Sync {
    /// Minify a whole document.
    fn minify(&self, html: &str, options: &MinifyOptions) -> CleanResult<String>;
}

/// [`Minifier`] backed by `minify_html`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMinifier;

impl Minifier for HtmlMinifier {
    fn minify(&self, html: &str, options: &MinifyOptions) -> CleanResult<String> {
        let result = minify_html::minify(html.as_bytes(), &options.to_cfg());

        String::from_utf8(result).map_err(|e| {
            CleanError::Minify(format!("minification produced invalid UTF-8: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = MinifyOptions::default();
        assert!(options.collapse_whitespace && options.remove_optional_tags);
        assert!(!options.minify_css && !options.minify_js);

        let cfg = options.to_cfg();
        assert!(!cfg.keep_comments);
        assert!(!cfg.keep_closing_tags);
        assert!(!cfg.minify_js);
    }

    #[test]
    fn test_minify_collapses_and_strips_comments() {
        let out = HtmlMinifier
            .minify(
                "<p>  spaced    out  </p>\n\n<!-- note -->",
                &MinifyOptions::default(),
            )
            .unwrap();
        assert!(!out.contains("<!--"));
        assert!(out.contains("spaced out"));
    }

    #[test]
    fn test_keep_comments_when_disabled() {
        let options = MinifyOptions {
            remove_comments: false,
            ..MinifyOptions::default()
        };
        let out = HtmlMinifier
            .minify("<p>a</p><!-- note -->", &options)
            .unwrap();
        assert!(out.contains("<!--") && out.contains("note"));
    }
}
