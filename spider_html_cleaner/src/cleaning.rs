//! HTML cleaning for automation.
//!
//! One forward pass with `lol_html` classifies every element, filters its
//! attributes and swaps media for placeholders. Each call builds its own
//! rewriter and output buffer, so a [`Cleaner`] can be shared across threads.

use crate::attributes::filter_attributes;
use crate::config::{CleanerConfig, IframePolicy, Ruleset};
use crate::disguise::{self, IFRAME_MARKER};
use crate::error::{CleanError, CleanResult};
use crate::media::{self, MediaKind};
use crate::minify::{HtmlMinifier, Minifier, MinifyOptions};
use crate::tables::{classify, TagCategory};
use lol_html::html_content::{Element, EndTag};
use lol_html::{element, HandlerResult, HtmlRewriter, Settings};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Reusable HTML cleaner holding frozen tables and a minifier.
#[derive(Clone)]
pub struct Cleaner {
    ruleset: Ruleset,
    minify: bool,
    minify_options: MinifyOptions,
    minifier: Arc<dyn Minifier>,
}

impl fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cleaner")
            .field("ruleset", &self.ruleset)
            .field("minify", &self.minify)
            .field("minify_options", &self.minify_options)
            .finish_non_exhaustive()
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::default(),
            minify: true,
            minify_options: MinifyOptions::default(),
            minifier: Arc::new(HtmlMinifier),
        }
    }
}

impl Cleaner {
    /// Build a cleaner, rejecting inconsistent tables up front.
    pub fn new(config: &CleanerConfig) -> Result<Self, CleanError> {
        Ok(Self {
            ruleset: Ruleset::from_config(config)?,
            minify: config.minify,
            minify_options: config.minify_options,
            minifier: Arc::new(HtmlMinifier),
        })
    }

    /// Replace the minifier.
    pub fn with_minifier(mut self, minifier: impl Minifier + 'static) -> Self {
        self.minifier = Arc::new(minifier);
        self
    }

    /// The tables in use.
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Rewrite then minify a document.
    pub fn cleanse(&self, html: &str) -> CleanResult<String> {
        let rewritten = self.rewrite(html)?;

        if !self.minify {
            return Ok(rewritten);
        }

        self.minifier.minify(&rewritten, &self.minify_options)
    }

    /// Rewrite a document without minifying it.
    pub fn rewrite(&self, html: &str) -> CleanResult<String> {
        let input = match self.ruleset.iframe_policy() {
            IframePolicy::Disguise => disguise::disguise(html),
            IframePolicy::Inline => Cow::Borrowed(html),
        };
        let disguised = matches!(input, Cow::Owned(_));

        let output = collect_pass(input.len(), |sink| self.stream(&input, sink))?;

        let output = if disguised {
            disguise::restore(&output).into_owned()
        } else {
            output
        };

        log::trace!("rewrote {} bytes into {}", html.len(), output.len());

        Ok(output)
    }

    /// Run the bare rewrite pass, handing every output chunk to `sink`.
    ///
    /// No disguise or restore happens here: under [`IframePolicy::Disguise`]
    /// the caller feeds [`disguise::disguise`] output and restores the
    /// collected result. End tags of disguised frames are already renamed
    /// back to `iframe` in the chunks.
    pub fn stream<O>(&self, html: &str, sink: O) -> CleanResult<()>
    where
        O: FnMut(&[u8]),
    {
        let ruleset = &self.ruleset;

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![
                    element!(ruleset.removal_selector(), |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("*", |el| rewrite_element(el, ruleset)),
                ],
                ..Settings::new()
            },
            sink,
        );

        rewriter.write(html.as_bytes())?;
        rewriter.end()?;

        Ok(())
    }
}

/// Buffer the output of one pass. A failed pass yields no output.
fn collect_pass<F>(capacity: usize, pass: F) -> CleanResult<String>
where
    F: FnOnce(&mut dyn FnMut(&[u8])) -> CleanResult<()>,
{
    let mut output: Vec<u8> = Vec::with_capacity(capacity);
    let result = pass(&mut |chunk: &[u8]| output.extend_from_slice(chunk));

    if let Err(e) = result {
        log::warn!("html rewrite failed after {} bytes: {e}", output.len());
        return Err(e);
    }

    String::from_utf8(output).map_err(CleanError::Encoding)
}

/// Close a disguised frame with `</iframe>`.
fn close_as_iframe(el: &mut Element<'_, '_>) {
    if let Some(handlers) = el.end_tag_handlers() {
        handlers.push(Box::new(|end: &mut EndTag<'_>| {
            end.set_name_str("iframe".to_string());
            Ok(())
        }));
    }
}

/// Filter, classify and act on one element.
fn rewrite_element(el: &mut Element<'_, '_>, ruleset: &Ruleset) -> HandlerResult {
    if el.removed() {
        return Ok(());
    }

    let has_handler = filter_attributes(el, ruleset)?;
    let tag = el.tag_name();
    let has_marker =
        ruleset.iframe_policy() == IframePolicy::Disguise && el.has_attribute(IFRAME_MARKER);

    if has_marker {
        close_as_iframe(el);
    }

    match classify(ruleset, &tag, has_handler, has_marker) {
        TagCategory::Removed => el.remove(),
        TagCategory::Unwrapped => el.remove_and_keep_content(),
        TagCategory::MediaSpecial => {
            if let Some(kind) = MediaKind::from_tag(&tag) {
                media::synthesize(el, kind)?;
            }
        }
        TagCategory::PreservedInteractive | TagCategory::PreservedStructural => (),
    }

    Ok(())
}
