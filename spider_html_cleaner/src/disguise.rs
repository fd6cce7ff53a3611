//! Iframe containment workaround.
//!
//! The body of an `<iframe>` is raw text to the tokenizer, so elements written
//! inside it are never offered to the element handlers. Before the pass every
//! `<iframe` literal is renamed to a `div` carrying [`IFRAME_MARKER`] and every
//! `</iframe` to `</div`, so the disguised frame closes where the frame did.
//! During the pass the end tag of a marked `div` is renamed back to `iframe`;
//! after the pass the marked start tag is renamed back and the marker dropped.
//!
//! Both directions are exact, case-sensitive literal replacements. Input that
//! already contains the marker attribute does not round trip.

use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;
use std::borrow::Cow;

/// Marker attribute carried by disguised frames.
pub const IFRAME_MARKER: &str = "data-original-iframe";

/// Tag name a frame carries during the pass.
pub(crate) const DISGUISE_TAG: &str = "div";

const IFRAME_OPEN: &str = "<iframe";
const IFRAME_CLOSE: &str = "</iframe";
const DISGUISED_OPEN: &str = "<div data-original-iframe";
const DISGUISED_CLOSE: &str = "</div";

lazy_static! {
    static ref DISGUISE: AhoCorasick = AhoCorasick::new([IFRAME_OPEN, IFRAME_CLOSE]).unwrap();
    static ref RESTORE: AhoCorasick = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build([
            "<div data-original-iframe=\"\"",
            "<div data-original-iframe=''",
            DISGUISED_OPEN,
        ])
        .unwrap();
}

const DISGUISE_REPLACEMENTS: [&str; 2] = [DISGUISED_OPEN, DISGUISED_CLOSE];
const RESTORE_REPLACEMENTS: [&str; 3] = [IFRAME_OPEN, IFRAME_OPEN, IFRAME_OPEN];

/// Rename every `<iframe` literal to the marked `div` and every `</iframe` to
/// `</div`.
pub fn disguise(html: &str) -> Cow<'_, str> {
    if memchr::memmem::find(html.as_bytes(), b"iframe").is_none() {
        Cow::Borrowed(html)
    } else {
        Cow::Owned(DISGUISE.replace_all(html, &DISGUISE_REPLACEMENTS))
    }
}

/// Turn marked `div` start tags back into `<iframe`, dropping the marker.
///
/// End tags are not touched here: the pass renames the end tag of every
/// marked element itself.
pub fn restore(html: &str) -> Cow<'_, str> {
    if memchr::memmem::find(html.as_bytes(), DISGUISED_OPEN.as_bytes()).is_none() {
        Cow::Borrowed(html)
    } else {
        Cow::Owned(RESTORE.replace_all(html, &RESTORE_REPLACEMENTS))
    }
}
