//! Attribute allowlist and handler masking.

use crate::config::Ruleset;
use lazy_static::lazy_static;
use lol_html::errors::AttributeNameError;
use lol_html::html_content::Element;
use regex::Regex;

/// Value written into every `on*` attribute.
pub const HANDLER_MASK: &str = "[handler]";

lazy_static! {
    /// `data-*` prefixes used by test and automation tooling.
    static ref DATA_ALLOW: Regex =
        Regex::new(r"^data-(testid|test|cy|qa|id|name|value|action|target)").unwrap();
}

/// What the filter does with one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeDecision {
    /// Kept with its value.
    Keep,
    /// Kept, value replaced with [`HANDLER_MASK`].
    Mask,
    /// Removed from the element.
    Drop,
}

/// Decide the fate of an attribute by its lowercased name.
pub fn decide(ruleset: &Ruleset, name: &str) -> AttributeDecision {
    if name.starts_with("on") {
        AttributeDecision::Mask
    } else if ruleset.is_essential(name) || name.starts_with("aria-") {
        AttributeDecision::Keep
    } else if name.starts_with("data-") && DATA_ALLOW.is_match(name) {
        AttributeDecision::Keep
    } else {
        AttributeDecision::Drop
    }
}

/// Apply [`decide`] to every attribute of the element in place. Returns
/// whether an event handler was found.
pub(crate) fn filter_attributes(
    el: &mut Element<'_, '_>,
    ruleset: &Ruleset,
) -> Result<bool, AttributeNameError> {
    if el.attributes().is_empty() {
        return Ok(false);
    }

    let mut masked = Vec::new();
    let mut dropped = Vec::new();

    for attr in el.attributes() {
        let name = attr.name();
        match decide(ruleset, &name) {
            AttributeDecision::Keep => (),
            AttributeDecision::Mask => masked.push(name),
            AttributeDecision::Drop => dropped.push(name),
        }
    }

    let has_handler = !masked.is_empty();

    for name in masked {
        el.set_attribute(&name, HANDLER_MASK)?;
    }

    for name in dropped {
        el.remove_attribute(&name);
    }

    Ok(has_handler)
}
