//! Tag classification tables.
//!
//! The built-in sets are compiled in with `phf` and copied once into a
//! [`Ruleset`] when a cleaner is built. [`classify`] is the single place where
//! an element's fate is decided.

use crate::config::Ruleset;
use phf::phf_set;

/// Tags dropped together with everything inside them.
pub static REMOVE_COMPLETELY: phf::Set<&'static str> = phf_set! {
    "style",
    "script",
    "noscript",
    "meta",
    "link",
    "base",
    "template",
};

/// Interactive controls, never unwrapped.
pub static INTERACTIVE_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "a",
    "button",
    "input",
    "textarea",
    "select",
    "option",
    "optgroup",
    "form",
    "label",
    "iframe",
    "video",
    "audio",
    "details",
    "summary",
    "dialog",
    "menu",
    "menuitem",
    "fieldset",
    "legend",
    "datalist",
    "output",
    "progress",
    "meter",
    "embed",
    "object",
    "param",
    "track",
    "map",
    "area",
};

/// Layout and inline wrappers with no behaviour of their own.
pub static CONTENT_CONTAINERS: phf::Set<&'static str> = phf_set! {
    "div",
    "span",
    "section",
    "article",
    "main",
    "header",
    "footer",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "ul",
    "ol",
    "li",
    "dl",
    "dt",
    "dd",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "td",
    "th",
    "caption",
    "col",
    "colgroup",
    "blockquote",
    "pre",
    "code",
    "figure",
    "figcaption",
    "strong",
    "em",
    "b",
    "i",
    "u",
    "s",
    "small",
    "mark",
    "del",
    "ins",
    "sub",
    "sup",
    "q",
    "cite",
    "abbr",
    "time",
    "address",
};

/// Document level tags kept even without attributes.
pub static KEEP_TAGS: phf::Set<&'static str> = phf_set! {
    "html",
    "head",
    "body",
    "title",
    "br",
    "hr",
    "wbr",
};

/// Tags whose content is replaced by a placeholder. `iframe` joins this set
/// only under [`IframePolicy::Inline`](crate::IframePolicy::Inline).
pub static MEDIA_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "img",
    "svg",
    "canvas",
};

/// Attributes kept verbatim by every ruleset version.
pub static ESSENTIAL_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    // identity
    "id",
    "class",
    "name",
    // form state
    "type",
    "value",
    "placeholder",
    "checked",
    "selected",
    "disabled",
    "readonly",
    "required",
    "multiple",
    "autofocus",
    "autocomplete",
    "min",
    "max",
    "step",
    "pattern",
    "maxlength",
    "minlength",
    "size",
    // links
    "href",
    "target",
    "download",
    "rel",
    // forms
    "action",
    "method",
    "enctype",
    "novalidate",
    // media
    "src",
    "srcset",
    "alt",
    "title",
    "controls",
    "autoplay",
    "loop",
    "muted",
    // semantics
    "for",
    "role",
    "tabindex",
    "contenteditable",
    "draggable",
    "spellcheck",
};

/// Extra names the broad ruleset lists explicitly. The prefix rules already
/// keep them, so the outcome matches the lean list.
pub static BROAD_ESSENTIAL_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "data-testid",
    "data-test",
    "data-cy",
    "data-qa",
    "aria-label",
    "aria-labelledby",
    "aria-describedby",
};

/// What happens to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// Tag, attributes and subtree are dropped.
    Removed,
    /// Tag markers dropped, children kept in place.
    Unwrapped,
    /// Interactive control, kept.
    PreservedInteractive,
    /// Structural tag kept, either document level or carrying a handler.
    PreservedStructural,
    /// Content replaced by a placeholder.
    MediaSpecial,
}

impl TagCategory {
    /// The element keeps its tag markers.
    pub fn is_preserved(&self) -> bool {
        matches!(
            self,
            TagCategory::PreservedInteractive | TagCategory::PreservedStructural
        )
    }
}

/// Classify an element from its lowercased tag name, whether the attribute
/// filter saw an `on*` handler, and whether it carries the iframe disguise
/// marker.
pub fn classify(ruleset: &Ruleset, tag: &str, has_handler: bool, has_marker: bool) -> TagCategory {
    if ruleset.is_removed(tag) {
        TagCategory::Removed
    } else if ruleset.is_media(tag) {
        TagCategory::MediaSpecial
    } else if has_marker || ruleset.is_interactive(tag) {
        TagCategory::PreservedInteractive
    } else if ruleset.is_container(tag) {
        if has_handler || !ruleset.version().unwraps_containers() {
            TagCategory::PreservedStructural
        } else {
            TagCategory::Unwrapped
        }
    } else if has_handler || ruleset.is_kept(tag) {
        TagCategory::PreservedStructural
    } else {
        TagCategory::Unwrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IframePolicy, RulesetVersion};

    fn lean() -> Ruleset {
        Ruleset::builtin(RulesetVersion::Lean, IframePolicy::Disguise)
    }

    #[test]
    fn test_builtin_tables_are_disjoint() {
        let tables: [(&str, &phf::Set<&'static str>); 5] = [
            ("removed", &REMOVE_COMPLETELY),
            ("interactive", &INTERACTIVE_ELEMENTS),
            ("containers", &CONTENT_CONTAINERS),
            ("keep", &KEEP_TAGS),
            ("media", &MEDIA_ELEMENTS),
        ];
        for (i, (a_name, a)) in tables.iter().enumerate() {
            for (b_name, b) in tables.iter().skip(i + 1) {
                for tag in a.iter() {
                    assert!(!b.contains(*tag), "{tag} is in {a_name} and {b_name}");
                }
            }
        }
    }

    #[test]
    fn test_classify_removed_wins_over_handler() {
        assert_eq!(
            classify(&lean(), "script", true, false),
            TagCategory::Removed
        );
    }

    #[test]
    fn test_classify_containers() {
        let rules = lean();
        assert_eq!(classify(&rules, "p", false, false), TagCategory::Unwrapped);
        assert_eq!(
            classify(&rules, "p", true, false),
            TagCategory::PreservedStructural
        );

        let broad = Ruleset::builtin(RulesetVersion::Broad, IframePolicy::Disguise);
        assert_eq!(
            classify(&broad, "div", false, false),
            TagCategory::PreservedStructural
        );
    }

    #[test]
    fn test_classify_interactive_and_keep() {
        let rules = lean();
        assert_eq!(
            classify(&rules, "button", false, false),
            TagCategory::PreservedInteractive
        );
        assert_eq!(
            classify(&rules, "body", false, false),
            TagCategory::PreservedStructural
        );
        assert_eq!(
            classify(&rules, "picture", false, false),
            TagCategory::Unwrapped
        );
        assert_eq!(
            classify(&rules, "picture", true, false),
            TagCategory::PreservedStructural
        );
    }

    #[test]
    fn test_classify_media_and_marker() {
        let rules = lean();
        assert_eq!(
            classify(&rules, "svg", false, false),
            TagCategory::MediaSpecial
        );
        // disguised iframes are plain divs carrying the marker
        assert_eq!(
            classify(&rules, "div", false, true),
            TagCategory::PreservedInteractive
        );
        assert_eq!(
            classify(&rules, "iframe", false, false),
            TagCategory::PreservedInteractive
        );

        let inline = Ruleset::builtin(RulesetVersion::Lean, IframePolicy::Inline);
        assert_eq!(
            classify(&inline, "iframe", false, false),
            TagCategory::MediaSpecial
        );
    }
}
