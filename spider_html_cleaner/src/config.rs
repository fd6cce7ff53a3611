//! Configuration types for spider_html_cleaner.

use crate::disguise::{DISGUISE_TAG, IFRAME_MARKER};
use crate::error::ConfigError;
use crate::minify::MinifyOptions;
use crate::tables::{
    BROAD_ESSENTIAL_ATTRIBUTES, CONTENT_CONTAINERS, ESSENTIAL_ATTRIBUTES, INTERACTIVE_ELEMENTS,
    KEEP_TAGS, MEDIA_ELEMENTS, REMOVE_COMPLETELY,
};
use hashbrown::HashSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Which tag table policy to apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesetVersion {
    #[default]
    /// Content containers are unwrapped unless they carry a handler.
    Lean,
    /// Content containers are always kept.
    Broad,
}

impl RulesetVersion {
    /// Convert the version from string match.
    pub fn from_str(s: &str) -> RulesetVersion {
        match s {
            "broad" | "Broad" | "BROAD" | "v1" | "V1" => RulesetVersion::Broad,
            "lean" | "Lean" | "LEAN" | "v2" | "V2" => RulesetVersion::Lean,
            _ => RulesetVersion::Lean,
        }
    }

    /// Content containers without handlers lose their tags.
    pub fn unwraps_containers(&self) -> bool {
        matches!(self, RulesetVersion::Lean)
    }
}

impl<'de> Deserialize<'de> for RulesetVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(RulesetVersion::from_str(&s))
    }
}

/// How `<iframe>` elements reach the rewriter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IframePolicy {
    #[default]
    /// Rename to a marked `div` for the pass so the frame body is parsed and
    /// filtered, then rename back.
    Disguise,
    /// Rewrite the frame in place and replace its body with `[IFRAME: src]`.
    Inline,
}

/// User facing configuration, usually deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Tag table policy.
    pub version: RulesetVersion,
    /// Iframe handling.
    pub iframe_policy: IframePolicy,
    /// Additional tags removed with their subtree.
    pub extra_removed: Vec<String>,
    /// Additional tags that are never unwrapped.
    pub extra_preserved: Vec<String>,
    /// Additional attributes kept verbatim.
    pub extra_essential_attributes: Vec<String>,
    /// Run the minifier on the rewritten output.
    pub minify: bool,
    /// Minifier toggles.
    pub minify_options: MinifyOptions,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            version: RulesetVersion::default(),
            iframe_policy: IframePolicy::default(),
            extra_removed: Vec::new(),
            extra_preserved: Vec::new(),
            extra_essential_attributes: Vec::new(),
            minify: true,
            minify_options: MinifyOptions::default(),
        }
    }
}

impl CleanerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the ruleset version.
    pub fn with_version(mut self, version: RulesetVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the iframe policy.
    pub fn with_iframe_policy(mut self, policy: IframePolicy) -> Self {
        self.iframe_policy = policy;
        self
    }

    /// Toggle the minification step.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Remove an additional tag and its subtree.
    pub fn with_removed(mut self, tag: impl Into<String>) -> Self {
        self.extra_removed.push(tag.into());
        self
    }

    /// Never unwrap an additional tag.
    pub fn with_preserved(mut self, tag: impl Into<String>) -> Self {
        self.extra_preserved.push(tag.into());
        self
    }

    /// Keep an additional attribute verbatim.
    pub fn with_essential_attribute(mut self, name: impl Into<String>) -> Self {
        self.extra_essential_attributes.push(name.into());
        self
    }
}

/// Frozen tag and attribute tables. Built once per cleaner and only read
/// afterwards.
#[derive(Debug, Clone)]
pub struct Ruleset {
    version: RulesetVersion,
    iframe_policy: IframePolicy,
    removed: HashSet<String>,
    interactive: HashSet<String>,
    containers: HashSet<String>,
    keep: HashSet<String>,
    media: HashSet<String>,
    essential: HashSet<String>,
    removal_selector: String,
}

fn owned_set(set: &phf::Set<&'static str>) -> HashSet<String> {
    set.iter().map(|s| s.to_string()).collect()
}

impl Ruleset {
    /// The built-in tables for a version and iframe policy.
    pub fn builtin(version: RulesetVersion, iframe_policy: IframePolicy) -> Self {
        let mut media = owned_set(&MEDIA_ELEMENTS);
        let mut essential = owned_set(&ESSENTIAL_ATTRIBUTES);

        match iframe_policy {
            IframePolicy::Inline => {
                media.insert("iframe".into());
            }
            IframePolicy::Disguise => {
                essential.insert(IFRAME_MARKER.into());
            }
        }

        if version == RulesetVersion::Broad {
            essential.extend(BROAD_ESSENTIAL_ATTRIBUTES.iter().map(|s| s.to_string()));
        }

        let mut interactive = owned_set(&INTERACTIVE_ELEMENTS);

        // the inline policy rewrites frames itself
        if iframe_policy == IframePolicy::Inline {
            interactive.remove("iframe");
        }

        let mut ruleset = Self {
            version,
            iframe_policy,
            removed: owned_set(&REMOVE_COMPLETELY),
            interactive,
            containers: owned_set(&CONTENT_CONTAINERS),
            keep: owned_set(&KEEP_TAGS),
            media,
            essential,
            removal_selector: String::new(),
        };

        ruleset.removal_selector = ruleset.build_removal_selector();
        ruleset
    }

    /// Build and validate the tables described by a configuration.
    pub fn from_config(config: &CleanerConfig) -> Result<Self, ConfigError> {
        let mut ruleset = Self::builtin(config.version, config.iframe_policy);

        for tag in &config.extra_preserved {
            let tag = normalize_name(tag, "tag")?;
            if ruleset.removed.contains(&tag) {
                return Err(conflict(tag, "removed", "preserved"));
            }
            if ruleset.media.contains(&tag) {
                return Err(conflict(tag, "preserved", "media"));
            }
            ruleset.containers.remove(&tag);
            ruleset.interactive.insert(tag);
        }

        for tag in &config.extra_removed {
            let tag = normalize_name(tag, "tag")?;
            if ruleset.interactive.contains(&tag) {
                return Err(conflict(tag, "removed", "preserved"));
            }
            if ruleset.keep.contains(&tag) {
                return Err(conflict(tag, "removed", "kept"));
            }
            if ruleset.media.contains(&tag) {
                return Err(conflict(tag, "removed", "media"));
            }
            // disguised frames would match the removal selector
            if config.iframe_policy == IframePolicy::Disguise && tag == DISGUISE_TAG {
                return Err(conflict(tag, "removed", "the iframe disguise"));
            }
            ruleset.containers.remove(&tag);
            ruleset.removed.insert(tag);
        }

        for name in &config.extra_essential_attributes {
            let name = normalize_name(name, "attribute")?;
            ruleset.essential.insert(name);
        }

        ruleset.removal_selector = ruleset.build_removal_selector();

        if let Err(e) = ruleset.removal_selector.parse::<lol_html::Selector>() {
            return Err(ConfigError::Selector {
                selector: ruleset.removal_selector,
                reason: e.to_string(),
            });
        }

        log::debug!(
            "built {:?} ruleset ({:?} iframes): {} removed, {} preserved, {} essential attributes",
            ruleset.version,
            ruleset.iframe_policy,
            ruleset.removed.len(),
            ruleset.interactive.len(),
            ruleset.essential.len()
        );

        Ok(ruleset)
    }

    fn build_removal_selector(&self) -> String {
        let mut tags: Vec<&str> = self.removed.iter().map(|s| s.as_str()).collect();
        tags.sort_unstable();
        tags.join(",")
    }

    /// The ruleset version.
    pub fn version(&self) -> RulesetVersion {
        self.version
    }

    /// The iframe policy.
    pub fn iframe_policy(&self) -> IframePolicy {
        self.iframe_policy
    }

    /// Comma joined selector of every removed tag.
    pub fn removal_selector(&self) -> &str {
        &self.removal_selector
    }

    /// Tag is dropped with its subtree.
    pub fn is_removed(&self, tag: &str) -> bool {
        self.removed.contains(tag)
    }

    /// Tag is an interactive control.
    pub fn is_interactive(&self, tag: &str) -> bool {
        self.interactive.contains(tag)
    }

    /// Tag is a content container.
    pub fn is_container(&self, tag: &str) -> bool {
        self.containers.contains(tag)
    }

    /// Tag is document level and always kept.
    pub fn is_kept(&self, tag: &str) -> bool {
        self.keep.contains(tag)
    }

    /// Tag gets a placeholder.
    pub fn is_media(&self, tag: &str) -> bool {
        self.media.contains(tag)
    }

    /// Attribute is kept verbatim.
    pub fn is_essential(&self, name: &str) -> bool {
        self.essential.contains(name)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::builtin(RulesetVersion::default(), IframePolicy::default())
    }
}

fn conflict(tag: String, first: &'static str, second: &'static str) -> ConfigError {
    ConfigError::Conflict { tag, first, second }
}

/// Lowercase a configured name and reject anything the tokenizer would never
/// report as a tag or attribute name.
fn normalize_name(name: &str, kind: &'static str) -> Result<String, ConfigError> {
    let name = name.trim().to_ascii_lowercase();
    let valid = name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':');

    if valid {
        Ok(name)
    } else {
        Err(ConfigError::InvalidName { kind, name })
    }
}
