//! Placeholders for content an agent cannot read: images, vector and canvas
//! graphics, embedded frames.

use lol_html::errors::AttributeNameError;
use lol_html::html_content::{ContentType, Element};

/// Inner content of a cleaned `<svg>`.
pub const SVG_PLACEHOLDER: &str = "[SVG]";
/// Inner content of a cleaned `<canvas>`.
pub const CANVAS_PLACEHOLDER: &str = "[CANVAS]";
/// Display text of an image without usable `alt`.
pub const DEFAULT_IMAGE_TEXT: &str = "image";
/// `src` of a frame without one.
pub const DEFAULT_IFRAME_SRC: &str = "no-src";

/// Elements with a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// `<svg>`
    Svg,
    /// `<canvas>`
    Canvas,
    /// `<img>`
    Img,
    /// `<iframe>`, inline policy only.
    Iframe,
}

impl MediaKind {
    /// Match a lowercased tag name.
    pub fn from_tag(tag: &str) -> Option<MediaKind> {
        match tag {
            "svg" => Some(MediaKind::Svg),
            "canvas" => Some(MediaKind::Canvas),
            "img" => Some(MediaKind::Img),
            "iframe" => Some(MediaKind::Iframe),
            _ => None,
        }
    }
}

/// Text inserted in place of an image.
pub fn image_placeholder(alt: Option<&str>) -> String {
    format!("[IMG: {}]", image_text(alt))
}

/// Body of an inline rewritten frame.
pub fn iframe_placeholder(src: &str) -> String {
    format!("[IFRAME: {src}]")
}

fn image_text(alt: Option<&str>) -> &str {
    match alt {
        Some(alt) if !alt.is_empty() => alt,
        _ => DEFAULT_IMAGE_TEXT,
    }
}

/// Replace the element with its placeholder form.
pub(crate) fn synthesize(
    el: &mut Element<'_, '_>,
    kind: MediaKind,
) -> Result<(), AttributeNameError> {
    match kind {
        MediaKind::Svg => replace_graphic(el, SVG_PLACEHOLDER),
        MediaKind::Canvas => replace_graphic(el, CANVAS_PLACEHOLDER),
        MediaKind::Img => replace_image(el)?,
        MediaKind::Iframe => replace_iframe(el)?,
    }
    Ok(())
}

fn attribute_names(el: &Element<'_, '_>) -> Vec<String> {
    el.attributes().iter().map(|attr| attr.name()).collect()
}

fn strip_attributes(el: &mut Element<'_, '_>) {
    for name in attribute_names(el) {
        el.remove_attribute(&name);
    }
}

/// Keep `id` and `class`, drop the drawing.
fn replace_graphic(el: &mut Element<'_, '_>, placeholder: &str) {
    for name in attribute_names(el) {
        if name != "id" && name != "class" {
            el.remove_attribute(&name);
        }
    }
    el.set_inner_content(placeholder, ContentType::Text);
}

/// The image survives only as the text placed before it.
fn replace_image(el: &mut Element<'_, '_>) -> Result<(), AttributeNameError> {
    let alt = image_text(el.get_attribute("alt").as_deref()).to_string();
    let id = el.get_attribute("id").filter(|v| !v.is_empty());
    let class = el.get_attribute("class").filter(|v| !v.is_empty());

    strip_attributes(el);

    if let Some(id) = id {
        el.set_attribute("id", &id)?;
    }
    if let Some(class) = class {
        el.set_attribute("class", &class)?;
    }
    el.set_attribute("alt", &alt)?;

    el.before(&image_placeholder(Some(&alt)), ContentType::Text);
    el.remove();

    Ok(())
}

fn replace_iframe(el: &mut Element<'_, '_>) -> Result<(), AttributeNameError> {
    let src = el
        .get_attribute("src")
        .filter(|src| !src.is_empty())
        .unwrap_or_else(|| DEFAULT_IFRAME_SRC.to_string());

    let kept: Vec<(&str, String)> = ["id", "class", "name"]
        .into_iter()
        .filter_map(|name| {
            el.get_attribute(name)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect();

    strip_attributes(el);

    for (name, value) in kept {
        el.set_attribute(name, &value)?;
    }
    el.set_attribute("src", &src)?;
    el.set_inner_content(&iframe_placeholder(&src), ContentType::Text);

    Ok(())
}
