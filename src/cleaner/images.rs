//! Image extraction: container-grouped records first, then a sweep of any
//! loose image elements. Image-bearing markup leaves the tree either way.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom;
use crate::options::Options;
use crate::patterns::{
    CAPTION_FALLBACK_SELECTOR, CAPTION_SELECTOR, IMAGE_CONTAINER_SELECTORS,
    IMAGE_REMOVAL_SELECTORS,
};
use crate::result::ImageData;
use crate::text_utils::normalize_whitespace;

use super::prune::remove_by_selectors;

/// Extract image records from the page, removing every image-bearing node.
///
/// With retention disabled, the image catalogue is removed wholesale and the
/// result is empty. Record order follows container-selector priority, then
/// loose-image document order.
pub fn extract_images(doc: &Document, options: &Options) -> Vec<ImageData> {
    if !options.keep_images {
        remove_by_selectors(doc, &IMAGE_REMOVAL_SELECTORS);
        return Vec::new();
    }

    let mut images = Vec::new();

    for selector in IMAGE_CONTAINER_SELECTORS {
        let containers = doc.select(selector).nodes().to_vec();
        for container_node in containers {
            let container = Selection::from(container_node);
            let img = container.select_single("img");
            if img.exists() {
                if let Some(src) = img.attr("src") {
                    images.push(ImageData {
                        src: secure_image_url(&src),
                        alt: image_alt(&img),
                        caption: container_caption(&container),
                    });
                }
            }
            // The container goes regardless of whether a record was produced.
            container.remove();
        }
    }

    // Loose images not inside any recognized container.
    for img_node in doc.select("img").nodes().to_vec() {
        let img = Selection::from(img_node);
        if let Some(src) = img.attr("src") {
            images.push(ImageData {
                src: secure_image_url(&src),
                alt: image_alt(&img),
                caption: String::new(),
            });
        }
        img.remove();
    }

    debug!(count = images.len(), "image extraction done");
    images
}

fn image_alt(img: &Selection) -> String {
    normalize_whitespace(&img.attr("alt").map(|alt| alt.to_string()).unwrap_or_default())
}

/// Rewrite protocol-relative sources to explicit https; leave absolute
/// sources unchanged.
fn secure_image_url(src: &str) -> String {
    if let Some(rest) = src.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        src.to_string()
    }
}

/// Caption text for a container: fixed caption-bearing tag/class combos
/// first, then any descendant whose class mentions "caption". Edit-link
/// markers are stripped before reading the text.
fn container_caption(container: &Selection) -> String {
    let mut caption = container.select_single(CAPTION_SELECTOR);
    if !caption.exists() {
        caption = container.select_single(CAPTION_FALLBACK_SELECTOR);
    }
    if !caption.exists() {
        return String::new();
    }
    caption.select("span.mw-editsection").remove();
    normalize_whitespace(&dom::selection_text_joined(&caption))
}
