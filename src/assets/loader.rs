use rayon::prelude::*;

use crate::{
    assets::decode::{DecodedImage, decode_image},
    assets::source::ImageSource,
};

/// Result of decoding one render pass worth of images.
#[derive(Clone, Debug, Default)]
pub struct LoadedImages {
    /// One entry per requested slot, in sequence order; `None` for failed loads.
    pub images: Vec<Option<DecodedImage>>,
    /// Slots whose load failed.
    pub failed: Vec<usize>,
}

impl LoadedImages {
    /// Decoded image for `slot`, if it loaded.
    pub fn get(&self, slot: usize) -> Option<&DecodedImage> {
        self.images.get(slot).and_then(Option::as_ref)
    }
}

/// Decode up to `limit` sources in parallel and wait for all of them.
///
/// Each load is independent: a failure is logged and leaves its slot empty.
#[tracing::instrument(skip(sources), fields(requested = sources.len()))]
pub fn load_images(sources: &[ImageSource], limit: usize) -> LoadedImages {
    let images: Vec<Option<DecodedImage>> = sources
        .par_iter()
        .take(limit)
        .enumerate()
        .map(|(slot, source)| {
            match source.read_bytes().and_then(|bytes| decode_image(&bytes)) {
                Ok(img) => Some(img),
                Err(err) => {
                    tracing::warn!(slot, source = %source.label(), error = %err, "image load failed; slot left empty");
                    None
                }
            }
        })
        .collect();

    let failed = images
        .iter()
        .enumerate()
        .filter_map(|(slot, img)| img.is_none().then_some(slot))
        .collect();
    LoadedImages { images, failed }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
