#![allow(dead_code)]

pub mod image_server;

use std::path::Path;

use imgex_core::{ExtractorConfig, ImageExtractor};

/// Extractor writing into `<out>/assets`, with the asset dir already created.
pub fn extractor(out: &Path) -> ImageExtractor {
    extractor_with(out, |_| {})
}

pub fn extractor_with(out: &Path, tweak: impl FnOnce(&mut ExtractorConfig)) -> ImageExtractor {
    let mut cfg = ExtractorConfig::default();
    cfg.output_dir = out.to_path_buf();
    tweak(&mut cfg);
    let ex = ImageExtractor::new(cfg).unwrap();
    ex.ensure_asset_dir().unwrap();
    ex
}
