pub mod config;
pub mod logging;

pub mod downloader;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod rewrite;
pub mod site;
pub mod storage;
pub mod url_model;

pub use config::ExtractorConfig;
pub use pipeline::{ImageExtractor, PageOutcome, PayloadOutcome};
