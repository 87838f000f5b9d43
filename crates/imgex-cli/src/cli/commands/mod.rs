//! CLI command handlers, one per file. Pipeline commands return the number of
//! images that could not be downloaded.

mod html;
mod name;
mod payload;
mod site;

pub use html::run_html;
pub use name::run_name;
pub use payload::run_payload;
pub use site::run_site;

use imgex_core::downloader::DownloadFailure;

fn report_failures(failures: &[DownloadFailure]) {
    for f in failures {
        eprintln!("failed: {}  ({})", f.href, f.error);
    }
}
