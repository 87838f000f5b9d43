//! Remote image fetch over HTTP(S).
//!
//! One blocking libcurl GET per image (via the `curl` crate), following
//! redirects and streaming the body straight to disk. Call from
//! `spawn_blocking` when used from async code.

mod error;

pub use error::FetchError;

use crate::config::FetchConfig;
use crate::storage::AssetFile;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Transport settings for [`fetch_to_file`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    pub max_redirections: u32,
}

impl From<&FetchConfig> for FetchOptions {
    fn from(cfg: &FetchConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            user_agent: cfg.user_agent.clone(),
            max_redirections: cfg.max_redirections,
        }
    }
}

/// Downloads `url` into `dest` with a single GET. Returns the number of bytes written.
///
/// The body goes to `<dest>.part` first and is renamed into place only after
/// a 2xx response completed; on any failure the temp file is removed.
pub fn fetch_to_file(url: &str, dest: &Path, opts: &FetchOptions) -> Result<u64, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    let mut sink = AssetFile::create(dest)?;
    let mut write_err: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        let registered = transfer.write_function(|data| match sink.write_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        });
        match registered {
            Ok(()) => transfer.perform(),
            Err(e) => Err(e),
        }
    };

    if let Some(e) = write_err {
        sink.discard();
        return Err(FetchError::Storage(e));
    }
    if let Err(e) = performed {
        sink.discard();
        return Err(FetchError::Curl(e));
    }

    let status = match easy.response_code() {
        Ok(code) => code,
        Err(e) => {
            sink.discard();
            return Err(FetchError::Curl(e));
        }
    };
    if !(200..300).contains(&status) {
        sink.discard();
        return Err(FetchError::Http {
            url: url.to_string(),
            status,
        });
    }

    Ok(sink.finalize()?)
}
