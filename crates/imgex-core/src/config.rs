use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Custom User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Maximum redirects followed per image.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs: None,
            user_agent: None,
            max_redirections: default_max_redirections(),
        }
    }
}

/// Per-run configuration bundle, loaded from `~/.config/imgex/config.toml` or `--config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// CMS base URL. Carried for completeness; the core does not read it.
    pub base_url: String,
    /// Public path prefix for rewritten references; also the asset subdirectory under `output_dir`.
    pub path: String,
    /// File extensions that qualify a URL as an image worth localizing.
    pub extensions: Vec<String>,
    /// Root of the generated site.
    pub output_dir: PathBuf,
    /// Router base path. `/` means "no prefix". Only used for payload rewrites.
    pub router_base: String,
    /// File name the site walker treats as a serialized page-state payload.
    pub payload_file_name: String,
    /// Share download results by href across pages and pipelines within one run.
    pub reuse_downloads: bool,
    /// Append a short hash of the query string to asset names (avoids slug collisions).
    pub query_hash_suffix: bool,
    /// Optional fetch section; if missing, built-in defaults are used.
    pub fetch: Option<FetchConfig>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            path: "/assets".to_string(),
            extensions: ["jpg", "jpeg", "png", "webp", "avif", "svg", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            output_dir: PathBuf::from("dist"),
            router_base: "/".to_string(),
            payload_file_name: "payload.js".to_string(),
            reuse_downloads: true,
            query_hash_suffix: false,
            fetch: None,
        }
    }
}

impl ExtractorConfig {
    /// Directory downloaded images are written to: `output_dir` joined with `path`.
    pub fn asset_dir(&self) -> PathBuf {
        self.output_dir.join(self.path.trim_matches('/'))
    }

    /// Public prefix used in rewritten references, without a trailing slash.
    pub fn public_prefix(&self) -> &str {
        self.path.trim_end_matches('/')
    }

    /// Router prefix for payload rewrites: empty for `/`, otherwise without a trailing slash.
    pub fn router_prefix(&self) -> &str {
        self.router_base.trim_end_matches('/')
    }

    /// Extensions with leading dots stripped, lowercased, empties removed.
    pub fn normalized_extensions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.extensions.len());
        for ext in &self.extensions {
            let ext = ext.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !out.contains(&ext) {
                out.push(ext);
            }
        }
        out
    }

    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.normalized_extensions().is_empty() {
            anyhow::bail!("config: `extensions` must name at least one file extension");
        }
        if self.path.trim_matches('/').is_empty() {
            anyhow::bail!("config: `path` must name an asset subdirectory (e.g. \"/assets\")");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgex")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<ExtractorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let cfg: ExtractorConfig = toml::from_str(&data)
        .with_context(|| format!("parse config file: {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ExtractorConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ExtractorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}
