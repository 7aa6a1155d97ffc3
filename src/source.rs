use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use ureq::Agent;

use crate::error::{ConversionError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the OpenAPI document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Relative file sources are resolved against this directory.
    pub base_dir: PathBuf,
    pub timeout: Duration,
}

impl SourceOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Source {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Source::Url(source.to_string())
        } else {
            Source::File(PathBuf::from(source))
        }
    }

    pub fn read(&self, options: &SourceOptions) -> Result<String> {
        match self {
            Source::Url(url) => fetch(url, options.timeout),
            Source::File(path) => read_file(&options.base_dir.join(path)),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    info!(path = %path.display(), "reading source");
    std::fs::read_to_string(path).map_err(|source| ConversionError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn fetch(url: &str, timeout: Duration) -> Result<String> {
    info!(url, "fetching source");
    let config = Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build();
    let agent = Agent::new_with_config(config);

    let fetch_error = |source: ureq::Error| ConversionError::Fetch {
        url: url.to_string(),
        source: Box::new(source),
    };

    let mut response = agent.get(url).call().map_err(fetch_error)?;
    let status = response.status();
    if status != 200 {
        return Err(ConversionError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // OpenAPI documents are not bounded by ureq's default 10 MiB body limit.
    response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_string()
        .map_err(fetch_error)
}
