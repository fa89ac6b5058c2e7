use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens the raw text of a mapping file given its profile location.
pub trait MappingFetcher: Send + Sync {
    fn open(&self, location: &str) -> Result<Box<dyn BufRead + Send>>;
}

/// Reads mapping files from the local file system.
///
/// Locations may be plain paths or `file://` URLs. Relative paths are taken
/// against `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FsFetcher {
    base_dir: Option<PathBuf>,
}

impl FsFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location.strip_prefix("file://").unwrap_or(location));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl MappingFetcher for FsFetcher {
    fn open(&self, location: &str) -> Result<Box<dyn BufRead + Send>> {
        let path = self.resolve(location);
        debug!(path = %path.display(), "opening mapping file");
        let file = File::open(&path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}
