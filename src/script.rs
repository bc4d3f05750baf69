use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Directory a synthesis run executes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir(PathBuf);

impl RunDir {
    /// Uses `explicit` if given, otherwise the current working directory.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => env::current_dir()?,
        };

        let path = path
            .canonicalize()
            .map_err(|source| Error::RunDir { path, source })?;
        if !path.is_dir() {
            return Err(Error::RunDir {
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
                path,
            });
        }

        debug!("run directory: {}", path.display());
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn sibling(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    /// Reads the whole text of a file next to the run. A missing file is `None`.
    pub fn read_sibling(&self, name: &str) -> Result<Option<String>> {
        let path = self.sibling(name);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!("loaded {}", path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
