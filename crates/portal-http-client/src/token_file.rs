use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use portal_client_core::TokenStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileTokenStoreError {
    #[error("failed to read token file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write token file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove token file {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Token kept as a single line in a file. A missing file means no session.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    type Error = FileTokenStoreError;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FileTokenStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn persist_token(&self, token: &str) -> Result<(), Self::Error> {
        let write_error = |source| FileTokenStoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&self.path, format!("{token}\n")).map_err(write_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_error)?;
        }

        Ok(())
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileTokenStoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
