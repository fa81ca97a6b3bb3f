use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use anyhow::{anyhow, Context};
use camino::Utf8Path;

use crate::AppctlStdError;

/// Interact with a file system
#[derive(Default, Copy, Clone)]
pub struct Fs {}

impl Fs {
    /// reads a file from disk
    pub fn read_file<P>(path: P) -> Result<String, AppctlStdError>
    where
        P: AsRef<Utf8Path>,
    {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(metadata) => {
                if metadata.is_file() {
                    tracing::debug!("reading {} from disk", &path);
                    let contents = fs::read_to_string(path)
                        .with_context(|| format!("could not read {}", &path))?;
                    if contents.is_empty() {
                        Err(AppctlStdError::EmptyFile {
                            empty_file: path.to_string(),
                        })
                    } else {
                        Ok(contents)
                    }
                } else {
                    Err(anyhow!("'{}' is not a file", path).into())
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppctlStdError::MissingFile {
                missing_file: path.to_string(),
            }),
            Err(e) => Err(anyhow!("could not find '{}'", path).context(e).into()),
        }
    }

    /// writes a file to disk, creating any missing parent directories
    pub fn write_file<P, C>(path: P, contents: C) -> Result<(), AppctlStdError>
    where
        P: AsRef<Utf8Path>,
        C: AsRef<[u8]>,
    {
        Self::write(path.as_ref(), contents.as_ref(), false)
    }

    /// writes a file that only the current user may read or write
    pub fn write_private_file<P, C>(path: P, contents: C) -> Result<(), AppctlStdError>
    where
        P: AsRef<Utf8Path>,
        C: AsRef<[u8]>,
    {
        Self::write(path.as_ref(), contents.as_ref(), true)
    }

    /// removes a file from disk, succeeding if it was already gone
    pub fn remove_file<P>(path: P) -> Result<(), AppctlStdError>
    where
        P: AsRef<Utf8Path>,
    {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!("removed {}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!(e)
                .context(format!("could not remove {}", path))
                .into()),
        }
    }

    fn write(path: &Utf8Path, contents: &[u8], private: bool) -> Result<(), AppctlStdError> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("cannot write file to root or prefix {path}"))?;
        if !parent.as_str().is_empty() && !parent.exists() {
            tracing::debug!("creating interim directories for {}", path);
            Self::create_dir_all(parent, private)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        if private {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(path)
            .with_context(|| format!("tried to open {} but was unable to do so", path))?;
        tracing::debug!("writing {} to disk", path);
        file.write_all(contents)
            .with_context(|| format!("could not write {}", path))?;
        Ok(())
    }

    fn create_dir_all(path: &Utf8Path, private: bool) -> Result<(), AppctlStdError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        if private {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder
            .create(path)
            .with_context(|| format!("{} does not exist and it could not be created", path))?;
        Ok(())
    }
}
