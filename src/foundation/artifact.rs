use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};

/// A transient file owned by the component that wrote it.
///
/// The file is deleted by [`TempArtifact::discard`] (which reports failures) or, failing that,
/// best-effort when the guard is dropped. Call [`TempArtifact::persist`] to hand the file over
/// and keep it on disk.
#[derive(Debug)]
pub struct TempArtifact {
    path: Option<PathBuf>,
}

impl TempArtifact {
    /// Take ownership of `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        // `path` is only `None` after `discard`/`persist`, both of which consume `self`.
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Delete the file now. A file that was never created is not an error.
    pub fn discard(mut self) -> ReelResult<()> {
        match self.path.take() {
            Some(p) => remove_if_exists(&p),
            None => Ok(()),
        }
    }

    /// Release ownership without deleting, returning the path.
    pub fn persist(mut self) -> PathBuf {
        self.path.take().unwrap_or_default()
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Some(p) = self.path.take()
            && let Err(e) = remove_if_exists(&p)
        {
            tracing::warn!(path = %p.display(), error = %e, "failed to clean up transient file");
        }
    }
}

fn remove_if_exists(path: &Path) -> ReelResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReelError::Other(anyhow::Error::new(e).context(format!(
            "failed to remove transient file '{}'",
            path.display()
        )))),
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/artifact.rs"]
mod tests;
