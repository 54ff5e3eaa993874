use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use tempfile::TempDir;

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<WriteResult> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(WriteResult::Unchanged);
    }
    fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the same content
    Unchanged,
}

/// A file tree that is written next to its destination and swapped in on commit.
///
/// Nothing becomes visible at the target directory until [`StagedTree::commit`]
/// succeeds. Dropping an uncommitted tree removes everything staged so far.
#[derive(Debug)]
pub struct StagedTree {
    target: PathBuf,
    staging: TempDir,
    files: Vec<PathBuf>,
}

impl StagedTree {
    /// Stage a new tree that will replace `target` on commit.
    pub fn new(target: &Path) -> Result<Self> {
        let target = std::path::absolute(target)
            .wrap_err_with(|| format!("invalid output path '{}'", target.display()))?;
        let parent = target
            .parent()
            .ok_or_else(|| eyre::eyre!("output path '{}' has no parent", target.display()))?;
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;

        let staging = tempfile::Builder::new()
            .prefix(".tsgen-staging-")
            .tempdir_in(parent)
            .wrap_err("failed to create staging directory")?;

        Ok(Self {
            target,
            staging,
            files: Vec::new(),
        })
    }

    /// Final destination of the tree.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Relative paths staged so far, in write order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Stage a file at `relative` inside the tree.
    pub fn write(&mut self, relative: impl AsRef<Path>, content: &str) -> Result<()> {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            eyre::bail!("staged path '{}' must be relative", relative.display());
        }
        write_file(&self.staging.path().join(relative), content)?;
        self.files.push(relative.to_path_buf());
        Ok(())
    }

    /// Move the staged tree into place, replacing any previous tree.
    ///
    /// The previous tree is restored if the final rename fails.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let Self {
            target,
            staging,
            files,
        } = self;
        let staged = staging.keep();

        if target.exists() {
            let backup = backup_path(&target);
            if backup.exists() {
                fs::remove_dir_all(&backup).wrap_err_with(|| {
                    format!("failed to remove stale backup '{}'", backup.display())
                })?;
            }
            fs::rename(&target, &backup)
                .wrap_err_with(|| format!("failed to move aside '{}'", target.display()))?;

            if let Err(err) = fs::rename(&staged, &target) {
                fs::rename(&backup, &target).wrap_err_with(|| {
                    format!("failed to restore '{}' from backup", target.display())
                })?;
                let _ = fs::remove_dir_all(&staged);
                return Err(err)
                    .wrap_err_with(|| format!("failed to publish '{}'", target.display()));
            }

            fs::remove_dir_all(&backup)
                .wrap_err_with(|| format!("failed to remove backup '{}'", backup.display()))?;
        } else if let Err(err) = fs::rename(&staged, &target) {
            let _ = fs::remove_dir_all(&staged);
            return Err(err).wrap_err_with(|| format!("failed to publish '{}'", target.display()));
        }

        tracing::debug!(target = %target.display(), files = files.len(), "committed staged tree");
        Ok(files)
    }
}

fn backup_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.tsgen-backup"))
}
