// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use tokio::fs;

/// Copies one file, creating the destination's parent directories.
///
/// An existing destination is overwritten.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the copy fails.
pub async fn copy_file_async(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Copies each relative path from `src_root` to the same path under `dst_root`.
///
/// # Example
/// ```no_run
/// use aurpub::utility::fs::copy::copy_relative_files_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_relative_files_async(Path::new("aur/foo"), Path::new("/tmp/clone"), ["PKGBUILD", "patches/a.patch"]).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error on the first file that cannot be copied.
pub async fn copy_relative_files_async<I, S>(src_root: &Path, dst_root: &Path, files: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut copied = 0;
    for rel in files {
        let rel = rel.as_ref();
        copy_file_async(&src_root.join(rel), &dst_root.join(rel)).await?;
        copied += 1;
    }
    Ok(copied)
}

/// Removes a file and then any parent directories it leaves empty, up to `root`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub async fn remove_file_pruning(root: &Path, rel: &str) -> Result<()> {
    let path = root.join(rel);
    match fs::remove_file(&path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to remove {}", path.display()));
        }
    }

    let mut dir = path.parent();
    while let Some(current) = dir {
        if current == root || !current.starts_with(root) {
            break;
        }
        // Fails when not empty, which ends the pruning.
        if fs::remove_dir(current).await.is_err() {
            break;
        }
        dir = current.parent();
    }
    Ok(())
}
