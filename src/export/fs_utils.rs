// src/export/fs_utils.rs

use crate::core::backup::confirm_overwrite;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::path::Path;

/// Check whether `path` may be created or overwritten.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask the user
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if confirm_overwrite(path)? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".into(),
        ))
    }
}
