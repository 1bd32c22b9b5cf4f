use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

/// Ask a yes/no question on stdin. Anything but `y`/`yes` means no.
pub fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!(
        "The file '{}' already exists. Overwrite it? [y/N]",
        path.display()
    ));
    print!("> ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the path written, or `None` when the user declined to
    /// overwrite an existing file.
    pub fn backup(pool: &DbPool, dest_file: &str, compress: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&pool.path);
        let dest = expand_tilde(dest_file);

        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.clone()
        };
        if final_target.exists() && !confirm_overwrite(&final_target)? {
            info("Backup cancelled.");
            return Ok(None);
        }

        let final_path = if compress {
            compress_backup(src, &final_target)?
        } else {
            fs::copy(src, &dest)?;
            dest.clone()
        };

        success(format!("Backup created: {}", final_path.display()));
        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }
}

/// Write `src` as the single entry of a deflated zip archive at `zip_path`.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "stempel.sqlite".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path.to_path_buf())
}
