use crate::config::Config;
use crate::config::migrate::{migrate_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Effective configuration (file values merged with defaults) as YAML.
    pub fn print(cfg: &Config, path: &Path) -> AppResult<()> {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Open the file in `editor`, $EDITOR/$VISUAL, or the platform default;
    /// a failing requested editor falls back to the default one.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{editor_to_use}'"));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{default_editor}'"));
                Ok(())
            }
            _ => Err(AppError::Configuration(format!(
                "failed to edit {} with '{default_editor}'",
                path.display()
            ))),
        }
    }

    /// Report keys missing from the file and validate the values.
    pub fn check(cfg: &Config, path: &Path) -> AppResult<Vec<String>> {
        cfg.rules()?;

        if !path.exists() {
            info(format!("{} does not exist; defaults are in use.", path.display()));
            return Ok(Vec::new());
        }

        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration is complete and valid.");
        } else {
            warning(format!("Missing keys: {}", missing.join(", ")));
        }
        Ok(missing)
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            info(format!("{} does not exist; nothing to migrate.", path.display()));
            return Ok(Vec::new());
        }

        let added = migrate_file(path)?;
        if added.is_empty() {
            info("Configuration already up to date.");
        } else {
            success(format!("Added keys: {}", added.join(", ")));
        }
        Ok(added)
    }
}
