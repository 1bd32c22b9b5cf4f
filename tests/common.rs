#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn stempel() -> Command {
    cargo_bin_cmd!("stempel")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid test time")
}

/// Isolated database and configuration file for one test.
///
/// The configuration file is not created unless [`Sandbox::write_config`] is
/// called, so the defaults apply (Monday to Friday 8h, offset 2 minutes).
pub struct Sandbox {
    pub dir: TempDir,
    pub db: String,
    pub config: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let db = dir.path().join("stempel.sqlite").to_string_lossy().to_string();
        let config = dir.path().join("stempel.conf");
        Self { dir, db, config }
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(&self.config, yaml).expect("write config");
    }

    /// Absolute path of a file inside the sandbox.
    pub fn file(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().to_string()
    }

    /// Command with `--db`, `--config` and a pinned clock.
    pub fn cmd(&self, now: &str) -> Command {
        let mut cmd = stempel();
        cmd.args([
            "--db",
            &self.db,
            "--config",
            &self.config.to_string_lossy(),
            "--now",
            now,
        ]);
        cmd
    }

    /// Create the schema the way a user would.
    pub fn init(&self) {
        self.cmd("2025-03-01 08:00")
            .args(["--test", "init"])
            .assert()
            .success();
    }

    pub fn amend(&self, day: &str, arrival: &str, departure: &str, home: bool) {
        let mut cmd = self.cmd(&format!("{day} 20:00"));
        cmd.args(["amend", "--date", day, "--in", arrival, "--out", departure]);
        if home {
            cmd.arg("--home");
        }
        cmd.assert().success();
    }
}
