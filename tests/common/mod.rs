#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::TempDir;
use assert_fs::prelude::*;

/// Run logsight with colors disabled.
pub fn logsight() -> Command {
    let mut cmd = cargo_bin_cmd!("logsight");
    cmd.env("NO_COLOR", "1").env_remove("LOGSIGHT_STORE");
    cmd
}

/// One JSON line in the store format.
pub fn line(id: u64, user: &str, action: &str, ts: &str, ip: &str, device: &str) -> String {
    format!(
        r#"{{"id":{id},"username":"{user}","action":"{action}","timestamp":"{ts}","ip_address":"{ip}","device":"{device}"}}"#
    )
}

/// Temp dir with `logs.jsonl` holding the given lines.
pub fn store_with(lines: &[String]) -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("logs.jsonl")
        .write_str(&(lines.join("\n") + "\n"))
        .unwrap();
    dir
}

/// Alice on two days plus one off-hours, public-address record from bob.
pub fn sample_store() -> TempDir {
    store_with(&[
        line(1, "alice", "login", "2024-01-01 09:00:00", "10.0.0.1", "macOS"),
        line(2, "alice", "upload_file", "2024-01-01 14:30:00", "192.168.1.5", "macOS"),
        line(3, "alice", "logout", "2024-01-02 18:00:00", "10.0.0.1", "macOS"),
        line(4, "bob", "login", "2024-01-03 03:15:00", "8.8.8.8", "iPhone 15"),
    ])
}
