#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CLEARED_ENV: [&str; 6] = [
    "TCFORM_CONFIG_PATH",
    "TCFORM_PROJECT_ROOT",
    "TENCENTCLOUD_SECRET_ID",
    "TENCENTCLOUD_SECRET_KEY",
    "TENCENTCLOUD_SECURITY_TOKEN",
    "TENCENTCLOUD_REGION",
];

pub struct TestProject {
    pub root: TempDir,
    home: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        Self { root, home }
    }

    pub fn write_manifest(&self, content: &str) {
        fs::write(self.root.path().join("tcform.yaml"), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    #[allow(dead_code)]
    pub fn state_file(&self) -> PathBuf {
        self.root.path().join(".tcform").join("state.json")
    }

    /// 環境変数の影響を受けない tcform コマンド
    pub fn command(&self) -> Command {
        command_in(self.root.path(), self.home.path())
    }

    /// 認証情報を環境変数で渡した tcform コマンド
    #[allow(dead_code)]
    pub fn authed_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("TENCENTCLOUD_SECRET_ID", "AKIDtest")
            .env("TENCENTCLOUD_SECRET_KEY", "secret");
        cmd
    }
}

fn command_in(dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tcform").unwrap();
    cmd.current_dir(dir)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1");
    for name in CLEARED_ENV {
        cmd.env_remove(name);
    }
    cmd
}
