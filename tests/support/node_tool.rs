//! A stand-in node tool: a shell script that appends its arguments to a log.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct NodeTool {
    dir: TempDir,
}

impl NodeTool {
    /// Script that records each invocation and exits with `exit_code`.
    pub fn new(exit_code: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("invocations.log");
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\nexit {exit_code}\n",
            log.display()
        );
        let path = dir.path().join("node-tool");
        fs::write(&path, script).unwrap();
        make_executable(&path);
        Self { dir }
    }

    pub fn program(&self) -> String {
        self.dir.path().join("node-tool").display().to_string()
    }

    /// Argument lists the tool was invoked with, one per call.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("invocations.log")
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
