//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated projects root
//! - Managing working directories
//! - Writing session logs with controlled modification times
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use filetime::{FileTime, set_file_mtime};
use logscribe_core::{PROJECTS_DIR_ENV, encode_project_dir_name, normalize_path};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use logscribe_testing::{SessionBuilder, TestWorld};
///
/// let world = TestWorld::new().enter_dir("my-app");
/// world
///     .write_session("my-app", "7f2abd2d", &SessionBuilder::new("7f2abd2d").user("hi"), 100)
///     .unwrap();
///
/// let result = world.run(&["show", "7f2a"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cwd: PathBuf,
    projects_root: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let projects_root = base_path.join(".claude").join("projects");

        std::fs::create_dir_all(&projects_root).expect("Failed to create projects root");

        Self {
            cwd: base_path,
            temp_dir,
            projects_root,
            env_vars: HashMap::new(),
        }
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Change the current working directory (relative to temp root).
    ///
    /// This method consumes `self` for use in builder pattern chains.
    pub fn enter_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.set_cwd(path);
        self
    }

    /// Set the current working directory without consuming self.
    pub fn set_cwd<P: AsRef<Path>>(&mut self, path: P) {
        let new_cwd = self.resolve(path.as_ref());
        std::fs::create_dir_all(&new_cwd).expect("Failed to create directory");
        self.cwd = new_cwd;
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Folder under the projects root that holds logs for `project`.
    pub fn project_log_dir(&self, project: &str) -> PathBuf {
        let project_dir = self.resolve(Path::new(project));
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        self.projects_root
            .join(encode_project_dir_name(&normalize_path(&project_dir)))
    }

    /// Write `<session_id>.jsonl` into the log folder of `project` and set
    /// its modification time to `mtime` (seconds since the epoch).
    pub fn write_session(
        &self,
        project: &str,
        session_id: &str,
        session: &crate::SessionBuilder,
        mtime: i64,
    ) -> Result<PathBuf> {
        let folder = self.project_log_dir(project);
        self.write_raw(&folder, &format!("{}.jsonl", session_id), &session.to_jsonl(), mtime)
    }

    /// Write arbitrary file content with a fixed modification time.
    pub fn write_raw(
        &self,
        folder: &Path,
        file_name: &str,
        content: &str,
        mtime: i64,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(folder)?;
        let path = folder.join(file_name);
        std::fs::write(&path, content)?;
        set_file_mtime(&path, FileTime::from_unix_time(mtime, 0))?;
        Ok(path)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env(PROJECTS_DIR_ENV, &self.projects_root)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(self.temp_dir.path().join("config.toml"));

        cmd.current_dir(&self.cwd);

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built (which cargo test does automatically for integration tests).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("logscribe")
            .map_err(|e| anyhow::anyhow!("Failed to find logscribe binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.temp_dir.path().join(path)
        }
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, if the process was not killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
