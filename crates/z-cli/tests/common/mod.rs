//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Identity and isolation for git, both for fixtures and for `z` itself
const GIT_ENV: [(&str, &str); 5] = [
    ("GIT_AUTHOR_NAME", "z test"),
    ("GIT_AUTHOR_EMAIL", "z@example.com"),
    ("GIT_COMMITTER_NAME", "z test"),
    ("GIT_COMMITTER_EMAIL", "z@example.com"),
    ("GIT_CONFIG_NOSYSTEM", "1"),
];

/// Test context with a temporary home directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(".config").join("z.yml");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Write the config file
    pub fn with_config(self, config: &str) -> Self {
        std::fs::create_dir_all(self.config_path.parent().unwrap())
            .expect("Failed to create config dir");
        std::fs::write(&self.config_path, config).expect("Failed to write config");
        self
    }

    /// A config with one local K at `<home>/k` and the given blueprints section
    pub fn with_k(self, blueprints: &str) -> Self {
        let k = self.k_path();
        std::fs::create_dir_all(&k).expect("Failed to create K dir");
        let config = format!(
            "settings:\n  verbosity-level: error\nKs:\n  k:\n    path: {}\nblueprints:\n{blueprints}",
            k.display()
        );
        self.with_config(&config)
    }

    /// A config with one K at `<home>/k` cloned from the bare repository
    /// `<home>/remote.git`, whose `main` holds a single commit with `README.md`
    pub fn with_remote_k(self) -> Self {
        let remote = self.remote_path();
        let remote_url = remote.to_string_lossy().into_owned();
        let seed = self.seed_path();
        std::fs::create_dir_all(&seed).expect("Failed to create seed dir");

        self.git(self.path(), &["init", "--bare", &remote_url]);
        self.git(&seed, &["init"]);
        std::fs::write(seed.join("README.md"), "first\n").expect("Failed to write README");
        self.git(&seed, &["add", "."]);
        self.git(&seed, &["commit", "-m", "initial"]);
        self.git(&seed, &["push", &remote_url, "HEAD:refs/heads/main"]);
        self.git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        self.git(self.path(), &["clone", &remote_url, "k"]);

        let config = format!(
            "settings:\n  verbosity-level: error\nKs:\n  k:\n    path: {}\n    url: {remote_url}\n",
            self.k_path().display()
        );
        self.with_config(&config)
    }

    /// Bare repository created by [`TestContext::with_remote_k`]
    pub fn remote_path(&self) -> PathBuf {
        self.path().join("remote.git")
    }

    /// Working copy that seeded the remote, usable to push competing commits
    pub fn seed_path(&self) -> PathBuf {
        self.path().join("seed")
    }

    /// Run git in `dir`, panicking on failure, and return its trimmed stdout
    pub fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = std::process::Command::new("git")
            .current_dir(dir)
            .args(args)
            .env("HOME", self.path())
            .envs(GIT_ENV)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Put an executable shell script named `name` first on the command's PATH
    pub fn fake_program(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.bin_path();
        std::fs::create_dir_all(&bin).expect("Failed to create bin dir");
        let path = bin.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
    }

    fn bin_path(&self) -> PathBuf {
        self.path().join("bin")
    }

    /// Get path to temp directory (the home directory of the command)
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory of the K created by [`TestContext::with_k`]
    pub fn k_path(&self) -> PathBuf {
        self.path().join("k")
    }

    /// Create a file inside the K
    pub fn k_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.k_path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dir");
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("z").expect("Binary not found");
        let path = match std::env::var_os("PATH") {
            Some(path) => {
                let mut dirs = vec![self.bin_path()];
                dirs.extend(std::env::split_paths(&path));
                std::env::join_paths(dirs).expect("Failed to build PATH")
            }
            None => self.bin_path().into_os_string(),
        };
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("PATH", path)
            .envs(GIT_ENV)
            .env("Z_CONFIG", &self.config_path)
            .env_remove("Z_LOG")
            .env("NO_COLOR", "1")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_failure(&self);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_failure(&self) {
        assert!(
            !self.status.success(),
            "Command succeeded unexpectedly\nstdout: {}",
            String::from_utf8_lossy(&self.stdout)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(
            stdout.contains(text),
            "stdout did not contain '{}'\nstdout: {}",
            text,
            stdout
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(
            stderr.contains(text),
            "stderr did not contain '{}'\nstderr: {}",
            text,
            stderr
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {}, got {:?}\nstderr: {}",
            code,
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }
}
