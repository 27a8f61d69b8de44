use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub fn run_callnotes(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
    llm_api_key: Option<String>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
            llm_api_key: None,
        }
    }

    /// Run with `CALLNOTES_LLM_API_KEY` set so provider construction succeeds.
    #[allow(dead_code)]
    pub fn with_llm_api_key(mut self, key: &str) -> Self {
        self.llm_api_key = Some(key.to_string());
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_callnotes"));
        cmd.args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("CALLNOTES_LLM_API_KEY")
            .env_remove("CALLNOTES_FIREFLIES_API_KEY")
            .env_remove("CALLNOTES_TEAM_NAMES")
            .env_remove("RUST_LOG");

        if let Some(key) = &self.llm_api_key {
            cmd.env("CALLNOTES_LLM_API_KEY", key);
        }

        cmd.output().expect("failed to execute callnotes binary")
    }

    /// A scratch path inside the test's temporary data dir.
    #[allow(dead_code)]
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.data.path().join(name)
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}
