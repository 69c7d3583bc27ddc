//! Common test utilities for review-tool integration tests.
//!
//! Each `TestContext` owns a temporary data directory and runs commands
//! through the same entry point as the binary.

pub mod fixtures;

use std::path::Path;

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

use review_tool::config::Config;
use review_tool::error::ToolError;
use review_tool::Cli;

pub struct TestContext {
    dir: TempDir,
    config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        Self { dir, config }
    }

    pub fn with_config(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Run a command line (without the program name).
    pub fn run(&self, args: &[&str]) -> Result<Value, ToolError> {
        let argv = std::iter::once("review-tool").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).expect("valid command line");
        review_tool::run(cli, self.config.clone())
    }

    /// Run a command that must succeed.
    pub fn ok(&self, args: &[&str]) -> Value {
        self.run(args)
            .unwrap_or_else(|err| panic!("command {args:?} failed: {err}"))
    }

    /// Write raw item and history files, bypassing the tool.
    pub fn seed(&self, items: &Value, history: &Value) {
        std::fs::write(self.data_dir().join("items.json"), items.to_string()).expect("write items");
        std::fs::write(self.data_dir().join("history.json"), history.to_string())
            .expect("write history");
    }
}
