//! External tool invocation
//!
//! The compiler and converter are opaque executables reached through the
//! [`Toolchain`] trait, so the pipeline can be exercised against a fake in
//! tests. [`SystemToolchain`] is the real thing: `latex` and `dvipng` driven
//! via `tokio::process` with stdin closed (the compiler must never block
//! waiting on interactive input).

use crate::config::ToolsConfig;
use crate::error::{TexPngError, TexPngResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a finished tool invocation
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally. Logged only: success is
    /// judged by artifact presence, not status.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Interface over the two external tools of the pipeline
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Compile `<hash>.tex` inside `work_dir`, expected to produce `<hash>.dvi`
    async fn compile(&self, work_dir: &Path, tex_file: &str) -> TexPngResult<ToolOutput>;

    /// Convert `<hash>.dvi` inside `work_dir` to a raster image at `target`
    async fn convert(
        &self,
        work_dir: &Path,
        dvi_file: &str,
        density: u32,
        target: &Path,
    ) -> TexPngResult<ToolOutput>;

    /// Check if the compiler responds to a version probe
    async fn compiler_available(&self) -> bool;

    /// Check if the converter responds to a version probe
    async fn converter_available(&self) -> bool;
}

/// Extract the compiler's diagnostic lines: those beginning with `!`,
/// excluding the benign `Emergency stop` class.
pub fn filter_diagnostics(output: &str) -> String {
    let lines: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with('!') && !line.contains("Emergency"))
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        let mut filtered = lines.join("\n");
        filtered.push('\n');
        filtered
    }
}

/// The real toolchain: `latex` and `dvipng` found at configured paths
pub struct SystemToolchain {
    latex: PathBuf,
    dvipng: PathBuf,
    timeout: Option<Duration>,
}

impl SystemToolchain {
    /// Build a toolchain from the tools section of the configuration
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            latex: config.latex.clone(),
            dvipng: config.dvipng.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Run a prepared command to completion, capturing its output.
    ///
    /// When a timeout is configured, the wait is bounded and expiry kills
    /// the child.
    async fn run(&self, tool: &str, mut command: Command) -> TexPngResult<ToolOutput> {
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        debug!("Executing: {:?}", command.as_std());

        let pending = command.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                TexPngError::ToolTimedOut {
                    tool: tool.to_string(),
                    secs: limit.as_secs(),
                }
            })?,
            None => pending.await,
        }
        .map_err(|e| TexPngError::command_failed(tool, e))?;

        debug!("{} exited with {:?}", tool, output.status.code());

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn probe(path: &Path) -> bool {
        Command::new(path)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl Toolchain for SystemToolchain {
    async fn compile(&self, work_dir: &Path, tex_file: &str) -> TexPngResult<ToolOutput> {
        let mut command = Command::new(&self.latex);
        command.arg(tex_file).current_dir(work_dir);

        self.run("latex", command).await
    }

    async fn convert(
        &self,
        work_dir: &Path,
        dvi_file: &str,
        density: u32,
        target: &Path,
    ) -> TexPngResult<ToolOutput> {
        let mut command = Command::new(&self.dvipng);
        command
            .arg("-q")
            .args(["-T", "tight"])
            .args(["-D", &density.to_string()])
            .arg("-o")
            .arg(target)
            .arg(dvi_file)
            .current_dir(work_dir);

        self.run("dvipng", command).await
    }

    async fn compiler_available(&self) -> bool {
        Self::probe(&self.latex).await
    }

    async fn converter_available(&self) -> bool {
        Self::probe(&self.dvipng).await
    }
}
