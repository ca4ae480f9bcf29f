//! The render pipeline
//!
//! A request flows through four collaborators: the fingerprinter derives the
//! content hash that names every transient file, the document builder writes
//! `<hash>.tex`, the toolchain compiles it to `<hash>.dvi` and converts that
//! to PNG, and a [`workspace::WorkspaceGuard`] sweeps the hash-named
//! intermediates on every exit path.
//!
//! Compile success is judged by the presence of the `.dvi` artifact, not by
//! the compiler's exit status, which is unreliable on malformed input.

pub mod document;
pub mod fingerprint;
pub mod toolchain;
pub mod workspace;

pub use fingerprint::{fingerprint, ContentHash};
pub use toolchain::{SystemToolchain, Toolchain};

use crate::config::Config;
use crate::error::{TexPngError, TexPngResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::fs;
use tracing::{debug, info, warn};
use workspace::WorkspaceGuard;

/// Post-processes the resolved output path before it is returned to the
/// caller. The file itself is never touched.
pub type NameTransform = Box<dyn Fn(PathBuf) -> PathBuf + Send + Sync>;

/// One formula to render. Immutable once hashed.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// LaTeX formula body, without math delimiters
    pub formula: String,
    /// Output density (DPI) for the converter
    pub density: u32,
    /// Packages declared in the generated document, in order
    pub packages: Vec<String>,
    /// Explicit output path; defaults to `<work_dir>/<hash>.png`
    pub output: Option<PathBuf>,
    /// Re-render even if a cached artifact exists at the default path
    pub force: bool,
}

impl RenderRequest {
    /// Request with the configured defaults for density and packages
    pub fn new(formula: impl Into<String>, config: &Config) -> Self {
        Self {
            formula: formula.into(),
            density: config.render.density,
            packages: config.render.packages.clone(),
            output: None,
            force: false,
        }
    }

    /// Set the target file
    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Override the output density
    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density;
        self
    }
}

/// Result of a completed render
#[derive(Debug)]
pub struct RenderOutcome {
    /// Path to the PNG, after any name transform
    pub path: PathBuf,
    /// Content hash of the request
    pub hash: ContentHash,
    /// Whether a previously rendered artifact was reused
    pub cached: bool,
}

/// The render pipeline façade.
///
/// Holds the work directory and toolchain explicitly; there is no ambient
/// global state. Concurrent renders of distinct hashes are independent;
/// renders of the same hash serialize on a per-hash lock so they never race
/// the same transient files.
pub struct Renderer {
    work_dir: PathBuf,
    toolchain: Box<dyn Toolchain>,
    name_transform: Option<NameTransform>,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl Renderer {
    /// Renderer over the system toolchain described by `config`
    pub fn new(config: &Config) -> Self {
        Self::with_toolchain(
            config.render.work_dir.clone(),
            Box::new(SystemToolchain::new(&config.tools)),
        )
    }

    /// Renderer over an arbitrary toolchain
    pub fn with_toolchain(work_dir: PathBuf, toolchain: Box<dyn Toolchain>) -> Self {
        Self {
            work_dir,
            toolchain,
            name_transform: None,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Install a transform applied to the returned output path
    pub fn with_name_transform(
        mut self,
        transform: impl Fn(PathBuf) -> PathBuf + Send + Sync + 'static,
    ) -> Self {
        self.name_transform = Some(Box::new(transform));
        self
    }

    /// Render a formula to PNG.
    ///
    /// Returns the resolved output path on success. On failure the first
    /// fatal error is returned and all hash-named intermediates have already
    /// been removed.
    pub async fn render(&self, request: &RenderRequest) -> TexPngResult<RenderOutcome> {
        let hash = fingerprint(&request.formula, request.density);
        let target = match &request.output {
            Some(path) => path.clone(),
            None => self.work_dir.join(hash.file_name("png")),
        };

        let lock = self.hash_lock(hash.as_str());
        let _serialized = lock.lock().await;

        // Hash-named artifact from a prior request doubles as a cache entry
        if !request.force && request.output.is_none() && target.exists() {
            debug!("Cache hit for {}", hash);
            return Ok(self.outcome(target, hash, true));
        }

        fs::create_dir_all(&self.work_dir)
            .await
            .map_err(|e| TexPngError::WorkDirCreate {
                path: self.work_dir.clone(),
                source: e,
            })?;

        let guard = WorkspaceGuard::new(&self.work_dir, hash.as_str(), Some(&target));
        let result = self.run_pipeline(request, &hash, &target).await;
        drop(guard);

        result?;
        info!("Rendered formula to {}", target.display());
        Ok(self.outcome(target, hash, false))
    }

    /// COMPILE then CONVERT; any error is terminal for the request
    async fn run_pipeline(
        &self,
        request: &RenderRequest,
        hash: &ContentHash,
        target: &std::path::Path,
    ) -> TexPngResult<()> {
        let tex_path = self.work_dir.join(hash.file_name("tex"));
        document::write_document(&tex_path, &request.formula, &request.packages).await?;

        let diagnostics = self.compile(hash).await?;

        let dvi_name = hash.file_name("dvi");
        if !self.work_dir.join(&dvi_name).exists() {
            return Err(TexPngError::compile_failed(diagnostics));
        }

        match self
            .toolchain
            .convert(&self.work_dir, &dvi_name, request.density, target)
            .await
        {
            Ok(_) => {}
            Err(e @ TexPngError::ToolTimedOut { .. }) => return Err(e),
            Err(e) => {
                return Err(TexPngError::convert_failed(format!(
                    "could not execute converter: {e}"
                )))
            }
        }

        match fs::metadata(target).await {
            Ok(meta) if meta.len() > 0 => Ok(()),
            _ => Err(TexPngError::convert_failed(
                "converter produced no output".to_string(),
            )),
        }
    }

    /// Run the compiler and persist its filtered diagnostics to `<hash>.err`.
    ///
    /// A compiler that cannot be spawned is indistinguishable from a syntax
    /// error at this level; both surface later as a missing `.dvi`.
    async fn compile(&self, hash: &ContentHash) -> TexPngResult<String> {
        let tex_name = hash.file_name("tex");
        let diagnostics = match self.toolchain.compile(&self.work_dir, &tex_name).await {
            Ok(output) => toolchain::filter_diagnostics(&output.stdout),
            Err(e @ TexPngError::ToolTimedOut { .. }) => return Err(e),
            Err(e) => {
                debug!("Compiler invocation failed: {}", e);
                String::new()
            }
        };

        let err_path = self.work_dir.join(hash.file_name("err"));
        if let Err(e) = fs::write(&err_path, &diagnostics).await {
            warn!("Failed to write {}: {}", err_path.display(), e);
        }

        Ok(diagnostics)
    }

    fn outcome(&self, path: PathBuf, hash: ContentHash, cached: bool) -> RenderOutcome {
        let path = match &self.name_transform {
            Some(transform) => transform(path),
            None => path,
        };
        RenderOutcome { path, hash, cached }
    }

    fn hash_lock(&self, hash: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().expect("lock map poisoned");
        locks
            .entry(hash.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
