/*!
 * External render pipeline: LaTeX source → PDF → PNG.
 *
 * Both steps are opaque subprocess calls behind small traits so the
 * batch driver can run without the TeX toolchain (tests, dry runs).
 * A non-zero exit is reported in the returned status and logged; it is
 * never retried or rolled back.
 */

use log::{debug, warn};
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use crate::app_config::RenderConfig;
use crate::errors::RenderError;
use crate::file_utils::FileManager;

/// Outcome of one external program run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl RenderStatus {
    pub fn ok() -> Self {
        Self { success: true, code: Some(0) }
    }
}

impl From<ExitStatus> for RenderStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Turns a LaTeX source file into a page-description file
pub trait Renderer {
    fn render(&self, source: &Path) -> Result<RenderStatus, RenderError>;
}

/// Turns a page-description file into a raster image inside `out_dir`
pub trait Rasterizer {
    fn rasterize(&self, page: &Path, out_dir: &Path) -> Result<RenderStatus, RenderError>;
}

fn run(program: &str, args: &[OsString]) -> Result<RenderStatus, RenderError> {
    debug!("Running {} {:?}", program, args);

    let Output { status, stderr, .. } = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| RenderError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr);
        warn!("{} exited with {:?}", program, status.code());
        if !stderr.trim().is_empty() {
            debug!("{} stderr: {}", program, stderr.trim());
        }
    }

    Ok(status.into())
}

/// `xelatex -output-directory <aux> -interaction=batchmode [-quiet] <source>`
#[derive(Debug, Clone)]
pub struct XelatexRenderer {
    program: String,
    aux_dir: PathBuf,
    quiet: bool,
}

impl XelatexRenderer {
    pub fn new(program: &str, aux_dir: impl Into<PathBuf>, quiet: bool) -> Self {
        Self {
            program: program.to_string(),
            aux_dir: aux_dir.into(),
            quiet,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(&config.compiler, config.aux_dir.clone(), config.quiet)
    }

    /// Arguments passed to the compiler for `source`
    pub fn command_args(&self, source: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-output-directory".into(),
            self.aux_dir.clone().into_os_string(),
            "-interaction=batchmode".into(),
        ];
        if self.quiet {
            args.push("-quiet".into());
        }
        args.push(source.as_os_str().to_owned());
        args
    }
}

impl Renderer for XelatexRenderer {
    fn render(&self, source: &Path) -> Result<RenderStatus, RenderError> {
        if !FileManager::file_exists(source) {
            return Err(RenderError::MissingSource(source.to_path_buf()));
        }
        run(&self.program, &self.command_args(source))
    }
}

/// `gs -dBATCH -dNOPAUSE -sDEVICE=<device> -sOutputFile=<png> -r<dpi> <pdf>`
#[derive(Debug, Clone)]
pub struct GhostscriptRasterizer {
    program: String,
    device: String,
    resolution: u32,
    extra_args: Vec<String>,
}

impl GhostscriptRasterizer {
    pub fn new(program: &str, device: &str, resolution: u32) -> Self {
        Self {
            program: program.to_string(),
            device: device.to_string(),
            resolution,
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(&config.rasterizer, &config.device, config.resolution)
    }

    /// Extra flags inserted before the device selection
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Arguments passed to ghostscript for `page`, writing into `out_dir`
    pub fn command_args(&self, page: &Path, out_dir: &Path) -> Vec<OsString> {
        let output = FileManager::generate_output_path(page, out_dir, "png");

        let mut args: Vec<OsString> = vec!["-dBATCH".into(), "-dNOPAUSE".into()];
        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(format!("-sDEVICE={}", self.device).into());

        let mut output_arg = OsString::from("-sOutputFile=");
        output_arg.push(output.as_os_str());
        args.push(output_arg);

        args.push(format!("-r{}", self.resolution).into());
        args.push(page.as_os_str().to_owned());
        args
    }
}

impl Rasterizer for GhostscriptRasterizer {
    fn rasterize(&self, page: &Path, out_dir: &Path) -> Result<RenderStatus, RenderError> {
        if !FileManager::file_exists(page) {
            return Err(RenderError::MissingSource(page.to_path_buf()));
        }
        FileManager::ensure_dir(out_dir).map_err(|e| RenderError::OutputDir {
            path: out_dir.to_path_buf(),
            message: format!("{:#}", e),
        })?;
        run(&self.program, &self.command_args(page, out_dir))
    }
}

/// Rasterize every PDF directly inside `pdf_dir`.
///
/// Failures are logged per file and do not stop the loop.
pub fn rasterize_dir<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    pdf_dir: &Path,
    out_dir: &Path,
) -> anyhow::Result<Vec<(PathBuf, RenderStatus)>> {
    let mut statuses = Vec::new();

    for pdf in FileManager::list_files(pdf_dir, "pdf")? {
        match rasterizer.rasterize(&pdf, out_dir) {
            Ok(status) => {
                debug!("{:?}: {:?}", pdf, status.code);
                statuses.push((pdf, status));
            }
            Err(e) => warn!("Failed to rasterize {:?}: {}", pdf, e),
        }
    }

    Ok(statuses)
}

/// Renderer that only records what it was asked to render
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: RefCell<Vec<PathBuf>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources passed to `render`, in call order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, source: &Path) -> Result<RenderStatus, RenderError> {
        self.calls.borrow_mut().push(source.to_path_buf());
        Ok(RenderStatus::ok())
    }
}

impl Rasterizer for RecordingRenderer {
    fn rasterize(&self, page: &Path, _out_dir: &Path) -> Result<RenderStatus, RenderError> {
        self.calls.borrow_mut().push(page.to_path_buf());
        Ok(RenderStatus::ok())
    }
}
