#![forbid(unsafe_code)]

//! Graphviz backend for `archdraw` diagrams.
//!
//! [`render`] serializes a finished [`Diagram`] to DOT, pipes it through the `dot` executable once
//! and writes a single file named after the diagram title. With the `raster` feature, Graphviz can
//! be asked for SVG only and the conversion to PNG/JPG/PDF happens in-process.

mod format;
pub mod graphviz;
mod open;
#[cfg(feature = "raster")]
pub mod raster;

pub use format::OutputFormat;
pub use open::open_path;

use archdraw_core::Diagram;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graphviz executable `{}` was not found (install Graphviz or set ARCHDRAW_DOT)", .binary.display())]
    BackendUnavailable { binary: PathBuf },

    #[error("graphviz exited with {status}: {stderr}")]
    BackendFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] raster::RasterError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Which program turns the layout into the final bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RasterBackend {
    /// Graphviz renders the requested format directly.
    #[default]
    Graphviz,
    /// Graphviz renders SVG; `resvg`/`svg2pdf` convert it.
    #[cfg(feature = "raster")]
    Resvg,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Explicit output path. Takes precedence over `out_dir`.
    pub out: Option<PathBuf>,
    /// Directory for the title-derived file name. Defaults to the working directory.
    pub out_dir: Option<PathBuf>,
    /// Path to the `dot` executable. Falls back to `$ARCHDRAW_DOT`, then `dot` on `PATH`.
    pub dot_binary: Option<PathBuf>,
    pub open_after_render: bool,
    pub backend: RasterBackend,
    #[cfg(feature = "raster")]
    pub raster: raster::RasterOptions,
}

impl RenderOptions {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn with_dot_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.dot_binary = Some(binary.into());
        self
    }
}

/// Where [`render`] writes `diagram` for the given options.
pub fn output_path(diagram: &Diagram, options: &RenderOptions) -> PathBuf {
    if let Some(out) = &options.out {
        return out.clone();
    }
    let file_name = format!("{}.{}", diagram.file_stem(), options.format.extension());
    match &options.out_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Produces the output bytes without touching the file system.
pub fn render_bytes(diagram: &Diagram, options: &RenderOptions) -> Result<Vec<u8>> {
    let source = diagram.to_dot();
    if options.format == OutputFormat::Dot {
        return Ok(source.into_bytes());
    }

    let binary = graphviz::resolve_binary(options.dot_binary.as_deref());
    match options.backend {
        RasterBackend::Graphviz => graphviz::run_dot(&binary, options.format.graphviz_flag(), &source),
        #[cfg(feature = "raster")]
        RasterBackend::Resvg => {
            let svg = graphviz::run_dot(&binary, OutputFormat::Svg.graphviz_flag(), &source)?;
            let svg = String::from_utf8_lossy(&svg);
            let bytes = match options.format {
                OutputFormat::Png => raster::svg_to_png(&svg, &options.raster)?,
                OutputFormat::Jpg => raster::svg_to_jpeg(&svg, &options.raster)?,
                OutputFormat::Pdf => raster::svg_to_pdf(&svg)?,
                OutputFormat::Svg | OutputFormat::Dot => svg.into_owned().into_bytes(),
            };
            Ok(bytes)
        }
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Lays out `diagram` once and writes it to [`output_path`]. Returns the written path.
pub fn render(diagram: Diagram, options: &RenderOptions) -> Result<PathBuf> {
    let path = output_path(&diagram, options);
    tracing::info!(
        title = diagram.title(),
        format = %options.format,
        path = %path.display(),
        nodes = diagram.node_count(),
        edges = diagram.edge_count(),
        "rendering diagram"
    );

    let bytes = render_bytes(&diagram, options)?;
    write_output(&path, &bytes)?;

    if options.open_after_render {
        open_path(&path)?;
    }
    Ok(path)
}
