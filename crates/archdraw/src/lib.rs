#![forbid(unsafe_code)]

//! `archdraw` describes cloud architecture diagrams in code and renders them with Graphviz.
//!
//! ```
//! use archdraw::{DiagramBuilder, EdgeOptions, NodeKind};
//!
//! let mut b = DiagramBuilder::new("Tiny");
//! let repo = b.create_node("Repo", NodeKind::Git)?;
//! let ci = b.cluster("CI", |b| b.create_node("Cloud Build", NodeKind::Build))?;
//! b.connect(repo, ci, EdgeOptions::labeled("push"))?;
//! let diagram = b.finish()?;
//! assert!(diagram.to_dot().contains("subgraph \"cluster_c1\""));
//! # Ok::<(), archdraw::Error>(())
//! ```
//!
//! # Features
//!
//! - `render`: write images through the Graphviz `dot` executable (`archdraw::render`)
//! - `raster`: convert Graphviz SVG to PNG/JPG/PDF in-process

pub use archdraw_core::*;

pub mod blueprints;

#[cfg(feature = "render")]
pub mod render {
    pub use archdraw_render::{
        Error, OutputFormat, RasterBackend, RenderOptions, Result, graphviz, open_path,
        output_path, render, render_bytes,
    };

    #[cfg(feature = "raster")]
    pub use archdraw_render::raster;
}
