use archdraw::blueprints;
use archdraw::render::raster::RasterOptions;
use archdraw::render::{OutputFormat, RasterBackend, RenderOptions};
use archdraw::{Diagram, Direction};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "ARCHDRAW_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Diagram(archdraw::Error),
    Render(archdraw::render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Diagram(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<archdraw::Error> for CliError {
    fn from(value: archdraw::Error) -> Self {
        Self::Diagram(value)
    }
}

impl From<archdraw::render::Error> for CliError {
    fn from(value: archdraw::render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Dot,
    Json,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    format: OutputFormat,
    out: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    direction: Option<Direction>,
    graph_attrs: Vec<(String, String)>,
    dot_binary: Option<PathBuf>,
    raster: bool,
    scale: f32,
    background: Option<String>,
    open: bool,
    pretty: bool,
}

fn usage() -> &'static str {
    "archdraw-cli\n\
\n\
Renders the built-in \"Innovate Inc. GKE GitOps Architecture\" diagram.\n\
\n\
USAGE:\n\
  archdraw-cli [render] [--format png|jpg|svg|pdf|dot] [--out <path>] [--out-dir <dir>] [--direction TB|BT|LR|RL] [--graph-attr <key>=<value>]... [--dot-binary <path>] [--raster] [--scale <n>] [--background <color>] [--open]\n\
  archdraw-cli dot [--out <path>] [--direction TB|BT|LR|RL] [--graph-attr <key>=<value>]...\n\
  archdraw-cli json [--pretty] [--out <path>] [--direction TB|BT|LR|RL] [--graph-attr <key>=<value>]...\n\
\n\
NOTES:\n\
  - render writes <title>.<ext> into --out-dir (default: current directory) unless --out is given.\n\
  - dot and json print to stdout unless --out is given.\n\
  - The Graphviz executable is --dot-binary, else $ARCHDRAW_DOT, else `dot` on PATH.\n\
  - --raster asks Graphviz for SVG and converts it in-process (honors --scale and --background).\n\
  - Log verbosity is read from $ARCHDRAW_LOG (default: warn).\n\
"
}

fn parse_graph_attr(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "dot" => args.command = Command::Dot,
            "json" => args.command = Command::Json,
            "--pretty" => args.pretty = true,
            "--raster" => args.raster = true,
            "--open" => args.open = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(PathBuf::from(out));
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(PathBuf::from(dir));
            }
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction = Some(
                    dir.parse::<Direction>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--graph-attr" => {
                let Some(kv) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let pair = parse_graph_attr(kv).ok_or(CliError::Usage(usage()))?;
                args.graph_attrs.push(pair);
            }
            "--dot-binary" => {
                let Some(bin) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.dot_binary = Some(PathBuf::from(bin));
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn build_diagram(args: &Args) -> Result<Diagram, CliError> {
    let diagram = blueprints::gke_gitops_with(|attrs| {
        if let Some(direction) = args.direction {
            attrs.set_direction(direction);
        }
        for (key, value) in &args.graph_attrs {
            attrs.graph.insert(key.clone(), value.clone());
        }
    })?;
    Ok(diagram)
}

fn write_text(text: &str, out: Option<&PathBuf>) -> Result<(), CliError> {
    match out {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn render_options(args: &Args) -> RenderOptions {
    RenderOptions {
        format: args.format,
        out: args.out.clone(),
        out_dir: args.out_dir.clone(),
        dot_binary: args.dot_binary.clone(),
        open_after_render: args.open,
        backend: if args.raster {
            RasterBackend::Resvg
        } else {
            RasterBackend::Graphviz
        },
        raster: RasterOptions {
            scale: args.scale,
            background: args.background.clone(),
            ..RasterOptions::default()
        },
    }
}

fn run(args: Args) -> Result<(), CliError> {
    tracing::debug!(command = ?args.command, format = %args.format, "running");
    let diagram = build_diagram(&args)?;

    match args.command {
        Command::Dot => write_text(&diagram.to_dot(), args.out.as_ref()),
        Command::Json => {
            let mut json = diagram.to_json_string(args.pretty)?;
            json.push('\n');
            write_text(&json, args.out.as_ref())
        }
        Command::Render => {
            let options = render_options(&args);
            let path = archdraw::render::render(diagram, &options)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
