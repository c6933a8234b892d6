use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use tadpole::viewport::{self, ViewTransform};
use tadpole::{GeometryBuffers, LayoutMode, Pipeline, TadpoleConfig};
use tadpole_graphlib::Graph;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Tadpole(tadpole::Error),
    Json(serde_json::Error),
    EmptyScene,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Tadpole(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "scene JSON error: {err}"),
            CliError::EmptyScene => write!(f, "scene has no steps"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<tadpole::Error> for CliError {
    fn from(value: tadpole::Error) -> Self {
        Self::Tadpole(value)
    }
}

impl From<tadpole_graphlib::Error> for CliError {
    fn from(value: tadpole_graphlib::Error) -> Self {
        Self::Tadpole(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    config: Option<String>,
    out: Option<String>,
    pretty: bool,
    verbose: bool,
}

/// Input document: optional config, optional canvas, and the layouts to morph through.
#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(default)]
    config: Option<Value>,
    #[serde(default)]
    canvas: Option<Canvas>,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Canvas {
    width: f64,
    height: f64,
}

#[derive(Debug, Deserialize)]
struct Step {
    mode: String,
    /// Defaults to the moment the previous transition settles.
    #[serde(default)]
    at_ms: Option<f64>,
    #[serde(default)]
    graph: SceneGraph,
}

#[derive(Debug, Default, Deserialize)]
struct SceneGraph {
    #[serde(default)]
    vertices: Vec<String>,
    #[serde(default)]
    edges: Vec<(String, String)>,
}

impl SceneGraph {
    fn build(&self) -> Result<Graph, CliError> {
        let mut g = Graph::new();
        for v in &self.vertices {
            g.add_vertex(v.as_str());
        }
        for (u, v) in &self.edges {
            g.add_edge(u.as_str(), v.as_str())?;
        }
        Ok(g)
    }
}

#[derive(Serialize)]
struct FrameOut {
    mode: LayoutMode,
    at_ms: f64,
    duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<ViewTransform>,
    buffers: GeometryBuffers,
}

#[derive(Serialize)]
struct SceneOut {
    version: &'static str,
    frames: Vec<FrameOut>,
}

fn usage() -> &'static str {
    "tadpole-cli\n\
\n\
USAGE:\n\
  tadpole-cli [--config <path>] [--pretty] [--verbose] [--out <path>] [<scene.json>|-]\n\
\n\
NOTES:\n\
  - If <scene.json> is omitted or '-', the scene is read from stdin.\n\
  - --config replaces the scene's own `config` object.\n\
  - Output is one frame of packed from/to buffers per scene step, as JSON.\n\
  - Logs go to stderr; RUST_LOG overrides the default filter (warn, or debug with --verbose).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(args: &Args, scene: &mut Scene) -> Result<TadpoleConfig, CliError> {
    if let Some(path) = args.config.as_deref() {
        let text = std::fs::read_to_string(path)?;
        return Ok(TadpoleConfig::from_json_str(&text)?);
    }
    match scene.config.take() {
        Some(value) => Ok(TadpoleConfig::from_value(value)?),
        None => Ok(TadpoleConfig::default()),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut scene: Scene = serde_json::from_str(&text)?;
    if scene.steps.is_empty() {
        return Err(CliError::EmptyScene);
    }
    let pipeline = Pipeline::new(load_config(&args, &mut scene)?);
    let margin = pipeline.config().margin;
    let duration = pipeline.config().transition_duration_ms;

    let mut state = pipeline.initial_state();
    let mut frames = Vec::with_capacity(scene.steps.len());
    let mut settle_at = 0.0;
    for (i, step) in scene.steps.iter().enumerate() {
        let mode: LayoutMode = step.mode.parse()?;
        let graph = step.graph.build()?;
        let at_ms = step.at_ms.unwrap_or(settle_at);
        tracing::info!(
            step = i,
            mode = mode.as_str(),
            at_ms,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "laying out scene step"
        );

        let (next, buffers) = pipeline.relayout(&state, &graph, mode, at_ms)?;
        let view = match (scene.canvas, viewport::layout_rect(next.target())) {
            (Some(canvas), Some(rect)) => Some(viewport::center_transform(
                rect,
                canvas.width,
                canvas.height,
                margin,
            )),
            _ => None,
        };
        frames.push(FrameOut {
            mode,
            at_ms,
            duration_ms: duration,
            view,
            buffers,
        });
        state = next;
        settle_at = at_ms + duration;
    }

    let out = SceneOut {
        version: tadpole::VERSION,
        frames,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    write_text(&json, args.out.as_deref())
}

fn main() {
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
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "scene failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
