//! `d3three` command line tool
//!
//! Reads a dataset (a JSON array of `{x, y, z}` objects) and an axes file
//! (a JSON object with `x`, `y` and `z` axis definitions) and prints JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use d3three_core::{load_dataset, DataPoint, PointCloud, WorldPoint};
use d3three_reconstruction::{DelaunayConfig, ReconstructionMethod, SurfaceReconstructor};
use d3three_scale::{AxesConfig, CoordinateMapper, DEFAULT_CHART_OFFSET};
use d3three_visualization::{
    Chart, HeadlessRenderer, PickOutcome, PointerEvent, ScatterChart, Scene, SurfaceChart, TooltipPayload,
    TooltipState, Viewport,
};
use env_logger::Env;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "d3three", author, version, about = "3D scatter and surface chart tools", long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write output here instead of stdout
    #[arg(short, long, global = true, value_name = "PATH")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map data points into world space
    Map {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Triangulate the mapped data into a surface mesh
    Surface {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = Method::RowNeighbor)]
        method: Method,

        /// Fail when the data is not ordered row by row
        #[arg(long)]
        strict: bool,
    },
    /// Render a chart headlessly and pick at a pointer position
    Pick {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = ChartKind::Scatter)]
        chart: ChartKind,

        /// Pointer position in client pixels
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        #[arg(long, default_value_t = 800.0)]
        width: f64,

        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Dataset JSON file
    #[arg(short, long)]
    data: PathBuf,

    /// Axes JSON file
    #[arg(short, long)]
    axes: PathBuf,

    /// Vertical offset added to every mapped point
    #[arg(long, default_value_t = DEFAULT_CHART_OFFSET, allow_negative_numbers = true)]
    offset: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    RowNeighbor,
    Delaunay,
}

impl From<Method> for ReconstructionMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::RowNeighbor => ReconstructionMethod::RowNeighbor,
            Method::Delaunay => ReconstructionMethod::Delaunay(DelaunayConfig::default()),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ChartKind {
    Scatter,
    Surface,
}

#[derive(Serialize, Debug)]
struct MappedRecord {
    index: usize,
    position: [f64; 3],
}

#[derive(Serialize, Debug)]
struct PickReport {
    pick: PickOutcome,
    tooltip: TooltipPayload,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(target: "d3three", "{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: Cli) -> Result<()> {
    let json = match cli.command {
        Command::Map { input } => {
            let (data, axes) = input.load()?;
            serde_json::to_string_pretty(&map_data(&data, &axes, input.offset)?)?
        }
        Command::Surface { input, method, strict } => {
            let (data, axes) = input.load()?;
            let reconstructor = SurfaceReconstructor::new()
                .with_method(method.into())
                .validate_row_major(strict);
            let mapped = map_data(&data, &axes, input.offset)?;
            let cloud: PointCloud<WorldPoint> = mapped.iter().map(|m| WorldPoint::from(m.position)).collect();
            let mesh = reconstructor
                .reconstruct(&cloud)
                .context("surface reconstruction failed")?;
            log::info!(target: "d3three", "{} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
            serde_json::to_string_pretty(&mesh)?
        }
        Command::Pick {
            input,
            chart,
            x,
            y,
            width,
            height,
        } => {
            let (data, axes) = input.load()?;
            let report = pick(&data, &axes, input.offset, chart, Viewport::new(width, height), PointerEvent::new(x, y))?;
            serde_json::to_string_pretty(&report)?
        }
    };
    write_output(cli.output.as_deref(), &json)
}

impl InputArgs {
    fn load(&self) -> Result<(Vec<DataPoint>, AxesConfig)> {
        let data = load_dataset(&self.data)
            .with_context(|| format!("failed to load dataset {}", self.data.display()))?;
        let axes = AxesConfig::load(&self.axes)
            .with_context(|| format!("failed to load axes {}", self.axes.display()))?;
        log::debug!(target: "d3three", "loaded {} data points", data.len());
        Ok((data, axes))
    }
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, json).with_context(|| format!("cannot write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn map_data(data: &[DataPoint], axes: &AxesConfig, offset: f64) -> Result<Vec<MappedRecord>> {
    let registry = axes.build_registry().context("invalid axes")?;
    let mapper = CoordinateMapper::new(&registry)?.with_vertical_offset(offset);
    let mapped: Vec<MappedRecord> = mapper
        .map_all(data)
        .into_iter()
        .map(|m| MappedRecord {
            index: m.index,
            position: [m.position.x, m.position.y, m.position.z],
        })
        .collect();
    if mapped.len() < data.len() {
        log::warn!(target: "d3three", "{} of {} data points could not be mapped", data.len() - mapped.len(), data.len());
    }
    Ok(mapped)
}

fn pick(
    data: &[DataPoint],
    axes: &AxesConfig,
    offset: f64,
    kind: ChartKind,
    viewport: Viewport,
    event: PointerEvent,
) -> Result<PickReport> {
    let mut scene = Scene::new(HeadlessRenderer::new(), viewport);
    let context = scene.context_mut();
    context.set_vertical_offset(offset);
    for orientation in d3three_core::Orientation::ALL {
        let config = axes
            .get(orientation)
            .with_context(|| format!("axes file has no {orientation} axis"))?;
        context.register_axis(config.build(orientation)?);
    }
    context.render_axes()?;

    let mut chart: Box<dyn Chart<HeadlessRenderer>> = match kind {
        ChartKind::Scatter => Box::new(ScatterChart::new()),
        ChartKind::Surface => Box::new(SurfaceChart::new()),
    };
    chart.render(scene.context_mut(), data).context("chart render failed")?;

    let mut tooltip = TooltipState::new();
    let outcome = chart.on_pointer_move(scene.context_mut(), &event, &mut tooltip);
    Ok(PickReport {
        pick: outcome,
        tooltip: tooltip.current().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> AxesConfig {
        serde_json::from_str(
            r#"{
                "x": {"type": "linear", "domain": [0, 2], "range": [0, 100]},
                "y": {"type": "linear", "domain": [0, 2], "range": [0, 100]},
                "z": {"type": "linear", "domain": [0, 2], "range": [0, 100]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cli_parses_pick() {
        let cli = Cli::try_parse_from([
            "d3three", "-v", "pick", "--data", "d.json", "--axes", "a.json", "--chart", "surface", "--x", "10",
            "--y", "-5",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Pick { chart, x, y, width, .. } => {
                assert_eq!(chart, ChartKind::Surface);
                assert_eq!((x, y), (10.0, -5.0));
                assert_eq!(width, 800.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_map_skips_unmappable() {
        let data = vec![DataPoint::new(1, 1, 0), DataPoint::new("?", 1, 0)];
        let mapped = map_data(&data, &axes(), 0.0).unwrap();
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].index, 0);
        assert_eq!(mapped[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pick_center_marker() {
        let data = vec![DataPoint::new(1, 1, 0)];
        let report = pick(
            &data,
            &axes(),
            0.0,
            ChartKind::Scatter,
            Viewport::new(800.0, 600.0),
            PointerEvent::new(400.0, 300.0),
        )
        .unwrap();
        assert!(matches!(report.pick, PickOutcome::Hit(_)));
        assert!(report.tooltip.visible);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pick"]["outcome"], "hit");
    }

    #[test]
    fn test_pick_without_axes_fails() {
        let axes: AxesConfig = serde_json::from_str(r#"{"x": {"type": "linear"}}"#).unwrap();
        let result = pick(
            &[],
            &axes,
            0.0,
            ChartKind::Scatter,
            Viewport::default(),
            PointerEvent::new(0.0, 0.0),
        );
        assert!(result.is_err());
    }
}
