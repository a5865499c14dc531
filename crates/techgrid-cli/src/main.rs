use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use techgrid::export::{
    Deliver, DirectoryDelivery, ExportError, ExportFormat, WriterDelivery, export_filename,
    svg_document_bytes,
};
use techgrid::render::raster::{RasterError, RasterOptions};
use techgrid::render::{Geometry, HeadlessRenderer, PageMetrics};
use techgrid::{LabelMode, Layer, Length, Unit};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layer(techgrid::Error),
    Export(ExportError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layer(err) => write!(f, "{err}"),
            CliError::Export(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<techgrid::Error> for CliError {
    fn from(value: techgrid::Error) -> Self {
        Self::Layer(value)
    }
}

impl From<ExportError> for CliError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    format: ExportFormat,
    label_mode: Option<LabelMode>,
    width: Option<f64>,
    height: Option<f64>,
    unit: Option<Unit>,
    font_size: Option<f64>,
    font_unit: Option<Unit>,
    header: Option<String>,
    id: Option<String>,
    scale: f32,
    background: Option<String>,
    out: Option<String>,
    out_dir: Option<String>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    name: &'a str,
    page: &'a PageMetrics,
    geometry: &'a Geometry,
}

fn usage() -> &'static str {
    "techgrid-cli\n\
\n\
USAGE:\n\
  techgrid-cli layout [--pretty] [PAGE OPTIONS] [<path>|-]\n\
  techgrid-cli [render] [--format svg|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--id <svg-id>] [--out <path>|-] [--out-dir <dir>] [PAGE OPTIONS] [<path>|-]\n\
\n\
PAGE OPTIONS:\n\
  --label-mode full-name|acronym|blank\n\
  --width <n> --height <n> [--unit in|cm|px|em|pt]\n\
  --font-size <n> [--font-unit in|cm|px|em|pt]\n\
  --header <label>\n\
  --verbose\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the layer JSON is read from stdin.\n\
  - layout prints the page metrics and grid geometry as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to <out-dir or .>/<layer name>.<ext>.\n\
  - RUST_LOG overrides the log filter; logs go to stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v >= 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Render,
        format: ExportFormat::Svg,
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--format" => {
                args.format = next_value(&mut it)?
                    .parse::<ExportFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--label-mode" => {
                args.label_mode = Some(
                    next_value(&mut it)?
                        .parse::<LabelMode>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--width" => args.width = Some(parse_number(next_value(&mut it)?)?),
            "--height" => args.height = Some(parse_number(next_value(&mut it)?)?),
            "--font-size" => args.font_size = Some(parse_number(next_value(&mut it)?)?),
            "--unit" | "--font-unit" => {
                let unit = next_value(&mut it)?
                    .parse::<Unit>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if a == "--unit" {
                    args.unit = Some(unit);
                } else {
                    args.font_unit = Some(unit);
                }
            }
            "--header" => args.header = Some(next_value(&mut it)?.clone()),
            "--id" => args.id = Some(next_value(&mut it)?.clone()),
            "--scale" => {
                args.scale = next_value(&mut it)?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--out-dir" => args.out_dir = Some(next_value(&mut it)?.clone()),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
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
    let filter = if verbose { "debug" } else { "warn" };
    // stdout carries SVG/JSON output; logs go to stderr.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
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

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

/// Applies command-line page overrides on top of the layer document's own page settings.
fn apply_overrides(layer: &mut Layer, args: &Args) {
    if let Some(mode) = args.label_mode {
        layer.label_mode = mode;
    }
    let page = &mut layer.page;
    if let Some(unit) = args.unit {
        page.width.unit = unit.as_tag().to_string();
        page.height.unit = unit.as_tag().to_string();
    }
    if let Some(w) = args.width {
        page.width.value = w;
    }
    if let Some(h) = args.height {
        page.height.value = h;
    }
    if let Some(size) = args.font_size {
        page.font_size = Length {
            value: size,
            unit: args
                .font_unit
                .map(|u| u.as_tag().to_string())
                .unwrap_or_else(|| page.font_size.unit.clone()),
        };
    } else if let Some(unit) = args.font_unit {
        page.font_size.unit = unit.as_tag().to_string();
    }
    if let Some(header) = args.header.as_deref() {
        page.header_label = header.to_string();
    }
}

/// Picks the delivery strategy and file name for an export.
///
/// `--out -` streams to stdout, `--out <path>` writes that file, and otherwise SVG goes to stdout
/// while binary formats land in `<out-dir or .>/<layer name>.<ext>`.
fn deliver(bytes: &[u8], layer: &Layer, args: &Args) -> Result<(), CliError> {
    let default_name = export_filename(layer.display_name(), args.format.extension());
    match args.out.as_deref() {
        Some("-") => WriterDelivery::new(std::io::stdout().lock()).deliver(bytes, &default_name)?,
        Some(path) => {
            let path = Path::new(path);
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(default_name);
            DirectoryDelivery::new(dir).deliver(bytes, &name)?;
        }
        None if !args.format.is_raster() && args.out_dir.is_none() => {
            WriterDelivery::new(std::io::stdout().lock()).deliver(bytes, &default_name)?
        }
        None => {
            let dir = args
                .out_dir
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            DirectoryDelivery::new(dir).deliver(bytes, &default_name)?;
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut layer = Layer::from_json_str(&text)?;
    apply_overrides(&mut layer, &args);
    tracing::debug!(
        name = layer.display_name(),
        categories = layer.tactics.len(),
        "loaded layer"
    );

    let mut renderer = HeadlessRenderer::new();
    if let Some(id) = args.id.as_deref() {
        renderer = renderer.with_svg_id(id);
    }

    match args.command {
        Command::Layout => {
            let (page, geometry) = renderer.layout(&layer);
            let out = LayoutOut {
                name: layer.display_name(),
                page: &page,
                geometry: &geometry,
            };
            write_json(&out, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let raster_options = RasterOptions {
                scale: args.scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            };
            let bytes = match args.format {
                ExportFormat::Svg => svg_document_bytes(&renderer.render_svg(&layer)),
                ExportFormat::Png => renderer.render_png(&layer, &raster_options)?,
                ExportFormat::Jpeg => renderer.render_jpeg(&layer, &raster_options)?,
                ExportFormat::Pdf => renderer.render_pdf(&layer)?,
            };
            deliver(&bytes, &layer, &args)
        }
    }
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
        eprintln!("{err}");
        std::process::exit(1);
    }
}
