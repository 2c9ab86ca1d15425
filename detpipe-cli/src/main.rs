use clap::Parser;
use detpipe::io::frame_size_from_path;
use detpipe::{
    AggregateReport, Detection, DetectionOutput, Detector, DetectorConfig, FrameSize, Taxonomy,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "detpipe CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectorConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    input_size: usize,
    parallel: bool,
}

impl Default for DetectorConfigJson {
    fn default() -> Self {
        let cfg = DetectorConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            input_size: cfg.input_size,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    tensor_path: String,
    image_path: Option<String>,
    image_width: Option<f32>,
    image_height: Option<f32>,
    output_path: Option<String>,
    classes: Vec<String>,
    icons: Option<Vec<String>>,
    detector: DetectorConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        let taxonomy = Taxonomy::inventory();
        Self {
            tensor_path: String::new(),
            image_path: None,
            image_width: None,
            image_height: None,
            output_path: None,
            classes: taxonomy.names().to_vec(),
            icons: None,
            detector: DetectorConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    class_index: usize,
    label: String,
    score: f32,
    bbox: [f32; 4],
    width: f32,
    height: f32,
}

impl DetectionRecord {
    fn new(det: &Detection, taxonomy: &Taxonomy) -> Self {
        Self {
            class_index: det.class_index,
            label: taxonomy.label(det.class_index).unwrap_or_default(),
            score: det.score,
            bbox: [det.bbox.x1, det.bbox.y1, det.bbox.x2, det.bbox.y2],
            width: det.width(),
            height: det.height(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassRecord {
    class_index: usize,
    name: String,
    count: usize,
    mean_confidence: f32,
    detected: bool,
}

#[derive(Debug, Serialize)]
struct ReportRecord {
    total_count: usize,
    overall_mean_confidence: f32,
    classes: Vec<ClassRecord>,
}

impl ReportRecord {
    fn new(report: &AggregateReport, taxonomy: &Taxonomy) -> Self {
        let classes = report
            .classes()
            .iter()
            .map(|stats| ClassRecord {
                class_index: stats.class_index,
                name: taxonomy.name(stats.class_index).unwrap_or_default().to_string(),
                count: stats.count,
                mean_confidence: stats.mean_confidence,
                detected: stats.count > 0,
            })
            .collect();
        Self {
            total_count: report.total_count(),
            overall_mean_confidence: report.overall_mean_confidence(),
            classes,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    image_width: f32,
    image_height: f32,
    detections: Vec<DetectionRecord>,
    report: ReportRecord,
}

impl Output {
    fn new(output: &DetectionOutput, frame: FrameSize, taxonomy: &Taxonomy) -> Self {
        Self {
            image_width: frame.width(),
            image_height: frame.height(),
            detections: output
                .detections
                .iter()
                .map(|det| DetectionRecord::new(det, taxonomy))
                .collect(),
            report: ReportRecord::new(&output.report, taxonomy),
        }
    }
}

fn read_tensor(path: &str) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(format!("{path}: length {} is not a multiple of 4 bytes", bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn resolve_frame(config: &Config) -> Result<FrameSize, Box<dyn std::error::Error>> {
    if let Some(path) = &config.image_path {
        return Ok(frame_size_from_path(path)?);
    }
    match (config.image_width, config.image_height) {
        (Some(width), Some(height)) => Ok(FrameSize::new(width, height)?),
        _ => Err("either image_path or image_width and image_height must be set".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detpipe=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }

    let mut taxonomy = Taxonomy::new(config.classes.iter().cloned())?;
    if let Some(icons) = &config.icons {
        taxonomy = taxonomy.with_icons(icons.iter().cloned())?;
    }

    let detector = Detector::new(DetectorConfig {
        confidence_threshold: config.detector.confidence_threshold,
        iou_threshold: config.detector.iou_threshold,
        num_classes: taxonomy.len(),
        input_size: config.detector.input_size,
        parallel: config.detector.parallel,
    })?
    .with_taxonomy(taxonomy)?;

    let frame = resolve_frame(&config)?;
    let tensor = read_tensor(&config.tensor_path)?;
    tracing::info!(values = tensor.len(), "tensor loaded");

    let result = detector.run(&tensor, frame)?;
    let taxonomy = detector
        .taxonomy()
        .ok_or("detector has no taxonomy attached")?;
    let output = Output::new(&result, frame, taxonomy);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
