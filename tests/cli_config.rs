//! Checks that the CLI's shipped example config and schema agree with the
//! library defaults.

use detpipe::{Detector, DetectorConfig, Taxonomy};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DetectorSection {
    confidence_threshold: f32,
    iou_threshold: f32,
    input_size: usize,
    parallel: bool,
}

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    tensor_path: String,
    image_path: Option<String>,
    output_path: Option<String>,
    classes: Vec<String>,
    icons: Option<Vec<String>>,
    detector: DetectorSection,
}

fn cli_file(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("detpipe-cli")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}

#[test]
fn example_config_matches_library_defaults() {
    let config: ExampleConfig = serde_json::from_str(&cli_file("config.example.json")).unwrap();
    let defaults = DetectorConfig::default();

    assert!(!config.tensor_path.is_empty());
    assert!(config.image_path.is_some());
    assert!(config.output_path.is_some());
    assert_eq!(config.detector.confidence_threshold, defaults.confidence_threshold);
    assert_eq!(config.detector.iou_threshold, defaults.iou_threshold);
    assert_eq!(config.detector.input_size, defaults.input_size);
    assert_eq!(config.detector.parallel, defaults.parallel);

    let mut taxonomy = Taxonomy::new(config.classes.iter().cloned()).unwrap();
    if let Some(icons) = &config.icons {
        taxonomy = taxonomy.with_icons(icons.iter().cloned()).unwrap();
    }
    assert_eq!(taxonomy, Taxonomy::inventory());

    let detector = Detector::new(DetectorConfig {
        num_classes: taxonomy.len(),
        ..defaults
    })
    .unwrap()
    .with_taxonomy(taxonomy)
    .unwrap();
    assert_eq!(detector.config().layout().stride(), 11);
}

#[test]
fn schema_requires_tensor_path_and_documents_defaults() {
    let schema: serde_json::Value = serde_json::from_str(&cli_file("config.schema.json")).unwrap();
    assert_eq!(schema["required"], serde_json::json!(["tensor_path"]));

    let detector = &schema["properties"]["detector"]["properties"];
    let defaults = DetectorConfig::default();
    let as_f32 = |v: &serde_json::Value| v.as_f64().unwrap() as f32;
    assert_eq!(
        as_f32(&detector["confidence_threshold"]["default"]),
        defaults.confidence_threshold
    );
    assert_eq!(as_f32(&detector["iou_threshold"]["default"]), defaults.iou_threshold);
    assert_eq!(
        detector["input_size"]["default"].as_u64(),
        Some(defaults.input_size as u64)
    );
}
