//! Python bindings for the detpipe post-processing library.
//!
//! Network outputs are passed as 1-D `float32` numpy arrays; detections and
//! reports come back as plain Python objects.

use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use detpipe::{
    AggregateReport as RustAggregateReport, BoundingBox, ClassStatistics as RustClassStatistics,
    DetPipeError, Detection as RustDetection, Detector as RustDetector,
    DetectorConfig as RustDetectorConfig, FrameSize, RawCandidate,
};

/// Convert a DetPipeError to a Python exception.
fn to_py_err(err: DetPipeError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn frame(width: f32, height: f32) -> PyResult<FrameSize> {
    FrameSize::new(width, height).map_err(to_py_err)
}

/// One detected object in original-image pixels.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    /// Box corners as (x1, y1, x2, y2).
    #[pyo3(get)]
    pub bbox: (f32, f32, f32, f32),
    /// Index of the recognized class.
    #[pyo3(get)]
    pub class_index: usize,
    /// Confidence score.
    #[pyo3(get)]
    pub score: f32,
}

#[pymethods]
impl Detection {
    #[new]
    fn new(bbox: (f32, f32, f32, f32), class_index: usize, score: f32) -> Self {
        Self {
            bbox,
            class_index,
            score,
        }
    }

    /// Box width in pixels.
    #[getter]
    fn width(&self) -> f32 {
        self.bbox.2 - self.bbox.0
    }

    /// Box height in pixels.
    #[getter]
    fn height(&self) -> f32 {
        self.bbox.3 - self.bbox.1
    }

    fn __repr__(&self) -> String {
        let (x1, y1, x2, y2) = self.bbox;
        format!(
            "Detection(class_index={}, score={:.4}, bbox=({:.1}, {:.1}, {:.1}, {:.1}))",
            self.class_index, self.score, x1, y1, x2, y2
        )
    }
}

impl Detection {
    fn to_candidate(&self) -> RawCandidate {
        let (x1, y1, x2, y2) = self.bbox;
        RawCandidate {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            class_index: self.class_index,
            score: self.score,
        }
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            bbox: (d.bbox.x1, d.bbox.y1, d.bbox.x2, d.bbox.y2),
            class_index: d.class_index,
            score: d.score,
        }
    }
}

impl From<RawCandidate> for Detection {
    fn from(c: RawCandidate) -> Self {
        RustDetection::from(c).into()
    }
}

/// Count and mean confidence of one class.
#[pyclass]
#[derive(Clone)]
pub struct ClassStatistics {
    #[pyo3(get)]
    pub class_index: usize,
    #[pyo3(get)]
    pub count: usize,
    #[pyo3(get)]
    pub mean_confidence: f32,
}

#[pymethods]
impl ClassStatistics {
    fn __repr__(&self) -> String {
        format!(
            "ClassStatistics(class_index={}, count={}, mean_confidence={:.4})",
            self.class_index, self.count, self.mean_confidence
        )
    }
}

impl From<&RustClassStatistics> for ClassStatistics {
    fn from(s: &RustClassStatistics) -> Self {
        Self {
            class_index: s.class_index,
            count: s.count,
            mean_confidence: s.mean_confidence,
        }
    }
}

/// Per-class table plus totals for one detection set.
#[pyclass]
#[derive(Clone)]
pub struct AggregateReport {
    /// One entry per class, in class-index order.
    #[pyo3(get)]
    pub classes: Vec<ClassStatistics>,
    #[pyo3(get)]
    pub total_count: usize,
    #[pyo3(get)]
    pub overall_mean_confidence: f32,
}

#[pymethods]
impl AggregateReport {
    /// Per-class counts in class-index order.
    fn counts(&self) -> Vec<usize> {
        self.classes.iter().map(|s| s.count).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "AggregateReport(total_count={}, overall_mean_confidence={:.4}, classes={})",
            self.total_count,
            self.overall_mean_confidence,
            self.classes.len()
        )
    }
}

impl From<&RustAggregateReport> for AggregateReport {
    fn from(r: &RustAggregateReport) -> Self {
        Self {
            classes: r.classes().iter().map(ClassStatistics::from).collect(),
            total_count: r.total_count(),
            overall_mean_confidence: r.overall_mean_confidence(),
        }
    }
}

/// Tunable parameters for the detection pipeline.
#[pyclass]
#[derive(Clone)]
pub struct DetectorConfig {
    inner: RustDetectorConfig,
}

#[pymethods]
impl DetectorConfig {
    /// Create a new DetectorConfig.
    ///
    /// Args:
    ///     confidence_threshold: Minimum exclusive score (default: 0.25)
    ///     iou_threshold: Suppression IoU, exclusive (default: 0.45)
    ///     num_classes: Class scores per record (default: 6)
    ///     input_size: Network input edge in pixels (default: 640)
    ///     parallel: Decode records in parallel (default: False)
    #[new]
    #[pyo3(signature = (confidence_threshold=0.25, iou_threshold=0.45, num_classes=6, input_size=640, parallel=false))]
    fn new(
        confidence_threshold: f32,
        iou_threshold: f32,
        num_classes: usize,
        input_size: usize,
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustDetectorConfig {
            confidence_threshold,
            iou_threshold,
            num_classes,
            input_size,
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectorConfig(confidence_threshold={}, iou_threshold={}, num_classes={}, input_size={}, parallel={})",
            self.inner.confidence_threshold,
            self.inner.iou_threshold,
            self.inner.num_classes,
            self.inner.input_size,
            self.inner.parallel
        )
    }
}

/// Configured decode + suppress + aggregate pipeline.
#[pyclass]
pub struct Detector {
    inner: RustDetector,
}

#[pymethods]
impl Detector {
    /// Args:
    ///     config: DetectorConfig (default: DetectorConfig())
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<DetectorConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = RustDetector::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Decode and suppress a raw output tensor.
    ///
    /// Args:
    ///     output: 1-D float32 array of records
    ///     width: Original image width in pixels
    ///     height: Original image height in pixels
    fn detect(
        &self,
        output: PyReadonlyArray1<'_, f32>,
        width: f32,
        height: f32,
    ) -> PyResult<Vec<Detection>> {
        let data = output.as_slice()?;
        let dets = self
            .inner
            .detect(data, frame(width, height)?)
            .map_err(to_py_err)?;
        Ok(dets.into_iter().map(Detection::from).collect())
    }

    /// Run the full pipeline, returning (detections, report).
    fn run(
        &self,
        output: PyReadonlyArray1<'_, f32>,
        width: f32,
        height: f32,
    ) -> PyResult<(Vec<Detection>, AggregateReport)> {
        let data = output.as_slice()?;
        let result = self
            .inner
            .run(data, frame(width, height)?)
            .map_err(to_py_err)?;
        let report = AggregateReport::from(&result.report);
        let dets = result.detections.into_iter().map(Detection::from).collect();
        Ok((dets, report))
    }

    fn __repr__(&self) -> String {
        format!("Detector(num_classes={})", self.inner.config().num_classes)
    }
}

/// Decode a raw output tensor into thresholded, in-frame candidates.
#[pyfunction]
#[pyo3(signature = (output, width, height, num_classes = 6, confidence_threshold = 0.25))]
fn decode(
    output: PyReadonlyArray1<'_, f32>,
    width: f32,
    height: f32,
    num_classes: usize,
    confidence_threshold: f32,
) -> PyResult<Vec<Detection>> {
    let data = output.as_slice()?;
    let cands = detpipe::decode(data, num_classes, confidence_threshold, frame(width, height)?)
        .map_err(to_py_err)?;
    Ok(cands.into_iter().map(Detection::from).collect())
}

/// Greedy class-agnostic non-maximum suppression.
#[pyfunction]
#[pyo3(signature = (candidates, iou_threshold = 0.45))]
fn suppress(candidates: Vec<Detection>, iou_threshold: f32) -> PyResult<Vec<Detection>> {
    let raw: Vec<RawCandidate> = candidates.iter().map(Detection::to_candidate).collect();
    let kept = detpipe::suppress(&raw, iou_threshold).map_err(to_py_err)?;
    Ok(kept.into_iter().map(Detection::from).collect())
}

/// Summarize detections per class.
#[pyfunction]
#[pyo3(signature = (detections, num_classes = 6))]
fn aggregate(detections: Vec<Detection>, num_classes: usize) -> PyResult<AggregateReport> {
    let dets: Vec<RustDetection> = detections
        .iter()
        .map(|d| RustDetection::from(d.to_candidate()))
        .collect();
    let report = detpipe::aggregate(&dets, num_classes).map_err(to_py_err)?;
    Ok(AggregateReport::from(&report))
}

/// Decode and suppress with default settings in one call.
#[pyfunction]
#[pyo3(signature = (output, width, height, config = None))]
fn detect(
    output: PyReadonlyArray1<'_, f32>,
    width: f32,
    height: f32,
    config: Option<DetectorConfig>,
) -> PyResult<Vec<Detection>> {
    let detector = Detector::new(config)?;
    detector.detect(output, width, height)
}

/// Python module for detpipe.
#[pymodule]
fn _detpipe(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<ClassStatistics>()?;
    m.add_class::<AggregateReport>()?;
    m.add_class::<DetectorConfig>()?;
    m.add_class::<Detector>()?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(suppress, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate, m)?)?;
    m.add_function(wrap_pyfunction!(detect, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
