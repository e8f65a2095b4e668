//! Headless overlay runner
//!
//! Loads a RON scene, draws it for a number of frames into recording sinks
//! and summarizes what each category produced.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use glam::Vec3;
use lv_core::TessellationCache;
use lv_overlay::{
    CameraState, FrameReport, OverlayConfig, OverlayObject, OverlaySession, RecordingLabels,
    RecordingSink,
};
use serde::Serialize;

/// Inspection errors
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scene error: {0}")]
    Scene(String),
    #[error("Config error: {0}")]
    Config(#[from] lv_overlay::ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "lv-inspect")]
#[command(about = "Draw limit-shape overlays for a RON scene and summarize the output")]
pub struct Args {
    /// Scene file (RON list of objects)
    pub scene: PathBuf,

    /// Overlay configuration file (RON)
    #[arg(short, long, env = "LV_INSPECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of frames to draw
    #[arg(short, long, default_value_t = 1)]
    pub frames: u64,

    /// Camera position as x,y,z
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = [0.0, 2.0, -10.0]
    )]
    pub camera: Vec<f32>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of an inspection run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Objects in the scene
    pub objects: usize,
    /// Totals over every frame
    pub report: FrameReport,
    /// Labels emitted in the last frame
    pub last_frame_labels: Vec<String>,
}

/// Parse a RON scene.
pub fn parse_scene(text: &str) -> Result<Vec<OverlayObject>, InspectError> {
    ron::from_str(text).map_err(|e| InspectError::Scene(e.to_string()))
}

/// Load a RON scene file.
pub fn load_scene(path: &Path) -> Result<Vec<OverlayObject>, InspectError> {
    let text = std::fs::read_to_string(path)?;
    let scene = parse_scene(&text)?;
    tracing::info!("Loaded {} objects from {}", scene.len(), path.display());
    Ok(scene)
}

/// Draw `scene` for `frames` frames.
pub fn inspect(
    scene: &[OverlayObject],
    config: OverlayConfig,
    camera: CameraState,
    frames: u64,
) -> Result<Summary, InspectError> {
    let cache = Arc::new(TessellationCache::new());
    let mut session = OverlaySession::new(config, cache)?;
    let mut total = FrameReport::default();
    let mut last_frame_labels = Vec::new();

    for tick in 0..frames {
        let mut frame = session.begin_frame(camera, tick);
        let mut sink = RecordingSink::new();
        let mut labels = RecordingLabels::new();
        let report = session.draw_frame(&mut frame, scene, &mut sink, &mut labels);
        tracing::debug!(
            "Frame {}: {} commands, {} labels",
            tick,
            report.commands,
            report.labels
        );
        total.merge(&report);
        last_frame_labels = labels.labels().iter().map(|l| l.text.clone()).collect();
    }
    session.end_session();

    Ok(Summary {
        objects: scene.len(),
        report: total,
        last_frame_labels,
    })
}

/// Run the CLI with parsed arguments and return the text to print.
pub fn run(args: &Args) -> Result<String, InspectError> {
    let scene = load_scene(&args.scene)?;
    let config = match &args.config {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };
    let position = match args.camera.as_slice() {
        [x, y, z] => Vec3::new(*x, *y, *z),
        _ => return Err(InspectError::Scene("camera needs three components".into())),
    };
    let summary = inspect(&scene, config, CameraState::at(position), args.frames)?;
    if args.json {
        Ok(serde_json::to_string_pretty(&summary)?)
    } else {
        Ok(render_text(&summary))
    }
}

/// Human-readable summary.
pub fn render_text(summary: &Summary) -> String {
    let report = &summary.report;
    let mut out = format!(
        "{} objects, {} frames: {} drawn, {} skipped, {} commands, {} rejected, {} labels\n",
        summary.objects,
        report.frames,
        report.drawn,
        report.skipped,
        report.commands,
        report.rejected,
        report.labels
    );
    for (category, totals) in &report.categories {
        out.push_str(&format!(
            "  {:<16} {:>4} objects {:>4} drawn {:>8} commands {:>4} labels\n",
            category.as_str(),
            totals.objects,
            totals.drawn,
            totals.commands,
            totals.labels
        ));
    }
    for label in &summary.last_frame_labels {
        out.push_str(&format!("  label: {label}\n"));
    }
    out
}
