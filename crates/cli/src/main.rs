use std::path::PathBuf;
use std::process;

use clap::Parser;

use deepfake_core::analysis::domain::analysis_result::{AnalysisReport, AnalysisResult};
use deepfake_core::analysis::infrastructure::classifier_factory::describe;
use deepfake_core::pipeline::deepfake_analyzer::DeepfakeAnalyzer;
use deepfake_core::shared::config::{AnalyzerConfig, ClassifierKind};

/// Detect deepfakes in images (.png, .jpg, .jpeg) and videos (.mp4).
#[derive(Parser)]
#[command(name = "deepfake-detect")]
struct Cli {
    /// Image or video file to analyze.
    input: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Classifier: heuristic, torch or keras.
    #[arg(long)]
    classifier: Option<ClassifierKind>,

    /// ONNX model for the torch and keras classifiers.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Maximum number of video frames to analyze.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns whether the analysis produced a result.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    log::info!(
        "Classifier: {} ({})",
        config.classifier,
        describe(config.classifier)
    );

    let mut analyzer =
        DeepfakeAnalyzer::from_config_with_progress(&config, Some(Box::new(download_progress)))?;
    let report = analyzer.analyze_path(&cli.input);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report {
            AnalysisReport::Success(result) => print!("{}", render(result)),
            AnalysisReport::Failure { error } => println!("Error: {error}"),
        }
    }
    Ok(!report.is_error())
}

fn build_config(cli: &Cli) -> Result<AnalyzerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(kind) = cli.classifier {
        config.classifier = kind;
    }
    if let Some(model) = &cli.model {
        config.model_path = Some(model.clone());
    }
    if let Some(max_frames) = cli.max_frames {
        config.max_video_frames = max_frames;
    }
    config.validate()?;
    Ok(config)
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn render(result: &AnalysisResult) -> String {
    let mut out = String::from("\nAnalysis Results:\n");
    out.push_str(&"-".repeat(20));
    out.push('\n');
    let verdict = if result.is_deepfake {
        "Deepfake Detected"
    } else {
        "Authentic"
    };
    out.push_str(&format!("Result: {verdict}\n"));
    out.push_str(&format!("Confidence: {}\n", percent(result.confidence)));
    if let Some(frames) = result.frames_analyzed {
        out.push_str(&format!("Frames Analyzed: {frames}\n"));
    }

    if let Some(details) = &result.details {
        out.push_str("\nDetailed Analysis:\n");
        for (i, face) in details.iter().enumerate() {
            out.push_str(&format!("\nFace {}:\n", i + 1));
            out.push_str(&format!("Score: {}\n", percent(face.score)));
            out.push_str(&format!("Edge Density: {}\n", percent(face.edge_density)));
            out.push_str(&format!(
                "Color Consistency: {}\n",
                percent(face.color_consistency)
            ));
            out.push_str(&format!(
                "Texture Complexity: {}\n",
                percent(face.texture_complexity)
            ));
        }
    }
    out
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
