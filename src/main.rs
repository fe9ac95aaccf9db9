//! Sketchify - turn a photo into a pencil sketch.

mod adapters;
mod capture;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod normalize;
mod output;
mod payload;
mod ports;
mod session;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::capture::camera::{CameraConfig, LiveCamera};
use crate::capture::upload::capture_from_file;
use crate::capture::SourceKind;
use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::SketchError;
use crate::output::{original_filename, resolve_output_path, save_payload};
use crate::ports::sketch_generator::{SketchRequest, SketchStyle};
use crate::session::Session;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if matches!(e, SketchError::PermissionDenied(_)) {
            // Terminal for the camera path only; never retried automatically.
            eprintln!("The camera is unavailable for this session. Retry with a photo file.");
        }
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), SketchError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(SketchError::Config)?;

    let source = cli.resolve_source().map_err(SketchError::Io)?;
    let model = cli.model.clone().unwrap_or_else(|| config.defaults.model.clone());
    let style = match cli.style {
        Some(style) => style,
        None => SketchStyle::from_name(&config.defaults.style).ok_or_else(|| {
            SketchError::Config(format!(
                "Unknown default style '{}'. Valid: bw, color",
                config.defaults.style
            ))
        })?,
    };

    if cli.verbose {
        eprintln!("Source: {source:?}");
        eprintln!("Model: {model}");
        eprintln!("Style: {style}");
    }

    let session = Session::Idle;

    // Acquire one frame and normalize it. The camera handle is closed on
    // every exit path, including capture failure.
    let original = match source {
        SourceKind::Upload(ref path) => capture_from_file(path)?,
        SourceKind::Camera(ref device) => {
            let mut camera = LiveCamera::open(device, CameraConfig::default())?;
            let frame = camera.capture_frame();
            camera.close();
            frame?
        }
    };
    let session = session.captured(original.clone()).map_err(invalid_transition)?;

    if cli.verbose {
        eprintln!("Captured {} bytes ({})", original.data.len(), original.mime_type);
    }

    let session = session.begin_generation(style).map_err(invalid_transition)?;
    let request = SketchRequest { model, image: original.clone(), style };

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("SKETCHIFY_REPLAY").ok();
    let is_recording = std::env::var("SKETCHIFY_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        if cli.verbose {
            eprintln!("Recording mode enabled");
        }
        let (ctx, recording) = ServiceContext::recording(&config)?;
        (ctx, Some(recording))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    // One attempt, no retry; the session stays in Processing until the call
    // resolves either way.
    let session = match ctx.generator.generate(&request).await {
        Ok(response) => session.completed(response.sketch).map_err(invalid_transition)?,
        Err(e) => {
            let _ = session.failed(e.to_string());
            return Err(e);
        }
    };

    let Session::Success { original, sketch } = session else {
        return Err(SketchError::InvalidArgument("generation did not complete".into()));
    };

    let sketch_path = resolve_output_path(cli.output.as_deref(), style);
    save_payload(&sketch, &sketch_path)?;
    eprintln!("Saved: {}", sketch_path.display());

    if cli.keep_original {
        let original_path = original_filename(&sketch_path);
        save_payload(&original, &original_path)?;
        eprintln!("Saved: {}", original_path.display());
    }

    // Finish recording if active
    if let Some(recording) = recording_session {
        match recording.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(())
}

fn invalid_transition(e: session::TransitionError) -> SketchError {
    SketchError::InvalidArgument(e.to_string())
}
