//! Subcommand implementations

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::output;

use capflow_core::config::CaptionConfig;
use capflow_core::engine::{assign_levels, build_states, CaptionState, LevelStats};
use capflow_core::render::{build_filter_script, clip_specs_json, RenderOptions};
use capflow_core::subtitles::{parse_subtitles, Segment, SubtitleFormat};
use capflow_core::CoreError;

/// Reads and parses a subtitle file, detecting the format from its extension
fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let format = SubtitleFormat::from_path(path)
        .ok_or_else(|| CoreError::UnsupportedFormat(path.display().to_string()))?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read subtitle file {}", path.display()))?;

    let segments = parse_subtitles(&content, format)
        .with_context(|| format!("Failed to parse {} as {}", path.display(), format))?;

    info!("Parsed {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

/// Runs the caption pipeline with an explicit level count
fn generate_states(
    segments: &[Segment],
    config: &CaptionConfig,
    level_count: usize,
) -> Result<Vec<CaptionState>> {
    config.validate()?;

    let mut states = build_states(segments, config);
    assign_levels(&mut states, level_count);

    let stats = LevelStats::from_states(&states, level_count);
    info!(
        "Generated {} caption states ({} visible, {} skipped)",
        stats.total, stats.visible, stats.skipped
    );
    Ok(states)
}

/// `filter`: write an ffmpeg filter script and print the command to run
pub fn run_filter(
    subs: &Path,
    out: &Path,
    video: &Path,
    config: &CaptionConfig,
    level_count: usize,
    options: &RenderOptions,
) -> Result<()> {
    let segments = load_segments(subs)?;
    let states = generate_states(&segments, config, level_count)?;

    let script = build_filter_script(&states, options);
    fs::write(out, &script)
        .with_context(|| format!("Failed to write filter script {}", out.display()))?;
    info!("Filter script written to {}", out.display());

    output::print_summary(&states, level_count);

    println!("\nRender with:");
    println!(
        "  ffmpeg -i {} -filter_complex_script {} \\",
        video.display(),
        out.display()
    );
    println!("         -map \"[v]\" -map 0:a -c:a copy output_with_captions.mp4");

    Ok(())
}

/// `clips`: write the compositor text-clip descriptor list as JSON
pub fn run_clips(
    subs: &Path,
    out: &Path,
    config: &CaptionConfig,
    level_count: usize,
    options: &RenderOptions,
) -> Result<()> {
    let segments = load_segments(subs)?;
    let states = generate_states(&segments, config, level_count)?;

    let json = clip_specs_json(&states, options)?;
    fs::write(out, &json)
        .with_context(|| format!("Failed to write clip descriptors {}", out.display()))?;
    info!("Clip descriptors written to {}", out.display());

    output::print_summary(&states, level_count);
    Ok(())
}

/// `inspect`: print segments, the first states, and timing statistics
pub fn run_inspect(
    subs: &Path,
    config: &CaptionConfig,
    level_count: usize,
    limit: usize,
    json: bool,
) -> Result<()> {
    let segments = load_segments(subs)?;
    let states = generate_states(&segments, config, level_count)?;

    if json {
        println!("{}", output::stats_json(&states, level_count)?);
        return Ok(());
    }

    println!("Segments:");
    for segment in segments.iter().take(limit) {
        println!(
            "  {:>3}. [{:.3}s - {:.3}s] '{}'",
            segment.index + 1,
            segment.start_sec,
            segment.end_sec,
            segment.text
        );
    }
    if segments.len() > limit {
        println!("  ... and {} more", segments.len() - limit);
    }

    println!("\nCaption states:");
    output::print_states(&states, limit);
    output::print_summary(&states, level_count);

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
