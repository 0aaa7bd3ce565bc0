//! Capflow CLI - Headless Caption Generation Tool
//!
//! Features:
//! - ASS/SRT/VTT subtitle parsing
//! - Fixed-cycle and sliding-window caption synthesis
//! - FFmpeg drawtext filter script generation
//! - Compositor text-clip descriptor export (JSON)
//! - Segment and timing inspection
//!
//! The tool never invokes ffmpeg itself; it writes the filter script and
//! prints the command to run.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use capflow_core::config::{CaptionConfig, CaptionMode};
use capflow_core::render::RenderOptions;

mod commands;
mod output;

/// Capflow CLI - word-timed progressive captions
#[derive(Parser)]
#[command(name = "capflow")]
#[command(version)]
#[command(about = "Word-timed progressive caption generator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an ffmpeg drawtext filter script
    Filter {
        /// Subtitle file (.ass, .srt, .vtt)
        subs: PathBuf,

        /// Output path for the filter script
        #[arg(short, long)]
        out: PathBuf,

        /// Video path to substitute into the printed ffmpeg command
        #[arg(long, default_value = "input.mp4")]
        video: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Generate compositor text-clip descriptors as JSON
    Clips {
        /// Subtitle file (.ass, .srt, .vtt)
        subs: PathBuf,

        /// Output path for the JSON descriptor list
        #[arg(short, long)]
        out: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print parsed segments, caption states, and timing statistics
    Inspect {
        /// Subtitle file (.ass, .srt, .vtt)
        subs: PathBuf,

        /// Maximum number of states to list
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Emit statistics as JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

/// Caption display strategy selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// 1..max_words captions cycling by word position
    Fixed,
    /// Trailing window of the most recent words, refreshed per word
    Sliding,
}

/// Pipeline knobs shared by all subcommands
#[derive(Args)]
struct PipelineArgs {
    /// Caption mode
    #[arg(long, value_enum, default_value = "sliding")]
    mode: ModeArg,

    /// Minimum caption visibility in milliseconds
    #[arg(long)]
    min_visibility_ms: Option<u32>,

    /// Minimum words per caption (fixed mode)
    #[arg(long)]
    min_words: Option<usize>,

    /// Maximum words per caption / window width
    #[arg(long)]
    max_words: Option<usize>,

    /// Lead-in before the triggering word, milliseconds (sliding mode)
    #[arg(long)]
    lead_in_ms: Option<u32>,

    /// Overlap allowance before the next word, milliseconds (sliding mode)
    #[arg(long)]
    overlap_ms: Option<u32>,

    /// Clip start on the source timeline, seconds
    #[arg(long)]
    clip_start: Option<f64>,

    /// Clip end on the source timeline, seconds
    #[arg(long)]
    clip_end: Option<f64>,

    /// Number of vertical display levels (default depends on mode)
    #[arg(long)]
    levels: Option<usize>,
}

impl PipelineArgs {
    fn to_config(&self) -> CaptionConfig {
        let mut config = match self.mode {
            ModeArg::Fixed => CaptionConfig::fixed_cycle(),
            ModeArg::Sliding => CaptionConfig::sliding_window(),
        };

        if let Some(ms) = self.min_visibility_ms {
            config.min_visibility_ms = ms;
        }

        match &mut config.mode {
            CaptionMode::FixedCycle {
                min_words,
                max_words,
            } => {
                if let Some(n) = self.min_words {
                    *min_words = n;
                }
                if let Some(n) = self.max_words {
                    *max_words = n;
                }
            }
            CaptionMode::SlidingWindow {
                lead_in_ms,
                overlap_ms,
                max_words,
            } => {
                if let Some(ms) = self.lead_in_ms {
                    *lead_in_ms = ms;
                }
                if let Some(ms) = self.overlap_ms {
                    *overlap_ms = ms;
                }
                if let Some(n) = self.max_words {
                    *max_words = n;
                }
            }
        }

        if let Some(start) = self.clip_start {
            config.clip_start_sec = start;
        }
        config.clip_end_sec = self.clip_end.or(config.clip_end_sec);

        config
    }

    fn level_count(&self, config: &CaptionConfig) -> usize {
        self.levels.unwrap_or_else(|| config.level_count())
    }
}

/// Rendering knobs shared by the filter and clips subcommands
#[derive(Args)]
struct RenderArgs {
    /// Font file for drawtext / the compositor
    #[arg(long)]
    font: Option<String>,

    /// Font size in points
    #[arg(long)]
    font_size: Option<u32>,

    /// Output video width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Output video height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Maximum caption line width in characters
    #[arg(long)]
    wrap_width: Option<usize>,
}

impl RenderArgs {
    fn to_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default();

        if let Some(font) = &self.font {
            options.font_file = font.clone();
        }
        if let Some(size) = self.font_size {
            options.font_size = size;
        }
        if let Some(width) = self.width {
            options.video_size.width = width;
        }
        if let Some(height) = self.height {
            options.video_size.height = height;
        }
        if let Some(width) = self.wrap_width {
            options.wrap_width = width;
        }

        options
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .finish();

    // Avoid panics if a test harness already installed a subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Filter {
            subs,
            out,
            video,
            pipeline,
            render,
        } => {
            let config = pipeline.to_config();
            let levels = pipeline.level_count(&config);
            commands::run_filter(&subs, &out, &video, &config, levels, &render.to_options())
        }
        Commands::Clips {
            subs,
            out,
            pipeline,
            render,
        } => {
            let config = pipeline.to_config();
            let levels = pipeline.level_count(&config);
            commands::run_clips(&subs, &out, &config, levels, &render.to_options())
        }
        Commands::Inspect {
            subs,
            limit,
            json,
            pipeline,
        } => {
            let config = pipeline.to_config();
            let levels = pipeline.level_count(&config);
            commands::run_inspect(&subs, &config, levels, limit, json)
        }
    }
}
