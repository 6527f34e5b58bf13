//! Headless wildlife rendering demo.
//!
//! Plays a snapshot stream through [`WildlifePipeline`] the way a browser
//! client would: batches arrive every server tick, animals are drawn every
//! frame, burrow bursts are processed per batch and state for animals that
//! left the view is reclaimed. Drawing goes to an in-memory
//! [`RecordingSurface`]; once per simulated second a summary is logged.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --debug
//! cargo run --release -- --scenario demos/herd.json --config wildlife.ini
//! RUST_LOG=debug cargo run -- --herd 40
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use rustc_hash::FxHashSet;

use wildlife_render::error::Result;
use wildlife_render::pipeline::WildlifePipeline;
use wildlife_render::resources::renderconfig::RenderConfig;
use wildlife_render::resources::spriteregistry::SpriteRegistry;
use wildlife_render::scenario::Scenario;
use wildlife_render::surface::recording::RecordingSurface;
use wildlife_render::surface::{DrawTargets, RasterSurface};
use wildlife_render::systems::render::{RenderOutcome, ViewerContext};

/// Wildlife render pipeline demo
#[derive(Parser)]
#[command(version, about = "Runs wild animal snapshots through the render pipeline headlessly.")]
struct Cli {
    /// INI file with render tuning; defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON snapshot stream; a synthetic herd is generated when omitted.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Draw collision bounds and server positions.
    #[arg(long)]
    debug: bool,

    /// Size of the synthetic herd.
    #[arg(long, default_value_t = 24)]
    herd: usize,

    /// Seed for the synthetic herd and effect randomness.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Default)]
struct SecondStats {
    sprites: usize,
    placeholders: usize,
    hidden: usize,
    particles: usize,
    commands: usize,
    bursts_started: usize,
    delta_ms: f64,
    frames: u32,
}

fn load_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = RenderConfig::with_path(path);
            config.load_from_file()?;
            config
        }
        None => RenderConfig::new(),
    };
    if cli.seed.is_some() {
        config.effect_seed = cli.seed;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let tick_ms = config.server_tick_ms;
    let mut sprites = SpriteRegistry::with_default_sheets();

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            let duration_ms = cli.frames as f64 * 1000.0 / cli.fps.max(1.0);
            let mut herd =
                Scenario::synthetic_herd(cli.herd, duration_ms, tick_ms, cli.seed.unwrap_or(7));
            herd.textures = Scenario::load_default_textures(&sprites, &["bee.png"]);
            herd
        }
    };
    scenario.mark_textures_loaded(&mut sprites);
    let breeding = scenario.breeding_map();

    let mut pipeline = WildlifePipeline::new(config, sprites);
    pipeline.set_debug(cli.debug);

    let mut screen = RecordingSurface::new(1920, 1080);
    let mut scratch = RecordingSurface::default();
    let frame_ms = 1000.0 / cli.fps.max(1.0);
    let frames_per_second = cli.fps.max(1.0).round() as u32;
    let mut delivered: Option<usize> = None;
    let mut stats = SecondStats::default();

    for frame in 0..cli.frames {
        let now_ms = frame as f64 * frame_ms;
        let Some(index) = scenario.batch_index_at(now_ms) else {
            continue;
        };
        let batch = &scenario.batches[index];

        if delivered != Some(index) {
            delivered = Some(index);
            stats.bursts_started += pipeline.process_burrow_effects(&batch.animals, now_ms);
            let live: FxHashSet<u64> = batch.animals.iter().map(|a| a.id).collect();
            pipeline.reclaim(&live);
        }

        screen.clear();
        let viewer = ViewerContext {
            server_time: batch.server_time,
            viewer_underwater: false,
        };
        let day_night = ((now_ms / 60_000.0) % 1.0) as f32;
        for animal in &batch.animals {
            let mut targets = DrawTargets::new(&mut screen, &mut scratch);
            match pipeline.render_animal(
                &mut targets,
                animal,
                now_ms,
                day_night,
                Some(&breeding),
                Some(&viewer),
            ) {
                RenderOutcome::Sprite { .. } => stats.sprites += 1,
                RenderOutcome::Placeholder { .. } => stats.placeholders += 1,
                RenderOutcome::Hidden | RenderOutcome::Skipped => stats.hidden += 1,
            }
        }
        stats.particles += pipeline.render_burrow_effects(&mut screen, now_ms);
        stats.commands += screen.commands().len();
        let clock = pipeline.world_time();
        stats.delta_ms += clock.delta_ms;
        stats.frames += 1;

        if (frame + 1) % frames_per_second == 0 {
            let counts = pipeline.state_counts();
            let clock = pipeline.world_time();
            info!(
                "t={:.1}s frame={} dt={:.2}ms sprites={} placeholders={} hidden={} particles={} draws={} bursts+={} | tracked={} hits={} markers={} bursts={}",
                (now_ms + frame_ms) / 1000.0,
                clock.frame_count,
                stats.delta_ms / f64::from(stats.frames.max(1)),
                stats.sprites,
                stats.placeholders,
                stats.hidden,
                stats.particles,
                stats.commands,
                stats.bursts_started,
                counts.animals,
                counts.hit_effects,
                counts.burrow_markers,
                counts.bursts
            );
            stats = SecondStats::default();
        }
    }

    let live: FxHashSet<u64> = FxHashSet::default();
    let reclaimed = pipeline.reclaim(&live);
    info!(
        "Done: reclaimed {} animals and {} bursts",
        reclaimed.animals, reclaimed.bursts
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
