use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use soundcanvas_core::{
    moodboard, AppConfig, Catalog, LyricsTracker, ManualScheduler, PlayerSession,
    RecordingSurface, ScaledElement,
};
use tracing_subscriber::EnvFilter;

fn main() -> soundcanvas_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tracks { catalog } => run_tracks(catalog.as_deref()),
        Commands::Play {
            track,
            frames,
            seed,
            catalog,
        } => run_play(track, frames, seed, catalog.as_deref()),
        Commands::Lyrics { track, time } => run_lyrics(track, time),
        Commands::Moodboard { track } => run_moodboard(track),
    }
}

/// Loads a catalog from a JSON file, or the bundled one when no path is
/// given.
fn load_catalog(path: Option<&Path>) -> soundcanvas_core::Result<Catalog> {
    match path {
        Some(path) => Catalog::from_json(&std::fs::read_to_string(path)?),
        None => Ok(Catalog::builtin()),
    }
}

fn run_tracks(catalog: Option<&Path>) -> soundcanvas_core::Result<()> {
    let catalog = load_catalog(catalog)?;
    for (index, track) in catalog.tracks().iter().enumerate() {
        println!(
            "{index}: {} - {} [{}] ({} lyric lines)",
            track.artist,
            track.title,
            track.genre,
            track.lyrics.len()
        );
    }
    Ok(())
}

/// Headless playback demo: synthesizes a tone, runs the render loop at a
/// simulated 60 fps and reports what the visuals are doing.
fn run_play(
    track: usize,
    frames: usize,
    seed: u64,
    catalog: Option<&Path>,
) -> soundcanvas_core::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = AppConfig::default();
    let fft_size = config.audio.fft_size;

    let mut elements = vec![ScaledElement::new(); config.visual.bubble_count];
    let mut surface =
        RecordingSurface::new(config.visual.waveform_width, config.visual.waveform_height);
    let mut scheduler = ManualScheduler::new();
    let mut session = PlayerSession::new(load_catalog(catalog)?, config, &mut rng)?;
    let mut tracker = LyricsTracker::new();

    session.select(track, &mut scheduler)?;
    {
        let current = session.player().current_track();
        tracing::info!(title = %current.title, artist = %current.artist, "starting playback");
    }

    for frame_index in 0..frames {
        session.push_samples(&tone_block(fft_size, frame_index));
        if let Some(request) = scheduler.fire() {
            session.frame(&mut scheduler, request, &mut elements, &mut surface);
        }

        let elapsed = frame_index as f32 / 60.0;
        session.player_mut().set_elapsed(elapsed);

        let line = {
            let current = session.player().current_track();
            tracker
                .observe(&current.lyrics, elapsed)
                .map(|index| current.lyrics[index].text.clone())
        };
        if let Some(line) = line {
            tracing::info!(%line, "lyric");
        }

        if frame_index % 30 == 0 {
            tracing::info!(
                frame = frame_index,
                scale = elements[0].scale(),
                bars = surface.rects().len(),
                "frame rendered"
            );
        }
    }

    session.close(&mut scheduler, &mut elements, &mut surface);
    tracing::info!(
        scale = elements[0].scale(),
        bars = surface.rects().len(),
        "session closed"
    );
    Ok(())
}

fn run_lyrics(track: usize, time: f32) -> soundcanvas_core::Result<()> {
    let catalog = Catalog::builtin();
    let track = catalog.get(track).ok_or_else(|| {
        soundcanvas_core::PlayerError::InvalidInput("track index out of range")
    })?;
    match soundcanvas_core::lyrics::active_line(&track.lyrics, time) {
        Some(index) => println!("{}", track.lyrics[index].text),
        None => println!("(no lyrics yet)"),
    }
    Ok(())
}

fn run_moodboard(track: usize) -> soundcanvas_core::Result<()> {
    let catalog = Catalog::builtin();
    let track = catalog.get(track).ok_or_else(|| {
        soundcanvas_core::PlayerError::InvalidInput("track index out of range")
    })?;
    println!("{}", moodboard::moodboard_prompt(track));
    Ok(())
}

/// One frame's worth of synthesized audio: a tone whose pitch and level
/// wander slowly so the visuals have something to react to.
fn tone_block(len: usize, frame_index: usize) -> Vec<f32> {
    let cycles = 8.0 + 8.0 * ((frame_index as f32 / 90.0).sin() * 0.5 + 0.5);
    let level = 0.4 + 0.6 * ((frame_index as f32 / 45.0).cos() * 0.5 + 0.5);
    (0..len)
        .map(|i| level * (2.0 * std::f32::consts::PI * cycles * i as f32 / len as f32).sin())
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Audio-reactive music player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the track catalog.
    Tracks {
        /// Optional catalog JSON file; defaults to the bundled tracks.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Run a headless playback session with synthesized audio.
    Play {
        /// Queue index of the track to play.
        #[arg(short, long, default_value_t = 0)]
        track: usize,
        /// Number of simulated frames to render.
        #[arg(short, long, default_value_t = 300)]
        frames: usize,
        /// Seed for the bubble field generation.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Optional catalog JSON file; defaults to the bundled tracks.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show the lyric line active at a point in a track.
    Lyrics {
        #[arg(short, long)]
        track: usize,
        /// Seconds into the track.
        #[arg(long)]
        time: f32,
    },
    /// Print the image-generation prompt for a track's moodboard.
    Moodboard {
        #[arg(short, long)]
        track: usize,
    },
}
