//! dsynth main entry point
//!
//! Synthesizes either a single phrase or every line of a text file, then
//! plays and/or saves the result.

use anyhow::{Context, Result};
use clap::Parser;
use dsynth::audio::{write_wav, AudioSink, CommandPlayer};
use dsynth::config::Config;
use dsynth::diphone::DiphoneLibrary;
use dsynth::pipeline::{join, Pipeline};
use dsynth::text::CmuDict;
use dsynth::{ReverseMode, SynthOptions};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "dsynth", version)]
#[command(about = "A basic text-to-speech app that synthesises speech using diphone concatenation")]
struct Cli {
    /// The phrase to be synthesised
    #[arg(conflicts_with = "fromfile", required_unless_present = "fromfile")]
    phrase: Option<String>,

    /// Synthesise every line of this text file instead of a phrase
    #[arg(long, short = 'f')]
    fromfile: Option<PathBuf>,

    /// Folder containing diphone wavs
    #[arg(long)]
    diphones: Option<PathBuf>,

    /// Pronunciation dictionary (CMU text format or JSON)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Play the output audio
    #[arg(long, short = 'p')]
    play: bool,

    /// Save the output audio to a file
    #[arg(long, short = 'o')]
    outfile: Option<PathBuf>,

    /// An integer between 0 and 100 representing the desired volume
    #[arg(long, short = 'v')]
    volume: Option<String>,

    /// Spell the input text instead of pronouncing it normally
    #[arg(long, short = 's')]
    spell: bool,

    /// Speak backwards: reverse the words, the phones or the signal
    #[arg(long, short = 'r', value_enum)]
    reverse: Option<ReverseMode>,

    /// Cross-fade between diphone units for smoother joins
    #[arg(long, short = 'c')]
    crossfade: bool,

    /// Configuration file (defaults to ~/.dsynth.cfg)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to dsynth.log
    #[arg(long, short = 'd')]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    if cli.debug {
        // Debug mode: write to dsynth.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("dsynth.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open dsynth.log for debug logging: {}", e);
                eprintln!("Continuing with logging to stderr...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .init();
            }
        }

        info!("dsynth version {} starting (debug mode)", dsynth::VERSION);
    } else {
        // Normal mode: warnings are the user-facing diagnostics
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .format_timestamp(None)
            .format_target(false)
            .init();
    }

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!("Configuration loaded from {:?}", config.path());

    let diphones_dir = cli.diphones.clone().unwrap_or_else(|| config.diphones_dir());
    let library = DiphoneLibrary::load(&diphones_dir)
        .with_context(|| format!("loading diphones from {}", diphones_dir.display()))?;
    if library.is_empty() {
        warn!("No diphone units found in {}", diphones_dir.display());
    }

    let dictionary_path = cli
        .dictionary
        .clone()
        .unwrap_or_else(|| config.dictionary_path());
    let lexicon = CmuDict::load(&dictionary_path)
        .with_context(|| format!("loading dictionary {}", dictionary_path.display()))?;

    let options = SynthOptions {
        spell: cli.spell,
        reverse: cli.reverse,
        crossfade: cli.crossfade || config.crossfade(),
        volume: cli.volume.clone().or_else(|| config.volume()),
    };
    debug!("Synthesis options: {:?}", options);

    let pipeline = Pipeline::new(library, lexicon, config.synth_settings());

    let mut player = if cli.play {
        match CommandPlayer::detect(config.player().as_deref()) {
            Ok(player) => Some(player),
            Err(e) => {
                warn!("{}; playback disabled", e);
                None
            }
        }
    } else {
        None
    };

    if let Some(path) = &cli.fromfile {
        let sink = player.as_mut().map(|p| p as &mut dyn AudioSink);
        let outputs = pipeline
            .speak_file(path, &options, sink)
            .with_context(|| format!("reading {}", path.display()))?;

        if let Some(outfile) = &cli.outfile {
            match join(&outputs)? {
                Some(audio) => {
                    write_wav(outfile, &audio)
                        .with_context(|| format!("writing {}", outfile.display()))?;
                    info!("Saved {} utterances to {}", outputs.len(), outfile.display());
                }
                None => warn!("Nothing was synthesized; {} not written", outfile.display()),
            }
        }
        return Ok(());
    }

    let phrase = cli.phrase.as_deref().unwrap_or_default();
    let audio = match pipeline.speak_phrase(phrase, &options) {
        Ok(Some(audio)) => audio,
        Ok(None) => {
            warn!("Nothing to say in '{}'; no audio produced", phrase);
            return Ok(());
        }
        Err(e) => {
            warn!("{}; no audio produced for '{}'", e, phrase);
            return Ok(());
        }
    };

    if let Some(player) = player.as_mut() {
        if let Err(e) = player.play(&audio) {
            error!("Playback failed: {}", e);
        }
    }

    if let Some(outfile) = &cli.outfile {
        write_wav(outfile, &audio).with_context(|| format!("writing {}", outfile.display()))?;
        info!("Saved {} ms of audio to {}", audio.duration_ms(), outfile.display());
    }

    Ok(())
}
