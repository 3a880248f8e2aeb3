use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use seqwin_core::{
    count_qualifying, IndexedSampler, ResamplingWindows, SequentialWindows, WindowSample,
};
use std::path::PathBuf;

mod config;

use config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "seqwin")]
#[command(about = "seqwin - one-hot encoded windows over FASTA records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file (defaults to ./seqwin.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count records long enough for a window
    Count {
        /// Input FASTA file
        fasta: PathBuf,

        /// Window length in bases
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Print the leading window of every qualifying record
    Stream {
        /// Input FASTA file
        fasta: PathBuf,

        #[command(flatten)]
        opts: WindowArgs,

        /// Windows to print when cycling
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build an anchor index and print its summary or one window
    Sample {
        /// Input FASTA file
        fasta: PathBuf,

        /// Anchor file (record, 0-based offset per line)
        anchors: PathBuf,

        #[command(flatten)]
        opts: WindowArgs,

        /// Windows per qualifying record
        #[arg(short, long)]
        samples: Option<usize>,

        /// Print the window at this ordinal instead of the summary
        #[arg(short, long)]
        ordinal: Option<usize>,
    },

    /// Draw randomly placed windows from every qualifying record
    Resample {
        /// Input FASTA file
        fasta: PathBuf,

        #[command(flatten)]
        opts: WindowArgs,

        /// Windows per qualifying record
        #[arg(short, long)]
        samples: Option<usize>,

        /// Random seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,

        /// Batches to print when cycling
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// Window length in bases (0 takes whole records)
    #[arg(short, long)]
    window: Option<usize>,

    /// Restart from the first record after the last one
    #[arg(long)]
    cyclic: bool,

    /// Let windows wrap around record ends
    #[arg(long)]
    circular: bool,
}

impl WindowArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            window: self.window,
            cyclic: self.cyclic,
            circular: self.circular,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Count { fasta, window } => {
            config.apply(&Overrides { window, ..Default::default() });
            cmd_count(fasta, &config)
        }
        Commands::Stream { fasta, opts, limit } => {
            config.apply(&Overrides { limit, ..opts.overrides() });
            cmd_stream(fasta, &config)
        }
        Commands::Sample { fasta, anchors, opts, samples, ordinal } => {
            config.apply(&Overrides { samples, ..opts.overrides() });
            cmd_sample(fasta, anchors, ordinal, &config)
        }
        Commands::Resample { fasta, opts, samples, seed, limit } => {
            config.apply(&Overrides { samples, seed, limit, ..opts.overrides() });
            cmd_resample(fasta, &config)
        }
    }
}

fn cmd_count(fasta: PathBuf, config: &Config) -> Result<()> {
    let window = config.windows.window_length;
    let count = count_qualifying(&fasta, window)
        .with_context(|| format!("Failed to count records in {}", fasta.display()))?;

    log::debug!("{} records of at least {} bp in {}", count, window, fasta.display());
    println!("{}", count);
    Ok(())
}

fn cmd_stream(fasta: PathBuf, config: &Config) -> Result<()> {
    log::info!("Streaming windows of {} from {}", config.windows.window_length, fasta.display());

    let windows = SequentialWindows::new(&fasta, config.windows.clone())
        .with_context(|| format!("Failed to open {}", fasta.display()))?;
    let limit = if config.windows.cyclic { config.output.limit } else { usize::MAX };

    let mut printed = 0usize;
    for sample in windows.take(limit) {
        let sample = sample.with_context(|| format!("Failed to read window {} from {}", printed, fasta.display()))?;
        print_sample(&sample, config.output.preview);
        printed += 1;
    }

    log::info!("Printed {} windows", printed);
    Ok(())
}

fn cmd_sample(fasta: PathBuf, anchors: PathBuf, ordinal: Option<usize>, config: &Config) -> Result<()> {
    let mut sampler = IndexedSampler::new(&fasta, &anchors, config.windows.clone())
        .with_context(|| format!("Failed to index {} with anchors {}", fasta.display(), anchors.display()))?;

    match ordinal {
        Some(ordinal) => {
            let sample = sampler
                .get_idx(ordinal)
                .with_context(|| format!("Failed to read window {}", ordinal))?;
            print_sample(&sample, config.output.preview);
        }
        None => {
            println!("Records: {}", sampler.records_len());
            println!("Windows: {}", sampler.len());
            println!("Window length: {}", sampler.window_length());
            println!("Samples per record: {}", sampler.samples_per_record());
            println!("Cyclic: {}", sampler.is_cyclic());
        }
    }

    Ok(())
}

fn cmd_resample(fasta: PathBuf, config: &Config) -> Result<()> {
    log::info!(
        "Resampling {} windows of {} per record from {}",
        config.windows.samples_per_record,
        config.windows.window_length,
        fasta.display()
    );

    let batches = ResamplingWindows::new(&fasta, config.windows.clone())
        .with_context(|| format!("Failed to open {}", fasta.display()))?;
    let limit = if config.windows.cyclic { config.output.limit } else { usize::MAX };

    for (i, batch) in batches.take(limit).enumerate() {
        let batch = batch.with_context(|| format!("Failed to draw batch {} from {}", i, fasta.display()))?;
        for sample in &batch {
            print_sample(sample, config.output.preview);
        }
    }

    Ok(())
}

fn print_sample(sample: &WindowSample, preview: usize) {
    let decoded = sample.window.decode().unwrap_or_default();
    let shown = &decoded[..decoded.len().min(preview)];
    println!(
        "{}\t{}\t{}",
        sample.description,
        sample.window.len(),
        String::from_utf8_lossy(shown)
    );
}
