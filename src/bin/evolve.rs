use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use polyplot::config::{Config, EvolveConfig, DEFAULT_CONFIG_PATH};
use polyplot::genetic::{read_samples, MovieOptions, Options, Population};

/// Evolve integer polynomials toward the sample points of DATA and save every generation as
/// one frame of a GIF.
#[derive(Parser, Debug)]
#[command(name = "evolve", version)]
struct Cli {
    /// File of `x,y` sample pairs, one per line.
    data: PathBuf,

    /// Number of expressions in the population.
    #[arg(long)]
    exprs: Option<usize>,

    /// Degree of the random initial polynomials.
    #[arg(long)]
    degree: Option<usize>,

    /// Probability for each coefficient of a child to mutate.
    #[arg(long = "mutate-p")]
    mutate_p: Option<f64>,

    /// Generations to graph; defaults to the square of the sample count.
    #[arg(long)]
    frames: Option<usize>,

    /// Frames per second of the movie.
    #[arg(long)]
    fps: Option<u32>,

    /// Keep the per-generation PNG files.
    #[arg(long = "keep-frames")]
    keep_frames: bool,

    /// Seed of the random generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory receiving the frames and the movie.
    #[arg(long = "out-dir", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::load_or_default(&cli.config);
    let (inputs, outputs) = read_samples(&cli.data)
        .with_context(|| format!("failed to read samples from {}", cli.data.display()))?;

    let defaults = Options::from_config(&config.evolve_conf);
    let options = Options {
        num_exprs: cli.exprs.unwrap_or(defaults.num_exprs),
        max_degree: cli.degree.unwrap_or(defaults.max_degree),
        mutate_p: cli.mutate_p.unwrap_or(defaults.mutate_p),
        seed: cli.seed,
        ..defaults
    };
    let movie_options = MovieOptions {
        frames_per_sec: cli.fps.unwrap_or(config.evolve_conf.frames_per_sec()),
        rm: !cli.keep_frames,
    };

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    let mut population = Population::new(inputs, outputs, options)?;
    log::debug!("initial population\n{population}");

    let movie = population.quick_movie(cli.frames, &movie_options, &config.plot_conf, &cli.out_dir)?;
    log::info!("{} frame(s) in {}", movie.frames, movie.path.display());
    println!("{}", movie.best_fit);
    Ok(())
}
