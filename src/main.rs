use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;

use polyplot::config::{Config, DEFAULT_CONFIG_PATH};
use polyplot::plot::Bounds;
use polyplot::script::{graph_file, USAGE};

/// Plot every expression of `x` found in SAVEFILE into `<HASH>_<FRAME>.png`.
#[derive(Parser, Debug)]
#[command(name = "polyplot", version)]
struct Cli {
    /// File with one expression of x per line.
    savefile: PathBuf,
    /// Prefix of the output image name.
    hash: String,
    /// Suffix of the output image name.
    frame: String,
    /// The x axis spans [-BOUND_X, BOUND_X].
    bound_x: String,
    /// The y axis spans [-BOUND_Y, BOUND_Y].
    bound_y: String,
}

/// Any five parameters are the plot arguments, even ones starting with `-`; any other count
/// only honours `--help` and `--version`.
fn parse_cli<I: IntoIterator<Item = OsString>>(args: I) -> Option<Cli> {
    let args: Vec<OsString> = args.into_iter().collect();
    if let [bin, params @ ..] = args.as_slice() {
        if params.len() == 5 {
            let argv = std::iter::once(bin.clone()).chain([OsString::from("--")]).chain(params.iter().cloned());
            return Cli::try_parse_from(argv).ok();
        }
    }
    if let Err(e) = Cli::try_parse_from(&args) {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
    }
    None
}

fn main() -> anyhow::Result<()> {
    let Some(cli) = parse_cli(std::env::args_os()) else {
        println!("{USAGE}");
        return Ok(());
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::load_or_default(DEFAULT_CONFIG_PATH);
    let bounds = Bounds::parse(&cli.bound_x, &cli.bound_y)?;
    let file = graph_file(&cli.savefile, &cli.hash, &cli.frame, &bounds, &config.plot_conf, Path::new("."))
        .with_context(|| format!("failed to graph {}", cli.savefile.display()))?;
    log::debug!("wrote {}", file.display());
    Ok(())
}
