use std::path::PathBuf;
use std::process::ExitCode;

use bugball_icon::{
    DEFAULT_RES_DIR, DEFAULT_SOURCE_ASSET, Density, ExportConfig, IconError, Preset, Result,
    StyleConfig, export_all,
};
use clap::Parser;
use log::{error, info};

/// Render the launcher icon and write every density into an app's resource tree.
#[derive(Parser, Debug)]
#[command(name = "bugball-icon", version, about)]
struct Args {
    /// Resource directory that receives the mipmap-* folders.
    #[arg(long, default_value = DEFAULT_RES_DIR)]
    res_dir: PathBuf,

    /// Source image to use instead of the procedural artwork, if it exists.
    #[arg(long, default_value = DEFAULT_SOURCE_ASSET)]
    source: PathBuf,

    /// Ignore any source image.
    #[arg(long)]
    no_source: bool,

    /// Built-in style.
    #[arg(long, value_enum, default_value_t = Preset::Glossy)]
    preset: Preset,

    /// JSON style file; overrides --preset.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Density to export (repeatable); all when omitted.
    #[arg(long = "density", value_enum)]
    densities: Vec<Density>,

    /// Print the effective style as JSON and exit.
    #[arg(long)]
    print_style: bool,
}

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filter) => {
            builder.parse_filters(&filter);
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }
    builder.init();
}

fn load_style(args: &Args) -> Result<StyleConfig> {
    let Some(path) = &args.style else {
        return Ok(args.preset.style());
    };
    let json = std::fs::read_to_string(path).map_err(|e| {
        IconError::InvalidInput(format!("cannot read style file {}: {e}", path.display()))
    })?;
    StyleConfig::from_json(&json)
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let style = match load_style(&args) {
        Ok(style) => style,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if args.print_style {
        return match style.to_json_pretty() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let densities = if args.densities.is_empty() {
        Density::ALL.to_vec()
    } else {
        args.densities.clone()
    };
    let config = ExportConfig {
        res_dir: args.res_dir.clone(),
        source_asset: (!args.no_source).then(|| args.source.clone()),
        densities,
        style,
        backdrop: None,
    };

    let report = export_all(&config);
    if report.is_success() {
        info!("all icons written");
        ExitCode::SUCCESS
    } else {
        for failure in &report.failures {
            error!("{}: {}", failure.path.display(), failure.error);
        }
        ExitCode::FAILURE
    }
}
