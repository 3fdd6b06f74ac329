use anyhow::{Context, Result};
use asset_gen::{emitter, EmitOptions, Encoding};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "asset-gen",
    about = "Generate placeholder PNG assets for mobile app builds"
)]
struct Args {
    /// Output directory. Must already exist.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// JSON manifest listing the assets to generate instead of the built-in set.
    #[clap(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Write decodable solid-color PNGs instead of placeholder streams
    #[clap(long)]
    conformant: bool,

    /// The fill color for --conformant (CSS color format)
    #[clap(long, default_value = "#ffffff")]
    color: String,
}

fn main() -> Result<()> {
    asset_gen::init_logger();
    let args = Args::parse();

    let assets = match &args.manifest {
        Some(path) => asset_gen::load_manifest(path).context("Can't load asset manifest")?,
        None => asset_gen::default_assets(),
    };

    let encoding = if args.conformant {
        Encoding::Conformant {
            background: emitter::parse_background(&args.color),
        }
    } else {
        Encoding::Placeholder
    };

    let options = EmitOptions {
        output: args.output,
        assets,
        encoding,
    };
    log::debug!("Emitting {} assets with {:?}", options.assets.len(), options.encoding);

    asset_gen::emit_assets(&options).context("Asset generation failed")?;
    Ok(())
}
