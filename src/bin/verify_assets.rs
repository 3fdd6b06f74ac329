use anyhow::Result;
use asset_gen::png_stream::{self, Chunk};
use std::path::PathBuf;

fn main() -> Result<()> {
    asset_gen::init_logger();
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("Checking assets in: {}", dir.display());

    let mut failures = 0;
    for asset in asset_gen::default_assets() {
        let path = dir.join(&asset.filename);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                println!("✗ {}: {err}", asset.filename);
                failures += 1;
                continue;
            }
        };

        let chunks = match png_stream::read_chunks(&bytes) {
            Ok(chunks) => chunks,
            Err(err) => {
                println!("✗ {}: {err}", asset.filename);
                failures += 1;
                continue;
            }
        };

        let layout: Vec<String> = chunks
            .iter()
            .map(|chunk: &Chunk| format!("{}({})", chunk.tag_str(), chunk.data.len()))
            .collect();
        println!("\n{} ({} bytes)", asset.filename, bytes.len());
        println!("  Chunks: {}", layout.join(" "));

        match png_stream::ihdr_dimensions(&chunks) {
            Some(dims) if dims == (asset.width, asset.height) => {
                println!("  ✓ {}x{}", dims.0, dims.1);
            }
            Some((width, height)) => {
                println!(
                    "  ✗ {}x{}, expected {}x{}",
                    width, height, asset.width, asset.height
                );
                failures += 1;
            }
            None => {
                println!("  ✗ missing IHDR");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} asset(s) failed verification");
    }

    println!("\n✓ All assets verified");
    Ok(())
}

