use crate::{descriptor::AssetDescriptor, png_stream, Error, Result};
use image::{
    codecs::png::{CompressionType, FilterType, PngEncoder},
    ColorType, ImageBuffer, ImageEncoder, Rgb,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Upper bound on the raw RGB buffer built for a conformant asset
pub const MAX_CONFORMANT_BYTES: u64 = 256 * 1024 * 1024;

/// How each asset's bytes are produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Fixed 62-byte signature + IHDR + IDAT + IEND stream
    Placeholder,
    /// Decodable truecolor PNG filled with one color
    Conformant { background: Rgb<u8> },
}

#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub output: PathBuf,
    pub assets: Vec<AssetDescriptor>,
    pub encoding: Encoding,
}

/// Write every asset in order, stopping at the first failure
///
/// Files written before a failure are left in place. Returns the written
/// paths.
pub fn emit_assets(options: &EmitOptions) -> Result<Vec<PathBuf>> {
    // Reject bad descriptors before touching the filesystem
    for asset in &options.assets {
        asset.validate()?;
    }

    let mut written = Vec::with_capacity(options.assets.len());
    for asset in &options.assets {
        let path = emit_asset(asset, &options.output, &options.encoding)?;
        println!("Created {}", asset.filename);
        written.push(path);
    }

    println!("All assets created successfully!");
    Ok(written)
}

/// Encode one asset and write it, replacing any existing file
pub fn emit_asset(
    asset: &AssetDescriptor,
    out_dir: &Path,
    encoding: &Encoding,
) -> Result<PathBuf> {
    let bytes = encode_asset(asset, encoding)?;
    let path = out_dir.join(&asset.filename);

    write_file(&path, &bytes).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;

    log::debug!(
        "Wrote {} ({}x{}, {} bytes)",
        path.display(),
        asset.width,
        asset.height,
        bytes.len()
    );
    Ok(path)
}

pub fn encode_asset(asset: &AssetDescriptor, encoding: &Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Placeholder => Ok(png_stream::placeholder_png(asset.width, asset.height)),
        Encoding::Conformant { background } => {
            encode_solid_png(asset.width, asset.height, *background)
        }
    }
}

/// Parse a CSS color, falling back to white
pub fn parse_background(color: &str) -> Rgb<u8> {
    css_color::Srgb::from_str(color)
        .map(|color| {
            Rgb([
                (color.red * 255.).round() as u8,
                (color.green * 255.).round() as u8,
                (color.blue * 255.).round() as u8,
            ])
        })
        .unwrap_or_else(|_| {
            log::warn!("Unrecognized color '{color}', using white");
            Rgb([255, 255, 255])
        })
}

fn encode_solid_png(width: u32, height: u32, background: Rgb<u8>) -> Result<Vec<u8>> {
    let raw_len = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(3));
    match raw_len {
        Some(len) if len <= MAX_CONFORMANT_BYTES => {}
        _ => return Err(Error::ImageTooLarge { width, height }),
    }

    let canvas = ImageBuffer::from_pixel(width, height, background);

    let mut buf = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(canvas.as_raw(), width, height, ColorType::Rgb8)?;
    Ok(buf)
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut out_file = BufWriter::new(File::create(path)?);
    out_file.write_all(bytes)?;
    out_file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::default_assets;
    use tempfile::TempDir;

    fn options(output: &Path, encoding: Encoding) -> EmitOptions {
        EmitOptions {
            output: output.to_path_buf(),
            assets: default_assets(),
            encoding,
        }
    }

    #[test]
    fn test_emit_default_assets() {
        let temp_dir = TempDir::new().unwrap();
        let written = emit_assets(&options(temp_dir.path(), Encoding::Placeholder)).unwrap();

        assert_eq!(written.len(), 5);
        for (path, asset) in written.iter().zip(default_assets()) {
            assert_eq!(path, &temp_dir.path().join(&asset.filename));
            let bytes = std::fs::read(path).unwrap();
            assert_eq!(bytes, png_stream::placeholder_png(asset.width, asset.height));
        }
    }

    #[test]
    fn test_emit_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("favicon.png");
        std::fs::write(&path, vec![0u8; 4096]).unwrap();

        let asset = AssetDescriptor::new("favicon.png", 32, 32);
        emit_asset(&asset, temp_dir.path(), &Encoding::Placeholder).unwrap();

        assert_eq!(std::fs::read(&path).unwrap().len(), 62);
    }

    #[test]
    fn test_missing_output_dir_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = emit_assets(&options(&missing, Encoding::Placeholder)).unwrap_err();
        match err {
            Error::Write { path, .. } => assert_eq!(path, missing.join("icon.png")),
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_keeps_earlier_files() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in the way makes File::create fail for b.png
        std::fs::create_dir(temp_dir.path().join("b.png")).unwrap();

        let opts = EmitOptions {
            output: temp_dir.path().to_path_buf(),
            assets: vec![
                AssetDescriptor::new("a.png", 64, 64),
                AssetDescriptor::new("b.png", 32, 32),
            ],
            encoding: Encoding::Placeholder,
        };

        match emit_assets(&opts).unwrap_err() {
            Error::Write { path, .. } => assert_eq!(path, temp_dir.path().join("b.png")),
            other => panic!("expected write error, got {other:?}"),
        }

        let bytes = std::fs::read(temp_dir.path().join("a.png")).unwrap();
        assert_eq!(bytes, png_stream::placeholder_png(64, 64));
    }

    #[test]
    fn test_oversized_conformant_asset_is_error() {
        let encoding = Encoding::Conformant {
            background: Rgb([0, 0, 0]),
        };

        let huge = AssetDescriptor::new("huge.png", u32::MAX, u32::MAX);
        assert!(matches!(
            encode_asset(&huge, &encoding),
            Err(Error::ImageTooLarge { .. })
        ));

        // Valid header dimensions, but far past the buffer ceiling
        let wide = AssetDescriptor::new("wide.png", i32::MAX as u32, i32::MAX as u32);
        assert!(wide.validate().is_ok());
        assert!(matches!(
            encode_asset(&wide, &encoding),
            Err(Error::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_descriptor_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let opts = EmitOptions {
            output: temp_dir.path().to_path_buf(),
            assets: vec![
                AssetDescriptor::new("icon.png", 1024, 1024),
                AssetDescriptor::new("broken.png", 0, 10),
            ],
            encoding: Encoding::Placeholder,
        };

        assert!(matches!(
            emit_assets(&opts),
            Err(Error::InvalidDescriptor { .. })
        ));
        assert!(!temp_dir.path().join("icon.png").exists());
    }

    #[test]
    fn test_conformant_asset_decodes() {
        let asset = AssetDescriptor::new("tile.png", 48, 24);
        let bytes = encode_asset(
            &asset,
            &Encoding::Conformant {
                background: Rgb([10, 120, 200]),
            },
        )
        .unwrap();

        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (48, 24));
        assert!(img.pixels().all(|p| *p == Rgb([10, 120, 200])));
    }

    #[test]
    fn test_parse_background() {
        assert_eq!(parse_background("#ff0000"), Rgb([255, 0, 0]));
        assert_eq!(parse_background("#fff"), Rgb([255, 255, 255]));
        assert_eq!(parse_background("not a color"), Rgb([255, 255, 255]));
    }
}
