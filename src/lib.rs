//! Placeholder asset generator
//!
//! Writes the PNG files a mobile app build expects (app icon, splash screen,
//! adaptive icon, notification icon, favicon) either as minimal placeholder
//! streams or as real solid-color PNGs.

pub mod descriptor;
pub mod emitter;
pub mod error;
pub mod png_stream;

pub use descriptor::{default_assets, load_manifest, AssetDescriptor, AssetManifest};
pub use emitter::{emit_assets, EmitOptions, Encoding};
pub use error::{Error, Result};

/// Initializes the stderr logger, filtered by `RUST_LOG` (default `warn`).
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
