//! File adapter between lossless image formats and pixel carriers.
//!
//! Only exact integer sample grids may feed the core: lossy formats
//! re-encode pixels through perceptual transforms and would destroy any
//! LSB data, so everything outside PNG and BMP is rejected up front.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::ImageFormat;
use log::error;

use crate::carrier::Carrier;
use crate::error::StegoError;
use crate::result::Result;

fn format_for(path: &Path) -> Result<ImageFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok(ImageFormat::Png),
        "bmp" => Ok(ImageFormat::Bmp),
        other => Err(StegoError::UnsupportedFormat(other.to_string())),
    }
}

/// Reads a lossless image file into a pixel carrier.
pub fn read_carrier(path: impl AsRef<Path>) -> Result<Carrier> {
    let path = path.as_ref();
    format_for(path)?;

    let img = image::open(path)
        .map_err(|e| {
            error!("cannot decode carrier image {path:?}: {e}");
            StegoError::InvalidImageMedia
        })?
        .to_rgba8();

    Ok(Carrier::from_rgba_image(&img))
}

/// Writes a pixel carrier back to a lossless image file of identical shape.
pub fn write_carrier(carrier: &Carrier, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = format_for(path)?;

    let grid = match carrier {
        Carrier::Pixels(grid) => grid,
        Carrier::Bytes(_) => {
            return Err(StegoError::UnsupportedFormat(
                "byte carriers have no image geometry".into(),
            ))
        }
    };

    let img = grid.to_rgba_image()?;
    let file = File::create(path).map_err(|e| {
        error!("cannot create target file {path:?}: {e}");
        StegoError::WriteError { source: e }
    })?;
    img.write_to(&mut BufWriter::new(file), format)
        .map_err(|e| {
            error!("cannot encode target image {path:?}: {e}");
            StegoError::InvalidImageMedia
        })
}
