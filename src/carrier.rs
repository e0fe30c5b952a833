use image::RgbaImage;

use crate::error::StegoError;
use crate::result::Result;

/// smallest LSB depth a carrier unit can lend
pub const MIN_LSB: u8 = 1;
/// largest LSB depth a carrier unit can lend, the top bit always stays untouched
/// so that unit values remain representable
pub const MAX_LSB: u8 = 7;

/// Number of bits a carrier of `unit_count` units can hide at the given LSB depth.
///
/// Pure capacity arithmetic, shapes whose product would overflow are rejected.
pub fn capacity_bits(unit_count: usize, num_lsb: u8) -> Result<usize> {
    ensure_lsb_range(num_lsb)?;
    unit_count
        .checked_mul(num_lsb as usize)
        .ok_or(StegoError::CapacityOverflow)
}

pub(crate) fn ensure_lsb_range(num_lsb: u8) -> Result<()> {
    if !(MIN_LSB..=MAX_LSB).contains(&num_lsb) {
        return Err(StegoError::InvalidLsbCount(num_lsb));
    }
    Ok(())
}

/// a fixed-geometry grid of per-channel pixel samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    samples: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelGrid {
    /// Builds a grid and checks that the sample count matches the declared geometry.
    pub fn new(samples: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or(StegoError::CapacityOverflow)?;

        if samples.len() != expected {
            return Err(StegoError::InvalidCarrierShape {
                width,
                height,
                channels,
                samples: samples.len(),
            });
        }

        Ok(Self {
            samples,
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Renders the grid as an RGBA image, only 4-channel grids convert.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        if self.channels != 4 {
            return Err(StegoError::InvalidCarrierShape {
                width: self.width,
                height: self.height,
                channels: self.channels,
                samples: self.samples.len(),
            });
        }
        RgbaImage::from_raw(self.width, self.height, self.samples.clone())
            .ok_or(StegoError::InvalidImageMedia)
    }
}

impl From<&RgbaImage> for PixelGrid {
    fn from(img: &RgbaImage) -> Self {
        Self {
            samples: img.as_raw().clone(),
            width: img.width(),
            height: img.height(),
            channels: 4,
        }
    }
}

/// a carrier for steganography, an ordered sequence of 8-bit addressable units
///
/// Embedding never changes the unit count or shape, only low-order bits of
/// existing units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Carrier {
    /// a raw byte stream, shape-free
    Bytes(Vec<u8>),
    /// a pixel sample grid with fixed geometry
    Pixels(PixelGrid),
}

impl Carrier {
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        Carrier::Pixels(img.into())
    }

    pub fn samples(&self) -> &[u8] {
        match self {
            Carrier::Bytes(b) => b,
            Carrier::Pixels(g) => &g.samples,
        }
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        match self {
            Carrier::Bytes(b) => b,
            Carrier::Pixels(g) => &mut g.samples,
        }
    }

    pub fn unit_count(&self) -> usize {
        self.samples().len()
    }

    /// Number of payload bits this carrier can hide at the given LSB depth.
    pub fn capacity_bits(&self, num_lsb: u8) -> Result<usize> {
        capacity_bits(self.unit_count(), num_lsb)
    }

    pub fn is_pixels(&self) -> bool {
        matches!(self, Carrier::Pixels(_))
    }
}
