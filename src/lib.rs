//! # stegolsb
//!
//! Hides an arbitrary byte payload inside the least-significant bits of a
//! carrier byte or pixel-sample sequence, authenticates and encrypts the
//! payload first, and offers statistical tests that estimate whether a
//! carrier already contains LSB-hidden data.
//!
//! The embedding pipeline is payload → [`cipher`] → [`frame`] →
//! [`lsb_codec`], guarded by the capacity accounting in [`carrier`];
//! extraction reverses it. The [`analysis`] module inspects a carrier on
//! its own and never sees keys or plaintext.
//!
//! # Usage Examples
//!
//! ## Hide a payload in a byte carrier
//!
//! ```rust
//! use stegolsb::{embed, extract, Carrier, CipherScheme};
//!
//! let carrier = Carrier::Bytes(vec![0b1010_1010; 256]);
//! let key = b"0123456789abcdef"; // 16-byte AES key
//!
//! let stego = embed(&carrier, b"attack at dawn", 2, key, CipherScheme::AesEax)?;
//! assert_eq!(stego.unit_count(), carrier.unit_count());
//!
//! let secret = extract(&stego, 2, key, CipherScheme::AesEax, 4096)?;
//! assert_eq!(secret, b"attack at dawn");
//! # Ok::<(), stegolsb::StegoError>(())
//! ```
//!
//! ## Check a carrier for hidden data
//!
//! ```rust
//! use stegolsb::{is_suspicious, rs_analysis, Carrier};
//!
//! let carrier = Carrier::Bytes((0..2000u32).map(|i| (i % 251) as u8).collect());
//! let flagged = is_suspicious(&carrier, 1)?;
//! let ratio = rs_analysis(&carrier);
//! assert!((0.0..=1.0).contains(&ratio));
//! # let _ = flagged;
//! # Ok::<(), stegolsb::StegoError>(())
//! ```

pub mod analysis;
pub mod carrier;
pub mod cipher;
pub mod error;
pub mod frame;
pub mod lsb_codec;
pub mod media;
pub mod result;

pub use crate::analysis::{
    distribution_report, is_suspicious, lsb_plane, rs_analysis, LayerDistribution,
};
pub use crate::carrier::{capacity_bits, Carrier, PixelGrid, MAX_LSB, MIN_LSB};
pub use crate::cipher::CipherScheme;
pub use crate::error::StegoError;
pub use crate::frame::FrameKind;
pub use crate::result::Result;

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::carrier::ensure_lsb_range;

/// options for [`embed_with_options`]
#[derive(Debug, Clone, Copy)]
pub struct EmbedOptions {
    /// LSB depth used per carrier unit, in `[1,7]`
    pub num_lsb: u8,
    /// how the payload is authenticated and encrypted
    pub scheme: CipherScheme,
    /// return only the written prefix of a byte carrier;
    /// invalid for pixel carriers
    pub truncate: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            num_lsb: 1,
            scheme: CipherScheme::default(),
            truncate: false,
        }
    }
}

/// Encrypts `payload`, frames it and embeds the frame into a copy of
/// `carrier`, which keeps its shape and unit count.
pub fn embed(
    carrier: &Carrier,
    payload: &[u8],
    num_lsb: u8,
    key: &[u8],
    scheme: CipherScheme,
) -> Result<Carrier> {
    embed_with_options(
        carrier,
        payload,
        key,
        &EmbedOptions {
            num_lsb,
            scheme,
            truncate: false,
        },
    )
}

/// [`embed`] with explicit options.
///
/// All parameter validation happens before anything is encrypted or
/// written, a failing call leaves no partial embedding behind.
pub fn embed_with_options(
    carrier: &Carrier,
    payload: &[u8],
    key: &[u8],
    opts: &EmbedOptions,
) -> Result<Carrier> {
    ensure_lsb_range(opts.num_lsb)?;
    if opts.truncate && carrier.is_pixels() {
        return Err(StegoError::TruncationUnsupported);
    }

    let blob = cipher::encrypt(payload, key, opts.scheme)?;
    let framed = frame::build_frame(&blob)?;
    debug!(
        "embedding {} frame bytes at depth {} into {} units",
        framed.len(),
        opts.num_lsb,
        carrier.unit_count()
    );

    match carrier {
        Carrier::Bytes(bytes) => Ok(Carrier::Bytes(lsb_codec::interleave_bytes(
            bytes,
            &framed,
            opts.num_lsb,
            opts.truncate,
        )?)),
        Carrier::Pixels(_) => {
            let mut stego = carrier.clone();
            lsb_codec::interleave(stego.samples_mut(), &framed, opts.num_lsb)?;
            Ok(stego)
        }
    }
}

/// Recovers a payload hidden by [`embed`].
///
/// The frame's length header is read first; a header claiming more bytes
/// than the carrier capacity or `expected_max_bits` allows fails with
/// [`StegoError::FrameTruncated`] before anything else is read.
pub fn extract(
    stego: &Carrier,
    num_lsb: u8,
    key: &[u8],
    scheme: CipherScheme,
    expected_max_bits: usize,
) -> Result<Vec<u8>> {
    let samples = stego.samples();
    let capacity = stego.capacity_bits(num_lsb)?;
    let header_bits = frame::LENGTH_HEADER_LEN * 8;

    let header = lsb_codec::deinterleave(samples, header_bits, num_lsb)?;
    let claimed = BigEndian::read_u32(&header) as usize;

    let frame_bits = claimed
        .checked_mul(8)
        .and_then(|b| b.checked_add(header_bits))
        .ok_or(StegoError::CapacityOverflow)?;
    let bound = capacity.min(expected_max_bits);
    if frame_bits > bound {
        return Err(StegoError::FrameTruncated {
            claimed,
            available: bound.saturating_sub(header_bits) / 8,
        });
    }

    let framed = lsb_codec::deinterleave(samples, frame_bits, num_lsb)?;
    let blob = frame::parse_frame(&framed)?;
    cipher::decrypt(&blob, key, scheme)
}
