//! Self-describing frames wrapping an encrypted blob before bit-encoding.
//!
//! The canonical frame prepends a 4-byte big-endian byte count, so a decoder
//! knows exactly where the blob ends and tolerates the extra zero bits a
//! caller may harvest past it. A hash-prefixed variant is kept for blobs
//! exchanged with tooling that expects a leading SHA-256 hexdigest; it has
//! no length marker and therefore requires exact-length input.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use sha2::{Digest, Sha256};

use crate::error::StegoError;
use crate::result::Result;

/// byte width of the length header
pub const LENGTH_HEADER_LEN: usize = 4;
/// byte width of the hexdigest prefix
pub const HASH_PREFIX_LEN: usize = 64;

/// selects the frame envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameKind {
    /// `length(4 bytes, big-endian) ‖ blob`, the canonical envelope
    #[default]
    LengthPrefixed,
    /// `sha256-hexdigest(64 ASCII bytes) ‖ blob`, legacy integrity envelope
    HashPrefixed,
}

/// Wraps `blob` into the canonical length-prefixed frame.
pub fn build_frame(blob: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(blob.len()).map_err(|_| StegoError::BlobTooLarge(blob.len()))?;
    let mut frame = Vec::with_capacity(LENGTH_HEADER_LEN + blob.len());
    frame.write_u32::<BigEndian>(len)?;
    frame.extend_from_slice(blob);
    Ok(frame)
}

/// Recovers the blob from a length-prefixed frame.
///
/// Trailing bytes beyond the declared length are ignored; a header claiming
/// more bytes than are present fails with [`StegoError::FrameTruncated`].
pub fn parse_frame(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < LENGTH_HEADER_LEN {
        return Err(StegoError::FrameTruncated {
            claimed: LENGTH_HEADER_LEN,
            available: bytes.len(),
        });
    }
    let claimed = BigEndian::read_u32(&bytes[..LENGTH_HEADER_LEN]) as usize;
    let body = &bytes[LENGTH_HEADER_LEN..];
    if body.len() < claimed {
        return Err(StegoError::FrameTruncated {
            claimed,
            available: body.len(),
        });
    }
    Ok(body[..claimed].to_vec())
}

/// Wraps `blob` into the requested frame envelope.
pub fn build_frame_with(blob: &[u8], kind: FrameKind) -> Result<Vec<u8>> {
    match kind {
        FrameKind::LengthPrefixed => build_frame(blob),
        FrameKind::HashPrefixed => {
            let digest = hex::encode(Sha256::digest(blob));
            let mut frame = Vec::with_capacity(HASH_PREFIX_LEN + blob.len());
            frame.extend_from_slice(digest.as_bytes());
            frame.extend_from_slice(blob);
            Ok(frame)
        }
    }
}

/// Recovers the blob from the requested frame envelope.
///
/// The hash-prefixed variant treats everything after the 64-character
/// digest as the blob and fails with [`StegoError::AuthenticationFailure`]
/// when the digest does not match.
pub fn parse_frame_with(bytes: &[u8], kind: FrameKind) -> Result<Vec<u8>> {
    match kind {
        FrameKind::LengthPrefixed => parse_frame(bytes),
        FrameKind::HashPrefixed => {
            if bytes.len() < HASH_PREFIX_LEN {
                return Err(StegoError::FrameTruncated {
                    claimed: HASH_PREFIX_LEN,
                    available: bytes.len(),
                });
            }
            let (prefix, blob) = bytes.split_at(HASH_PREFIX_LEN);
            let digest = hex::encode(Sha256::digest(blob));
            if digest.as_bytes() != prefix {
                return Err(StegoError::AuthenticationFailure);
            }
            Ok(blob.to_vec())
        }
    }
}
