//! Bit-level LSB interleaving and deinterleaving.
//!
//! Payload bytes are consumed MSB-first in byte-major order and written into
//! the low `num_lsb` bits of consecutive carrier units, the most significant
//! bit of each group landing in the highest of the target positions. The
//! deinterleaver reads the exact inverse, so a round trip holds for every
//! LSB depth in `[1,7]` and every bit count, byte-aligned or not.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::Cursor;

use crate::carrier::{capacity_bits, ensure_lsb_range};
use crate::error::StegoError;
use crate::result::Result;

fn lsb_mask(num_lsb: u8) -> u8 {
    (1u8 << num_lsb) - 1
}

/// Embeds `payload` into the low `num_lsb` bits of `samples`, in place.
///
/// Returns the number of units written, `ceil(payload_bits / num_lsb)`.
/// Units past the last consumed bit are left untouched. Validation happens
/// before any unit is mutated.
pub fn interleave(samples: &mut [u8], payload: &[u8], num_lsb: u8) -> Result<usize> {
    ensure_lsb_range(num_lsb)?;
    let needed = payload
        .len()
        .checked_mul(8)
        .ok_or(StegoError::CapacityOverflow)?;
    let available = capacity_bits(samples.len(), num_lsb)?;
    if needed > available {
        return Err(StegoError::CapacityExceeded { needed, available });
    }

    let mask = lsb_mask(num_lsb);
    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);
    let mut remaining = needed;
    let mut written = 0_usize;

    for unit in samples.iter_mut() {
        if remaining == 0 {
            break;
        }
        let group = (num_lsb as usize).min(remaining) as u32;
        let chunk: u8 = reader.read(group)?;
        // a final partial group is left-aligned within the field so the
        // deinterleaver encounters its bits first
        let chunk = chunk << (num_lsb as u32 - group);
        *unit = (*unit & !mask) | (chunk & mask);
        remaining -= group as usize;
        written += 1;
    }

    Ok(written)
}

/// Embeds `payload` into a copy of a raw byte carrier.
///
/// With `truncate` the result keeps only the written prefix of
/// `ceil(payload_bits / num_lsb)` units, every bit of which is recoverable.
/// Truncation is only meaningful for shape-free byte streams, pixel carriers
/// must go through [`crate::embed`] instead.
pub fn interleave_bytes(
    carrier: &[u8],
    payload: &[u8],
    num_lsb: u8,
    truncate: bool,
) -> Result<Vec<u8>> {
    let mut out = carrier.to_vec();
    let written = interleave(&mut out, payload, num_lsb)?;
    if truncate {
        out.truncate(written);
    }
    Ok(out)
}

/// Collects `num_bits` bits from the low `num_lsb` bits of consecutive units.
///
/// Reading stops as soon as `num_bits` are gathered. The result holds
/// `ceil(num_bits / 8)` bytes, a final partial byte is zero-padded at the
/// low end; a caller that knows the exact bit count never reads the padding.
pub fn deinterleave(samples: &[u8], num_bits: usize, num_lsb: u8) -> Result<Vec<u8>> {
    ensure_lsb_range(num_lsb)?;
    let available = capacity_bits(samples.len(), num_lsb)?;
    if num_bits > available {
        return Err(StegoError::CapacityExceeded {
            needed: num_bits,
            available,
        });
    }

    let mask = lsb_mask(num_lsb);
    let mut writer = BitWriter::endian(Vec::with_capacity(num_bits / 8 + 1), BigEndian);
    let mut collected = 0_usize;

    for &unit in samples {
        if collected >= num_bits {
            break;
        }
        let take = (num_lsb as usize).min(num_bits - collected) as u32;
        let bits = (unit & mask) >> (num_lsb as u32 - take);
        writer.write(take, bits)?;
        collected += take as usize;
    }

    writer.byte_align()?;
    Ok(writer.into_writer())
}
