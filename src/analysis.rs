//! Statistical detection of LSB-hidden data.
//!
//! Everything here is a read-only heuristic over the carrier alone, the
//! engine never sees keys or plaintext and never mutates anything. Identical
//! input always yields identical output. Results are advisory: noisy
//! natural images can trip the uniformity test (false positive), and a
//! ciphertext-grade payload is itself near-uniform and may pass unnoticed
//! (false negative) — which is exactly what the embedding side of this crate
//! produces.

use log::debug;

use crate::carrier::{ensure_lsb_range, Carrier};
use crate::result::Result;

/// the unit count divided by this bounds the allowed deviation from the
/// uniform expectation, i.e. 10% of all units
const UNIFORMITY_DIVISOR: usize = 10;

/// units per RS block, a 2×2 neighbourhood
const RS_BLOCK: usize = 4;

/// value→count table of the low `layer` bits across all units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDistribution {
    layer: u8,
    counts: Vec<u64>,
}

impl LayerDistribution {
    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// occurrence count per LSB value, indexed by value in `[0, 2^layer)`
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }
}

/// Estimates whether a carrier already holds LSB-hidden data.
///
/// The low `num_lsb` bits of every unit are tabulated as a value in
/// `[0, 2^num_lsb)`. Genuine sensor noise at that bit depth should cover
/// every value roughly uniformly, so the carrier is flagged when values are
/// missing entirely or when any count strays from `unit_count / 2^num_lsb`
/// by more than 10% of the unit count.
pub fn is_suspicious(carrier: &Carrier, num_lsb: u8) -> Result<bool> {
    ensure_lsb_range(num_lsb)?;

    let samples = carrier.samples();
    let counts = tabulate(samples, num_lsb);

    if counts.iter().any(|&c| c == 0) {
        debug!("carrier misses LSB values entirely at depth {num_lsb}");
        return Ok(true);
    }

    let expected = samples.len() / counts.len();
    let tolerance = samples.len() / UNIFORMITY_DIVISOR;
    Ok(counts
        .iter()
        .any(|&c| (c as usize).abs_diff(expected) > tolerance))
}

/// Produces the value→count table for every layer in `1..=max_layer`,
/// for diagnostic display.
pub fn distribution_report(carrier: &Carrier, max_layer: u8) -> Result<Vec<LayerDistribution>> {
    ensure_lsb_range(max_layer)?;

    let samples = carrier.samples();
    Ok((1..=max_layer)
        .map(|layer| LayerDistribution {
            layer,
            counts: tabulate(samples, layer),
        })
        .collect())
}

/// RS flipping analysis over non-overlapping 2×2 unit blocks.
///
/// Each block's discontinuity is the sum of absolute differences between
/// adjacent units. Flipping every LSB (XOR 1) and re-measuring classifies
/// the block: regular when the flip strictly decreases the discontinuity,
/// singular otherwise. Returns `regular / (regular + singular)`, or 0 when
/// the carrier holds no complete block.
pub fn rs_analysis(carrier: &Carrier) -> f64 {
    let mut regular = 0u64;
    let mut singular = 0u64;

    for block in carrier.samples().chunks_exact(RS_BLOCK) {
        let flipped = [block[0] ^ 1, block[1] ^ 1, block[2] ^ 1, block[3] ^ 1];
        if discontinuity(&flipped) < discontinuity(block) {
            regular += 1;
        } else {
            singular += 1;
        }
    }

    if regular + singular == 0 {
        return 0.0;
    }
    regular as f64 / (regular + singular) as f64
}

fn discontinuity(block: &[u8]) -> u32 {
    block
        .windows(2)
        .map(|w| w[0].abs_diff(w[1]) as u32)
        .sum()
}

/// Renders the low `num_lsb` bits of every unit at full 8-bit brightness,
/// for visual inspection of the LSB plane. Shape and unit count are
/// preserved, a pixel carrier stays a pixel carrier.
pub fn lsb_plane(carrier: &Carrier, num_lsb: u8) -> Result<Carrier> {
    ensure_lsb_range(num_lsb)?;

    let mask = (1u8 << num_lsb) - 1;
    let scale = u8::MAX / mask;
    let mut plane = carrier.clone();
    for unit in plane.samples_mut() {
        *unit = (*unit & mask) * scale;
    }
    Ok(plane)
}

fn tabulate(samples: &[u8], num_lsb: u8) -> Vec<u64> {
    let mask = (1u16 << num_lsb) - 1;
    let mut counts = vec![0u64; 1 << num_lsb];
    for &s in samples {
        counts[(s as u16 & mask) as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(samples: Vec<u8>) -> Carrier {
        Carrier::Bytes(samples)
    }

    #[test]
    fn uniform_lsb_noise_is_not_suspicious() {
        // low 2 bits cycle through all four values evenly
        let samples: Vec<u8> = (0..1000u32).map(|i| (i % 4) as u8).collect();
        assert!(!is_suspicious(&bytes(samples), 2).unwrap());
    }

    #[test]
    fn missing_lsb_values_are_suspicious() {
        // low 2 bits only ever take the values 0 and 1
        let samples: Vec<u8> = (0..1000u32).map(|i| (i % 2) as u8).collect();
        assert!(is_suspicious(&bytes(samples), 2).unwrap());
    }

    #[test]
    fn skewed_distribution_is_suspicious() {
        // every value occurs, but value 0 dominates far past the tolerance
        let mut samples = vec![0u8; 900];
        samples.extend_from_slice(&[1, 2, 3]);
        assert!(is_suspicious(&bytes(samples), 2).unwrap());
    }

    #[test]
    fn lsb_depth_is_validated() {
        assert!(is_suspicious(&bytes(vec![0; 4]), 8).is_err());
        assert!(distribution_report(&bytes(vec![0; 4]), 0).is_err());
    }

    #[test]
    fn report_covers_every_layer_up_to_the_maximum() {
        let samples = vec![0b0000_0101u8, 0b0000_0110, 0b0000_0111, 0b0000_0100];
        let report = distribution_report(&bytes(samples), 3).unwrap();
        assert_eq!(report.len(), 3);

        // layer 1: low bit is 1,0,1,0
        assert_eq!(report[0].layer(), 1);
        assert_eq!(report[0].counts(), &[2u64, 2]);

        // layer 3: values 5,6,7,4 each once
        assert_eq!(report[2].layer(), 3);
        assert_eq!(report[2].counts(), &[0u64, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn rs_ratio_is_zero_without_complete_blocks() {
        assert_eq!(rs_analysis(&bytes(vec![])), 0.0);
        assert_eq!(rs_analysis(&bytes(vec![1, 2, 3])), 0.0);
    }

    #[test]
    fn rs_classifies_smoothing_and_roughening_flips() {
        // 1,0,1,0 flips to 0,1,0,1: discontinuity stays 3, singular
        let singular_block = vec![1u8, 0, 1, 0];
        assert_eq!(rs_analysis(&bytes(singular_block)), 0.0);

        // 1,2,1,2 flips to 0,3,0,3: discontinuity grows from 3 to 9, singular
        let rough = vec![1u8, 2, 1, 2];
        assert_eq!(rs_analysis(&bytes(rough)), 0.0);

        // 0,3,0,3 flips to 1,2,1,2: discontinuity shrinks from 9 to 3, regular
        let smooth = vec![0u8, 3, 0, 3];
        assert_eq!(rs_analysis(&bytes(smooth)), 1.0);

        // one regular and one singular block
        let mixed = vec![0u8, 3, 0, 3, 1, 2, 1, 2];
        assert_eq!(rs_analysis(&bytes(mixed)), 0.5);
    }

    #[test]
    fn lsb_plane_scales_to_full_brightness_and_keeps_shape() {
        let carrier = bytes(vec![0b0000_0000, 0b0000_0001, 0b1111_1110, 0b1111_1111]);
        let plane = lsb_plane(&carrier, 1).unwrap();
        assert_eq!(plane.samples(), &[0u8, 255, 0, 255]);

        let plane = lsb_plane(&carrier, 2).unwrap();
        assert_eq!(plane.samples(), &[0u8, 85, 170, 255]);
        assert_eq!(plane.unit_count(), carrier.unit_count());
    }

    #[test]
    fn analysis_is_deterministic() {
        let samples: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let carrier = bytes(samples);
        assert_eq!(rs_analysis(&carrier), rs_analysis(&carrier));
        assert_eq!(
            is_suspicious(&carrier, 3).unwrap(),
            is_suspicious(&carrier, 3).unwrap()
        );
        assert_eq!(
            distribution_report(&carrier, 4).unwrap(),
            distribution_report(&carrier, 4).unwrap()
        );
    }
}
