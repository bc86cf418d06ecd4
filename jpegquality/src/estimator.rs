//! Inverse-quantization quality estimator.
//!
//! Recovers the libjpeg quality factor (1-100) that produced a luminance
//! quantization table by inverting the IJG scaling formula
//! `quant = (reference * scale + 50) / 100`, where `scale` is `5000/q`
//! below quality 50 and `200 - 2q` at or above it.

use crate::tables::BLOCK_SIZE;

/// Number of table entries averaged before the scan stops.
const SAMPLE_TARGET: u32 = 3;

/// Quantization coefficients at or above this value carry no quality
/// information (16-bit table ceiling).
const MAX_COEFFICIENT: u16 = 32767;

/// Estimates the quality factor from a luminance quantization table.
///
/// `table` and `reference` are aligned 64-entry tables in the same storage
/// order. Entries outside `0 < value < 32767` are skipped; the first three
/// informative entries are inverted through the IJG scaling formula and
/// averaged (truncating division).
///
/// A table with fewer than three informative entries is averaged over the
/// entries it has; a table with none returns 0.
pub fn estimate_quality(table: &[u16; BLOCK_SIZE], reference: &[u16; BLOCK_SIZE]) -> i32 {
    let mut sum = 0i32;
    let mut samples = 0u32;

    for (&value, &reference_value) in table.iter().zip(reference.iter()) {
        if value == 0 || value >= MAX_COEFFICIENT {
            continue;
        }

        let linear = linear_quality(value, reference_value);
        sum += linear_to_quality(linear);
        samples += 1;

        if samples == SAMPLE_TARGET {
            break;
        }
    }

    if samples == 0 {
        return 0;
    }
    sum / samples as i32
}

/// Inverts the IJG scaling formula for one coefficient, yielding the
/// "linear quality" (scaling factor in percent, rounded up).
fn linear_quality(value: u16, reference_value: u16) -> i32 {
    let scaled = i64::from(value) * 100 - 50;
    (scaled as f64 / f64::from(reference_value)).ceil() as i32
}

/// Maps a linear quality back onto the 1-100 quality scale.
///
/// The two exact cases must be checked before the range branches: 1 and 100
/// are more specific than the `> 100` and default ranges they fall inside.
fn linear_to_quality(linear: i32) -> i32 {
    match linear {
        1 => 1,
        100 => 100,
        lq if lq > 100 => (5000.0 / f64::from(lq)).ceil() as i32,
        lq => 100 - (f64::from(lq) / 2.0).ceil() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::STD_LUMINANCE_QUANT_TBL;
    use proptest::prelude::*;

    /// Forward IJG scaling: generates the standard-table variant an encoder
    /// would emit for the given quality.
    fn ijg_scaled_table(quality: u16) -> [u16; BLOCK_SIZE] {
        let scale: i64 = if quality < 50 {
            5000 / i64::from(quality)
        } else {
            200 - 2 * i64::from(quality)
        };

        let mut table = [0u16; BLOCK_SIZE];
        for (out, &reference) in table.iter_mut().zip(STD_LUMINANCE_QUANT_TBL.iter()) {
            let value = (i64::from(reference) * scale + 50) / 100;
            *out = value.clamp(1, 255) as u16;
        }
        table
    }

    #[test]
    fn test_linear_to_quality_exact_cases() {
        assert_eq!(linear_to_quality(1), 1);
        assert_eq!(linear_to_quality(100), 100);
    }

    #[test]
    fn test_linear_to_quality_high_branch() {
        // ceil(5000 / 101) = 50
        assert_eq!(linear_to_quality(101), 50);
        assert_eq!(linear_to_quality(200), 25);
        assert_eq!(linear_to_quality(5000), 1);
    }

    #[test]
    fn test_linear_to_quality_low_branch() {
        assert_eq!(linear_to_quality(2), 99);
        assert_eq!(linear_to_quality(50), 75);
        assert_eq!(linear_to_quality(99), 50);
    }

    #[test]
    fn test_identity_table_is_near_50() {
        // Ceiling arithmetic pushes the per-entry inversions of the
        // reference table itself to 97/96/95, landing the mean at 51.
        let estimate = estimate_quality(&STD_LUMINANCE_QUANT_TBL, &STD_LUMINANCE_QUANT_TBL);
        assert_eq!(estimate, 51);
        assert!((49..=52).contains(&estimate));
    }

    #[test]
    fn test_scaling_up_lowers_estimate() {
        let reference = STD_LUMINANCE_QUANT_TBL;
        let doubled = reference.map(|v| v * 2);
        let quadrupled = reference.map(|v| v * 4);

        let base = estimate_quality(&reference, &reference);
        let half = estimate_quality(&doubled, &reference);
        let quarter = estimate_quality(&quadrupled, &reference);

        assert!(base > half, "{} should exceed {}", base, half);
        assert!(half > quarter, "{} should exceed {}", half, quarter);
    }

    #[test]
    fn test_quality_ordering_across_encodes() {
        let mut previous = 0;
        for quality in [55u16, 65, 75, 85, 95] {
            let table = ijg_scaled_table(quality);
            let estimate = estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL);
            assert!(
                estimate > previous,
                "estimate for q={} ({}) not above previous ({})",
                quality,
                estimate,
                previous
            );
            previous = estimate;
        }
    }

    #[test]
    fn test_all_zero_table_returns_zero() {
        let table = [0u16; BLOCK_SIZE];
        assert_eq!(estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL), 0);
    }

    #[test]
    fn test_saturated_entries_are_skipped() {
        let mut table = [32767u16; BLOCK_SIZE];
        table[10] = STD_LUMINANCE_QUANT_TBL[10];
        table[20] = STD_LUMINANCE_QUANT_TBL[20];
        table[30] = STD_LUMINANCE_QUANT_TBL[30];
        // Only the three in-range entries contribute.
        let estimate = estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL);
        assert!((1..=100).contains(&estimate));
    }

    #[test]
    fn test_two_valid_entries_average_over_two() {
        let mut table = [0u16; BLOCK_SIZE];
        table[0] = STD_LUMINANCE_QUANT_TBL[0]; // inverts to 51
        table[1] = STD_LUMINANCE_QUANT_TBL[1]; // inverts to 52
        assert_eq!(estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL), 51);
    }

    #[test]
    fn test_single_valid_entry() {
        let mut table = [0u16; BLOCK_SIZE];
        table[0] = STD_LUMINANCE_QUANT_TBL[0];
        assert_eq!(estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL), 51);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn estimate_is_bounded_and_pure(table in proptest::array::uniform32(any::<u16>())) {
            // Widen the 32 random values over the full 64-entry table.
            let mut full = [0u16; BLOCK_SIZE];
            for (i, slot) in full.iter_mut().enumerate() {
                *slot = table[i % 32];
            }

            let first = estimate_quality(&full, &STD_LUMINANCE_QUANT_TBL);
            let second = estimate_quality(&full, &STD_LUMINANCE_QUANT_TBL);
            prop_assert_eq!(first, second);
            prop_assert!((0..=100).contains(&first));
        }

        #[test]
        fn estimate_tracks_encoded_quality(quality in 51u16..=95) {
            // Above quality 50 the forward scale is 200-2q and no entry
            // clamps, so the inversion can only overshoot by the rounding
            // lost in the forward division (bounded by 99/reference < 10
            // for the first three reference entries).
            let table = ijg_scaled_table(quality);
            let estimate = estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL);
            prop_assert!(estimate >= i32::from(quality));
            prop_assert!(estimate <= i32::from(quality) + 5);
        }
    }
}
