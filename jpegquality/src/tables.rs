//! JPEG constant tables used for quality estimation.
//!
//! Values match the IJG reference implementation (jcparam.c); the zig-zag
//! order matches the coefficient ordering of a DQT segment payload.

/// A DCT block is 8x8.
pub const BLOCK_SIZE: usize = 64;

/// IJG baseline (quality 50) luminance quantization table, natural order
/// (left to right, top to bottom).
pub const STD_LUMINANCE_QUANT_TBL: [u16; BLOCK_SIZE] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// `ZIGZAG_ORDER[i]` is the natural-order position of the i'th coefficient
/// of a DQT payload (which is stored in zig-zag order).
pub const ZIGZAG_ORDER: [usize; BLOCK_SIZE] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_is_a_permutation() {
        let mut seen = [false; BLOCK_SIZE];
        for &pos in &ZIGZAG_ORDER {
            assert!(pos < BLOCK_SIZE);
            assert!(!seen[pos], "position {} mapped twice", pos);
            seen[pos] = true;
        }
    }

    #[test]
    fn test_std_luminance_anchor_values() {
        assert_eq!(STD_LUMINANCE_QUANT_TBL[0], 16);
        assert_eq!(STD_LUMINANCE_QUANT_TBL[1], 11);
        assert_eq!(STD_LUMINANCE_QUANT_TBL[2], 10);
        assert_eq!(STD_LUMINANCE_QUANT_TBL[63], 99);
    }
}
