//! Nucleotide complement utilities
//!
//! Complementing goes through a 256-entry lookup table. Only the eight
//! canonical bases (`A`, `C`, `G`, `T` in either case) are substituted; every
//! other symbol, including `N` and the `*` placeholder, maps onto itself.

/// Lookup table mapping each byte to its Watson-Crick complement
const COMPLEMENT: [u8; 256] = build_complement_table();

const fn build_complement_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < table.len() {
        table[i] = i as u8;
        i += 1;
    }
    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'G' as usize] = b'C';
    table[b'C' as usize] = b'G';
    table[b'a' as usize] = b't';
    table[b't' as usize] = b'a';
    table[b'g' as usize] = b'c';
    table[b'c' as usize] = b'g';
    table
}

/// Returns the complement of a single base
///
/// # Example
///
/// ```
/// use bam2pe::nuc;
///
/// assert_eq!(nuc::complement(b'A'), b'T');
/// assert_eq!(nuc::complement(b'g'), b'c');
/// assert_eq!(nuc::complement(b'N'), b'N');
/// ```
#[inline]
#[must_use]
pub fn complement(base: u8) -> u8 {
    COMPLEMENT[base as usize]
}

/// Complements every base of a sequence in place
pub fn complement_in_place(seq: &mut [u8]) {
    for base in seq.iter_mut() {
        *base = complement(*base);
    }
}

/// Reverses a sequence and complements every base, in place
///
/// # Example
///
/// ```
/// use bam2pe::nuc;
///
/// let mut seq = b"AACG".to_vec();
/// nuc::reverse_complement_in_place(&mut seq);
/// assert_eq!(seq, b"CGTT");
/// ```
pub fn reverse_complement_in_place(seq: &mut [u8]) {
    seq.reverse();
    complement_in_place(seq);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_canonical_bases() {
        for (base, expected) in [
            (b'A', b'T'),
            (b'T', b'A'),
            (b'G', b'C'),
            (b'C', b'G'),
            (b'a', b't'),
            (b't', b'a'),
            (b'g', b'c'),
            (b'c', b'g'),
        ] {
            assert_eq!(complement(base), expected);
        }
    }

    #[test]
    fn test_complement_is_involution() {
        for byte in 0..=u8::MAX {
            assert_eq!(complement(complement(byte)), byte);
        }
    }

    #[test]
    fn test_complement_passthrough() {
        for base in [b'N', b'n', b'*', b'U', b'R', b'-', b'.'] {
            assert_eq!(complement(base), base);
        }
    }

    #[test]
    fn test_reverse_complement_mixed_case() {
        let mut seq = b"AcGtN".to_vec();
        reverse_complement_in_place(&mut seq);
        assert_eq!(seq, b"NaCgT");
    }

    #[test]
    fn test_reverse_complement_empty() {
        let mut seq: Vec<u8> = Vec::new();
        reverse_complement_in_place(&mut seq);
        assert!(seq.is_empty());
    }
}
