//! The suffix-array oracle (C2 in the crate's component breakdown).
//!
//! Suffix-array construction is treated as an external dependency: any
//! correct algorithm (a DC3 or SA-IS variant, for instance) can stand in
//! for it. This module ships a straightforward reference implementation
//! based on comparison sort, sufficient to drive and test the rest of the
//! pipeline. It is deliberately not the asymptotically optimal linear-time
//! construction real genome-scale use would call for.

/// Builds the suffix array of `encoded` (dense `0..SIGMA` symbols, sentinel
/// implicit) by sorting suffixes directly.
///
/// Returns a permutation of `[0, encoded.len() + 1)`. The implicit sentinel
/// is treated as sorting before every symbol by representing its suffix as
/// the empty slice, which Rust's slice ordering already ranks below any
/// non-empty slice that starts the same way.
pub fn suffix_sort(encoded: &[u8]) -> Vec<usize> {
    let n = encoded.len() + 1;
    let mut sa: Vec<usize> = (0..n).collect();

    sa.sort_unstable_by(|&a, &b| suffix_at(encoded, a).cmp(suffix_at(encoded, b)));

    sa
}

fn suffix_at(encoded: &[u8], pos: usize) -> &[u8] {
    if pos == encoded.len() {
        &[]
    } else {
        &encoded[pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_is_sorted_permutation(encoded: &[u8], sa: &[usize]) -> bool {
        let n = encoded.len() + 1;

        let mut seen = vec![false; n];
        for &idx in sa {
            if idx >= n || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }

        sa.windows(2)
            .all(|w| suffix_at(encoded, w[0]) < suffix_at(encoded, w[1]))
    }

    #[test]
    fn sentinel_sorts_first() {
        let encoded = [0u8, 1, 2, 3]; // "ACGT"
        let sa = suffix_sort(&encoded);
        assert_eq!(sa[0], encoded.len());
    }

    #[test]
    fn matches_known_example() {
        // T = "GATGCGAGACTCGAGATG" dense-encoded.
        let text = b"GATGCGAGACTCGAGATG";
        let encoded: Vec<u8> = text
            .iter()
            .map(|&b| crate::alphabet::encode_symbol(b).unwrap())
            .collect();

        let sa = suffix_sort(&encoded);
        assert!(naive_is_sorted_permutation(&encoded, &sa));
        assert_eq!(sa[0], encoded.len());
        assert_eq!(sa.len(), encoded.len() + 1);
    }

    proptest::proptest! {
        #[test]
        fn random_text_gives_sorted_permutation(
            symbols in proptest::collection::vec(0u8..4, 0..200)
        ) {
            let sa = suffix_sort(&symbols);
            assert!(naive_is_sorted_permutation(&symbols, &sa));
        }
    }
}
