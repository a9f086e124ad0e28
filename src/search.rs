//! Backward search (part of C7): the inclusive SA-interval primitive that
//! [`crate::index::FmIndex`] and [`crate::cursor::Cursor`] build on.

use crate::alphabet::SIGMA;
use crate::lookup_table::LookupTable;
use crate::occ::Occ;

/// An inclusive SA interval `[bot, top]`.
///
/// Emptiness is `top < bot`, canonically represented as `(0, 0)`, per the
/// crate's resolved interval convention (see the crate documentation's
/// discussion of the original, inconsistent reference implementation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaRange {
    pub bot: u64,
    pub top: u64,
}

impl SaRange {
    pub const EMPTY: SaRange = SaRange { bot: 0, top: 0 };

    pub fn is_empty(&self) -> bool {
        self.top < self.bot
    }

    /// Number of SA rows in the interval, `0` if empty.
    pub fn count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.top - self.bot + 1
        }
    }
}

/// One backward-search step: narrows `range` by prepending `symbol`.
pub fn extend_front(occ: &Occ, range: SaRange, symbol: u8) -> SaRange {
    if range.is_empty() {
        return SaRange::EMPTY;
    }

    // `range.bot` is always >= 1 here: every reachable range is a subset of
    // the initial `[C[0], C[SIGMA]-1] = [1, n-1]`, so `bot - 1` never goes
    // negative and the `rank(c, -1) = C[c]` convention is never needed on
    // this path (it still matters for `Occ::rank` itself, see its tests).
    let bot = occ.rank(symbol, Some((range.bot - 1) as usize));
    let top = occ.rank(symbol, Some(range.top as usize)) - 1;

    let candidate = SaRange { bot, top };
    if candidate.is_empty() {
        SaRange::EMPTY
    } else {
        candidate
    }
}

/// Full backward search over dense-encoded `pattern`, without the lookup
/// table. Pattern is scanned right-to-left, per the crate's backward-search
/// convention (the empty pattern returns the full interval `[1, n-1]`).
pub fn backward_search_without_lut(occ: &Occ, pattern: &[u8]) -> SaRange {
    let mut range = SaRange {
        bot: occ.c(0),
        top: occ.c(SIGMA as u8) - 1,
    };

    for &symbol in pattern.iter().rev() {
        range = extend_front(occ, range, symbol);
        if range.is_empty() {
            break;
        }
    }

    range
}

/// Full backward search using a lookup table to short-circuit the last
/// `lut.depth()` steps when `pattern.len() >= lut.depth()`.
pub fn backward_search(occ: &Occ, lut: Option<&LookupTable>, pattern: &[u8]) -> SaRange {
    let Some(lut) = lut.filter(|lut| pattern.len() >= lut.depth()) else {
        return backward_search_without_lut(occ, pattern);
    };

    let mut reversed = pattern.iter().rev().copied();
    let mut range = lut.lookup(&mut reversed);

    for symbol in reversed {
        if range.is_empty() {
            break;
        }
        range = extend_front(occ, range, symbol);
    }

    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::encode_symbol;
    use crate::bwt::Bwt;
    use crate::suffix_array::suffix_sort;

    fn build_occ(text: &[u8]) -> Occ {
        let encoded: Vec<u8> = text.iter().map(|&b| encode_symbol(b).unwrap()).collect();
        let sa = suffix_sort(&encoded);
        let bwt = Bwt::build(&encoded, &sa);
        Occ::build(&bwt)
    }

    fn encode(pattern: &[u8]) -> Vec<u8> {
        pattern.iter().map(|&b| encode_symbol(b).unwrap()).collect()
    }

    #[test]
    fn empty_pattern_is_full_interval() {
        let occ = build_occ(b"GATTACA");
        let range = backward_search_without_lut(&occ, &[]);
        assert_eq!(range.bot, 1);
        assert_eq!(range.top, occ.c(SIGMA as u8) - 1);
        assert_eq!(range.count(), 8);
    }

    #[test]
    fn single_symbol_matches_c_window() {
        let occ = build_occ(b"GATTACA");
        for c in 0..SIGMA as u8 {
            let range = backward_search_without_lut(&occ, &[c]);
            assert_eq!(range.bot, occ.c(c));
            if !range.is_empty() {
                assert_eq!(range.top, occ.c(c + 1) - 1);
            }
        }
    }

    #[test]
    fn pattern_longer_than_text_is_empty() {
        let occ = build_occ(b"GATTACA");
        let pattern = encode(b"GATTACAGATTACA");
        assert!(backward_search_without_lut(&occ, &pattern).is_empty());
    }

    #[test]
    fn scenario_gaga() {
        let occ = build_occ(b"GATGCGAGACTCGAGATG");
        let pattern = encode(b"GAGA");
        let range = backward_search_without_lut(&occ, &pattern);
        assert_eq!(range.count(), 2);
    }
}
