//! The k-mer lookup table (C6): precomputed SA intervals for every
//! `K`-mer, letting [`crate::search::backward_search`] skip the first `K`
//! backward-search steps.

use crate::alphabet::SIGMA;
use crate::error::FmIndexError;
use crate::occ::Occ;
use crate::search::SaRange;

/// A precomputed table of SA intervals for every dense-encoded `k`-mer.
///
/// `table[id]` holds the interval for the `k`-mer whose 4-ary encoding is
/// `id`, built by scanning the `k`-mer from its last symbol to its first
/// (the same order [`crate::search::backward_search`] consumes a pattern
/// in), matching the order entries are filled in during construction.
#[derive(Debug, Clone)]
pub struct LookupTable {
    depth: usize,
    entries: Vec<SaRange>,
}

impl LookupTable {
    /// Builds the table for the given depth by depth-first traversal,
    /// doing one rank step per symbol per level (`O(SIGMA^depth)` total).
    ///
    /// At `K = 12` the table holds `4^12` entries of 16 bytes each (~256
    /// MiB, per the crate's reference `K`); the allocation is attempted
    /// with [`Vec::try_reserve_exact`] so a build on a memory-constrained
    /// host reports [`FmIndexError::Build`] instead of aborting the process.
    pub fn build(occ: &Occ, depth: usize) -> Result<Self, FmIndexError> {
        let num_entries = SIGMA.pow(depth as u32);

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(num_entries)
            .map_err(|e| FmIndexError::Build {
                component: "lookup_table",
                reason: format!("failed to allocate {num_entries} SA-interval entries: {e}"),
            })?;
        entries.resize(num_entries, SaRange::EMPTY);

        let root = SaRange {
            bot: occ.c(0),
            top: occ.c(SIGMA as u8) - 1,
        };

        fill(occ, depth, 0, 0, root, &mut entries);

        Ok(LookupTable { depth, entries })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Looks up the interval for the `K`-length window formed by the next
    /// `self.depth()` symbols pulled from `query` (which must already be in
    /// backward-search order, i.e. the pattern reversed).
    pub fn lookup(&self, query: &mut impl Iterator<Item = u8>) -> SaRange {
        let mut id = 0usize;
        for _ in 0..self.depth {
            let symbol = query.next().expect("caller guarantees enough symbols");
            id = (id << 2) | symbol as usize;
        }
        self.entries[id]
    }

    pub(crate) fn from_raw(depth: usize, entries: Vec<SaRange>) -> Self {
        LookupTable { depth, entries }
    }

    pub(crate) fn entries(&self) -> &[SaRange] {
        &self.entries
    }
}

/// Caps a requested lookup-table depth so its entry count never grows
/// past what the text could possibly populate (`4^depth <= n`). Building
/// the reference `K = 12` table (16M entries) against a handful of bases
/// would otherwise allocate ~256 MiB to hold almost entirely empty
/// intervals; this keeps the table's size proportional to the text it
/// indexes, per the crate's build-time memory guidance.
pub(crate) fn clamp_depth_for_text_len(requested: usize, n: usize) -> usize {
    let mut depth = 0usize;
    let mut entries: u128 = 1;
    while depth < requested {
        entries *= SIGMA as u128;
        if entries > n as u128 {
            break;
        }
        depth += 1;
    }
    depth
}

fn fill(
    occ: &Occ,
    max_depth: usize,
    curr_depth: usize,
    curr_id: usize,
    curr_range: SaRange,
    entries: &mut [SaRange],
) {
    if curr_depth == max_depth {
        entries[curr_id] = curr_range;
        return;
    }

    for symbol in 0..SIGMA as u8 {
        let child_range = if curr_range.is_empty() {
            SaRange::EMPTY
        } else {
            crate::search::extend_front(occ, curr_range, symbol)
        };

        fill(
            occ,
            max_depth,
            curr_depth + 1,
            (curr_id << 2) | symbol as usize,
            child_range,
            entries,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::encode_symbol;
    use crate::bwt::Bwt;
    use crate::search::backward_search_without_lut;
    use crate::suffix_array::suffix_sort;

    fn build_occ(text: &[u8]) -> Occ {
        let encoded: Vec<u8> = text.iter().map(|&b| encode_symbol(b).unwrap()).collect();
        let sa = suffix_sort(&encoded);
        let bwt = Bwt::build(&encoded, &sa);
        Occ::build(&bwt)
    }

    #[test]
    fn lut_matches_plain_backward_search() {
        let occ = build_occ(b"GATGCGAGACTCGAGATG");
        let depth = 2;
        let lut = LookupTable::build(&occ, depth).unwrap();

        for a in 0..SIGMA as u8 {
            for b in 0..SIGMA as u8 {
                // k-mer "ab" (a first, b last); backward search consumes
                // the pattern in reverse, so query order is [b, a].
                let expected = backward_search_without_lut(&occ, &[a, b]);

                let mut query = [b, a].into_iter();
                let got = lut.lookup(&mut query);

                assert_eq!(got, expected, "kmer ({a},{b})");
            }
        }
    }

    #[test]
    fn depth_zero_is_full_interval() {
        let occ = build_occ(b"ACGT");
        let lut = LookupTable::build(&occ, 0).unwrap();
        let mut empty = std::iter::empty();
        let range = lut.lookup(&mut empty);
        assert_eq!(range.bot, occ.c(0));
        assert_eq!(range.top, occ.c(SIGMA as u8) - 1);
    }
}
