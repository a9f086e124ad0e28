//! The Occ table (C4): rank support over the BWT.
//!
//! This is the hottest code in the index. Each [`Block`] is exactly 8
//! bytes, so a single aligned load retrieves both the sampled count and
//! the bitmap on one cache-line miss. The four per-symbol arrays are
//! stored back-to-back (`rows[symbol * nblocks + block_index]`), matching
//! the layout documented in the crate's data model.

use crate::alphabet::SIGMA;
use crate::bwt::Bwt;

const BLOCK_WIDTH: usize = 32;

/// One 8-byte Occ block: a sampled count plus a 32-bit occurrence bitmap.
///
/// `smpl` holds the number of occurrences of this block's symbol strictly
/// before the block starts. Bit `31 - (p mod 32)` of `bits` is set iff the
/// BWT holds the symbol at position `p` (and `p` is not the sentinel row).
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub smpl: u32,
    pub bits: u32,
}

/// Rank support plus the `C` prefix-sum vector over a built [`Bwt`].
#[derive(Debug, Clone)]
pub struct Occ {
    nblocks: usize,
    /// `SIGMA` arrays of `nblocks` blocks each, concatenated.
    rows: Vec<Block>,
    c: [u64; SIGMA + 1],
}

impl Occ {
    /// Builds the Occ table and C vector in one pass over the BWT.
    pub fn build(bwt: &Bwt) -> Self {
        let n = bwt.len();
        let nblocks = n.div_ceil(BLOCK_WIDTH);

        let mut rows = vec![Block { smpl: 0, bits: 0 }; SIGMA * nblocks];

        let mut running = [0u32; SIGMA];
        let mut block_bits = [0u32; SIGMA];

        for pos in 0..n {
            if pos != bwt.zero() {
                let symbol = bwt.symbol_at(pos) as usize;
                block_bits[symbol] |= 1 << (31 - (pos % BLOCK_WIDTH));
            }

            if pos % BLOCK_WIDTH == BLOCK_WIDTH - 1 || pos == n - 1 {
                let block_index = pos / BLOCK_WIDTH;
                for symbol in 0..SIGMA {
                    rows[symbol * nblocks + block_index] = Block {
                        smpl: running[symbol],
                        bits: block_bits[symbol],
                    };
                    running[symbol] += block_bits[symbol].count_ones();
                    block_bits[symbol] = 0;
                }
            }
        }

        let mut c = [0u64; SIGMA + 1];
        c[0] = 1;
        for symbol in 0..SIGMA {
            c[symbol + 1] = c[symbol] + running[symbol] as u64;
        }

        Occ { nblocks, rows, c }
    }

    pub fn c(&self, symbol: u8) -> u64 {
        self.c[symbol as usize]
    }

    pub fn c_vector(&self) -> &[u64; SIGMA + 1] {
        &self.c
    }

    pub fn nblocks(&self) -> usize {
        self.nblocks
    }

    pub fn rows(&self) -> &[Block] {
        &self.rows
    }

    /// `rank(c, p)`: `C[c]` plus the occurrences of `c` in `B[0..=p]`,
    /// sentinel excluded. `p = -1` (passed as `None`) returns `C[c]`.
    pub fn rank(&self, symbol: u8, pos: Option<usize>) -> u64 {
        let Some(pos) = pos else {
            return self.c(symbol);
        };

        let block = self.rows[symbol as usize * self.nblocks + pos / BLOCK_WIDTH];
        let shift = 31 - (pos % BLOCK_WIDTH);
        let masked = block.bits >> shift;

        self.c(symbol) + block.smpl as u64 + masked.count_ones() as u64
    }

    pub(crate) fn from_raw(nblocks: usize, rows: Vec<Block>, c: [u64; SIGMA + 1]) -> Self {
        Occ { nblocks, rows, c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::encode_symbol;
    use crate::suffix_array::suffix_sort;

    fn naive_rank(bwt: &Bwt, symbol: u8, pos: Option<usize>) -> u64 {
        let Some(pos) = pos else {
            // Matches Occ::rank's p = -1 convention: C[symbol].
            return compute_c(bwt)[symbol as usize];
        };

        let mut count = 0u64;
        for i in 0..=pos {
            if i != bwt.zero() && bwt.symbol_at(i) == symbol {
                count += 1;
            }
        }
        compute_c(bwt)[symbol as usize] + count
    }

    fn compute_c(bwt: &Bwt) -> [u64; SIGMA + 1] {
        crate::bwt::compute_c_vector(bwt)
    }

    fn index_for(text: &[u8]) -> (Bwt, Occ) {
        let encoded: Vec<u8> = text.iter().map(|&b| encode_symbol(b).unwrap()).collect();
        let sa = suffix_sort(&encoded);
        let bwt = Bwt::build(&encoded, &sa);
        let occ = Occ::build(&bwt);
        (bwt, occ)
    }

    #[test]
    fn rank_matches_naive_count() {
        let (bwt, occ) = index_for(b"GATGCGAGACTCGAGATG");

        for symbol in 0..SIGMA as u8 {
            assert_eq!(occ.rank(symbol, None), naive_rank(&bwt, symbol, None));
            for pos in 0..bwt.len() {
                assert_eq!(
                    occ.rank(symbol, Some(pos)),
                    naive_rank(&bwt, symbol, Some(pos)),
                    "symbol {symbol} pos {pos}"
                );
            }
        }
    }

    #[test]
    fn c_completeness() {
        let (bwt, occ) = index_for(b"ACGTACGT");
        assert_eq!(occ.c_vector()[SIGMA], bwt.len() as u64);
        assert_eq!(occ.c(0), 1);
    }

    #[test]
    fn rank_monotone_and_sums_to_position() {
        let (bwt, occ) = index_for(b"AAAA");
        let n = bwt.len();

        for pos in 0..n {
            let sum: u64 = (0..SIGMA as u8)
                .map(|c| occ.rank(c, Some(pos)) - occ.c(c))
                .sum();
            let expected = (pos + 1) as u64 - if pos >= bwt.zero() { 1 } else { 0 };
            assert_eq!(sum, expected);
        }
    }

    proptest::proptest! {
        #[test]
        fn random_text_rank_matches_naive(symbols in proptest::collection::vec(0u8..4, 0..300)) {
            let sa = suffix_sort(&symbols);
            let bwt = Bwt::build(&symbols, &sa);
            let occ = Occ::build(&bwt);

            for symbol in 0..SIGMA as u8 {
                for pos in 0..bwt.len() {
                    assert_eq!(occ.rank(symbol, Some(pos)), naive_rank(&bwt, symbol, Some(pos)));
                }
            }
        }
    }
}
