//! Build-time configuration for [`crate::index::FmIndex`].

use crate::csa::SAMPLING_RATE;
use crate::error::FmIndexError;
use crate::index::FmIndex;

/// A builder-like API to configure and construct the FM-Index.
#[derive(Debug, Clone, Copy)]
pub struct FmIndexConfig {
    pub(crate) suffix_array_sampling_rate: usize,
    pub(crate) lookup_table_depth: usize,
    pub(crate) build_lookup_table: bool,
}

impl FmIndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every suffix-array entry at a position divisible by this rate is
    /// retained for [`locate`](FmIndex::locate_all). A larger rate uses
    /// less memory at the cost of a longer LF-mapping walk. The default
    /// matches the crate's fixed sampling period of 16.
    pub fn suffix_array_sampling_rate(mut self, rate: usize) -> Self {
        assert!(rate > 0, "sampling rate must be positive");
        self.suffix_array_sampling_rate = rate;
        self
    }

    /// Depth `K` of the k-mer lookup table, in `[0, 16]` (the table has
    /// `4^K` entries, so depths beyond the high teens are impractical).
    /// The default is 12, a reasonable tradeoff for mammalian-scale genomes.
    /// Whatever depth is requested here is clamped at build time to what
    /// the text can actually populate, so building over a short text never
    /// allocates a table sized for a whole genome.
    pub fn lookup_table_depth(mut self, depth: usize) -> Self {
        self.lookup_table_depth = depth;
        self
    }

    /// Skips lookup-table construction entirely, e.g. for small texts
    /// where the table's O(1)-per-entry build cost outweighs the search
    /// speedup. Overrides [`lookup_table_depth`](Self::lookup_table_depth).
    pub fn skip_lookup_table(mut self) -> Self {
        self.build_lookup_table = false;
        self
    }

    /// Constructs the FM-Index over `text`, an upper-case `{A,C,G,T}`
    /// sequence. The sentinel is appended internally.
    pub fn build(self, text: &[u8]) -> Result<FmIndex, FmIndexError> {
        FmIndex::build_with_config(text, self)
    }
}

impl Default for FmIndexConfig {
    fn default() -> Self {
        Self {
            suffix_array_sampling_rate: SAMPLING_RATE,
            lookup_table_depth: 12,
            build_lookup_table: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_config() {
        let _index = FmIndexConfig::new()
            .lookup_table_depth(3)
            .suffix_array_sampling_rate(8)
            .build(b"ACGTACGT")
            .unwrap();
    }

    #[test]
    fn skip_lookup_table_still_searches_correctly() {
        let index = FmIndexConfig::new()
            .skip_lookup_table()
            .build(b"GATGCGAGACTCGAGATG")
            .unwrap();

        assert_eq!(index.count(b"GAGA").unwrap(), 2);
    }
}
