//! A cursor over the index, for incremental backward search.

use crate::alphabet::encode_query;
use crate::error::FmIndexError;
use crate::index::FmIndex;
use crate::search::{SaRange, extend_front};

/// A cursor to the FM-Index.
///
/// The cursor API allows more flexible search procedures than
/// [`FmIndex::count`]/[`FmIndex::locate_all`]: it implicitly maintains a
/// currently searched query, and symbols can be added to its front one at a
/// time. At any point, the number of occurrences of the currently searched
/// query can be retrieved cheaply, and occurrences can be located.
/// Repeatedly calling [`extend_query_front`](Cursor::extend_query_front)
/// corresponds to a typical backward search.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    pub(crate) index: &'a FmIndex,
    pub(crate) range: SaRange,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(index: &'a FmIndex, range: SaRange) -> Self {
        Cursor { index, range }
    }

    /// Extends the currently searched query at the front by one symbol.
    ///
    /// Running time is O(1).
    pub fn extend_query_front(&mut self, symbol: u8) -> Result<(), FmIndexError> {
        let dense = crate::alphabet::encode_symbol(symbol).ok_or_else(|| {
            FmIndexError::MalformedQuery(format!("byte {symbol:#04x} is not in {{A,C,G,T}}"))
        })?;

        self.range = extend_front(self.index.occ(), self.range, dense);
        Ok(())
    }

    /// Extends the query by every symbol of `pattern`, in the same order a
    /// plain backward search over `pattern` would.
    pub fn extend_query_front_with(&mut self, pattern: &[u8]) -> Result<(), FmIndexError> {
        let dense = encode_query(pattern)?;
        for &symbol in dense.iter().rev() {
            self.range = extend_front(self.index.occ(), self.range, symbol);
            if self.range.is_empty() {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn range(&self) -> SaRange {
        self.range
    }

    /// Number of occurrences of the currently searched query. Running time is O(1).
    pub fn count(&self) -> usize {
        self.range.count() as usize
    }

    /// Locates every occurrence of the currently searched query, in
    /// ascending SA order.
    pub fn locate(&self) -> Vec<usize> {
        self.index.locate_range(self.range)
    }
}

#[cfg(test)]
mod tests {
    use crate::index::FmIndex;

    #[test]
    fn cursor_matches_direct_count() {
        let index = FmIndex::build(b"GATGCGAGACTCGAGATG").unwrap();

        let mut cursor = index.cursor_empty();
        cursor.extend_query_front(b'A').unwrap();
        cursor.extend_query_front(b'G').unwrap();
        cursor.extend_query_front(b'A').unwrap();
        cursor.extend_query_front(b'G').unwrap();

        assert_eq!(cursor.count(), index.count(b"GAGA").unwrap());
    }

    #[test]
    fn cursor_rejects_non_dna_symbol() {
        let index = FmIndex::build(b"ACGT").unwrap();
        let mut cursor = index.cursor_empty();
        assert!(cursor.extend_query_front(b'N').is_err());
    }
}
