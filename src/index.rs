//! The query engine (C7): the public `FmIndex` type built from C3–C6, plus
//! the persisted on-disk format described in the crate documentation.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::alphabet::{self, SIGMA};
use crate::bwt::Bwt;
use crate::config::FmIndexConfig;
use crate::csa::{self, Csa};
use crate::cursor::Cursor;
use crate::error::FmIndexError;
use crate::lookup_table::{self, LookupTable};
use crate::occ::{Block, Occ};
use crate::search::{self, SaRange};
use crate::suffix_array::suffix_sort;

/// A built, immutable FM-index over one DNA text.
///
/// Construct with [`FmIndex::build`] (default configuration) or
/// [`FmIndexConfig::build`] for control over the sampled-SA rate and
/// lookup-table depth. Once built the index only answers queries; there is
/// no mutation API, matching the crate's "build-once, query-many" scope.
#[derive(Debug, Clone)]
pub struct FmIndex {
    bwt: Bwt,
    occ: Occ,
    csa: Csa,
    lookup_table: Option<LookupTable>,
}

impl FmIndex {
    /// Builds an index over `text` (upper- or lower-case `{A,C,G,T}`) using
    /// the default [`FmIndexConfig`].
    pub fn build(text: &[u8]) -> Result<Self, FmIndexError> {
        FmIndexConfig::default().build(text)
    }

    #[instrument(skip(text, config), fields(text_len = text.len()))]
    pub(crate) fn build_with_config(
        text: &[u8],
        config: FmIndexConfig,
    ) -> Result<Self, FmIndexError> {
        let encoded = alphabet::encode_text(text)?;

        debug!("constructing suffix array");
        let sa = suffix_sort(&encoded);

        debug!("constructing BWT");
        let bwt = Bwt::build(&encoded, &sa);

        debug!("constructing Occ table");
        let occ = Occ::build(&bwt);

        debug!("constructing sampled suffix array");
        let csa = Csa::build(&sa, config.suffix_array_sampling_rate);
        drop(sa);

        let lookup_table = if config.build_lookup_table {
            let depth = lookup_table::clamp_depth_for_text_len(
                config.lookup_table_depth,
                bwt.len(),
            );
            debug!(
                requested_depth = config.lookup_table_depth,
                depth, "constructing lookup table"
            );
            Some(LookupTable::build(&occ, depth)?)
        } else {
            None
        };

        info!(n = bwt.len(), "index built");
        Ok(FmIndex {
            bwt,
            occ,
            csa,
            lookup_table,
        })
    }

    pub(crate) fn occ(&self) -> &Occ {
        &self.occ
    }

    /// Length of the indexed text, including the sentinel.
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    /// Returns the number of occurrences of `pattern` in the indexed text.
    pub fn count(&self, pattern: &[u8]) -> Result<usize, FmIndexError> {
        let range = self.search(pattern)?;
        Ok(range.count() as usize)
    }

    /// Returns every text position where `pattern` occurs, in ascending
    /// suffix-array order (per the crate's ordering guarantee).
    pub fn locate_all(&self, pattern: &[u8]) -> Result<Vec<usize>, FmIndexError> {
        let range = self.search(pattern)?;
        Ok(self.locate_range(range))
    }

    /// Returns the inclusive suffix-array interval `[bot, top]` matching
    /// `pattern`, without locating the occurrences it covers. Pairs with
    /// [`FmIndex::locate_range`] for callers that want to report the
    /// interval itself alongside (or instead of) the located positions.
    pub fn search_range(&self, pattern: &[u8]) -> Result<SaRange, FmIndexError> {
        self.search(pattern)
    }

    fn search(&self, pattern: &[u8]) -> Result<SaRange, FmIndexError> {
        let encoded = alphabet::encode_query(pattern)?;
        Ok(search::backward_search(
            &self.occ,
            self.lookup_table.as_ref(),
            &encoded,
        ))
    }

    /// Locates every occurrence covered by a previously obtained
    /// [`SaRange`] (e.g. from [`FmIndex::search_range`] or [`Cursor`]).
    pub fn locate_range(&self, range: SaRange) -> Vec<usize> {
        if range.is_empty() {
            return Vec::new();
        }
        (range.bot..=range.top)
            .map(|i| csa::locate(&self.csa, &self.bwt, &self.occ, i as usize))
            .collect()
    }

    /// A cursor positioned at the full SA interval `[1, n-1]`, ready for
    /// incremental backward search one symbol at a time.
    pub fn cursor_empty(&self) -> Cursor<'_> {
        let range = SaRange {
            bot: self.occ.c(0),
            top: self.occ.c(SIGMA as u8) - 1,
        };
        Cursor::new(self, range)
    }

    /// A cursor already positioned at `pattern`'s SA interval.
    pub fn cursor_for_query(&self, pattern: &[u8]) -> Result<Cursor<'_>, FmIndexError> {
        let range = self.search(pattern)?;
        Ok(Cursor::new(self, range))
    }

    /// Persists the index as three sibling files: `{prefix}.bwt`,
    /// `{prefix}.occ`, `{prefix}.sa`. Each is written to a temporary path
    /// first and renamed into place, so a crash mid-write never leaves a
    /// partially-written file at the final path.
    pub fn save(&self, prefix: impl AsRef<Path>) -> Result<(), FmIndexError> {
        let prefix = prefix.as_ref();
        write_atomic(&with_ext(prefix, "bwt"), |w| self.write_bwt(w))?;
        write_atomic(&with_ext(prefix, "occ"), |w| self.write_occ(w))?;
        write_atomic(&with_ext(prefix, "sa"), |w| self.write_sa(w))?;
        Ok(())
    }

    /// Loads an index previously written by [`FmIndex::save`].
    pub fn load(prefix: impl AsRef<Path>) -> Result<Self, FmIndexError> {
        let prefix = prefix.as_ref();
        let bwt = read_bwt(&with_ext(prefix, "bwt"))?;
        let occ = read_occ(&with_ext(prefix, "occ"))?;
        let csa = read_sa(&with_ext(prefix, "sa"))?;

        if occ.c_vector()[SIGMA] != bwt.len() as u64 {
            return Err(FmIndexError::CorruptFile(
                "C[SIGMA] does not match BWT length".into(),
            ));
        }

        Ok(FmIndex {
            bwt,
            occ,
            csa,
            lookup_table: None,
        })
    }

    fn write_bwt(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_all(&(self.bwt.len() as u64).to_le_bytes())?;
        w.write_all(&(self.bwt.nslots() as u64).to_le_bytes())?;
        w.write_all(&(self.bwt.zero() as u64).to_le_bytes())?;
        w.write_all(self.bwt.slots())
    }

    fn write_occ(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_all(&(self.bwt.len() as u64).to_le_bytes())?;
        w.write_all(&(self.occ.nblocks() as u64).to_le_bytes())?;
        for &c in self.occ.c_vector() {
            w.write_all(&c.to_le_bytes())?;
        }
        for block in self.occ.rows() {
            w.write_all(&block.smpl.to_le_bytes())?;
            w.write_all(&block.bits.to_le_bytes())?;
        }
        Ok(())
    }

    fn write_sa(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_all(&(self.bwt.len() as u64).to_le_bytes())?;
        w.write_all(&(self.csa.words().len() as u64).to_le_bytes())?;
        w.write_all(&(self.csa.nbits() as u64).to_le_bytes())?;
        w.write_all(&(self.csa.rate() as u64).to_le_bytes())?;
        for &word in self.csa.words() {
            w.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }
}

fn with_ext(prefix: &Path, ext: &str) -> std::path::PathBuf {
    prefix.with_extension(ext)
}

fn write_atomic(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<(), FmIndexError> {
    let tmp_path = path.with_extension(format!(
        "{}.tmp",
        path.extension().and_then(|e| e.to_str()).unwrap_or("out")
    ));

    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        body(&mut writer)?;
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn read_u64(r: &mut impl Read) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_bwt(path: &Path) -> Result<Bwt, FmIndexError> {
    let mut r = BufReader::new(File::open(path)?);
    let n = read_u64(&mut r)? as usize;
    let nslots = read_u64(&mut r)? as usize;
    let zero = read_u64(&mut r)? as usize;

    if zero >= n {
        return Err(FmIndexError::CorruptFile(format!(
            "zero ({zero}) >= n ({n})"
        )));
    }
    if nslots != n.div_ceil(4) {
        return Err(FmIndexError::CorruptFile(format!(
            "nslots ({nslots}) inconsistent with n ({n})"
        )));
    }

    let mut slots = vec![0u8; nslots];
    r.read_exact(&mut slots)?;

    Ok(Bwt::from_raw(n, zero, slots))
}

fn read_occ(path: &Path) -> Result<Occ, FmIndexError> {
    let mut r = BufReader::new(File::open(path)?);
    let n = read_u64(&mut r)? as usize;
    let nblocks = read_u64(&mut r)? as usize;

    if nblocks != n.div_ceil(32) {
        return Err(FmIndexError::CorruptFile(format!(
            "nblocks ({nblocks}) inconsistent with n ({n})"
        )));
    }

    let mut c = [0u64; SIGMA + 1];
    for slot in c.iter_mut() {
        *slot = read_u64(&mut r)?;
    }
    if c.windows(2).any(|w| w[0] > w[1]) {
        return Err(FmIndexError::CorruptFile("C vector is not monotone".into()));
    }
    if c[SIGMA] != n as u64 {
        return Err(FmIndexError::CorruptFile(
            "C[SIGMA] does not match n".into(),
        ));
    }

    let mut rows = Vec::with_capacity(SIGMA * nblocks);
    for _ in 0..SIGMA * nblocks {
        let mut smpl_buf = [0u8; 4];
        let mut bits_buf = [0u8; 4];
        r.read_exact(&mut smpl_buf)?;
        r.read_exact(&mut bits_buf)?;
        rows.push(Block {
            smpl: u32::from_le_bytes(smpl_buf),
            bits: u32::from_le_bytes(bits_buf),
        });
    }

    Ok(Occ::from_raw(nblocks, rows, c))
}

fn read_sa(path: &Path) -> Result<Csa, FmIndexError> {
    let mut r = BufReader::new(File::open(path)?);
    let n = read_u64(&mut r)? as usize;
    let nwords = read_u64(&mut r)? as usize;
    let nbits = read_u64(&mut r)? as usize;
    let rate = read_u64(&mut r)? as usize;

    if nbits != crate::csa::bits_needed(n) {
        return Err(FmIndexError::CorruptFile(format!(
            "nbits ({nbits}) inconsistent with n ({n})"
        )));
    }

    let nsamples = n.div_ceil(rate.max(1));
    let expected_words = (nsamples * nbits).div_ceil(64).max(1);
    if nwords != expected_words {
        return Err(FmIndexError::CorruptFile(format!(
            "nwords ({nwords}) inconsistent with n ({n}), nbits ({nbits}), rate ({rate})"
        )));
    }

    let mut words = Vec::with_capacity(nwords);
    for _ in 0..nwords {
        words.push(read_u64(&mut r)?);
    }

    Ok(Csa::from_raw(rate, nbits, nsamples, words))
}
