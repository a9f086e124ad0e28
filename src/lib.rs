/*! An FM-index over the fixed 4-symbol DNA alphabet {A,C,G,T}.
 *
 * The index supports exact substring counting and locating in time
 * proportional to query length, independent of genome size, following the
 * backward-search algorithm of the [original paper]. It is built once from
 * a normalized text and answers queries read-only afterward; see
 * [`FmIndex`] for the query API and [`FmIndexConfig`] for build-time
 * tuning.
 *
 * ## Usage
 *
 * ```
 * use dna_fmindex::FmIndex;
 *
 * let index = FmIndex::build(b"GATGCGAGACTCGAGATG").unwrap();
 *
 * assert_eq!(index.count(b"GAGA").unwrap(), 2);
 *
 * let mut positions = index.locate_all(b"GAGA").unwrap();
 * positions.sort_unstable();
 * assert_eq!(positions, vec![5, 12]);
 * ```
 *
 * More on the flexible [cursor](Cursor) API and build [configuration](FmIndexConfig)
 * can be found in the module-level and struct-level documentation.
 *
 * [original paper]: https://doi.org/10.1109/SFCS.2000.892127
 */

pub mod alphabet;
mod bwt;
mod config;
mod csa;
mod cursor;
mod error;
mod index;
mod lookup_table;
mod occ;
mod search;
mod suffix_array;

#[doc(inline)]
pub use config::FmIndexConfig;
#[doc(inline)]
pub use cursor::Cursor;
#[doc(inline)]
pub use error::FmIndexError;
#[doc(inline)]
pub use index::FmIndex;
#[doc(inline)]
pub use search::SaRange;
