use dna_fmindex::{FmIndex, FmIndexConfig};

fn main() {
    // This example shows how to use the FM-Index in a basic way.

    let text = b"GATGCGAGACTCGAGATG";

    let index = FmIndexConfig::new()
        .suffix_array_sampling_rate(4)
        .lookup_table_depth(2)
        .build(text)
        .expect("text is valid {A,C,G,T}");

    let query = b"GAGA";
    assert_eq!(index.count(query).unwrap(), 2);

    let mut positions = index.locate_all(query).unwrap();
    positions.sort_unstable();
    for position in positions {
        println!("Found {query:?} at position {position}.");
    }

    // The zero-size query matches everywhere.
    assert_eq!(index.count(b"").unwrap(), text.len());
}
