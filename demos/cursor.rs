use dna_fmindex::FmIndex;

fn main() {
    // This example showcases the flexible cursor API.

    let index = FmIndex::build(b"GTGTGTACGTGT").expect("text is valid {A,C,G,T}");

    // We obtain a cursor that points to the index. The cursor maintains a
    // currently searched query. Symbols can iteratively be added to the front.
    let mut cursor = index.cursor_for_query(b"GT").unwrap();

    // There are too many occurrences for our taste.
    assert_eq!(cursor.count(), 5);

    // So we extend the currently searched query by a symbol at the front.
    cursor.extend_query_front(b'C').unwrap();

    // That's better!
    assert_eq!(cursor.count(), 1);

    for position in cursor.locate() {
        println!("Found the query at position {position}.");
    }
}
