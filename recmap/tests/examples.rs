//! Runs the walkthroughs in `recmap::examples`; each one asserts its own results.

#[test]
fn example01_flat_record() {
    recmap::examples::example01_flat_record::run().expect("example should succeed");
}

#[test]
fn example02_embedded_records() {
    recmap::examples::example02_embedded_records::run().expect("example should succeed");
}

#[test]
fn example03_custom_conversion() {
    recmap::examples::example03_custom_conversion::run().expect("example should succeed");
}
