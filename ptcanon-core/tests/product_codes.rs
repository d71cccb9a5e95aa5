//! Behaviour tests for compact product code sets.

use std::collections::BTreeSet;

use ptcanon_core::{Product, products_from_codes, products_to_codes};
use rstest::rstest;

#[rstest]
#[case("I", &[Product::HighSpeedTrain])]
#[case("IRS", &[Product::HighSpeedTrain, Product::RegionalTrain, Product::SuburbanTrain])]
#[case("BUB", &[Product::Subway, Product::Bus])]
#[case("U T", &[Product::Subway, Product::Tram])]
#[case("", &[])]
fn parses_code_sets(#[case] codes: &str, #[case] expected: &[Product]) {
    let parsed = products_from_codes(codes).expect("valid codes");
    let expected: BTreeSet<Product> = expected.iter().copied().collect();
    assert_eq!(parsed, expected);
}

#[rstest]
#[case("BT", "TB")]
#[case("CFPBTUSRI", "IRSUTBPFC")]
fn renders_in_canonical_order(#[case] codes: &str, #[case] expected: &str) {
    let parsed = products_from_codes(codes).expect("valid codes");
    assert_eq!(products_to_codes(parsed), expected);
}

#[test]
fn lowercase_codes_are_rejected() {
    assert!(products_from_codes("b").is_err());
}
