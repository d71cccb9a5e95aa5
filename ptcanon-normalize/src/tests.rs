//! Unit coverage for adapters assembled from JSON configuration.
#![forbid(unsafe_code)]

use ptcanon_core::{LineAttr, LocationKind, PlacePair, Product, Shape, Style};
use rstest::{fixture, rstest};

use crate::{Adapter, NetworkConfig, NormalizeError, RawLine, SharedConfig, SharedTables};

const AVV: &str = r##"{
    "id": "avv",
    "product_index": [null, "HIGH_SPEED_TRAIN", "REGIONAL_TRAIN", "SUBURBAN_TRAIN", "SUBWAY", "BUS"],
    "category_rules": [
        {
            "name": "airport shuttle",
            "mode": 5,
            "when": [{ "field": "symbol", "match": { "pattern": "^AS[0-9]+$" } }],
            "product": "ON_DEMAND",
            "label": [{ "field": "symbol" }],
            "attrs": ["line_airport"]
        },
        {
            "name": "museum railway",
            "when": [{ "field": "category_name", "match": { "exact": "Museumsbahn" } }],
            "product": null
        }
    ],
    "abbreviations": { "EB": { "product": "REGIONAL_TRAIN", "prefix": "EB" } },
    "names": {
        "station": {
            "places": { "entries": [{ "alias": "AC", "place": "Aachen" }] },
            "rewrites": { "Hbf": "Hauptbahnhof" }
        },
        "poi": {
            "template": { "split": "first_comma", "order": "place_first" }
        }
    },
    "styles": {
        "avv|B33": { "shape": "rounded", "background": "#ffcc00" }
    }
}"##;

#[fixture]
fn adapter() -> Adapter {
    let config: NetworkConfig = serde_json::from_str(AVV).expect("decode network config");
    let shared = SharedTables::from_config(&SharedConfig::default()).expect("shared tables");
    Adapter::from_config(&config, &shared).expect("build adapter")
}

fn raw(mode: Option<u32>) -> RawLine {
    RawLine {
        mode,
        ..RawLine::default()
    }
}

#[rstest]
fn rules_apply_before_the_mode_table(adapter: Adapter) {
    let input = RawLine {
        symbol: Some("AS1".into()),
        ..raw(Some(5))
    };
    let line = adapter.normalize_line(&input).expect("shuttle line");
    assert_eq!(line.product, Some(Product::OnDemand));
    assert_eq!(line.label.as_deref(), Some("AS1"));
    assert!(line.has_attr(LineAttr::LineAirport));
}

#[rstest]
fn rules_may_filter_lines(adapter: Adapter) {
    let input = RawLine {
        category_name: Some("Museumsbahn".into()),
        symbol: Some("MB".into()),
        ..raw(Some(2))
    };
    let line = adapter.normalize_line(&input).expect("filtered line");
    assert_eq!(line.product, None);
}

#[rstest]
fn network_abbreviations_extend_shared_ones(adapter: Adapter) {
    let input = RawLine {
        category_type: Some("eb".into()),
        category_number: Some("1".into()),
        ..raw(Some(2))
    };
    let line = adapter.normalize_line(&input).expect("regional line");
    assert_eq!(line.product, Some(Product::RegionalTrain));
    assert_eq!(line.label.as_deref(), Some("EB1"));
}

#[rstest]
#[case(0, None)]
#[case(5, Some(Product::Bus))]
fn raw_indices_map_to_products(
    adapter: Adapter,
    #[case] index: u32,
    #[case] expected: Option<Product>,
) {
    let input = RawLine {
        symbol: Some("33".into()),
        ..raw(Some(index))
    };
    let line = adapter.normalize_line(&input).expect("mapped line");
    assert_eq!(line.product, expected);
}

#[rstest]
fn unrecognized_trains_are_errors(adapter: Adapter) {
    let input = RawLine {
        category_type: Some("XYZ".into()),
        ..raw(Some(1))
    };
    let err = adapter.normalize_line(&input).expect_err("unknown category");
    assert_eq!(
        err,
        NormalizeError::UnrecognizedCategory {
            network: "avv".parse().expect("valid id"),
            descriptor: "mode=1 category_type='XYZ'".into(),
        }
    );
    assert_eq!(err.to_string(), "avv: unrecognized category (mode=1 category_type='XYZ')");
}

#[rstest]
#[case(LocationKind::Station, "AC, Hbf", PlacePair::new("Aachen", "Hauptbahnhof"))]
#[case(LocationKind::Station, "Bushof", PlacePair::unplaced("Bushof"))]
#[case(LocationKind::Poi, "Aachen, Dom", PlacePair::new("Aachen", "Dom"))]
#[case(LocationKind::Address, "AC, Markt 1", PlacePair::new("Aachen", "Markt 1"))]
fn names_split_per_kind(
    adapter: Adapter,
    #[case] kind: LocationKind,
    #[case] input: &str,
    #[case] expected: PlacePair,
) {
    assert_eq!(adapter.split_name(kind, input), expected);
}

#[rstest]
fn styles_follow_the_network_overrides(adapter: Adapter) {
    let input = RawLine {
        symbol: Some("33".into()),
        ..raw(Some(5))
    };
    let line = adapter.normalize_line(&input).expect("bus line");
    let style = adapter.resolve_style(&line);
    assert_eq!(style.shape, Shape::Rounded);
    assert_eq!(style.background.to_string(), "#ffcc00");
    assert_eq!(adapter.resolve_style_key("unknown"), Style::FALLBACK);
}

#[rstest]
fn batch_splitting_keeps_input_order(adapter: Adapter) {
    let pairs = adapter.split_names(LocationKind::Station, &["AC, Dom", "Elisenbrunnen"]);
    assert_eq!(
        pairs,
        [
            PlacePair::new("Aachen", "Dom"),
            PlacePair::unplaced("Elisenbrunnen"),
        ]
    );
}
