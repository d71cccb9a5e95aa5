#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for style resolution.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use ptcanon_core::{Color, Line, Product, Shape, Style};
use ptcanon_normalize::{StyleConfig, StyleResolver, StyleTable};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const NETWORK_PINK: Color = Color::rgb(0xde, 0x4d, 0xa4);
const SHARED_GREEN: Color = Color::rgb(0x00, 0x8d, 0x4f);
const NIGHT_BLUE: Color = Color::rgb(0x00, 0x00, 0x50);

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    resolver: RefCell<Option<StyleResolver>>,
    style: RefCell<Option<Style>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        resolver: RefCell::new(None),
        style: RefCell::new(None),
    }
}

fn entry(key: &str, background: Color) -> (String, StyleConfig) {
    (
        key.to_owned(),
        StyleConfig {
            shape: Shape::Circle,
            background,
            background2: None,
            foreground: None,
            border: None,
        },
    )
}

fn install(
    context: &TestContext,
    overrides: &[(String, StyleConfig)],
    shared: &[(String, StyleConfig)],
) {
    let network = StyleTable::new(&overrides.iter().cloned().collect::<BTreeMap<_, _>>())
        .expect("valid override table");
    let common = StyleTable::new(&shared.iter().cloned().collect::<BTreeMap<_, _>>())
        .expect("valid shared table");
    *context.resolver.borrow_mut() = Some(StyleResolver::new(network, Arc::new(common)));
}

fn resolve(context: &TestContext, line: &Line) {
    let style = context
        .resolver
        .borrow()
        .as_ref()
        .expect("resolver must be installed")
        .resolve(line);
    *context.style.borrow_mut() = Some(style);
}

fn recorded(context: &TestContext) -> Style {
    context.style.borrow().expect("style should be recorded")
}

#[given("a network override and a shared style for suburban line \"S1\"")]
fn override_and_shared(context: &TestContext) {
    install(
        context,
        &[entry("vbb|SS1", NETWORK_PINK)],
        &[entry("SS1", SHARED_GREEN)],
    );
}

#[given("a shared night bus style")]
fn shared_night_bus(context: &TestContext) {
    install(context, &[], &[entry("BN", NIGHT_BLUE)]);
}

#[given("a network without any styles")]
fn no_styles(context: &TestContext) {
    install(context, &[], &[]);
}

#[when("the style of suburban line \"S1\" is resolved")]
fn resolve_s1(context: &TestContext) {
    let line = Line::new(Some(Product::SuburbanTrain), Some("S1".into())).with_network("vbb");
    resolve(context, &line);
}

#[when("the style of bus line \"N7\" is resolved")]
fn resolve_night_bus(context: &TestContext) {
    let line = Line::new(Some(Product::Bus), Some("N7".into())).with_network("vbb");
    resolve(context, &line);
}

#[when("the style of a line without product is resolved")]
fn resolve_filtered(context: &TestContext) {
    resolve(context, &Line::new(None, None));
}

#[then("the network override is used")]
fn assert_override(context: &TestContext) {
    assert_eq!(recorded(context).background, NETWORK_PINK);
}

#[then("the night bus style is used")]
fn assert_night_bus(context: &TestContext) {
    let style = recorded(context);
    assert_eq!(style.background, NIGHT_BLUE);
    assert_eq!(style.foreground, Color::WHITE);
}

#[then("the fallback style is used")]
fn assert_fallback(context: &TestContext) {
    assert_eq!(recorded(context), Style::FALLBACK);
}

#[scenario(path = "tests/features/style_resolution.feature", index = 0)]
fn network_overrides_win(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/style_resolution.feature", index = 1)]
fn night_buses_use_night_style(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/style_resolution.feature", index = 2)]
fn filtered_lines_get_a_style(context: TestContext) {
    let _ = context;
}
