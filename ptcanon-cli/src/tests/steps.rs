//! Behaviour-driven step definitions driving the CLI command scenarios.

use super::helpers::{LINES, NAMES, Workspace};
use super::*;
use camino::Utf8PathBuf;
use crate::lines::{self, LinesConfig, execute_lines};
use crate::selection::{Selection, write_output};
use crate::split::{SplitConfig, execute_split};
use ptcanon_core::{LocationKind, PlacePair, Product};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CommandWorld {
    workspace: RefCell<Option<Workspace>>,
    input: RefCell<Option<Utf8PathBuf>>,
    output: RefCell<Vec<u8>>,
    error: RefCell<Option<CliError>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            workspace: RefCell::new(None),
            input: RefCell::new(None),
            output: RefCell::new(Vec::new()),
            error: RefCell::new(None),
        }
    }

    fn write_input(&self, name: &str, contents: &str) {
        let guard = self.workspace.borrow();
        let workspace = guard.as_ref().expect("workspace must be created first");
        *self.input.borrow_mut() = Some(workspace.write(name, contents));
    }

    fn selection(&self) -> Selection {
        let guard = self.workspace.borrow();
        let workspace = guard.as_ref().expect("workspace must be created first");
        let input = self.input.borrow().clone().expect("input must be written first");
        workspace.selection(input)
    }

    fn output(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.borrow()).expect("command output should be JSON")
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a network configuration for \"demo\"")]
fn network_configuration(#[from(world)] world: &CommandWorld) {
    *world.workspace.borrow_mut() = Some(Workspace::new());
}

#[given("a lines input with a subway line and an unmapped mode")]
fn lines_input(#[from(world)] world: &CommandWorld) {
    world.write_input("lines.json", LINES);
}

#[given("a names input with a combined station name")]
fn names_input(#[from(world)] world: &CommandWorld) {
    world.write_input("names.json", NAMES);
}

#[given("no command options are configured")]
fn no_options(#[from(world)] world: &CommandWorld) {
    *world.input.borrow_mut() = None;
}

#[when("I run the lines command")]
fn run_lines_command(#[from(world)] world: &CommandWorld) {
    let config = LinesConfig {
        selection: world.selection(),
    };
    let reports = execute_lines(&config).expect("lines command should succeed");
    write_output(&mut *world.output.borrow_mut(), &reports).expect("write output");
}

#[when("I run the split command")]
fn run_split_command(#[from(world)] world: &CommandWorld) {
    let config = SplitConfig {
        selection: world.selection(),
        kind: LocationKind::Station,
    };
    let pairs = execute_split(&config).expect("split command should succeed");
    write_output(&mut *world.output.borrow_mut(), &pairs).expect("write output");
}

#[when("I configure the lines command")]
fn configure_lines(#[from(world)] world: &CommandWorld) {
    let result = LinesConfig::try_from(LinesArgs::default());
    *world.error.borrow_mut() = result.err();
}

#[then("the subway line is classified with its shared style")]
fn subway_classified(#[from(world)] world: &CommandWorld) {
    let output = world.output();
    let first = output.get(0).expect("first report");
    assert_eq!(
        first.pointer("/line/product"),
        Some(&serde_json::json!(Product::Subway))
    );
    assert_eq!(first.pointer("/line/label"), Some(&serde_json::json!("U1")));
    assert_eq!(
        first.pointer("/style/background"),
        Some(&serde_json::json!("#7dad4c"))
    );
}

#[then("the unmapped mode is reported as rejected")]
fn unmapped_rejected(#[from(world)] world: &CommandWorld) {
    let output = world.output();
    let last = output.get(2).expect("third report");
    let error = last.get("error").and_then(serde_json::Value::as_str);
    assert!(
        error.is_some_and(|message| message.contains("mode index 9")),
        "expected a rejection, found {last}"
    );
}

#[then("the station name is split into place and name")]
fn station_split(#[from(world)] world: &CommandWorld) {
    let pairs: Vec<PlacePair> =
        serde_json::from_value(world.output()).expect("place pairs in output");
    assert_eq!(
        pairs,
        vec![
            PlacePair::new("Berlin", "Alexanderplatz"),
            PlacePair::unplaced("Zoo")
        ]
    );
}

#[then("the missing input option is reported")]
fn missing_input_reported(#[from(world)] world: &CommandWorld) {
    match world.error.borrow().as_ref() {
        Some(CliError::MissingArgument { field, env }) => {
            assert_eq!(*field, ARG_INPUT);
            assert_eq!(*env, lines::ENV.input);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(classifying_raw_lines, "classifying raw lines");
register_command_scenario!(splitting_station_names, "splitting station names");
register_command_scenario!(rejecting_missing_arguments, "rejecting missing arguments");
