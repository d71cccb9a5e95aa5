//! Focused unit tests covering CLI configuration resolution.

use super::helpers::Workspace;
use super::*;
use crate::lines::{self, LinesConfig};
use crate::split::{self, KindArg, SplitConfig};
use crate::style::{self, StyleCommandConfig};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use ptcanon_core::LocationKind;
use rstest::rstest;
use serde_json::json;

fn full_lines_args() -> LinesArgs {
    LinesArgs {
        input: Some(Utf8PathBuf::from("lines.json")),
        networks: Some(Utf8PathBuf::from("networks.json")),
        network: Some("demo".to_owned()),
    }
}

#[rstest]
#[case(LinesArgs { input: None, ..full_lines_args() }, ARG_INPUT, lines::ENV.input)]
#[case(LinesArgs { networks: None, ..full_lines_args() }, ARG_NETWORKS, lines::ENV.networks)]
#[case(LinesArgs { network: None, ..full_lines_args() }, ARG_NETWORK, lines::ENV.network)]
fn converting_without_required_fields_errors(
    #[case] args: LinesArgs,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let err = LinesConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn environment_names_follow_the_subcommand() {
    assert_eq!(lines::ENV.networks, "PTCANON_CMDS_LINES_NETWORKS");
    assert_eq!(split::ENV.network, "PTCANON_CMDS_SPLIT_NETWORK");
    assert_eq!(style::ENV.input, "PTCANON_CMDS_STYLE_INPUT");
}

#[rstest]
#[case(None, LocationKind::Station)]
#[case(Some(KindArg::Poi), LocationKind::Poi)]
#[case(Some(KindArg::Address), LocationKind::Address)]
fn split_kind_defaults_to_station(#[case] kind: Option<KindArg>, #[case] expected: LocationKind) {
    let args = SplitArgs {
        input: Some(Utf8PathBuf::from("names.json")),
        networks: Some(Utf8PathBuf::from("networks.json")),
        network: Some("demo".to_owned()),
        kind,
    };
    let config = SplitConfig::try_from(args).expect("complete arguments");
    assert_eq!(config.kind, expected);
}

#[rstest]
fn style_command_requires_a_network() {
    let args = StyleArgs {
        input: Some(Utf8PathBuf::from("keys.json")),
        networks: Some(Utf8PathBuf::from("networks.json")),
        network: None,
    };
    let err = StyleCommandConfig::try_from(args).expect_err("network is required");
    assert!(matches!(
        err,
        CliError::MissingArgument { field: ARG_NETWORK, .. }
    ));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "input": 42 }));

    let err = lines::config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let workspace = Workspace::new();
    let root = workspace.root();
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "networks": root.join("from-file.json").as_str(),
            "network": "from-file",
        }),
        None,
    );
    composer.push_environment(json!({
        "network": "from-env",
        "input": root.join("from-env-lines.json").as_str(),
    }));
    composer.push_cli(json!({
        "input": root.join("from-cli-lines.json").as_str(),
    }));

    let config =
        lines::config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.selection.networks, root.join("from-file.json"));
    assert_eq!(config.selection.network, "from-env");
    assert_eq!(config.selection.input, root.join("from-cli-lines.json"));
}

#[rstest]
fn missing_layers_report_the_environment_variable() {
    let composer = MergeComposer::new();
    let err = lines::config_from_layers_for_test(composer.layers())
        .expect_err("empty layers lack required options");
    assert_eq!(
        err.to_string(),
        "missing input (set --input or PTCANON_CMDS_LINES_INPUT)"
    );
}
