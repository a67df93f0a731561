//! Tests for CLI command dispatch over the sample catalogue

use clap::Parser;
use rstest::rstest;

use outline_tree::cli::{execute_command_to, Cli, Commands};
use outline_tree::util::testing;
use outline_tree::TreeError;

/// Runs the command line and returns what it wrote, without colors.
fn run(args: &[&str]) -> Result<String, TreeError> {
    testing::init_test_setup();
    colored::control::set_override(false);
    let cli = Cli::parse_from(args);
    let mut out = Vec::new();
    execute_command_to(&cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf8 output"))
}

// ============================================================
// Dispatch
// ============================================================

#[rstest]
#[case(&["outline-tree"])]
#[case(&["outline-tree", "outline", "--all-open"])]
#[case(&["outline-tree", "outline", "--collapse", "Walkman"])]
#[case(&["outline-tree", "tree"])]
#[case(&["outline-tree", "find", "Walkman"])]
fn given_valid_arguments_when_executing_then_succeeds(#[case] args: &[&str]) {
    assert!(run(args).is_ok());
}

#[test]
fn given_find_subcommand_when_parsing_then_value_is_captured() {
    let cli = Cli::parse_from(["outline-tree", "find", "Apple Watch"]);

    match cli.command {
        Some(Commands::Find { value }) => assert_eq!(value, "Apple Watch"),
        other => panic!("unexpected command: {:?}", other),
    }
}

// ============================================================
// Rendered output
// ============================================================

#[test]
fn given_collapsed_ios_when_printing_outline_then_ios_children_are_hidden() {
    let output = run(&["outline-tree", "outline", "--collapse", "IOS", "--expand", "PC"]).unwrap();

    let expected = [
        "-Devices",
        "--Smartphone",
        "---IOS",
        "---Android",
        "----Nexus",
        "----Samsung",
        "----Huawei",
        "--PC",
        "--Wearable",
        "--TV",
        "---Bravia",
        "---Trinitron",
    ];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn given_level_prefix_when_printing_outline_then_depth_precedes_value() {
    let output = run(&["outline-tree", "--level-prefix", "outline"]).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 18);
    assert_eq!(lines[0], "-0.Devices");
    assert_eq!(lines[17], "---2.Trinitron");
}

#[test]
fn given_existing_value_when_finding_then_describes_node() {
    let output = run(&["outline-tree", "find", "Android"]).unwrap();

    let expected = [
        "Android",
        "depth: 2",
        "height: 1",
        "open: true",
        "reveals: 3",
        "description: Android {Nexus, Samsung, Huawei} ",
    ];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn given_absent_value_when_finding_then_prints_nothing() {
    let output = run(&["outline-tree", "find", "Walkman"]).unwrap();

    assert!(output.is_empty());
}

#[rstest]
#[case(false, 6, "**TV")]
#[case(true, 18, "***Trinitron")]
fn given_custom_marker_when_flattening_then_lines_use_marker(
    #[case] leaves: bool,
    #[case] expected_len: usize,
    #[case] expected_last: &str,
) {
    let mut args = vec!["outline-tree", "--marker", "*", "flatten"];
    if leaves {
        args.push("--leaves");
    }

    let output = run(&args).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), expected_len);
    assert_eq!(lines[0], "*Devices");
    assert_eq!(lines.last(), Some(&expected_last));
}

#[test]
fn given_tree_subcommand_when_executing_then_draws_catalogue() {
    let output = run(&["outline-tree", "tree"]).unwrap();

    assert!(output.starts_with("Devices\n"));
    assert!(output.contains("Trinitron"));
}

// ============================================================
// Settings errors
// ============================================================

#[test]
fn given_empty_marker_flag_when_executing_then_config_error() {
    let result = run(&["outline-tree", "--marker", "", "outline"]);

    assert!(matches!(result, Err(TreeError::Config(msg)) if msg.contains("marker")));
}

#[test]
fn given_missing_config_file_when_executing_then_fails() {
    let result = run(&["outline-tree", "--config", "/nonexistent/outline-tree.toml", "tree"]);

    assert!(matches!(result, Err(TreeError::Config(_))));
}
