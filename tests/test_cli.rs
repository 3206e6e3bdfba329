//! End-to-end tests of the `plexus` binary.

mod common;

use common::{DataDir, plexus, run_plexus, stderr, stdout};
use plexus::anatomy::BUILTIN_LESIONS;
use plexus::error::ExitCode;

fn code(output: &std::process::Output) -> i32 {
    output.status.code().expect("terminated by signal")
}

#[test]
fn trace_prints_roots_and_segments() {
    let out = plexus(&["trace", "axillary"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("roots:    C5, C6"), "{text}");
    assert!(text.contains("posterior-cord"), "{text}");
}

#[test]
fn trace_json_is_parseable() {
    let out = plexus(&["trace", "median", "--format", "json"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["nerve"], "median");
    let roots: Vec<&str> = value["highlight"]["roots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert_eq!(roots, ["C6", "C7", "C8", "T1"]);
}

#[test]
fn unknown_nerve_suggests_a_spelling() {
    let out = plexus(&["trace", "medain"]);
    assert_eq!(code(&out), ExitCode::NOT_FOUND);
    assert!(stderr(&out).contains("did you mean 'median'"), "{}", stderr(&out));
}

#[test]
fn simulate_reports_mode() {
    let out = plexus(&["simulate", "Upper trunk (C5-C6)"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    assert!(stdout(&out).contains("mode:     precise"));

    let out = plexus(&["simulate", "Median neuropathy at the wrist"]);
    assert!(stdout(&out).contains("positional (approximate, margin 20)"));

    let out = plexus(&["simulate", "Neuralgic amyotrophy (Parsonage-Turner)"]);
    assert!(stdout(&out).contains("diffuse"));
}

#[test]
fn simulate_margin_override_widens_highlight() {
    let lesion = "Median neuropathy at the wrist";
    let narrow = plexus(&["simulate", lesion, "--format", "json"]);
    let wide = plexus(&["simulate", lesion, "--margin", "100", "--format", "json"]);
    let narrow: serde_json::Value = serde_json::from_str(&stdout(&narrow)).unwrap();
    let wide: serde_json::Value = serde_json::from_str(&stdout(&wide)).unwrap();
    assert_eq!(narrow["highlight"]["segments"], serde_json::json!(["median-forearm"]));
    assert_eq!(
        wide["highlight"]["segments"],
        serde_json::json!(["median-arm", "median-forearm"])
    );
}

#[test]
fn negative_margin_is_rejected() {
    let out = plexus(&["simulate", "Median neuropathy at the wrist", "--margin=-5"]);
    assert_eq!(code(&out), ExitCode::DATA_ERROR);
}

#[test]
fn unknown_lesion_is_not_found() {
    let out = plexus(&["simulate", "Ulnar neuropathy at the elbw"]);
    assert_eq!(code(&out), ExitCode::NOT_FOUND);
    assert!(stderr(&out).contains("Ulnar neuropathy at the elbow"));
}

#[test]
fn lesions_are_filtered_and_grouped() {
    let out = plexus(&["lesions", "--category", "plexus", "--region", "ue"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Lateral cord"));
    assert!(!text.contains("Lumbar plexopathy"));
    assert!(!text.contains("C5 radiculopathy"));
}

#[test]
fn muscles_list_by_region() {
    let out = plexus(&["muscles", "--region", "le", "--format", "json"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let muscles = value.as_array().unwrap();
    assert_eq!(muscles.len(), 16);
    assert!(muscles.iter().all(|m| m["region"] == "LE"));
}

#[test]
fn seeded_case_is_reproducible() {
    let args = ["case", "--seed", "42", "--reveal", "--format", "json"];
    let first = plexus(&args);
    let second = plexus(&args);
    assert_eq!(code(&first), ExitCode::SUCCESS, "{}", stderr(&first));
    assert_eq!(stdout(&first), stdout(&second));

    let value: serde_json::Value = serde_json::from_str(&stdout(&first)).unwrap();
    assert_eq!(value["seed"], 42);
    let answer = value["answer"].as_str().unwrap();
    assert!(value["options"].as_array().unwrap().iter().any(|o| o == answer));
}

#[test]
fn hidden_case_has_no_answer() {
    let out = plexus(&["case", "--seed", "1", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert!(value.get("answer").is_none());
}

#[test]
fn case_with_no_matching_lesion_is_a_quiz_error() {
    // keep the upper-extremity lesions only
    let le_start = BUILTIN_LESIONS.find("LE roots").unwrap();
    let cut = BUILTIN_LESIONS[..le_start].rfind('\n').unwrap();
    let dir = DataDir::builtin().with_text("lesions.yaml", &BUILTIN_LESIONS[..cut]);
    let data = dir.path().to_str().unwrap();

    let out = plexus(&["--data", data, "case", "--region", "le"]);
    assert_eq!(code(&out), ExitCode::QUIZ_ERROR, "{}", stderr(&out));
    assert!(stderr(&out).contains("no lesion matches"));

    let out = plexus(&["--data", data, "case", "--region", "ue", "--seed", "9"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
}

#[test]
fn quiz_runs_requested_rounds() {
    let out = run_plexus(&["quiz", "--seed", "3", "--rounds", "2"], "1\n2\n");
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Case 1"));
    assert!(text.contains("Case 2"));
    assert!(!text.contains("Case 3"));
    assert!(text.contains("Final score"));
    assert!(text.matches("Score ").count() >= 2);
}

#[test]
fn quiz_reprompts_on_bad_answer_and_quits() {
    let out = run_plexus(&["quiz", "--seed", "3"], "9\nq\n");
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("invalid selection") || text.contains("not one of"), "{text}");
    assert!(text.contains("Final score 0/0"));
}

#[test]
fn quiz_ends_at_end_of_input() {
    let out = run_plexus(&["quiz", "--seed", "5", "--region", "le"], "");
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    assert!(stdout(&out).contains("Final score 0/0"));
}

#[test]
fn validate_builtin_data() {
    let out = plexus(&["validate", "--strict"]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    assert!(stdout(&out).contains("builtin: valid"));

    let out = plexus(&["validate", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["valid"], true);
    assert_eq!(value["lesions"], 27);
}

#[test]
fn validate_reports_every_issue() {
    let dir = DataDir::builtin().with_fixture("plexus.yaml", "plexus_dangling_segment.yaml");
    let out = plexus(&["--data", dir.path().to_str().unwrap(), "validate"]);
    assert_eq!(code(&out), ExitCode::DATA_ERROR);
    let text = stdout(&out);
    assert!(text.contains("segments[0].to"), "{text}");
    assert!(text.contains("segments[1].carries"), "{text}");
}

#[test]
fn commands_refuse_invalid_data() {
    let dir = DataDir::builtin().with_fixture("lesions.yaml", "lesions_unknown_muscle.yaml");
    let out = plexus(&["--data", dir.path().to_str().unwrap(), "trace", "median"]);
    assert_eq!(code(&out), ExitCode::DATA_ERROR);
    assert!(stderr(&out).contains("Deltiod"));
}

#[test]
fn missing_data_dir_is_a_data_error() {
    let out = plexus(&["--data", "/nonexistent/plexus-data", "lesions"]);
    assert_eq!(code(&out), ExitCode::DATA_ERROR);
}

#[test]
fn engine_config_is_applied_and_checked() {
    let wide = common::fixture_path("engine_wide_margin.yaml");
    let out = plexus(&[
        "--config",
        wide.to_str().unwrap(),
        "simulate",
        "Median neuropathy at the wrist",
    ]);
    assert_eq!(code(&out), ExitCode::SUCCESS, "{}", stderr(&out));
    assert!(stdout(&out).contains("margin 100"));

    let invalid = common::fixture_path("engine_invalid.yaml");
    let out = plexus(&["--config", invalid.to_str().unwrap(), "case"]);
    assert_eq!(code(&out), ExitCode::DATA_ERROR);
    assert!(stderr(&out).contains("abnormal_sample_size"));
}

#[test]
fn completions_are_generated() {
    let out = plexus(&["completions", "bash"]);
    assert_eq!(code(&out), ExitCode::SUCCESS);
    assert!(stdout(&out).contains("plexus"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let out = plexus(&["frobnicate"]);
    assert_eq!(code(&out), 2);
}
