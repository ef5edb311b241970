use std::io::Write as _;

use fuzzysat_core::{
    Defuzzification, Environment, GridSteps, InputPolicy, LabelThresholds, SatisfactionLabel,
    ScoredReview,
};

use super::*;

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "warn".to_string(),
        system_path: None,
        grid_steps: GridSteps::default(),
        defuzzification: Defuzzification::Centroid,
        input_policy: InputPolicy::Clip,
        label_thresholds: LabelThresholds::default(),
        parallel: false,
    }
}

fn shipped_system_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/satisfaction.yaml")
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["fuzzysat-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.system.is_none());
}

#[test]
fn parses_score_command() {
    let cli = Cli::try_parse_from([
        "fuzzysat-cli",
        "score",
        "reviews.jsonl",
        "--output",
        "scored.jsonl",
        "--limit",
        "1000",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Score {
            ref input,
            ref output,
            limit: Some(1000),
            parallel: false,
        }) if input == &PathBuf::from("reviews.jsonl") && output == &PathBuf::from("scored.jsonl")
    ));
}

#[test]
fn score_requires_output() {
    assert!(Cli::try_parse_from(["fuzzysat-cli", "score", "reviews.jsonl"]).is_err());
}

#[test]
fn parses_predict_with_negative_sentiment() {
    let cli = Cli::try_parse_from([
        "fuzzysat-cli",
        "predict",
        "--sentiment",
        "-0.5",
        "--length",
        "12",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Predict { sentiment, length }) = cli.command else {
        panic!("expected predict command");
    };
    assert!((sentiment + 0.5).abs() < f64::EPSILON);
    assert!((length - 12.0).abs() < f64::EPSILON);
}

#[test]
fn system_flag_is_global() {
    let cli = Cli::try_parse_from(["fuzzysat-cli", "describe", "--system", "custom.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Describe)));
    assert_eq!(cli.system, Some(PathBuf::from("custom.yaml")));
}

#[test]
fn builds_builtin_and_file_systems() {
    let config = test_config();
    let builtin = build_system(&config, None).expect("builtin system");
    let from_file = build_system(&config, Some(&shipped_system_path())).expect("file system");
    assert_eq!(builtin.rules().len(), 9);
    assert_eq!(from_file.rules().len(), 9);
}

#[test]
fn system_path_from_config_is_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "antecedents: []\n").expect("write system");

    let config = AppConfig {
        system_path: Some(path),
        ..test_config()
    };
    assert!(build_system(&config, None).is_err());
}

#[test]
fn custom_system_without_satisfaction_names_is_rejected_up_front() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tip.yaml");
    std::fs::write(
        &path,
        r"
antecedents:
  - name: service
    min: 0
    max: 10
    step: 1
    terms:
      - { label: good, points: [0, 10, 10] }
consequents:
  - name: tip
    min: 0
    max: 25
    step: 1
    terms:
      - { label: high, points: [13, 25, 25] }
rules:
  - when: { is: { variable: service, label: good } }
    then: [{ variable: tip, label: high }]
",
    )
    .expect("write system");

    let system = build_system(&test_config(), Some(&path)).expect("custom system builds");
    assert!(inspect::Description(&system).to_string().contains("tip [0, 25]"));

    let err = require_satisfaction_variables(&system).expect_err("names are missing");
    assert!(err.to_string().contains("'sentiment'"), "{err}");
}

#[test]
fn builtin_system_has_satisfaction_names() {
    let system = build_system(&test_config(), None).expect("builtin system");
    assert!(require_satisfaction_variables(&system).is_ok());
}

#[test]
fn score_writes_one_row_per_review() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("reviews.jsonl");
    let output = dir.path().join("scored.jsonl");

    let mut file = std::fs::File::create(&input).expect("create input");
    writeln!(
        file,
        r#"{{"product_id": 7, "product_title": "Kettle", "review_text": "{}", "sentiment": "Positive"}}"#,
        vec!["great"; 45].join(" ")
    )
    .expect("write");
    writeln!(file, r#"{{"review": "awful", "sentiment": "Negative"}}"#).expect("write");
    writeln!(file).expect("write");
    writeln!(file, r#"{{"review": "no label"}}"#).expect("write");
    drop(file);

    let config = test_config();
    let system = build_system(&config, None).expect("builtin system");
    score::run_score(&system, &config, &input, &output, None, false).expect("score run");

    let rows: Vec<ScoredReview> = std::fs::read_to_string(&output)
        .expect("read output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("scored row"))
        .collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].product_id, Some(serde_json::json!(7)));
    assert_eq!(rows[0].review_length, 45);
    assert_eq!(rows[0].fuzzy_satisfaction, SatisfactionLabel::High);
    assert_eq!(rows[1].fuzzy_satisfaction, SatisfactionLabel::Low);
    assert_eq!(rows[2].satisfaction_score, None);
    assert_eq!(rows[2].fuzzy_satisfaction, SatisfactionLabel::Unknown);
}

#[test]
fn failed_rows_serialize_null_score() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("scored.jsonl");
    let row = ScoredReview::new(
        fuzzysat_core::ReviewRecord::default(),
        None,
        &LabelThresholds::default(),
    );
    score::write_scored(&output, &[row]).expect("write");

    let value: serde_json::Value =
        serde_json::from_str(std::fs::read_to_string(&output).expect("read").trim())
            .expect("json");
    assert_eq!(value["satisfaction_score"], serde_json::Value::Null);
    assert_eq!(value["fuzzy_satisfaction"], "Unknown");
}

#[test]
fn read_reviews_honours_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("reviews.jsonl");
    let lines: Vec<String> = (0..5)
        .map(|i| format!(r#"{{"review": "review {i}", "sentiment": "Neutral"}}"#))
        .collect();
    std::fs::write(&input, lines.join("\n")).expect("write input");

    let records = score::read_reviews(&input, Some(2)).expect("read");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].review.as_deref(), Some("review 1"));
}

#[test]
fn read_reviews_reports_bad_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("reviews.jsonl");
    std::fs::write(&input, "{\"review\": \"ok\"}\nnot json\n").expect("write input");

    let err = score::read_reviews(&input, None).expect_err("second line is invalid");
    assert!(err.to_string().contains(":2:"), "{err}");
}

#[test]
fn describe_lists_terms_and_rules() {
    let system = build_system(&test_config(), None).expect("builtin system");
    let text = inspect::Description(&system).to_string();
    assert!(text.contains("sentiment [-1, 1] (21 points)"), "{text}");
    assert!(text.contains("trimf[6, 10, 10]"), "{text}");
    assert!(text.contains("IF sentiment[positive] AND review_length[long] THEN satisfaction[high]"));
    assert!(text.contains("DEFUZZIFICATION centroid"));
}

#[test]
fn predict_rejects_out_of_range_under_reject_policy() {
    let config = AppConfig {
        input_policy: InputPolicy::Reject,
        ..test_config()
    };
    let system = build_system(&config, None).expect("builtin system");
    assert!(inspect::run_predict(&system, &config, 2.0, 10.0).is_err());
    assert!(inspect::run_predict(&system, &config, 0.5, 10.0).is_ok());
}
