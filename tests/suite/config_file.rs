//! Lexicons and experiment settings read from a config file

use cogseq_config::{CogseqConfig, ConfigError, LexiconSpecError};
use cogseq_engine::{Experiment, Strategy};

const CONFIG: &str = r#"
[experiment]
seed = 11
runs = 3
strategy = "chaining"
lexicon = "ring"

[logging]
filter = "cogseq_engine=debug"

[[lexicons]]
name = "ring"
linked = true

[[lexicons.tokens]]
name = "P"
successors = ["Q"]

[[lexicons.tokens]]
name = "Q"
successors = ["R"]

[[lexicons.tokens]]
name = "R"
"#;

fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn configured_lexicon_drives_an_experiment() {
    let (_dir, path) = write_config(CONFIG);
    let config = CogseqConfig::load_from(&path).unwrap();
    let settings = config.experiment();
    assert_eq!(config.log_filter(), Some("cogseq_engine=debug"));

    let strategy: Strategy = settings.strategy.as_deref().unwrap().parse().unwrap();
    let lexicon = config
        .lexicon(settings.lexicon.as_deref().unwrap())
        .unwrap()
        .build()
        .unwrap();
    let report = Experiment::new(strategy, lexicon)
        .with_runs(settings.runs.unwrap())
        .with_seed(settings.seed.unwrap())
        .run()
        .unwrap();

    assert_eq!(report.runs(), 3);
    for sequence in &report.sequences {
        assert_eq!(sequence.names(), vec!["P", "Q", "R"]);
    }
}

#[test]
fn file_lexicons_shadow_the_catalog() {
    let (_dir, path) = write_config(
        r#"
[[lexicons]]
name = "lex1"

[[lexicons.tokens]]
name = "solo"
attribute1 = "red"
"#,
    );
    let config = CogseqConfig::load_from(&path).unwrap();
    assert_eq!(config.lexicon("lex1").unwrap().tokens.len(), 1);
    assert_eq!(config.lexicon("lex2").unwrap().tokens.len(), 6);
    assert!(config.lexicon("nope").is_none());
}

#[test]
fn broken_links_are_rejected_at_build() {
    let (_dir, path) = write_config(
        r#"
[[lexicons]]
name = "dangling"
linked = true

[[lexicons.tokens]]
name = "A"
successors = ["B"]
"#,
    );
    let config = CogseqConfig::load_from(&path).unwrap();
    let err = config.lexicon("dangling").unwrap().build().unwrap_err();
    assert!(matches!(err, LexiconSpecError::UnknownLink { ref target, .. } if target == "B"));
}

#[test]
fn unknown_keys_fail_to_parse() {
    let (_dir, path) = write_config("[experiment]\nrepeats = 2\n");
    let err = CogseqConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &path);
}
