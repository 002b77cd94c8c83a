use std::fs;
use std::path::PathBuf;

use roster::config::Config;
use roster::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn load_fixture(relative: &str) -> Config {
    let content = fs::read_to_string(fixture_path(relative)).expect("read fixture");
    toml::from_str(&content).expect("parse config")
}

#[test]
fn config_provider_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (
                true,
                "http://localhost:11434".to_string(),
                "llama3.1:8b".to_string(),
                0.3f32,
                120u64,
            ),
            should_panic: false,
        },
        TestCase {
            name: "custom",
            input: "tests/fixtures/configs/custom.toml",
            expected: (
                false,
                "http://gpu-box:11434".to_string(),
                "mistral:7b".to_string(),
                0.1f32,
                30u64,
            ),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        (
            config.provider.enabled,
            config.provider.base_url,
            config.provider.llm_model,
            config.provider.temperature,
            config.provider.chat_timeout_secs,
        )
    })
}

#[test]
fn config_layered_load_keeps_defaults() {
    let path = fixture_path("tests/fixtures/configs/custom.toml");
    let config = Config::load(Some(path.as_path()), &fixture_path("tests")).expect("load config");

    // Set in the file.
    assert_eq!(config.provider.embed_model, "mxbai-embed-large");
    assert_eq!(config.search.default_k, 3);
    assert_eq!(config.search.max_candidates, 4);
    assert!(!config.data.persist_on_ingest);
    assert_eq!(config.robot.format, "plain");

    // Absent from the file: defaults survive the patch.
    assert_eq!(config.provider.embed_timeout_secs, 120);
    assert_eq!(config.provider.health_timeout_secs, 2);
    assert!(config.data.archive_uploads);
    assert!(config.data.upload_dir.is_none());
}

#[test]
fn config_snapshot_path_override() {
    let path = fixture_path("tests/fixtures/configs/custom.toml");
    let config = Config::load(Some(path.as_path()), &fixture_path("tests")).expect("load config");
    assert_eq!(
        config.snapshot_path(&PathBuf::from("/ignored")),
        PathBuf::from("/var/lib/roster/employees.json")
    );
    assert_eq!(
        config.upload_dir(&PathBuf::from("/srv/roster")),
        PathBuf::from("/srv/roster/uploads")
    );
}
