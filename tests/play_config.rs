use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use tempfile::{Builder, NamedTempFile};

use rps_gesture::config::PlayConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "RPS_CONFIG",
        "RPS_SOURCE",
        "RPS_FPS",
        "RPS_TARGET_SCORE",
        "RPS_SEED",
        "RPS_PAUSE_MS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_json_config_with_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "source": "recordings/session1.jsonl",
        "target_fps": 30,
        "game": {
            "target_score": 3,
            "seed": 11
        },
        "presentation": {
            "pause_ms": 1500
        }
    }"#;
    file.write_all(json.as_bytes()).expect("write config");

    std::env::set_var("RPS_CONFIG", file.path());
    std::env::set_var("RPS_SOURCE", "stub://rock*3,paper*3");
    std::env::set_var("RPS_SEED", "99");

    let cfg = PlayConfig::load().expect("load config");

    assert_eq!(cfg.source, "stub://rock*3,paper*3");
    assert_eq!(cfg.target_fps, 30);
    assert_eq!(cfg.target_score, 3);
    assert_eq!(cfg.seed, Some(99));
    assert_eq!(cfg.pause, Duration::from_millis(1500));

    clear_env();
}

#[test]
fn loads_toml_config() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    let toml = r#"
source = "stub://demo"

[game]
target_score = 7

[presentation]
pause_ms = 0
"#;
    file.write_all(toml.as_bytes()).expect("write config");
    std::env::set_var("RPS_CONFIG", file.path());

    let cfg = PlayConfig::load().expect("load config");

    assert_eq!(cfg.source, "stub://demo");
    assert_eq!(cfg.target_score, 7);
    assert_eq!(cfg.target_fps, 10);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.pause, Duration::ZERO);

    clear_env();
}

#[test]
fn defaults_without_config_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = PlayConfig::load().expect("load config");
    assert_eq!(cfg.source, "stub://demo");
    assert_eq!(cfg.target_score, 5);
    assert_eq!(cfg.pause, Duration::from_millis(3000));
}

#[test]
fn rejects_bad_env_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("RPS_TARGET_SCORE", "0");
    let err = PlayConfig::load().unwrap_err();
    assert!(err.to_string().contains("target_score"));

    std::env::set_var("RPS_TARGET_SCORE", "five");
    assert!(PlayConfig::load().is_err());

    clear_env();
    std::env::set_var("RPS_FPS", "-3");
    assert!(PlayConfig::load().is_err());

    clear_env();
}

#[test]
fn rejects_unreadable_and_malformed_files() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("RPS_CONFIG", "/nonexistent/rps.json");
    assert!(PlayConfig::load().is_err());

    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(b"{ not json").expect("write config");
    std::env::set_var("RPS_CONFIG", file.path());
    let err = PlayConfig::load().unwrap_err();
    assert!(err.to_string().contains("invalid config file"));

    clear_env();
}
