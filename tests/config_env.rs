// tests/config_env.rs
//
// EngineConfig::from_env: path resolution and env overrides.
// These mutate process env (and CWD), so they run serially.

use feedback_sentiment::config::{ENV_CONFIG_PATH, ENV_FLAG_CONFIDENCE, ENV_LOW_RATING};
use feedback_sentiment::{EngineConfig, FlagPolicy};
use std::{env, fs, path::PathBuf};

fn unique_tmp_dir(tag: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("feedback_env_{tag}_{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_FLAG_CONFIDENCE);
    env::remove_var(ENV_LOW_RATING);
}

#[serial_test::serial]
#[test]
fn explicit_path_is_loaded() {
    clear_env();
    let tmp = unique_tmp_dir("explicit");
    let path = tmp.join("engine.toml");
    fs::write(
        &path,
        "[aggregation]\nflag_policy = \"confidence_only\"\nflag_confidence_threshold = 0.75\n",
    )
    .unwrap();

    env::set_var(ENV_CONFIG_PATH, &path);
    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg.aggregation.flag_policy, FlagPolicy::ConfidenceOnly);
    assert_eq!(cfg.aggregation.flag_confidence_threshold, 0.75);

    clear_env();
    let _ = fs::remove_dir_all(&tmp);
}

#[serial_test::serial]
#[test]
fn explicit_missing_path_is_error() {
    clear_env();
    let tmp = unique_tmp_dir("missing");
    env::set_var(ENV_CONFIG_PATH, tmp.join("nope.toml"));

    let err = EngineConfig::from_env().unwrap_err();
    assert!(format!("{err:#}").contains("nope.toml"));

    clear_env();
    let _ = fs::remove_dir_all(&tmp);
}

#[serial_test::serial]
#[test]
fn default_path_falls_back_to_defaults() {
    clear_env();
    // Isolate CWD so the repo's config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = unique_tmp_dir("default");
    env::set_current_dir(&tmp).unwrap();

    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg, EngineConfig::default());

    // Now a config/feedback.toml under CWD is used.
    fs::create_dir_all(tmp.join("config")).unwrap();
    fs::write(
        tmp.join("config").join("feedback.toml"),
        "[scoring]\nnegation_window = 4\n",
    )
    .unwrap();
    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg.scoring.negation_window, 4);

    env::set_current_dir(old).unwrap();
    let _ = fs::remove_dir_all(&tmp);
}

#[serial_test::serial]
#[test]
fn env_overrides_win_and_are_clamped() {
    clear_env();
    let tmp = unique_tmp_dir("override");
    let path = tmp.join("engine.toml");
    fs::write(
        &path,
        "[aggregation]\nflag_confidence_threshold = 0.7\nlow_rating_threshold = 2.0\n",
    )
    .unwrap();
    env::set_var(ENV_CONFIG_PATH, &path);

    env::set_var(ENV_FLAG_CONFIDENCE, "1.5");
    env::set_var(ENV_LOW_RATING, "3");
    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg.aggregation.flag_confidence_threshold, 1.0);
    assert_eq!(cfg.aggregation.low_rating_threshold, 3.0);

    // Unparseable override is ignored.
    env::set_var(ENV_FLAG_CONFIDENCE, "high");
    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg.aggregation.flag_confidence_threshold, 0.7);

    clear_env();
    let _ = fs::remove_dir_all(&tmp);
}
