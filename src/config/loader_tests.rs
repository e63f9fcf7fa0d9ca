//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Unique path under the temp dir for one test's config file.
fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("multipage_test_{name}.toml"));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_ends_with_multipage_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("multipage") && path_str.ends_with("config.toml"),
        "Path should contain 'multipage' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_multipage_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("multipage.log"),
        "Default log path should end with 'multipage.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = temp_config(
        "valid",
        r#"
overlap = 3
flag_scope = "group"
log_file_path = "/tmp/multipage-test.log"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("File exists");

    assert_eq!(config.overlap, Some(Overlap::new(3)));
    assert_eq!(config.flag_scope, Some(FlagScope::Group));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/multipage-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = temp_config("partial", "overlap = 0\n# everything else omitted\n");

    let config = load_config_file(&config_path).unwrap().unwrap();

    assert_eq!(config.overlap, Some(Overlap::NONE));
    assert_eq!(config.flag_scope, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = temp_config("invalid", "this is not valid TOML ][}{");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("columns = 3");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn config_file_rejects_unknown_scope() {
    let result: Result<ConfigFile, _> = toml::from_str(r#"flag_scope = "window""#);
    assert!(result.is_err());
}

#[test]
fn config_file_rejects_negative_overlap() {
    let result: Result<ConfigFile, _> = toml::from_str("overlap = -2");
    assert!(result.is_err());
}

// ===== Merging =====

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.overlap, Overlap::DEFAULT);
    assert_eq!(config.flag_scope, FlagScope::Document);
    assert_eq!(config.log_file_path, default_log_path());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        overlap: Some(Overlap::new(4)),
        flag_scope: Some(FlagScope::Group),
        log_file_path: Some(PathBuf::from("/custom/app.log")),
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.overlap, Overlap::new(4));
    assert_eq!(resolved.flag_scope, FlagScope::Group);
    assert_eq!(resolved.log_file_path, PathBuf::from("/custom/app.log"));
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let file = ConfigFile {
        overlap: Some(Overlap::new(2)),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.overlap, Overlap::new(2));
    assert_eq!(resolved.flag_scope, FlagScope::Document);
    assert_eq!(resolved.log_file_path, default_log_path());
}

// ===== Environment =====

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(multipage_overlap)]
fn apply_env_overrides_respects_overlap_var() {
    let _guard = EnvGuard::new(OVERLAP_ENV_VAR);
    env::set_var(OVERLAP_ENV_VAR, " 5 ");

    let result = apply_env_overrides(ResolvedConfig::default()).expect("valid override");

    assert_eq!(result.overlap, Overlap::new(5));
}

#[test]
#[serial(multipage_overlap)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(OVERLAP_ENV_VAR);
    let base = ResolvedConfig {
        overlap: Overlap::new(7),
        ..ResolvedConfig::default()
    };

    let result = apply_env_overrides(base.clone()).unwrap();

    assert_eq!(result, base);
}

#[test]
#[serial(multipage_overlap)]
fn apply_env_overrides_rejects_garbage() {
    let _guard = EnvGuard::new(OVERLAP_ENV_VAR);
    env::set_var(OVERLAP_ENV_VAR, "lots");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvValue { name: OVERLAP_ENV_VAR, .. })
    ));
}

#[test]
#[serial(multipage_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let explicit_path = temp_config("explicit", "overlap = 2");
    let env_path = temp_config("env", "overlap = 9");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();

    assert_eq!(
        config.overlap,
        Some(Overlap::new(2)),
        "Should use explicit path, not MULTIPAGE_CONFIG"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(multipage_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let env_path = temp_config("env_only", r#"flag_scope = "group""#);
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(None).unwrap().unwrap();

    assert_eq!(config.flag_scope, Some(FlagScope::Group));

    fs::remove_file(env_path).ok();
}

#[test]
#[serial(multipage_config)]
fn load_config_with_precedence_env_var_to_missing_file_is_not_an_error() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/multipage/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

// ===== CLI overrides =====

#[test]
fn apply_cli_overrides_overlap_override() {
    let result = apply_cli_overrides(ResolvedConfig::default(), Some(Overlap::NONE));
    assert_eq!(result.overlap, Overlap::NONE);
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None), base);
}

#[test]
#[serial(multipage_overlap)]
fn precedence_chain_full_defaults_to_cli() {
    let _guard = EnvGuard::new(OVERLAP_ENV_VAR);
    let file = ConfigFile {
        overlap: Some(Overlap::new(2)),
        flag_scope: Some(FlagScope::Group),
        log_file_path: None,
    };

    let merged = merge_config(Some(file));
    assert_eq!(merged.overlap, Overlap::new(2));

    env::set_var(OVERLAP_ENV_VAR, "3");
    let with_env = apply_env_overrides(merged).unwrap();
    assert_eq!(with_env.overlap, Overlap::new(3));

    let final_config = apply_cli_overrides(with_env, Some(Overlap::new(4)));
    assert_eq!(final_config.overlap, Overlap::new(4));
    assert_eq!(final_config.flag_scope, FlagScope::Group, "file value survives");
}
