//! Configuration Loader Tests

use figment::Jail;
use rsm_domain::constants::BOUNDARY_ATTRIBUTE;
use rsm_domain::error::Error;
use rsm_domain::value_objects::BaseConfiguration;
use rsm_infrastructure::config::loader::{ConfigBuilder, ConfigLoader, validate_app_config};
use rsm_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

#[test]
fn test_config_loader_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .with_env_prefix("RSM_TEST_DEFAULTS")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.injector.boundary_attribute, BOUNDARY_ATTRIBUTE);
    assert_eq!(config.resolver.default_export, "default");
    assert!(config.bases.is_empty());
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rsm.toml");

    let original = ConfigBuilder::new()
        .with_boundary_attribute("::scope")
        .with_base(
            BaseConfiguration::new("https://app.example/")
                .with_protocol("cdn", "https://cdn.example"),
        )
        .build();

    let loader = ConfigLoader::new().with_config_path(&config_path);
    loader.save_to_file(&original, &config_path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loader.config_path(), Some(config_path.as_path()));
}

#[test]
fn test_toml_file_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rsm.toml");
    std::fs::write(
        &config_path,
        r#"
[logging]
level = "debug"
json_format = true

[resolver]
default_export = "main"

[[bases]]
base_uri = "/app/"
protocol = { foo = "somePath" }
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().with_config_path(&config_path).load().unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert_eq!(config.resolver.default_export, "main");
    assert_eq!(config.resolver.loadable_extension, "js");
    assert_eq!(config.bases[0].protocol["foo"], "somePath");
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("rsm.toml", "[logging]\nlevel = \"warn\"\n")?;
        jail.set_env("RSM_JAIL_LOGGING__LEVEL", "trace");
        jail.set_env("RSM_JAIL_INJECTOR__BOUNDARY_ATTRIBUTE", "::root");

        let config = ConfigLoader::new()
            .with_config_path("rsm.toml")
            .with_env_prefix("RSM_JAIL")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.injector.boundary_attribute, "::root");
        Ok(())
    });
}

#[test]
fn test_invalid_log_level_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rsm.toml");
    std::fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let err = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_invalid_base_uri_rejected() {
    let config = ConfigBuilder::new()
        .with_base(BaseConfiguration::new("mailto:someone@example.com"))
        .build();

    let err = validate_app_config(&config).unwrap_err();

    assert!(err.to_string().contains("mailto:someone@example.com"));
}

#[test]
fn test_empty_boundary_attribute_rejected() {
    let config = ConfigBuilder::new().with_boundary_attribute("  ").build();

    assert!(validate_app_config(&config).is_err());
}
