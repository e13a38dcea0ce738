// tests/config_model.rs

use std::error::Error;
use std::path::PathBuf;

use devserve::config::{StreamKind, load_and_validate};
use devserve::errors::DevserveError;
use devserve::select_services;
use devserve::types::{LineFormat, StreamLevel};
use devserve_test_utils::builders::{ConfigFileBuilder, ServiceConfigBuilder};
use devserve_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

/// Sanity-check that testdata/Devserve.toml is wired the way the docs describe.
#[test]
fn sample_config_is_parsed_correctly() -> TestResult {
    init_tracing();

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cfg = load_and_validate(manifest_dir.join("testdata/Devserve.toml"))?;

    assert_eq!(cfg.service.len(), 2);

    let caddy = cfg.service.get("caddy").expect("service caddy must exist");
    assert_eq!(caddy.cmd[0], "caddy");
    assert!(caddy.preflight);
    assert!(caddy.kill_name.is_none());

    let caddy_err = caddy.effective_stream(StreamKind::Stderr, &cfg.default);
    assert_eq!(caddy_err.level, StreamLevel::Info);
    assert_eq!(caddy_err.format, LineFormat::Json);

    let caddy_out = caddy.effective_stream(StreamKind::Stdout, &cfg.default);
    assert_eq!(caddy_out.level, StreamLevel::Info);
    assert_eq!(caddy_out.format, LineFormat::Plain);

    let php = cfg.service.get("php").expect("service php must exist");
    assert_eq!(
        php.cmd,
        vec![
            "php-cgi".to_string(),
            "-b".to_string(),
            "127.0.0.1:9090".to_string()
        ]
    );

    let php_err = php.effective_stream(StreamKind::Stderr, &cfg.default);
    assert_eq!(php_err.level, StreamLevel::Error);
    assert_eq!(php_err.format, LineFormat::Plain);

    Ok(())
}

#[test]
fn config_without_services_is_rejected() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Devserve.toml");
    std::fs::write(&path, "")?;

    let err = load_and_validate(&path).expect_err("empty config must fail validation");
    assert!(matches!(err, DevserveError::Config(_)));
    Ok(())
}

#[test]
fn empty_cmd_is_rejected() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Devserve.toml");
    std::fs::write(&path, "[service.broken]\ncmd = []\n")?;

    let err = load_and_validate(&path).expect_err("empty cmd must fail validation");
    assert!(matches!(err, DevserveError::Config(_)));
    Ok(())
}

#[test]
fn default_section_fills_unset_stream_fields() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_default_stderr(StreamLevel::Warn, LineFormat::Plain)
        .with_service("plain", ServiceConfigBuilder::new(&["true"]).build())
        .with_service(
            "loud",
            ServiceConfigBuilder::new(&["true"])
                .stderr_level(StreamLevel::Error)
                .build(),
        )
        .build();

    let plain = cfg.service.get("plain").expect("service plain must exist");
    let plain_err = plain.effective_stream(StreamKind::Stderr, &cfg.default);
    assert_eq!(plain_err.level, StreamLevel::Warn);

    // Service-level settings win over [default] field-by-field.
    let loud = cfg.service.get("loud").expect("service loud must exist");
    let loud_err = loud.effective_stream(StreamKind::Stderr, &cfg.default);
    assert_eq!(loud_err.level, StreamLevel::Error);
    assert_eq!(loud_err.format, LineFormat::Plain);

    // Stdout was never configured anywhere: built-in defaults.
    let plain_out = plain.effective_stream(StreamKind::Stdout, &cfg.default);
    assert_eq!(plain_out.level, StreamLevel::Info);
    assert_eq!(plain_out.format, LineFormat::Plain);

    Ok(())
}

#[test]
fn service_selection_rejects_unknown_names_and_preserves_order() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_service("a", ServiceConfigBuilder::new(&["true"]).build())
        .with_service("b", ServiceConfigBuilder::new(&["true"]).build())
        .with_service("c", ServiceConfigBuilder::new(&["true"]).build())
        .build();

    let err = select_services(&cfg, &["nope".to_string()])
        .expect_err("unknown --service name must be rejected");
    assert!(matches!(err, DevserveError::Config(_)));

    let all = select_services(&cfg, &[])?;
    assert_eq!(all, vec!["a".to_string(), "b".to_string(), "c".to_string()]);

    let some = select_services(&cfg, &["c".to_string(), "a".to_string()])?;
    assert_eq!(some, vec!["a".to_string(), "c".to_string()]);

    Ok(())
}
