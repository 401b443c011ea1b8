//! Loading configuration from files on disk.

use std::io::Write;

use sieve_config::{ConfigError, ConfigLoader, LogFormat};
use sieve_core::ParamType;
use tempfile::{Builder, NamedTempFile};

fn file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const ROUTES_TOML: &str = r#"
[extract]
max_body_size = 65536

[logging]
level = "debug"
format = "pretty"

[[routes]]
route = "/api/find/"
purpose = "find records"
help = true

[[routes.params]]
name = "q"
required = true
memo = "search text"

[[routes.params]]
name = "limit"
type = "int"
default = 20

[[routes.params]]
name = "kind"
position = 1
methods = "get,post"

[[routes]]
route = "/api/ping"
"#;

#[test]
fn toml_file_with_routes() {
    let file = file_with(".toml", ROUTES_TOML);
    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();

    assert_eq!(config.extract.max_body_size, 65536);
    assert_eq!(config.extract.max_multipart_fields, 100);
    assert_eq!(config.logging.format, LogFormat::Pretty);

    let schemas = config.compile_routes().unwrap();
    assert_eq!(schemas.len(), 2);

    let find = &schemas[0];
    assert_eq!(find.route(), "/api/find");
    assert!(find.has_help());
    assert_eq!(find.positional()[0].name(), "kind");
    assert_eq!(find.param("limit").unwrap().param_type(), ParamType::Int);
    assert_eq!(find.usage(), "/api/find/[kind]?[help]&[limit]&<q>");

    let help = find.help();
    assert_eq!(help.purpose, "find records");
    assert_eq!(help.args.len(), 4);
}

#[test]
fn json_file() {
    let file = file_with(
        ".json",
        r#"{"logging": {"level": "warn"}, "routes": [{"route": "/x"}]}"#,
    );
    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.routes.len(), 1);
}

#[test]
fn missing_and_optional_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        ConfigLoader::new().with_file(&path),
        Err(ConfigError::FileNotFound { .. })
    ));

    let config = ConfigLoader::new()
        .with_optional_file(&path)
        .unwrap()
        .load()
        .unwrap();
    assert!(config.routes.is_empty());
}

#[test]
fn unsupported_extension() {
    let file = file_with(".yaml", "logging: {}");
    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("unsupported configuration"));
}

#[test]
fn invalid_route_declaration() {
    let file = file_with(
        ".toml",
        r#"
[[routes]]
route = "/bad"

[[routes.params]]
name = "n"
type = "int"
default = "ten"
"#,
    );
    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    let err = config.compile_routes().unwrap_err();
    assert!(err.to_string().starts_with("route /bad:"));
}

#[test]
fn dotenv_file_feeds_overrides() {
    let file = file_with(
        ".env",
        "SIEVE_DOTENV_TEST__LOGGING__LEVEL=trace\nSIEVE_DOTENV_TEST__EXTRACT__MAX_MULTIPART_FIELDS=7\n",
    );
    let config = ConfigLoader::new()
        .with_dotenv_file(file.path())
        .unwrap()
        .with_env_prefix("SIEVE_DOTENV_TEST")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.extract.max_multipart_fields, 7);
}

#[test]
fn missing_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ConfigLoader::new().with_dotenv_file(dir.path().join(".env")),
        Err(ConfigError::Dotenv(_))
    ));
}
