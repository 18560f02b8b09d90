//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `KINVEY_APP_KEY` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `KINVEY_APP_KEY`: Application key (required)
//! - `KINVEY_APP_SECRET`: Application secret (required)
//! - `KINVEY_BASE_URL`: Backend host, defaults to `https://baas.kinvey.com/`
//! - `KINVEY_API_VERSION`: Value of the `X-Kinvey-API-Version` header
//! - `KINVEY_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `KINVEY_MAX_ATTEMPTS`: Total attempts per request (1 = no retries)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./kinvey.json` or `./kinvey.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use kinvey_domain::{ClientConfig, KinveyError, Result};

const CONFIG_FILE_NAMES: &[&str] = &["kinvey.json", "kinvey.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. Falls back to a
/// config file only when `KINVEY_APP_KEY` is unset; once the environment
/// names an app, its errors are returned as-is.
///
/// # Errors
/// Returns `KinveyError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The app key or secret is missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) if std::env::var_os("KINVEY_APP_KEY").is_some() => Err(e),
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load a `.env` file into the process environment, if one exists.
///
/// Returns the path that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) => {
            tracing::debug!(error = %e, "No .env file loaded");
            None
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `KinveyError::Config` if required variables are missing
/// or optional ones have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let app_key = env_var("KINVEY_APP_KEY")?;
    let app_secret = env_var("KINVEY_APP_SECRET")?;

    let mut config = ClientConfig::new(app_key, app_secret);
    if let Ok(base_url) = std::env::var("KINVEY_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(version) = env_parse("KINVEY_API_VERSION")? {
        config.api_version = version;
    }
    if let Some(timeout) = env_parse("KINVEY_TIMEOUT_SECS")? {
        config.timeout_secs = timeout;
    }
    if let Some(attempts) = env_parse("KINVEY_MAX_ATTEMPTS")? {
        config.max_attempts = attempts;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `KinveyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(KinveyError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            KinveyError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| KinveyError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| KinveyError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| KinveyError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(KinveyError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its parent and grandparent, then the
/// same three levels relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `KinveyError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| KinveyError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| KinveyError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: &[&str] = &[
        "KINVEY_APP_KEY",
        "KINVEY_APP_SECRET",
        "KINVEY_BASE_URL",
        "KINVEY_API_VERSION",
        "KINVEY_TIMEOUT_SECS",
        "KINVEY_MAX_ATTEMPTS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("KINVEY_APP_KEY", "kid_env");
        std::env::set_var("KINVEY_APP_SECRET", "env-secret");
        std::env::set_var("KINVEY_BASE_URL", "http://localhost:9000/");
        std::env::set_var("KINVEY_TIMEOUT_SECS", "5");
        std::env::set_var("KINVEY_MAX_ATTEMPTS", "2");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.app_key, "kid_env");
        assert_eq!(config.app_secret, "env-secret");
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.api_version, 3);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_attempts, 2);
    }

    #[test]
    fn test_load_from_env_missing_secret() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("KINVEY_APP_KEY", "kid_env");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(KinveyError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("KINVEY_APP_KEY", "kid_env");
        std::env::set_var("KINVEY_APP_SECRET", "env-secret");
        std::env::set_var("KINVEY_TIMEOUT_SECS", "soon");
        let result = load_from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("KINVEY_TIMEOUT_SECS"));
    }

    #[test]
    fn test_load_reports_env_error_when_app_key_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("KINVEY_APP_KEY", "kid_env");
        std::env::set_var("KINVEY_APP_SECRET", "env-secret");
        std::env::set_var("KINVEY_TIMEOUT_SECS", "abc");
        let result = load();
        clear_env();

        match result {
            Err(KinveyError::Config(msg)) => {
                assert!(msg.contains("KINVEY_TIMEOUT_SECS"), "got {msg}");
                assert!(!msg.contains("No config file found"));
            }
            other => panic!("expected env config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{"app_key": "kid_file", "app_secret": "file-secret", "timeout_secs": 12}"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON file");
        assert_eq!(config.app_key, "kid_file");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.base_url, "https://baas.kinvey.com/");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            "app_key = \"kid_toml\"\napp_secret = \"toml-secret\"\nbase_url = \"http://127.0.0.1:1\"\n",
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML file");
        assert_eq!(config.app_key, "kid_toml");
        assert_eq!(config.normalized_base_url(), "http://127.0.0.1:1/");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_blank_key_is_rejected() {
        let path = write_temp(r#"{"app_key": "", "app_secret": "s"}"#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(matches!(result, Err(KinveyError::Config(_))));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/kinvey.json")));
        assert!(matches!(result, Err(KinveyError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("app_key: k", &PathBuf::from("kinvey.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_parse_config_invalid_json() {
        let result = parse_config(r#"{ "app_key": "#, &PathBuf::from("kinvey.json"));
        assert!(matches!(result, Err(KinveyError::Config(msg)) if msg.contains("Invalid JSON")));
    }
}
