use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates the configuration file at `path`
///
/// Keys are kebab-case and every key is optional; see [`Config`] for defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns the hex SHA-256 of the configuration file at `path`
///
/// Logged at startup so a set of artifacts can be traced back to the
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration and returns it with the hash of the exact bytes parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DetailLocator;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scraper]
base-url = "https://www.tradingview.com/pine-script-reference/"
versions = [5, 6]
concurrency-limit = 8
per-item-cap = 3
detail-mode = "page"
wait-timeout-ms = 30000

[user-agent]
crawler-name = "TestHarvester"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[output]
directory = "./out"
summary-path = "./out/summary.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scraper.versions.len(), 2);
        assert_eq!(config.scraper.concurrency_limit, 8);
        assert_eq!(config.scraper.item_cap(), Some(3));
        assert_eq!(config.scraper.detail_mode, DetailLocator::Page);
        assert_eq!(config.scraper.wait_timeout().as_secs(), 30);
        assert_eq!(config.user_agent.crawler_name, "TestHarvester");
        assert_eq!(config.output.directory, "./out");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scraper.versions.len(), 4);
        assert_eq!(config.scraper.wait_timeout_ms, 60_000);
        assert_eq!(config.scraper.item_cap(), None);
        assert_eq!(config.scraper.detail_mode, DetailLocator::Fragment);
        assert!(config.scraper.respect_robots);
    }

    #[test]
    fn test_zero_cap_is_unbounded() {
        let file = create_temp_config("[scraper]\nper-item-cap = 0\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.scraper.item_cap(), None);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let file = create_temp_config("[scraper]\nversions = [2]\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[scraper]\nconcurrency-limit = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_load_with_hash_matches_file_hash() {
        let file = create_temp_config("[scraper]\nversions = [6]\n");
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.scraper.versions.len(), 1);
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
