//! Configuration management
//!
//! Workflow configuration is read once per invocation from environment
//! variables, optionally layered over a TOML settings file stored at
//! ~/.config/snaptool/config.toml. Environment values always win.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::retention::{DEFAULT_RETENTION_DAYS, RetentionPolicy};

/// Current settings file schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Sentinel meaning "no key override"
pub const NO_KEY_OVERRIDE: &str = "None";

/// `REGION_OVERRIDE` value meaning "use the default region"
const NO_REGION_OVERRIDE: &str = "NO";

const DEFAULT_COPY_PATTERN: &str = "ALL_SNAPSHOTS";
const DEFAULT_PATTERN: &str = "ALL_INSTANCES";
const DEFAULT_LOG_LEVEL: &str = "ERROR";

/// Optional settings file; every field may also come from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub pattern: Option<String>,
    pub snapshot_pattern: Option<String>,
    pub region: Option<String>,
    pub dest_region: Option<String>,
    pub retention_days: Option<i64>,
    pub kms_key_dest_region: Option<String>,
    pub kms_key_source_region: Option<String>,
    pub dest_account: Option<String>,
    pub share_escalate_failures: Option<bool>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            pattern: None,
            snapshot_pattern: None,
            region: None,
            dest_region: None,
            retention_days: None,
            kms_key_dest_region: None,
            kms_key_source_region: None,
            dest_account: None,
            share_escalate_failures: None,
        }
    }
}

impl Settings {
    /// Settings value for an environment variable name
    fn value(&self, key: &str) -> Option<String> {
        match key {
            "PATTERN" => self.pattern.clone(),
            "SNAPSHOT_PATTERN" => self.snapshot_pattern.clone(),
            "DEST_REGION" => self.dest_region.clone(),
            "RETENTION_DAYS" => self.retention_days.map(|d| d.to_string()),
            "KMS_KEY_DEST_REGION" => self.kms_key_dest_region.clone(),
            "KMS_KEY_SOURCE_REGION" => self.kms_key_source_region.clone(),
            "DEST_ACCOUNT" => self.dest_account.clone(),
            "SHARE_ESCALATE_FAILURES" => self.share_escalate_failures.map(|b| b.to_string()),
            _ => None,
        }
    }
}

/// Loads the optional settings file
#[derive(Debug)]
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    /// Create a SettingsManager with the default path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        Ok(Self {
            path: config_dir.join("snaptool").join("config.toml"),
        })
    }

    /// Create a SettingsManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load settings from disk
    ///
    /// A missing file yields empty settings.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let settings: Settings = toml::from_str(&content)?;

        if settings.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Settings file version {} is newer than supported version {}. Please upgrade snaptool.",
                settings.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }
}

/// Encryption key override for cross-region copies
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyOverride {
    /// Use the default behavior for the snapshot
    #[default]
    Default,
    /// Use this key identifier
    Key(String),
}

impl KeyOverride {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Default,
            Some(v) if v.eq_ignore_ascii_case(NO_KEY_OVERRIDE) => Self::Default,
            Some(v) => Self::Key(v.to_string()),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Key(k) => Some(k),
        }
    }
}

/// Value source: environment lookup first, settings file second
pub struct Source<'a> {
    lookup: Box<dyn Fn(&str) -> Option<String> + 'a>,
    settings: &'a Settings,
}

impl<'a> Source<'a> {
    pub fn new(settings: &'a Settings, lookup: impl Fn(&str) -> Option<String> + 'a) -> Self {
        Self {
            lookup: Box::new(lookup),
            settings,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| self.settings.value(key))
    }

    fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| Error::Config(format!("{key} must be set")))
    }

    fn retention(&self, default: Option<i64>) -> Result<RetentionPolicy> {
        let days = match (self.get("RETENTION_DAYS"), default) {
            (Some(raw), _) => raw.parse::<i64>().map_err(|_| {
                Error::Config(format!("RETENTION_DAYS must be an integer, got '{raw}'"))
            })?,
            (None, Some(days)) => days,
            (None, None) => return Err(Error::Config("RETENTION_DAYS must be set".into())),
        };
        Ok(RetentionPolicy::new(days))
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(Error::Config(format!("{key} must be true or false, got '{raw}'"))),
            },
        }
    }

    /// Region the workflow inspects
    ///
    /// `REGION_OVERRIDE` wins unless it is `NO`; then `AWS_DEFAULT_REGION`,
    /// `AWS_REGION`, and finally the settings file.
    pub fn region(&self) -> Result<String> {
        if let Some(region) = self
            .get("REGION_OVERRIDE")
            .filter(|r| r != NO_REGION_OVERRIDE)
        {
            return Ok(region);
        }

        self.get("AWS_DEFAULT_REGION")
            .or_else(|| self.get("AWS_REGION"))
            .or_else(|| self.settings.region.clone())
            .ok_or_else(|| {
                Error::Config("REGION_OVERRIDE or AWS_DEFAULT_REGION must be set".into())
            })
    }
}

/// Tracing filter directive derived from `LOG_LEVEL`
///
/// Accepts the usual level names in any case, including `WARNING` and
/// `CRITICAL`. Defaults to `error`.
pub fn log_directive(level: Option<&str>) -> String {
    let level = level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_ascii_lowercase();

    match level.as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        _ => level,
    }
}

/// Configuration of the copy workflow
#[derive(Debug, Clone)]
pub struct CopyConfig {
    pub pattern: Pattern,
    pub region: String,
    pub dest_region: String,
    pub retention: RetentionPolicy,
    pub kms_key_source: KeyOverride,
    pub kms_key_dest: KeyOverride,
}

impl CopyConfig {
    pub fn resolve(source: &Source<'_>) -> Result<Self> {
        let pattern = source
            .get("SNAPSHOT_PATTERN")
            .or_else(|| source.get("PATTERN"))
            .unwrap_or_else(|| DEFAULT_COPY_PATTERN.to_string());

        Ok(Self {
            pattern: Pattern::parse(&pattern)?,
            region: source.region()?,
            dest_region: source.require("DEST_REGION")?,
            retention: source.retention(None)?,
            kms_key_source: KeyOverride::parse(source.get("KMS_KEY_SOURCE_REGION").as_deref()),
            kms_key_dest: KeyOverride::parse(source.get("KMS_KEY_DEST_REGION").as_deref()),
        })
    }
}

/// Configuration of the delete workflow
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    pub pattern: Pattern,
    pub region: String,
    pub retention: RetentionPolicy,
}

impl DeleteConfig {
    pub fn resolve(source: &Source<'_>) -> Result<Self> {
        let pattern = source
            .get("PATTERN")
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

        Ok(Self {
            pattern: Pattern::parse(&pattern)?,
            region: source.region()?,
            retention: source.retention(Some(DEFAULT_RETENTION_DAYS))?,
        })
    }
}

/// Configuration of the share workflow
#[derive(Debug, Clone)]
pub struct ShareConfig {
    pub pattern: Pattern,
    pub region: String,
    pub dest_account: String,
    /// Raise the aggregate error when shares are pending
    pub escalate_failures: bool,
}

impl ShareConfig {
    pub fn resolve(source: &Source<'_>) -> Result<Self> {
        let pattern = source
            .get("PATTERN")
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

        Ok(Self {
            pattern: Pattern::parse(&pattern)?,
            region: source.region()?,
            dest_account: source.require("DEST_ACCOUNT")?,
            escalate_failures: source.flag("SHARE_ESCALATE_FAILURES")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn source<'a>(settings: &'a Settings, vars: &'a HashMap<String, String>) -> Source<'a> {
        Source::new(settings, move |key| vars.get(key).cloned())
    }

    #[test]
    fn test_region_override_takes_precedence() {
        let settings = Settings::default();
        let vars = env(&[
            ("REGION_OVERRIDE", "eu-central-1"),
            ("AWS_DEFAULT_REGION", "us-east-1"),
        ]);
        assert_eq!(source(&settings, &vars).region().unwrap(), "eu-central-1");

        let vars = env(&[("REGION_OVERRIDE", "NO"), ("AWS_DEFAULT_REGION", "us-east-1")]);
        assert_eq!(source(&settings, &vars).region().unwrap(), "us-east-1");

        let vars = env(&[]);
        assert!(matches!(
            source(&settings, &vars).region(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_copy_config_requires_dest_and_retention() {
        let settings = Settings::default();
        let vars = env(&[("AWS_DEFAULT_REGION", "us-east-1")]);
        let err = CopyConfig::resolve(&source(&settings, &vars)).unwrap_err();
        assert!(err.to_string().contains("DEST_REGION"));

        let vars = env(&[("AWS_DEFAULT_REGION", "us-east-1"), ("DEST_REGION", "us-west-2")]);
        let err = CopyConfig::resolve(&source(&settings, &vars)).unwrap_err();
        assert!(err.to_string().contains("RETENTION_DAYS"));
    }

    #[test]
    fn test_copy_config_resolves() {
        let settings = Settings::default();
        let vars = env(&[
            ("AWS_DEFAULT_REGION", "us-east-1"),
            ("DEST_REGION", " us-west-2 "),
            ("RETENTION_DAYS", "7"),
            ("SNAPSHOT_PATTERN", "db-prod-.*"),
            ("KMS_KEY_DEST_REGION", "arn:aws:kms:us-west-2:111122223333:key/abc"),
            ("KMS_KEY_SOURCE_REGION", "None"),
        ]);
        let config = CopyConfig::resolve(&source(&settings, &vars)).unwrap();

        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.dest_region, "us-west-2");
        assert_eq!(config.retention.days, 7);
        assert_eq!(config.pattern.as_str(), "db-prod-.*");
        assert_eq!(config.kms_key_source, KeyOverride::Default);
        assert_eq!(
            config.kms_key_dest.key(),
            Some("arn:aws:kms:us-west-2:111122223333:key/abc")
        );
    }

    #[test]
    fn test_delete_config_defaults() {
        let settings = Settings::default();
        let vars = env(&[("AWS_DEFAULT_REGION", "us-east-1")]);
        let config = DeleteConfig::resolve(&source(&settings, &vars)).unwrap();
        assert!(matches!(config.pattern, Pattern::All));
        assert_eq!(config.retention.days, DEFAULT_RETENTION_DAYS);
    }

    #[test]
    fn test_retention_days_must_be_integer() {
        let settings = Settings::default();
        let vars = env(&[("AWS_DEFAULT_REGION", "us-east-1"), ("RETENTION_DAYS", "seven")]);
        let err = DeleteConfig::resolve(&source(&settings, &vars)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_share_config() {
        let settings = Settings::default();
        let vars = env(&[("AWS_DEFAULT_REGION", "us-east-1")]);
        assert!(ShareConfig::resolve(&source(&settings, &vars)).is_err());

        let vars = env(&[
            ("AWS_DEFAULT_REGION", "us-east-1"),
            ("DEST_ACCOUNT", "111122223333"),
        ]);
        let config = ShareConfig::resolve(&source(&settings, &vars)).unwrap();
        assert_eq!(config.dest_account, "111122223333");
        assert!(!config.escalate_failures);

        let vars = env(&[
            ("AWS_DEFAULT_REGION", "us-east-1"),
            ("DEST_ACCOUNT", "111122223333"),
            ("SHARE_ESCALATE_FAILURES", "maybe"),
        ]);
        assert!(ShareConfig::resolve(&source(&settings, &vars)).is_err());
    }

    #[test]
    fn test_key_override_sentinel() {
        assert_eq!(KeyOverride::parse(None), KeyOverride::Default);
        assert_eq!(KeyOverride::parse(Some("None")), KeyOverride::Default);
        assert_eq!(KeyOverride::parse(Some("  ")), KeyOverride::Default);
        assert_eq!(
            KeyOverride::parse(Some("alias/dr")),
            KeyOverride::Key("alias/dr".into())
        );
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(None), "error");
        assert_eq!(log_directive(Some("INFO")), "info");
        assert_eq!(log_directive(Some("WARNING")), "warn");
        assert_eq!(log_directive(Some("CRITICAL")), "error");
        assert_eq!(log_directive(Some("debug ")), "debug");
    }

    #[test]
    fn test_settings_file_layered_under_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            schema_version = 1
            region = "eu-west-1"
            pattern = "^db-prod"
            retention_days = 14
            "#,
        )
        .unwrap();

        let settings = SettingsManager::with_path(path).load().unwrap();
        let vars = env(&[("RETENTION_DAYS", "3")]);
        let config = DeleteConfig::resolve(&source(&settings, &vars)).unwrap();

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.pattern.as_str(), "^db-prod");
        assert_eq!(config.retention.days, 3);
    }

    #[test]
    fn test_missing_settings_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::with_path(temp_dir.path().join("absent.toml"));
        let settings = manager.load().unwrap();
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert!(settings.pattern.is_none());
    }

    #[test]
    fn test_schema_version_too_new() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, format!("schema_version = {}\n", SCHEMA_VERSION + 1)).unwrap();

        let result = SettingsManager::with_path(path).load();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("newer than supported")
        );
    }
}
