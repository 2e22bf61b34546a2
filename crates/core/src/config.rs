//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses. The binary
//! reads the environment; this module only parses values.

use std::time::Duration;

use medinfo_catalog::MatchFields;

use crate::session::ReclickPolicy;

/// Default simulated search latency, modelling a remote backend call.
pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(1500);

/// Maximum accepted image size for the upload surface.
pub const DEFAULT_UPLOAD_MAX_BYTES: u64 = 5 * 1024 * 1024; // 5 MiB

/// Errors raised while parsing configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Core configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    search_latency: Duration,
    disease_fields: MatchFields,
    drug_fields: MatchFields,
    reclick_policy: ReclickPolicy,
    upload_max_bytes: u64,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either catalog's field set is empty — a
    /// catalog that matches on nothing can never return results.
    pub fn new(
        search_latency: Duration,
        disease_fields: MatchFields,
        drug_fields: MatchFields,
        reclick_policy: ReclickPolicy,
        upload_max_bytes: u64,
    ) -> Result<Self, ConfigError> {
        if disease_fields.is_empty() {
            return Err(ConfigError::Invalid(
                "disease catalog must enable at least one match field".into(),
            ));
        }
        if drug_fields.is_empty() {
            return Err(ConfigError::Invalid(
                "drug catalog must enable at least one match field".into(),
            ));
        }
        if upload_max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "upload_max_bytes must be greater than zero".into(),
            ));
        }

        Ok(Self {
            search_latency,
            disease_fields,
            drug_fields,
            reclick_policy,
            upload_max_bytes,
        })
    }

    pub fn search_latency(&self) -> Duration {
        self.search_latency
    }

    pub fn disease_fields(&self) -> MatchFields {
        self.disease_fields
    }

    pub fn drug_fields(&self) -> MatchFields {
        self.drug_fields
    }

    pub fn reclick_policy(&self) -> ReclickPolicy {
        self.reclick_policy
    }

    pub fn upload_max_bytes(&self) -> u64 {
        self.upload_max_bytes
    }
}

impl Default for CoreConfig {
    /// The observed application behaviour: 1500 ms latency, broad disease
    /// matching, name-only drug matching, re-click keeps the record open,
    /// 5 MiB upload cap.
    fn default() -> Self {
        Self {
            search_latency: DEFAULT_SEARCH_LATENCY,
            disease_fields: MatchFields::BROAD,
            drug_fields: MatchFields::NAME_ONLY,
            reclick_policy: ReclickPolicy::KeepOpen,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

/// Parse the search latency from an optional env value (milliseconds).
///
/// `None` or blank returns the default.
pub fn search_latency_from_env_value(value: Option<String>) -> Result<Duration, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_SEARCH_LATENCY),
        Some(v) => {
            let ms: u64 = v.parse().map_err(|_| {
                ConfigError::Invalid(format!("search latency must be milliseconds, got {:?}", v))
            })?;
            Ok(Duration::from_millis(ms))
        }
    }
}

/// Parse the re-click policy from an optional env value.
///
/// Accepts `keep-open` or `collapse` (case-insensitive); `None` or blank
/// returns the default `KeepOpen`.
pub fn reclick_policy_from_env_value(value: Option<String>) -> Result<ReclickPolicy, ConfigError> {
    let value = value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(ReclickPolicy::KeepOpen),
        Some("keep-open") | Some("keep_open") => Ok(ReclickPolicy::KeepOpen),
        Some("collapse") => Ok(ReclickPolicy::Collapse),
        Some(other) => Err(ConfigError::Invalid(format!(
            "reclick policy must be keep-open or collapse, got {:?}",
            other
        ))),
    }
}

/// Parse the upload size cap from an optional env value (bytes).
///
/// `None` or blank returns the default 5 MiB cap.
pub fn upload_max_bytes_from_env_value(value: Option<String>) -> Result<u64, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_UPLOAD_MAX_BYTES),
        Some(v) => v.parse().map_err(|_| {
            ConfigError::Invalid(format!("upload max bytes must be a number, got {:?}", v))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_observed_behaviour() {
        let config = CoreConfig::default();
        assert_eq!(config.search_latency(), Duration::from_millis(1500));
        assert_eq!(config.disease_fields(), MatchFields::BROAD);
        assert_eq!(config.drug_fields(), MatchFields::NAME_ONLY);
        assert_eq!(config.reclick_policy(), ReclickPolicy::KeepOpen);
        assert_eq!(config.upload_max_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_empty_match_fields_rejected() {
        let empty = MatchFields {
            name: false,
            description: false,
            category: false,
            tags: false,
        };
        let result = CoreConfig::new(
            DEFAULT_SEARCH_LATENCY,
            empty,
            MatchFields::NAME_ONLY,
            ReclickPolicy::KeepOpen,
            DEFAULT_UPLOAD_MAX_BYTES,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_upload_cap_rejected() {
        let result = CoreConfig::new(
            DEFAULT_SEARCH_LATENCY,
            MatchFields::BROAD,
            MatchFields::NAME_ONLY,
            ReclickPolicy::KeepOpen,
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_latency_parse() {
        assert_eq!(
            search_latency_from_env_value(None).unwrap(),
            DEFAULT_SEARCH_LATENCY
        );
        assert_eq!(
            search_latency_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_SEARCH_LATENCY
        );
        assert_eq!(
            search_latency_from_env_value(Some("250".into())).unwrap(),
            Duration::from_millis(250)
        );
        assert!(search_latency_from_env_value(Some("fast".into())).is_err());
    }

    #[test]
    fn test_upload_max_bytes_parse() {
        assert_eq!(
            upload_max_bytes_from_env_value(None).unwrap(),
            DEFAULT_UPLOAD_MAX_BYTES
        );
        assert_eq!(
            upload_max_bytes_from_env_value(Some("1048576".into())).unwrap(),
            1024 * 1024
        );
        assert!(upload_max_bytes_from_env_value(Some("big".into())).is_err());
    }

    #[test]
    fn test_reclick_policy_parse() {
        assert_eq!(
            reclick_policy_from_env_value(None).unwrap(),
            ReclickPolicy::KeepOpen
        );
        assert_eq!(
            reclick_policy_from_env_value(Some("Collapse".into())).unwrap(),
            ReclickPolicy::Collapse
        );
        assert!(reclick_policy_from_env_value(Some("toggle".into())).is_err());
    }
}
