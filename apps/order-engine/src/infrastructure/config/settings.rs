//! Environment-based settings.
//!
//! Everything has a sensible local-development default; nothing is
//! secret, so a missing variable is never fatal.

/// Runtime settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Port the HTTP server binds to.
    pub http_port: u16,
    /// Path of the turso database, `:memory:` for ephemeral.
    pub database_path: String,
    /// Capacity of each realtime broadcast channel.
    pub change_feed_capacity: usize,
    /// User ids granted the admin role, recipients of every order
    /// fan-out.
    pub admin_user_ids: Vec<String>,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if a variable is set but
    /// empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_path =
            std::env::var("ORDER_ENGINE_DB_PATH").unwrap_or_else(|_| ":memory:".to_string());
        if database_path.is_empty() {
            return Err(ConfigError::EmptyValue("ORDER_ENGINE_DB_PATH".to_string()));
        }

        Ok(Self {
            http_port: parse_env_u16("ORDER_ENGINE_HTTP_PORT", 8080),
            database_path,
            change_feed_capacity: parse_env_usize("ORDER_ENGINE_FEED_CAPACITY", 1_000),
            admin_user_ids: parse_id_list(
                &std::env::var("ORDER_ENGINE_ADMIN_IDS").unwrap_or_default(),
            ),
        })
    }
}

/// Split a comma-separated id list, dropping whitespace and empties.
fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_port: 8080,
            database_path: ":memory:".to_string(),
            change_feed_capacity: 1_000,
            admin_user_ids: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_friendly() {
        let settings = Settings::default();
        assert_eq!(settings.http_port, 8080);
        assert_eq!(settings.database_path, ":memory:");
        assert_eq!(settings.change_feed_capacity, 1_000);
        assert!(settings.admin_user_ids.is_empty());
    }

    #[test]
    fn admin_list_splits_on_commas_and_trims() {
        assert_eq!(
            parse_id_list("admin-1, admin-2 ,,admin-3"),
            vec!["admin-1", "admin-2", "admin-3"]
        );
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(" , ").is_empty());
    }
}
