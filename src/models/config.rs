//! Service configuration loaded from `config/settings.yaml` and `APP__*`
//! environment variables.

use serde::{Deserialize, Serialize};

/// Configuration options for the blog service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Key used to sign flash message cookies. At least 64 bytes; a random
    /// key is generated when absent.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Recipient of contact form notifications.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub site: SiteSettings,
}

/// Outgoing mail settings. Without `smtp_host` emails are only logged.
#[derive(Clone, Debug, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: default_from_address(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Site-wide settings exposed to every template.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSettings {
    pub site_name: String,
    pub theme: String,
    pub google_analytics_key: Option<String>,
    pub open_graph_type: String,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub youtube_url: Option<String>,
    pub linkedin_url: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "myblog".to_string(),
            theme: "default".to_string(),
            google_analytics_key: None,
            open_graph_type: "website".to_string(),
            facebook_url: None,
            instagram_url: None,
            twitter_url: None,
            youtube_url: None,
            linkedin_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the optional YAML file and the environment.
    ///
    /// Environment variables use the `APP` prefix and `__` as the nesting
    /// separator, e.g. `APP__EMAIL__SMTP_HOST`.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/settings").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_static_dir() -> String {
    "assets".to_string()
}

fn default_contact_email() -> String {
    "contact@example.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "myblog <noreply@example.com>".to_string()
}

fn default_queue_capacity() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_defaults_for_missing_sections() {
        let config: ServerConfig =
            serde_json::from_value(serde_json::json!({ "database_url": "blog.db" })).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.email.queue_capacity, 64);
        assert!(config.email.smtp_host.is_none());
        assert_eq!(config.site.theme, "default");
    }

    #[test]
    fn site_settings_accept_partial_overrides() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "database_url": "blog.db",
            "site": { "site_name": "Notes", "twitter_url": "https://twitter.com/notes" }
        }))
        .unwrap();

        assert_eq!(config.site.site_name, "Notes");
        assert_eq!(config.site.open_graph_type, "website");
        assert_eq!(
            config.site.twitter_url.as_deref(),
            Some("https://twitter.com/notes")
        );
    }
}
