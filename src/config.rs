use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub smtp: SmtpSettings,
    pub idempotency: IdempotencySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Shared secret compared against the X-API-Key header.
    /// Empty disables authentication.
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub use_starttls: bool,
    pub timeout_secs: u64,
}

impl SmtpSettings {
    /// Returns true when enough is configured to construct a sender.
    /// Host and from address are required; credentials are optional
    /// (local relays accept unauthenticated mail).
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.from.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdempotencySettings {
    pub ttl_seconds: i64,
    /// Interval for the background sweep of expired entries; 0 disables it.
    pub sweep_interval_seconds: u64,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("application.port", 8084)?
            .set_default("application.log_level", "info")?
            .set_default("application.log_format", "pretty")?
            .set_default("auth.api_key", "")?
            .set_default("smtp.host", "")?
            .set_default("smtp.port", 587)?
            .set_default("smtp.username", "")?
            .set_default("smtp.password", "")?
            .set_default("smtp.from", "")?
            .set_default("smtp.use_starttls", true)?
            .set_default("smtp.timeout_secs", 30)?
            .set_default("idempotency.ttl_seconds", 300)?
            .set_default("idempotency.sweep_interval_seconds", 300)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        builder.build()?.try_deserialize()
    }
}
