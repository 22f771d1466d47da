use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use student_core::DEFAULT_LIMIT;

/// Settings for the admin host.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AdminConfig {
    /// Root URL of the REST backend serving `/students`.
    pub base_url: String,
    /// Rows per list page.
    pub page_limit: u32,
    pub log_level: String,
}

impl AdminConfig {
    /// Defaults, then `student-admin.{toml,json,yaml}`, then `STUDENT_ADMIN_*`.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("student-admin").required(false))
            .add_source(Environment::with_prefix("STUDENT_ADMIN").try_parsing(true));
        Self::finish(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", "http://localhost:3000")?
            .set_default("page_limit", i64::from(DEFAULT_LIMIT))?
            .set_default("log_level", "info")
    }

    pub fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AdminConfig = builder.build()?.try_deserialize()?;
        if config.page_limit == 0 {
            return Err(ConfigError::Message("page_limit must be at least 1".to_string()));
        }
        Ok(config)
    }
}
