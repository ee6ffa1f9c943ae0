use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
        }
    }
}

impl HttpConfig {
    const fn default_port() -> u16 {
        3000
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "DatabaseConfig::default_reports_url")]
    pub reports_url: String,
    #[serde(default = "DatabaseConfig::default_persons_url")]
    pub persons_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            reports_url: Self::default_reports_url(),
            persons_url: Self::default_persons_url(),
        }
    }
}

impl DatabaseConfig {
    fn default_reports_url() -> String {
        "sqlite://banned_ids.db?mode=rwc".to_string()
    }

    fn default_persons_url() -> String {
        "sqlite://banned_persons.db?mode=rwc".to_string()
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("grayward");

        let config_path = config_dir.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'grayward init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("grayward");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "bot_token": "your-telegram-bot-token-here"
  },
  "http": {
    "port": 3000
  },
  "database": {
    "reports_url": "sqlite://banned_ids.db?mode=rwc",
    "persons_url": "sqlite://banned_persons.db?mode=rwc"
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token");
        println!("   2. Run 'grayward run' to start the bot and the HTTP API");
        println!();
        println!("🔧 Configuration options:");
        println!("   - http.port: listen port for the read-only HTTP API");
        println!("   - database.reports_url: SQLite database for report bans");
        println!("   - database.persons_url: SQLite database for person bans");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"telegram": {"bot_token": "t"}}"#).unwrap();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.database.reports_url, "sqlite://banned_ids.db?mode=rwc");
        assert_eq!(
            config.database.persons_url,
            "sqlite://banned_persons.db?mode=rwc"
        );
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let config: Config = serde_json::from_str(
            r#"{
                "telegram": {"bot_token": "t"},
                "http": {"port": 8080},
                "database": {"reports_url": "sqlite://a.db", "persons_url": "sqlite://b.db"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.database.reports_url, "sqlite://a.db");
    }
}
