//! Runtime configuration read from the environment.

use lesson_core::DEFAULT_DAILY_GOAL;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. Without one the server keeps everything in memory.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub daily_xp_goal: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            daily_xp_goal: DEFAULT_DAILY_GOAL,
        }
    }
}

impl Config {
    /// Load from process environment (after `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(port) => port.parse()?,
            None => defaults.port,
        };
        let daily_xp_goal = match lookup("DAILY_XP_GOAL") {
            Some(goal) => goal.parse()?,
            None => defaults.daily_xp_goal,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            daily_xp_goal,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
