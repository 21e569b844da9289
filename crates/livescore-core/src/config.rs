use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3010;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_MAX_TICKS: u32 = 9;
pub const DEFAULT_CONFIG_FILE: &str = "livescore.toml";

/// Top-level config (livescore.toml + LIVESCORE_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LivescoreConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Attach a permissive CORS layer so browser viewers on other origins
    /// can open the event stream.
    #[serde(default = "bool_true")]
    pub cors: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            cors: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,
    /// Fixed seed for the goal draw. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            max_ticks: DEFAULT_MAX_TICKS,
            seed: None,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}
fn default_max_ticks() -> u32 {
    DEFAULT_MAX_TICKS
}
fn bool_true() -> bool {
    true
}

impl LivescoreConfig {
    /// Load config from a TOML file with LIVESCORE_* env var overrides.
    ///
    /// File lookup: explicit path argument, then `./livescore.toml`.
    /// A missing file just leaves the defaults in place. Nested keys use a
    /// double underscore: `LIVESCORE_GATEWAY__PORT=4000`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        let config: LivescoreConfig =
            Figment::from(Serialized::defaults(LivescoreConfig::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed("LIVESCORE_").split("__"))
                .extract()
                .map_err(|e| crate::error::LivescoreError::Config(e.to_string()))?;

        config.validate()?;
        tracing::debug!(path, port = config.gateway.port, "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::LivescoreError;

        if self.simulation.tick_interval_ms == 0 {
            return Err(LivescoreError::InvalidSetting {
                key: "simulation.tick_interval_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.gateway.bind, self.gateway.port)
    }
}
