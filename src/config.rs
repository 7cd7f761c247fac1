use std::env;
use std::path::PathBuf;

/// Dashboard configuration derived from environment variables.
///
/// Every value has a default, so the dashboard runs without any environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub csv_path: PathBuf,
    pub bind: String,
    pub port: u16,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            csv_path: PathBuf::from("crypto_value.csv"),
            bind: "127.0.0.1".to_string(),
            port: 8050,
            chart_width: 1024,
            chart_height: 768,
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        DashboardConfig {
            csv_path: PathBuf::from(env_str("CRYPTO_CSV_PATH", &defaults.csv_path.to_string_lossy())),
            bind: env_str("DASHBOARD_BIND", &defaults.bind),
            port: env_u16("DASHBOARD_PORT", defaults.port),
            chart_width: env_u32("CHART_WIDTH", defaults.chart_width),
            chart_height: env_u32("CHART_HEIGHT", defaults.chart_height),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
