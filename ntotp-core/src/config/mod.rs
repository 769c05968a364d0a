//! Configuration module
//!
//! Handles loading ntotp settings from a TOML file. Every section is
//! optional and falls back to defaults.

use serde::Deserialize;

pub mod toml_config;

/// Servers used when none are configured, tried in this order
pub const DEFAULT_NTP_SERVERS: [&str; 8] = [
    "ntp.aliyun.com:123",
    "cn.ntp.org.cn:123",
    "time.asia.apple.com:123",
    "ntp.neu.edu.cn:123",
    "time1.cloud.tencent.com:123",
    "ntp1.aliyun.com:123",
    "time3.cloud.tencent.com:123",
    "ntp4.aliyun.com:123",
];

/// Largest accepted verification window, in steps either side
pub const MAX_SKEW_STEPS: u32 = 10;

/// Complete ntotp configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ntp: NtpConfig,

    #[serde(default)]
    pub totp: TotpConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// NTP time reference settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NtpConfig {
    /// Ordered `host:port` endpoints
    pub servers: Vec<String>,

    /// Per-server deadline for the whole request/response exchange
    pub timeout_secs: u64,

    /// Use the local clock when every server fails (degraded mode)
    pub allow_local_clock_fallback: bool,
}

impl Default for NtpConfig {
    fn default() -> Self {
        Self {
            servers: DEFAULT_NTP_SERVERS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: 2,
            allow_local_clock_fallback: false,
        }
    }
}

/// TOTP verification policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TotpConfig {
    /// Adjacent steps accepted on each side; 0 means exact step only
    pub skew_steps: u32,
}

/// Where `init` writes the secret file and QR image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub output_dir: String,
    pub write_qr: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            write_qr: true,
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ntp.servers.is_empty() {
            return Err("At least one NTP server is required".to_string());
        }

        if self.ntp.servers.iter().any(|s| s.trim().is_empty()) {
            return Err("NTP server entries cannot be empty".to_string());
        }

        if self.ntp.timeout_secs == 0 {
            return Err("NTP timeout cannot be zero".to_string());
        }

        if self.totp.skew_steps > MAX_SKEW_STEPS {
            return Err(format!(
                "TOTP skew cannot exceed {} steps",
                MAX_SKEW_STEPS
            ));
        }

        if self.storage.output_dir.is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }

        Ok(())
    }
}
