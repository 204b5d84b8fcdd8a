use buckboost_gateway::domain::device::DeviceVariant;
use buckboost_gateway::{GatewayConfig, PasswordSetting, SensorAuthPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "buckboost-gateway",
    author = "Buck-Boost Gateway Team",
    version,
    about = "Web gateway for a remote buck-boost power controller",
    long_about = "Authenticates an operator, caches telemetry from a single ESP32 power controller and forwards voltage, current and relay commands to it"
)]
pub struct Cli {
    /// Log at debug level to the console instead of the rolling log file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for the rolling log file
    #[arg(long, global = true, env = "BBG_LOG_DIR", default_value = "logs")]
    pub log_dir: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web gateway
    Run(RunArgs),
    /// Print a salted password hash for --password-hash
    #[command(name = "hash-password")]
    HashPassword {
        /// Password to hash
        password: String,
    },
}

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("secret").required(true).args(["password", "password_hash"])))]
pub struct RunArgs {
    /// Port to bind the web server to
    #[arg(short, long, env = "BBG_PORT", default_value = "5000")]
    pub port: u16,
    /// Host to bind the web server to
    #[arg(short = 'H', long, env = "BBG_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Address of the device (IP, host name or URL)
    #[arg(short, long, env = "BBG_DEVICE_URL", default_value = "http://192.168.1.100")]
    pub device_url: String,
    /// Timeout for each device request in milliseconds
    #[arg(long, env = "BBG_DEVICE_TIMEOUT_MS", default_value = "2000")]
    pub device_timeout_ms: u64,
    /// Firmware variant of the device
    #[arg(long, value_enum, env = "BBG_VARIANT", default_value = "voltage-current")]
    pub variant: VariantArg,
    /// Operator user name
    #[arg(short, long, env = "BBG_USERNAME", default_value = "user")]
    pub username: String,
    /// Operator password in plaintext
    #[arg(long, env = "BBG_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Operator password as produced by `hash-password`
    #[arg(long, env = "BBG_PASSWORD_HASH", hide_env_values = true)]
    pub password_hash: Option<String>,
    /// Session lifetime in seconds, extended on each request
    #[arg(long, env = "BBG_SESSION_TTL_SECS", default_value = "28800")]
    pub session_ttl_secs: u64,
    /// Directory for command.json and sensordata.json
    #[arg(long, env = "BBG_JOURNAL_DIR", default_value = "data")]
    pub journal_dir: PathBuf,
    /// Do not write the command and sensor journals
    #[arg(long)]
    pub no_journal: bool,
    /// Authentication for telemetry pushed to /sensor_data_post
    #[arg(long, value_enum, env = "BBG_SENSOR_AUTH", default_value = "open")]
    pub sensor_auth: SensorAuthArg,
    /// Key the device sends in X-Device-Key when sensor auth is enforced
    #[arg(long, env = "BBG_DEVICE_KEY", hide_env_values = true)]
    pub device_key: Option<String>,
    /// Use an in-process simulated device instead of real hardware
    #[arg(long)]
    pub simulate: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantArg {
    VoltageOnly,
    VoltageCurrent,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorAuthArg {
    Open,
    Enforced,
}

impl RunArgs {
    pub fn into_config(self) -> anyhow::Result<GatewayConfig> {
        let password = match (self.password_hash, self.password) {
            (Some(hash), _) => PasswordSetting::Hashed(hash),
            (None, Some(password)) => PasswordSetting::Plain(password),
            (None, None) => anyhow::bail!("Either --password or --password-hash is required"),
        };

        let variant = match self.variant {
            VariantArg::VoltageOnly => DeviceVariant::VOLTAGE_ONLY,
            VariantArg::VoltageCurrent => DeviceVariant::VOLTAGE_CURRENT,
        };

        let sensor_auth = match self.sensor_auth {
            SensorAuthArg::Open => SensorAuthPolicy::Open,
            SensorAuthArg::Enforced => SensorAuthPolicy::Enforced {
                device_key: self.device_key,
            },
        };

        Ok(GatewayConfig {
            host: self.host,
            port: self.port,
            device_url: self.device_url,
            device_timeout: Duration::from_millis(self.device_timeout_ms),
            variant,
            username: self.username,
            password,
            session_ttl: Duration::from_secs(self.session_ttl_secs),
            journal_dir: (!self.no_journal).then_some(self.journal_dir),
            sensor_auth,
            simulate: self.simulate,
        })
    }
}
