/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖和加载前验证
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod assets;
pub mod swarm;

pub use assets::AssetConfig;
pub use swarm::{SwarmConfig, DEFAULT_POPULATION, DEFAULT_TICK_PERIOD};

use crate::impl_default;
use crate::render::ReferenceFrame;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 屏幕主配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// 粒子群配置
    #[serde(default)]
    pub swarm: SwarmConfig,

    /// 参考画面尺寸
    #[serde(default)]
    pub reference_frame: ReferenceFrame,

    /// 资源配置
    #[serde(default)]
    pub assets: AssetConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScreenConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("SWARM_POPULATION") {
            if let Ok(population) = val.parse() {
                self.swarm.population_size = population;
            }
        }
        if let Ok(val) = env::var("SWARM_ASSETS_ROOT") {
            self.assets.root = val;
        }
        if let Ok(val) = env::var("SWARM_ASSETS_VERIFY") {
            self.assets.verify_files = val.parse().unwrap_or(self.assets.verify_files);
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.swarm.validate()?;
        self.reference_frame.validate()?;
        self.assets.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./swarm.toml
    /// 2. ./swarm.json
    /// 3. ~/.config/party_swarm/swarm.toml
    /// 4. 使用默认配置
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::from_toml_file("swarm.toml") {
            tracing::info!(target: "screen", "Loaded config from swarm.toml");
            return config;
        }

        if let Ok(config) = Self::from_json_file("swarm.json") {
            tracing::info!(target: "screen", "Loaded config from swarm.json");
            return config;
        }

        if let Some(home) = env::var_os("HOME") {
            let config_path = PathBuf::from(home)
                .join(".config")
                .join("party_swarm")
                .join("swarm.toml");

            if let Ok(config) = Self::from_toml_file(&config_path) {
                tracing::info!(target: "screen", path = ?config_path, "Loaded config");
                return config;
            }
        }

        tracing::info!(target: "screen", "Using default configuration");
        Self::default()
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 未设置 `RUST_LOG` 时使用的日志级别
    pub level: LogLevel,

    /// 是否输出目标名
    pub with_target: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    with_target: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// 转换为 `EnvFilter` 指令
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
