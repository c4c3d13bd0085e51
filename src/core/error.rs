//! 统一错误处理模块
//!
//! 模拟本身没有可失败的操作，错误只出现在屏幕加载阶段：
//!
//! - **配置错误** (`config::ConfigError`): 配置文件读取、解析与验证
//! - **资源错误** (`resources::ResourceLoadError`): 精灵、字体、音频流缺失或不可读
//!
//! `ScreenError` 汇总两者；它只对当前屏幕致命，宿主进程自行决定后续处理。

use thiserror::Error;

use crate::config::ConfigError;
use crate::resources::ResourceLoadError;

/// 屏幕错误类型
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource load error: {0}")]
    ResourceLoad(#[from] ResourceLoadError),

    #[error("Invalid screen state: {0}")]
    InvalidState(String),
}

/// 屏幕结果类型别名
pub type ScreenResult<T> = Result<T, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::AssetKind;
    use std::path::PathBuf;

    #[test]
    fn test_error_conversion() {
        let load_err = ResourceLoadError::NotFound {
            kind: AssetKind::Font,
            path: PathBuf::from("fonts/missing.ttf"),
        };
        let screen_err: ScreenError = load_err.into();
        assert!(matches!(screen_err, ScreenError::ResourceLoad(_)));
    }

    #[test]
    fn test_error_display() {
        let err: ScreenError = ConfigError::ValidationError("population_size must be > 0".into()).into();
        assert_eq!(
            err.to_string(),
            "Config error: Config validation error: population_size must be > 0"
        );
    }
}
