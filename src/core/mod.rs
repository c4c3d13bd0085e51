//! 核心模块
//!
//! 包含屏幕的生命周期与运行循环：
//! - `screen` - 粒子群屏幕与帧循环
//! - `host` - 无头宿主与日志初始化
//! - `resources` - ECS资源定义
//! - `error` - 错误类型定义

pub mod error;
pub mod host;
#[macro_use]
pub mod macros;
pub mod resources;
pub mod screen;

// 重新导出错误类型
pub use error::{ScreenError, ScreenResult};

// 重新导出主要类型
pub use host::{initialize_logging, HeadlessHost, HostReport, HostSettings};
pub use resources::{FrameStats, ScreenSignals, Time};
pub use screen::{ScreenPhase, SwarmScreen};
