/// 资源路径配置

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ConfigError, ConfigResult};
use crate::impl_default;

/// 屏幕使用的资源文件，相对 `root`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// 资源根目录
    pub root: String,

    /// 角色精灵表目录
    pub character: String,

    /// 字幕字体
    pub font: String,

    /// 字体像素大小
    pub font_size: u32,

    /// 背景音乐流
    pub music: String,

    /// 消耗音效流（循环播放）
    pub spray: String,

    /// 消耗音效增益
    pub spray_gain: f32,

    /// 松开时的光标图
    pub cursor_idle: String,

    /// 按下时的光标图
    pub cursor_pressed: String,

    /// 加载时是否检查文件存在
    pub verify_files: bool,
}

impl_default!(AssetConfig {
    root: "data".to_string(),
    character: "sprites/dos".to_string(),
    font: "fonts/PerfectDOSVGA437.ttf".to_string(),
    font_size: 64,
    music: "audiodump.ogg".to_string(),
    spray: "spray.flac".to_string(),
    spray_gain: 2.0,
    cursor_idle: "spray.png".to_string(),
    cursor_pressed: "spray2.png".to_string(),
    verify_files: true,
});

impl AssetConfig {
    /// 拼接资源完整路径
    pub fn path(&self, relative: &str) -> PathBuf {
        Path::new(&self.root).join(relative)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.font_size == 0 {
            return Err(ConfigError::ValidationError("Invalid font size".to_string()));
        }
        if !(self.spray_gain >= 0.0 && self.spray_gain.is_finite()) {
            return Err(ConfigError::ValidationError("Invalid spray gain".to_string()));
        }
        Ok(())
    }
}
