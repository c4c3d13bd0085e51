//! 资源解析模块
//!
//! 实际的解码与上传由宿主完成，核心只在加载阶段确认资源可用，
//! 任何缺失都以 [`ResourceLoadError`] 终止本屏幕的加载。

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AssetConfig;

/// 资源种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    SpriteSheet,
    Font,
    AudioStream,
    Bitmap,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::SpriteSheet => "sprite sheet",
            AssetKind::Font => "font",
            AssetKind::AudioStream => "audio stream",
            AssetKind::Bitmap => "bitmap",
        };
        f.write_str(name)
    }
}

/// 资源加载错误
#[derive(Error, Debug)]
pub enum ResourceLoadError {
    #[error("{kind} not found: {}", .path.display())]
    NotFound { kind: AssetKind, path: PathBuf },

    #[error("Failed to load {kind}: {}, reason: {reason}", .path.display())]
    Unreadable {
        kind: AssetKind,
        path: PathBuf,
        reason: String,
    },
}

/// 资源加载协作方
pub trait AssetLoader {
    /// 确认资源可用并返回解析后的路径
    fn resolve(&mut self, kind: AssetKind, path: &Path) -> Result<PathBuf, ResourceLoadError>;
}

/// 基于文件系统的加载器：精灵表必须是目录，其余必须是可读文件
#[derive(Debug, Default, Clone)]
pub struct FsAssetLoader;

impl AssetLoader for FsAssetLoader {
    fn resolve(&mut self, kind: AssetKind, path: &Path) -> Result<PathBuf, ResourceLoadError> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceLoadError::NotFound {
                kind,
                path: path.to_path_buf(),
            },
            _ => ResourceLoadError::Unreadable {
                kind,
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let expect_dir = kind == AssetKind::SpriteSheet;
        if metadata.is_dir() != expect_dir {
            return Err(ResourceLoadError::Unreadable {
                kind,
                path: path.to_path_buf(),
                reason: if expect_dir {
                    "expected a directory".to_string()
                } else {
                    "expected a file".to_string()
                },
            });
        }
        Ok(path.to_path_buf())
    }
}

/// 不做检查的加载器，用于无资源的无头运行
#[derive(Debug, Default, Clone)]
pub struct UncheckedAssetLoader;

impl AssetLoader for UncheckedAssetLoader {
    fn resolve(&mut self, _kind: AssetKind, path: &Path) -> Result<PathBuf, ResourceLoadError> {
        Ok(path.to_path_buf())
    }
}

/// 本屏幕解析完成的资源路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenAssets {
    pub character: PathBuf,
    pub font: PathBuf,
    pub music: PathBuf,
    pub spray: PathBuf,
    pub cursor_idle: PathBuf,
    pub cursor_pressed: PathBuf,
}

impl ScreenAssets {
    /// 依次解析所有资源，遇到第一个失败即返回
    pub fn load(config: &AssetConfig, loader: &mut dyn AssetLoader) -> Result<Self, ResourceLoadError> {
        let mut resolve = |kind: AssetKind, relative: &str| {
            let path = config.path(relative);
            tracing::debug!(target: "assets", %kind, path = %path.display(), "resolving asset");
            loader.resolve(kind, &path).map_err(|e| {
                tracing::error!(target: "assets", error = %e, "asset failed to load");
                e
            })
        };

        Ok(Self {
            character: resolve(AssetKind::SpriteSheet, &config.character)?,
            font: resolve(AssetKind::Font, &config.font)?,
            music: resolve(AssetKind::AudioStream, &config.music)?,
            spray: resolve(AssetKind::AudioStream, &config.spray)?,
            cursor_idle: resolve(AssetKind::Bitmap, &config.cursor_idle)?,
            cursor_pressed: resolve(AssetKind::Bitmap, &config.cursor_pressed)?,
        })
    }
}
