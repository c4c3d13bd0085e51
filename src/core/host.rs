//! 无头宿主
//!
//! 以固定 60Hz 驱动一个粒子群屏幕：按间隔模拟一次完整点击，
//! 绘制命令交给计数渲染器，音频命令由独立线程写入日志。
//! 遇到终局、Escape 或帧数上限时结束会话。

use glam::{Vec2, Vec4};
use std::env;
use tracing_subscriber::EnvFilter;

use super::error::ScreenResult;
use super::screen::SwarmScreen;
use crate::audio::{spawn_audio_driver, AudioBackend, StreamId};
use crate::config::{LoggingConfig, ScreenConfig};
use crate::depletion::RenderMode;
use crate::platform::{InputEvent, MouseButton};
use crate::render::{RenderBackend, SpriteId, SpriteTransform, TextAlign};
use crate::resources::{AssetLoader, FsAssetLoader, UncheckedAssetLoader};

/// 宿主帧间隔
const HOST_FRAME_SECONDS: f32 = 1.0 / 60.0;

/// 初始化日志系统
///
/// 优先使用 `RUST_LOG`，未设置时退回配置中的级别。
/// 重复调用是安全的。
pub fn initialize_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init();
}

/// 只统计绘制次数的渲染器
#[derive(Debug, Default)]
pub struct CountingRenderer {
    pub sprites: u64,
    pub texts: u64,
    pub last_caption: Option<String>,
}

impl RenderBackend for CountingRenderer {
    fn draw_sprite(
        &mut self,
        _sprite: SpriteId,
        _transform: SpriteTransform,
        _tint: Vec4,
        _scale: f32,
        _animation_time: f32,
    ) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _position: Vec2, _align: TextAlign, text: &str) {
        self.texts += 1;
        self.last_caption = Some(text.to_string());
    }
}

/// 把音频命令写入日志的后端
#[derive(Debug, Default)]
pub struct TracingAudio;

impl AudioBackend for TracingAudio {
    fn set_stream_playing(&mut self, stream: StreamId, playing: bool) {
        tracing::debug!(target: "audio", ?stream, playing, "stream playback changed");
    }

    fn set_gain(&mut self, stream: StreamId, gain: f32) {
        tracing::debug!(target: "audio", ?stream, gain, "stream gain changed");
    }
}

/// 会话结束时的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct HostReport {
    pub frames: u64,
    pub fixed_steps: u64,
    pub clicks: u32,
    pub remaining: u32,
    pub render_mode: RenderMode,
    pub termination_requested: bool,
    pub sprite_draws: u64,
    pub text_draws: u64,
}

/// 会话参数
#[derive(Debug, Clone)]
pub struct HostSettings {
    /// 帧数上限
    pub max_frames: u64,
    /// 每隔多少帧模拟一次点击，0 表示不点击
    pub click_interval: u64,
}

crate::impl_default!(HostSettings {
    max_frames: 1200,
    click_interval: 6,
});

/// 无头宿主
pub struct HeadlessHost {
    config: ScreenConfig,
    settings: HostSettings,
}

impl HeadlessHost {
    pub fn new(config: ScreenConfig, settings: HostSettings) -> Self {
        Self { config, settings }
    }

    /// 读取配置文件与环境变量
    ///
    /// `SWARM_MAX_FRAMES` 与 `SWARM_CLICK_INTERVAL` 覆盖会话参数。
    pub fn from_env() -> Self {
        let mut config = ScreenConfig::load_or_default();
        config.apply_env_overrides();

        let mut settings = HostSettings::default();
        if let Some(frames) = env::var("SWARM_MAX_FRAMES").ok().and_then(|v| v.parse().ok()) {
            settings.max_frames = frames;
        }
        if let Some(interval) = env::var("SWARM_CLICK_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            settings.click_interval = interval;
        }
        Self::new(config, settings)
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// 运行一次完整会话
    pub fn run(&self) -> ScreenResult<HostReport> {
        initialize_logging(&self.config.logging);
        tracing::info!(target: "screen", "headless host starting");

        let mut loader: Box<dyn AssetLoader> = if self.config.assets.verify_files {
            Box::new(FsAssetLoader)
        } else {
            Box::new(UncheckedAssetLoader)
        };

        let (audio, audio_thread) = spawn_audio_driver(TracingAudio);
        let report = self.run_session(loader.as_mut(), audio);

        // 屏幕卸载后所有发送端都已释放，驱动线程随之退出
        if audio_thread.join().is_err() {
            tracing::warn!(target: "audio", "audio driver thread panicked");
        }

        match &report {
            Ok(report) => tracing::info!(
                target: "screen",
                frames = report.frames,
                clicks = report.clicks,
                remaining = report.remaining,
                "headless host finished"
            ),
            Err(e) => tracing::error!(target: "screen", error = %e, "swarm screen failed to load"),
        }
        report
    }

    fn run_session(
        &self,
        loader: &mut dyn AssetLoader,
        audio: crate::audio::AudioQueue,
    ) -> ScreenResult<HostReport> {
        let mut screen = SwarmScreen::load(&self.config, loader, Some(audio))?;
        screen.start();

        let mut renderer = CountingRenderer::default();
        let mut clicks = 0u32;
        let mut frames = 0u64;

        while frames < self.settings.max_frames {
            let interval = self.settings.click_interval;
            if interval > 0 && frames % interval == 0 {
                let t = frames as f32 * HOST_FRAME_SECONDS;
                let (x, y) = (0.5 + 0.3 * t.cos(), 0.5 + 0.3 * t.sin());
                screen.push_input(InputEvent::MouseMoved { x, y });
                screen.push_input(InputEvent::MouseButtonPressed {
                    button: MouseButton::Left,
                    x,
                    y,
                });
                screen.push_input(InputEvent::MouseButtonReleased {
                    button: MouseButton::Left,
                    x,
                    y,
                });
                clicks += 1;
            }

            screen.frame(HOST_FRAME_SECONDS).replay(&mut renderer);
            frames += 1;

            if screen.termination_requested() || screen.render_mode() == RenderMode::Terminal {
                break;
            }
        }

        if let Some(caption) = &renderer.last_caption {
            tracing::info!(target: "screen", caption = %caption, "final caption");
        }

        let report = HostReport {
            frames: screen.stats().frames,
            fixed_steps: screen.stats().fixed_steps,
            clicks,
            remaining: screen.counter().remaining(),
            render_mode: screen.render_mode(),
            termination_requested: screen.termination_requested(),
            sprite_draws: renderer.sprites,
            text_draws: renderer.texts,
        };
        screen.unload();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unchecked_config(population: usize) -> ScreenConfig {
        let mut config = ScreenConfig::default();
        config.swarm.population_size = population;
        config.assets.verify_files = false;
        config
    }

    #[test]
    fn test_session_reaches_terminal_state() {
        let host = HeadlessHost::new(
            unchecked_config(5),
            HostSettings {
                max_frames: 100,
                click_interval: 2,
            },
        );
        let report = host.run().unwrap();
        assert_eq!(report.remaining, 0);
        assert_eq!(report.clicks, 5);
        assert_eq!(report.render_mode, RenderMode::Terminal);
        // 终局帧绘制两行字幕
        assert_eq!(report.text_draws, 2);
    }

    #[test]
    fn test_session_stops_at_frame_limit() {
        let host = HeadlessHost::new(
            unchecked_config(10),
            HostSettings {
                max_frames: 30,
                click_interval: 0,
            },
        );
        let report = host.run().unwrap();
        assert_eq!(report.frames, 30);
        assert_eq!(report.remaining, 10);
        assert_eq!(report.text_draws, 0);
        // 每帧：本体 + 10 个分身 + 光标
        assert_eq!(report.sprite_draws, 30 * 12);
    }

    #[test]
    fn test_missing_assets_fail_without_panic() {
        let mut config = ScreenConfig::default();
        config.assets.root = "/nonexistent/party_swarm_assets".to_string();
        config.assets.verify_files = true;
        let host = HeadlessHost::new(config, HostSettings::default());
        assert!(host.run().is_err());
    }

    #[test]
    fn test_counting_renderer() {
        let mut renderer = CountingRenderer::default();
        renderer.draw_text(Vec2::ZERO, TextAlign::Centre, "yOU WIN");
        assert_eq!(renderer.texts, 1);
        assert_eq!(renderer.last_caption.as_deref(), Some("yOU WIN"));
    }
}
