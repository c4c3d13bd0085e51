//! # Party Swarm
//!
//! 一个单屏幕的粒子群小游戏核心：角色被一群彩色分身环绕，
//! 每次点击消灭一个分身，全部消灭后显示终局字幕。
//!
//! ## 架构设计
//!
//! 沿用 **贫血模型 (Anemic Domain Model)**：
//! - **State (Resource)**: 纯数据结构，存放在屏幕私有的 `World` 中
//! - **Service**: 以静态方法封装业务逻辑
//! - **System**: ECS 系统，只负责编排
//!
//! 绘制、音频解码和窗口由宿主提供，核心只输出 [`render::DrawList`]
//! 并通过 [`audio::AudioQueue`] 投递播放命令。
//!
//! ### 示例
//!
//! ```
//! use party_swarm::config::ScreenConfig;
//! use party_swarm::core::SwarmScreen;
//! use party_swarm::platform::{InputEvent, MouseButton};
//! use party_swarm::resources::UncheckedAssetLoader;
//!
//! let mut config = ScreenConfig::default();
//! config.swarm.population_size = 1;
//!
//! let mut screen = SwarmScreen::load(&config, &mut UncheckedAssetLoader, None).unwrap();
//! screen.start();
//! screen.push_input(InputEvent::MouseButtonPressed { button: MouseButton::Left, x: 0.5, y: 0.5 });
//! let draw_list = screen.frame(1.0 / 60.0);
//! assert_eq!(draw_list.texts().count(), 2);
//! ```
//!
//! ## 模块
//!
//! - [`core`]: 屏幕生命周期、帧循环与无头宿主
//! - [`particles`]: 粒子池与调度
//! - [`depletion`]: 点击消耗与终局判定
//! - [`render`]: 绘制列表与着色
//! - [`audio`]: 音频命令通道
//! - [`config`]: 配置系统

/// 屏幕生命周期与运行循环
pub mod core;
/// 配置系统
pub mod config;
/// 粒子池与调度
pub mod particles;
/// 点击消耗与终局判定
pub mod depletion;
/// 绘制列表与着色
pub mod render;
/// 音频命令通道
pub mod audio;
/// 宿主输入抽象
pub mod platform;
/// 资源解析
pub mod resources;
