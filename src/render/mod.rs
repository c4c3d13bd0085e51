//! 渲染接口模块
//!
//! 核心只生成绘制命令，不做光栅化。每帧的渲染阶段把命令写入 [`DrawList`]，
//! 宿主再通过 [`RenderBackend`] 回放。
//!
//! 所有坐标均为归一化屏幕坐标 `[0,1]×[0,1]`，宿主按 [`ReferenceFrame`]
//! （默认 1280×720）换算为像素。

pub mod color;
pub mod swarm;

pub use color::{hsl_to_rgb, particle_hue, particle_tint};
pub use swarm::{render_system, SwarmRenderService, TERMINAL_CAPTION, WIN_CAPTION};

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigResult};

/// 参考画面尺寸（像素）
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub width: f32,
    pub height: f32,
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ReferenceFrame {
    /// 归一化坐标转像素坐标
    pub fn to_pixels(&self, normalized: Vec2) -> Vec2 {
        normalized * Vec2::new(self.width, self.height)
    }

    /// 像素偏移转归一化偏移
    pub fn normalize_offset(&self, dx: i32, dy: i32) -> Vec2 {
        Vec2::new(dx as f32 / self.width, dy as f32 / self.height)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid reference frame: {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// 精灵标识，宿主负责映射到实际纹理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// 角色精灵（本体和全部分身共用）
    Character,
    /// 未按下时的光标
    CursorIdle,
    /// 按下时的光标
    CursorPressed,
}

/// 文字对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Centre,
    Right,
}

/// 精灵变换
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteTransform {
    /// 归一化屏幕坐标
    pub position: Vec2,
    /// 旋转（弧度）
    pub rotation: f32,
}

/// 单条绘制命令
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: SpriteId,
        transform: SpriteTransform,
        tint: Vec4,
        scale: f32,
        /// 动画时钟（秒），宿主据此选取精灵表中的帧；静态精灵为 0
        animation_time: f32,
    },
    Text {
        position: Vec2,
        align: TextAlign,
        text: &'static str,
    },
}

/// 渲染协作方
pub trait RenderBackend {
    fn draw_sprite(
        &mut self,
        sprite: SpriteId,
        transform: SpriteTransform,
        tint: Vec4,
        scale: f32,
        animation_time: f32,
    );
    fn draw_text(&mut self, position: Vec2, align: TextAlign, text: &str);
}

/// 本帧绘制命令列表
#[derive(Resource, Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 指定精灵的绘制次数
    pub fn sprite_count(&self, id: SpriteId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite, .. } if *sprite == id))
            .count()
    }

    /// 本帧所有文字
    pub fn texts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(*text),
            _ => None,
        })
    }

    /// 按顺序回放到渲染协作方
    pub fn replay(&self, backend: &mut dyn RenderBackend) {
        for command in &self.commands {
            match command {
                DrawCommand::Sprite {
                    sprite,
                    transform,
                    tint,
                    scale,
                    animation_time,
                } => backend.draw_sprite(*sprite, *transform, *tint, *scale, *animation_time),
                DrawCommand::Text {
                    position,
                    align,
                    text,
                } => backend.draw_text(*position, *align, text),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        sprites: Vec<SpriteId>,
        times: Vec<f32>,
        texts: Vec<String>,
    }

    impl RenderBackend for Recorder {
        fn draw_sprite(&mut self, sprite: SpriteId, _: SpriteTransform, _: Vec4, _: f32, time: f32) {
            self.sprites.push(sprite);
            self.times.push(time);
        }

        fn draw_text(&mut self, _: Vec2, _: TextAlign, text: &str) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_replay_preserves_order() {
        let mut list = DrawList::default();
        let transform = SpriteTransform {
            position: Vec2::splat(0.5),
            rotation: 0.0,
        };
        list.push(DrawCommand::Sprite {
            sprite: SpriteId::Character,
            transform,
            tint: Vec4::ONE,
            scale: 1.0,
            animation_time: 2.5,
        });
        list.push(DrawCommand::Text {
            position: Vec2::splat(0.5),
            align: TextAlign::Centre,
            text: "hello",
        });
        list.push(DrawCommand::Sprite {
            sprite: SpriteId::CursorIdle,
            transform,
            tint: Vec4::ONE,
            scale: 1.0,
            animation_time: 0.0,
        });

        let mut recorder = Recorder::default();
        list.replay(&mut recorder);
        assert_eq!(recorder.sprites, vec![SpriteId::Character, SpriteId::CursorIdle]);
        assert_eq!(recorder.times, vec![2.5, 0.0]);
        assert_eq!(recorder.texts, vec!["hello".to_string()]);
        assert_eq!(list.sprite_count(SpriteId::Character), 1);
        assert_eq!(list.texts().count(), 1);
    }

    #[test]
    fn test_reference_frame_conversion() {
        let frame = ReferenceFrame::default();
        assert_eq!(frame.to_pixels(Vec2::new(0.5, 0.5)), Vec2::new(640.0, 360.0));
        assert_eq!(frame.normalize_offset(640, -360), Vec2::new(0.5, -0.5));
        assert!(frame.validate().is_ok());
        assert!(ReferenceFrame { width: 0.0, height: 720.0 }.validate().is_err());
    }
}
