//! 粒子群绘制
//!
//! 每帧绘制顺序：
//! 1. 画面中央的角色本体（原始大小、白色）
//! 2. 前 `remaining` 个分身（缩放、按相位着色）
//!
//! 本体与分身共用角色精灵表，携带同一个动画时钟。
//! 3. 跟随指针的光标
//! 4. 计数归零时的两行字幕

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec4};

use super::color::particle_tint;
use super::{DrawCommand, DrawList, ReferenceFrame, SpriteId, SpriteTransform, TextAlign};
use crate::config::SwarmConfig;
use crate::core::resources::{FrameStats, Time};
use crate::depletion::{PointerState, PopulationCounter, RenderMode};
use crate::particles::{ParticlePool, ParticleState};

/// 终局第一行字幕
pub const TERMINAL_CAPTION: &str = "YOU PARTIED FOR 0 HOURS";

/// 终局第二行字幕
pub const WIN_CAPTION: &str = "yOU WIN";

/// 字幕相对画面中心的垂直间距（像素）
const CAPTION_SPACING: f32 = 100.0;

/// 粒子群渲染服务
pub struct SwarmRenderService;

impl SwarmRenderService {
    /// 粒子的归一化屏幕变换
    pub fn particle_transform(particle: &ParticleState, frame: &ReferenceFrame) -> SpriteTransform {
        let offset = frame.normalize_offset(particle.screen_offset_x, particle.screen_offset_y);
        let x = particle.position + 0.5 + offset.x;
        let y = particle.linear_coeff * particle.position + particle.linear_offset + 0.5 + offset.y;
        SpriteTransform {
            position: Vec2::new(x, y),
            rotation: particle.angle,
        }
    }

    /// 重建本帧绘制列表，`animation_time` 为角色动画时钟（秒）
    pub fn build(
        draw_list: &mut DrawList,
        pool: &ParticlePool,
        counter: &PopulationCounter,
        pointer: &PointerState,
        config: &SwarmConfig,
        frame: &ReferenceFrame,
        animation_time: f32,
    ) {
        draw_list.clear();

        draw_list.push(DrawCommand::Sprite {
            sprite: SpriteId::Character,
            transform: SpriteTransform {
                position: Vec2::splat(0.5),
                rotation: 0.0,
            },
            tint: Vec4::ONE,
            scale: 1.0,
            animation_time,
        });

        let visible = (counter.remaining() as usize).min(pool.len());
        for particle in pool.particles()[..visible].iter() {
            draw_list.push(DrawCommand::Sprite {
                sprite: SpriteId::Character,
                transform: Self::particle_transform(particle, frame),
                tint: particle_tint(particle.position),
                scale: config.sprite_scale,
                animation_time,
            });
        }

        let cursor = if pointer.is_pressed() {
            SpriteId::CursorPressed
        } else {
            SpriteId::CursorIdle
        };
        draw_list.push(DrawCommand::Sprite {
            sprite: cursor,
            transform: SpriteTransform {
                position: pointer.position,
                rotation: 0.0,
            },
            tint: Vec4::ONE,
            scale: 1.0,
            animation_time: 0.0,
        });

        if counter.render_mode() == RenderMode::Terminal {
            let spacing = CAPTION_SPACING / frame.height;
            draw_list.push(DrawCommand::Text {
                position: Vec2::new(0.5, 0.5 - spacing),
                align: TextAlign::Centre,
                text: TERMINAL_CAPTION,
            });
            draw_list.push(DrawCommand::Text {
                position: Vec2::new(0.5, 0.5 + spacing),
                align: TextAlign::Centre,
                text: WIN_CAPTION,
            });
        }
    }
}

/// 渲染阶段系统
pub fn render_system(
    mut draw_list: ResMut<DrawList>,
    mut stats: ResMut<FrameStats>,
    pool: Res<ParticlePool>,
    counter: Res<PopulationCounter>,
    pointer: Res<PointerState>,
    config: Res<SwarmConfig>,
    frame: Res<ReferenceFrame>,
    time: Res<Time>,
) {
    SwarmRenderService::build(
        &mut draw_list,
        &pool,
        &counter,
        &pointer,
        &config,
        &frame,
        time.animation_seconds as f32,
    );

    let texts = draw_list.texts().count();
    stats.text_draws = texts as u32;
    stats.sprite_draws = (draw_list.len() - texts) as u32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depletion::PointerPhase;

    fn fixed_particle() -> ParticleState {
        ParticleState {
            linear_coeff: 0.5,
            linear_offset: 0.1,
            position: 0.2,
            angle: 1.25,
            screen_offset_x: 128,
            screen_offset_y: -72,
            speed: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_particle_transform_mapping() {
        let t = SwarmRenderService::particle_transform(&fixed_particle(), &ReferenceFrame::default());
        // x = 0.2 + 0.5 + 128/1280, y = 0.5*0.2 + 0.1 + 0.5 - 72/720
        assert!((t.position.x - 0.8).abs() < 1e-6);
        assert!((t.position.y - 0.6).abs() < 1e-6);
        assert_eq!(t.rotation, 1.25);
    }

    #[test]
    fn test_build_draws_remaining_particles_only() {
        let mut pool = ParticlePool::with_population(10);
        for p in pool.particles_mut() {
            *p = fixed_particle();
        }
        let mut counter = PopulationCounter::new(10);
        for _ in 0..4 {
            counter.decrement();
        }
        let mut list = DrawList::default();
        SwarmRenderService::build(
            &mut list,
            &pool,
            &counter,
            &PointerState::default(),
            &SwarmConfig::default(),
            &ReferenceFrame::default(),
            0.0,
        );
        // 本体 + 6 个分身
        assert_eq!(list.sprite_count(SpriteId::Character), 7);
        assert_eq!(list.sprite_count(SpriteId::CursorIdle), 1);
        assert_eq!(list.texts().count(), 0);
    }

    #[test]
    fn test_particles_use_configured_scale_and_tint() {
        let mut pool = ParticlePool::with_population(1);
        pool.particles_mut()[0] = fixed_particle();
        let mut list = DrawList::default();
        SwarmRenderService::build(
            &mut list,
            &pool,
            &PopulationCounter::new(1),
            &PointerState::default(),
            &SwarmConfig::default(),
            &ReferenceFrame::default(),
            1.5,
        );
        match &list.commands()[1] {
            DrawCommand::Sprite {
                scale,
                tint,
                animation_time,
                ..
            } => {
                assert_eq!(*scale, 0.25);
                assert_eq!(*tint, particle_tint(0.2));
                assert_eq!(*animation_time, 1.5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_terminal_branch_draws_captions() {
        let pool = ParticlePool::with_population(3);
        let mut counter = PopulationCounter::new(3);
        for _ in 0..3 {
            counter.decrement();
        }
        let pointer = PointerState {
            phase: PointerPhase::Pressed,
            position: Vec2::new(0.1, 0.9),
        };
        let mut list = DrawList::default();
        SwarmRenderService::build(
            &mut list,
            &pool,
            &counter,
            &pointer,
            &SwarmConfig::default(),
            &ReferenceFrame::default(),
            0.0,
        );
        assert_eq!(list.sprite_count(SpriteId::Character), 1);
        assert_eq!(list.sprite_count(SpriteId::CursorPressed), 1);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec![TERMINAL_CAPTION, WIN_CAPTION]);
    }

    #[test]
    fn test_character_sprites_share_animation_clock() {
        let pool = ParticlePool::with_population(4);
        let mut list = DrawList::default();
        SwarmRenderService::build(
            &mut list,
            &pool,
            &PopulationCounter::new(4),
            &PointerState::default(),
            &SwarmConfig::default(),
            &ReferenceFrame::default(),
            3.25,
        );
        let times: Vec<(SpriteId, f32)> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite {
                    sprite,
                    animation_time,
                    ..
                } => Some((*sprite, *animation_time)),
                _ => None,
            })
            .collect();
        assert_eq!(times.len(), 6);
        for (sprite, time) in &times[..5] {
            assert_eq!(*sprite, SpriteId::Character);
            assert_eq!(*time, 3.25);
        }
        assert_eq!(times[5], (SpriteId::CursorIdle, 0.0));
    }
}
