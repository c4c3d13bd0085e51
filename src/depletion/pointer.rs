//! 指针状态机
//!
//! `Idle → Pressed`：开始循环音效，计数减一
//! `Pressed → Idle`：停止音效
//!
//! 按住期间重复收到的按下事件不会再次扣减。

use bevy_ecs::prelude::*;
use glam::Vec2;

use super::counter::PopulationCounter;
use crate::audio::{AudioQueue, StreamId};
use crate::core::resources::ScreenSignals;
use crate::platform::{InputBuffer, InputEvent, KeyCode};

/// 指针阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    #[default]
    Idle,
    Pressed,
}

/// 指针状态资源
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub phase: PointerPhase,
    /// 最近一次已知的归一化位置
    pub position: Vec2,
}

impl PointerState {
    pub fn is_pressed(&self) -> bool {
        self.phase == PointerPhase::Pressed
    }
}

/// 消耗逻辑服务
pub struct DepletionService;

impl DepletionService {
    /// 按下：仅在 `Idle` 时迁移并产生副作用，返回是否发生迁移
    pub fn pointer_down(
        pointer: &mut PointerState,
        counter: &mut PopulationCounter,
        audio: Option<&AudioQueue>,
    ) -> bool {
        if pointer.is_pressed() {
            return false;
        }
        pointer.phase = PointerPhase::Pressed;
        if let Some(audio) = audio {
            audio.set_stream_playing(StreamId::Spray, true);
        }

        let was_depleted = counter.is_depleted();
        counter.decrement();
        tracing::debug!(
            target: "depletion",
            remaining = counter.remaining(),
            "pointer pressed"
        );
        if !was_depleted && counter.is_depleted() {
            tracing::info!(target: "depletion", "population depleted, entering terminal state");
        }
        true
    }

    /// 松开：仅在 `Pressed` 时迁移，返回是否发生迁移
    pub fn pointer_up(pointer: &mut PointerState, audio: Option<&AudioQueue>) -> bool {
        if !pointer.is_pressed() {
            return false;
        }
        pointer.phase = PointerPhase::Idle;
        if let Some(audio) = audio {
            audio.set_stream_playing(StreamId::Spray, false);
        }
        tracing::debug!(target: "depletion", "pointer released");
        true
    }

    pub fn pointer_moved(pointer: &mut PointerState, x: f32, y: f32) {
        pointer.position = Vec2::new(x, y);
    }
}

/// 事件阶段：清空输入缓冲并驱动状态机
pub fn input_system(
    mut input: ResMut<InputBuffer>,
    mut pointer: ResMut<PointerState>,
    mut counter: ResMut<PopulationCounter>,
    mut signals: ResMut<ScreenSignals>,
    audio: Option<Res<AudioQueue>>,
) {
    let audio = audio.as_deref();
    for event in input.drain() {
        match event {
            InputEvent::MouseButtonPressed { x, y, .. } => {
                DepletionService::pointer_moved(&mut pointer, x, y);
                DepletionService::pointer_down(&mut pointer, &mut counter, audio);
            }
            InputEvent::MouseButtonReleased { x, y, .. } => {
                DepletionService::pointer_moved(&mut pointer, x, y);
                DepletionService::pointer_up(&mut pointer, audio);
            }
            InputEvent::MouseMoved { x, y } => {
                DepletionService::pointer_moved(&mut pointer, x, y);
            }
            InputEvent::KeyPressed {
                key: KeyCode::Escape,
            } => {
                if !signals.termination_requested {
                    tracing::info!(target: "screen", "escape pressed, termination requested");
                }
                signals.termination_requested = true;
            }
            InputEvent::KeyPressed { .. } | InputEvent::KeyReleased { .. } => {}
        }
    }
}
