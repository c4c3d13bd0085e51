// ============================================================================
// Input Abstraction
// ============================================================================

use bevy_ecs::prelude::*;

/// 宿主投递给屏幕的输入事件
///
/// 指针坐标为归一化屏幕坐标 `[0,1]`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    // Keyboard
    KeyPressed { key: KeyCode },
    KeyReleased { key: KeyCode },

    // Mouse
    MouseMoved { x: f32, y: f32 },
    MouseButtonPressed { button: MouseButton, x: f32, y: f32 },
    MouseButtonReleased { button: MouseButton, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Space,
    Enter,
    Unknown(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// 待处理输入缓冲，事件阶段清空
#[derive(Resource, Debug, Default, Clone)]
pub struct InputBuffer {
    pub events: Vec<InputEvent>,
}

impl InputBuffer {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
