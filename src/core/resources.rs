//! 核心资源类型
//!
//! 定义屏幕运行时使用的ECS资源

use bevy_ecs::prelude::*;

/// 帧时间
#[derive(Resource, Debug, Clone, Copy)]
pub struct Time {
    /// 本帧可变时间步长（秒）
    pub delta_seconds: f32,
    /// 固定步累计的模拟时间（秒）
    pub elapsed_seconds: f64,
    /// 角色动画时钟，运行中按可变步长累加（秒）
    pub animation_seconds: f64,
    /// 固定时间步长（秒）
    pub fixed_time_step: f64,
    /// 累加器剩余量与固定步长之比
    pub alpha: f64,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            delta_seconds: 0.0,
            elapsed_seconds: 0.0,
            animation_seconds: 0.0,
            fixed_time_step: 1.0 / 60.0,
            alpha: 0.0,
        }
    }
}

impl Time {
    /// 使用指定固定步长创建
    pub fn with_fixed_step(fixed_time_step: f64) -> Self {
        Self {
            fixed_time_step,
            ..Default::default()
        }
    }
}

/// 帧统计信息
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// 已执行的帧数
    pub frames: u64,
    /// 已执行的固定步数
    pub fixed_steps: u64,
    /// 最近一帧的精灵绘制调用数量
    pub sprite_draws: u32,
    /// 最近一帧的文字绘制调用数量
    pub text_draws: u32,
}

/// 屏幕向宿主发出的信号
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenSignals {
    /// 收到 Escape，请求宿主卸载本屏幕
    pub termination_requested: bool,
}
