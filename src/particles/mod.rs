//! 粒子群模块
//!
//! 角色的彩色分身：固定大小的粒子池，以及推进它的两种调度节奏。
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Swarm Update                  │
//! ├──────────────────────────────────────────────┤
//! │  每帧   integrate(delta)  相位/角度连续积分      │
//! │  固定步 tick()            计数回绕时整体重采样   │
//! └──────────────────────────────────────────────┘
//! ```

pub mod pool;
pub mod scheduler;

pub use pool::{ParticlePool, ParticleState, SamplingRanges};
pub use scheduler::{
    integrate_system, reset_swarm_system, tick_system, SwarmRng, SwarmService, TickCounter,
    POSITION_RATE,
};
