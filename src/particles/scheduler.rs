//! 粒子更新调度
//!
//! 两种节奏推进粒子池：
//!
//! - **连续积分**：每帧按可变步长推进相位与角度
//! - **周期重采样**：固定步计数达到周期时整体重新随机化
//!
//! 两者由屏幕的帧循环分别调度，互不共享计数器。

use bevy_ecs::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::pool::{ParticlePool, ParticleState, SamplingRanges};
use crate::config::SwarmConfig;
use crate::core::resources::Time;

/// 相位积分的时间缩放：每秒推进 `speed / 4`
pub const POSITION_RATE: f32 = 0.25;

/// 固定步计数器，取值 `[0, period)`
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCounter {
    value: u32,
    period: u32,
    wraps: u64,
}

impl TickCounter {
    pub fn new(period: u32) -> Self {
        Self {
            value: 0,
            period: period.max(1),
            wraps: 0,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// 自创建或重置以来发生的回绕次数
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// 前进一步，回绕时返回 `true`
    pub fn advance(&mut self) -> bool {
        self.value += 1;
        if self.value >= self.period {
            self.value = 0;
            self.wraps += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.wraps = 0;
    }
}

/// 屏幕私有的随机数源
#[derive(Resource, Debug, Clone)]
pub struct SwarmRng(StdRng);

impl SwarmRng {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RngCore for SwarmRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

/// 粒子调度服务 - 纯函数，状态由调用方持有
pub struct SwarmService;

impl SwarmService {
    /// 单个粒子在 `delta_seconds` 内的相位增量（带符号）
    pub fn position_step(particle: &ParticleState, delta_seconds: f32) -> f32 {
        particle.direction() * delta_seconds * POSITION_RATE * particle.speed
    }

    /// 连续积分：推进池中每个粒子的相位和角度，不做任何截断
    pub fn integrate<R: rand::Rng + ?Sized>(
        pool: &mut ParticlePool,
        delta_seconds: f32,
        rng: &mut R,
    ) {
        for particle in pool.particles_mut() {
            particle.position += Self::position_step(particle, delta_seconds);
            let jitter: f32 = rng.gen();
            particle.angle += particle.spin() * jitter * delta_seconds * particle.speed;
        }
    }

    /// 固定步：计数器回绕时整体重采样，返回是否发生了回绕
    pub fn tick<R: rand::Rng + ?Sized>(
        pool: &mut ParticlePool,
        counter: &mut TickCounter,
        ranges: &SamplingRanges,
        rng: &mut R,
    ) -> bool {
        if !counter.advance() {
            return false;
        }
        pool.randomize(rng, ranges);
        tracing::trace!(
            target: "swarm",
            wraps = counter.wraps(),
            particles = pool.len(),
            "swarm re-randomized"
        );
        true
    }
}

/// 连续积分系统
pub fn integrate_system(
    mut pool: ResMut<ParticlePool>,
    time: Res<Time>,
    mut rng: ResMut<SwarmRng>,
) {
    SwarmService::integrate(&mut pool, time.delta_seconds, &mut *rng);
}

/// 固定步重采样系统
pub fn tick_system(
    mut pool: ResMut<ParticlePool>,
    mut counter: ResMut<TickCounter>,
    config: Res<SwarmConfig>,
    mut rng: ResMut<SwarmRng>,
) {
    let ranges = config.wrap_ranges();
    SwarmService::tick(&mut pool, &mut counter, &ranges, &mut *rng);
}

/// 屏幕进入时的全量随机化系统
pub fn reset_swarm_system(
    mut pool: ResMut<ParticlePool>,
    mut counter: ResMut<TickCounter>,
    config: Res<SwarmConfig>,
    mut rng: ResMut<SwarmRng>,
) {
    pool.randomize(&mut *rng, &config.start_ranges());
    counter.reset();
}
