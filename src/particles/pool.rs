//! 粒子池
//!
//! 固定大小的粒子状态集合。屏幕加载时按人口数量一次性分配，
//! 之后只改写字段，不增删粒子。

use bevy_ecs::prelude::*;
use rand::Rng;
use std::f32::consts::PI;
use std::ops::Range;

/// 单个粒子的运动与外观参数
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleState {
    /// 由相位推导垂直位置的仿射系数
    pub linear_coeff: f32,
    /// 仿射常数项
    pub linear_offset: f32,
    /// 无界相位，驱动水平位置和色相
    pub position: f32,
    /// 当前旋转（弧度）
    pub angle: f32,
    /// 本周期的水平像素偏移
    pub screen_offset_x: i32,
    /// 本周期的垂直像素偏移
    pub screen_offset_y: i32,
    /// 每次重采样都会刷新，但不参与着色
    pub color_seed: u32,
    /// 相位积分取负方向
    pub reverse_direction: bool,
    /// 角度随机游走取正方向
    pub angle_spin_sign: bool,
    /// 积分速率倍数
    pub speed: f32,
}

impl ParticleState {
    /// 按给定范围均匀采样全部字段
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, ranges: &SamplingRanges) -> Self {
        Self {
            linear_coeff: rng.gen_range(ranges.linear_coeff.clone()),
            linear_offset: rng.gen_range(ranges.linear_offset.clone()),
            position: rng.gen_range(ranges.position.clone()),
            angle: rng.gen_range(ranges.angle.clone()),
            screen_offset_x: rng.gen_range(ranges.screen_offset.clone()),
            screen_offset_y: rng.gen_range(ranges.screen_offset.clone()),
            color_seed: rng.gen(),
            reverse_direction: rng.gen_bool(0.5),
            angle_spin_sign: rng.gen_bool(0.5),
            speed: rng.gen_range(ranges.speed.clone()),
        }
    }

    /// 相位积分方向（+1 或 -1）
    pub fn direction(&self) -> f32 {
        if self.reverse_direction {
            -1.0
        } else {
            1.0
        }
    }

    /// 角度游走方向（+1 或 -1）
    pub fn spin(&self) -> f32 {
        if self.angle_spin_sign {
            1.0
        } else {
            -1.0
        }
    }
}

/// 重采样时各字段的取值范围（全部为左闭右开）
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRanges {
    pub linear_coeff: Range<f32>,
    pub linear_offset: Range<f32>,
    pub position: Range<f32>,
    pub angle: Range<f32>,
    pub screen_offset: Range<i32>,
    pub speed: Range<f32>,
}

impl SamplingRanges {
    /// 屏幕进入时的范围：仿射系数只取非负值
    pub fn start(speed: Range<f32>, screen_offset: Range<i32>) -> Self {
        Self {
            linear_coeff: 0.0..1.0,
            ..Self::wrap(speed, screen_offset)
        }
    }

    /// 周期重采样时的范围
    pub fn wrap(speed: Range<f32>, screen_offset: Range<i32>) -> Self {
        Self {
            linear_coeff: -1.0..1.0,
            linear_offset: 0.0..0.2,
            position: -0.5..0.5,
            angle: 0.0..PI,
            screen_offset,
            speed,
        }
    }
}

/// 粒子池资源
///
/// 索引集合在屏幕生命周期内恒为 `[0, N)`。
#[derive(Resource, Debug, Clone)]
pub struct ParticlePool {
    particles: Box<[ParticleState]>,
}

impl ParticlePool {
    /// 分配 `population` 个零值粒子
    pub fn with_population(population: usize) -> Self {
        Self {
            particles: vec![ParticleState::default(); population].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParticleState> {
        self.particles.get(index)
    }

    pub fn particles(&self) -> &[ParticleState] {
        &self.particles
    }

    /// 可变访问；切片长度固定，因此池大小不会改变
    pub fn particles_mut(&mut self) -> &mut [ParticleState] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleState> {
        self.particles.iter()
    }

    /// 重新采样池中每一个粒子
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, ranges: &SamplingRanges) {
        for particle in self.particles.iter_mut() {
            *particle = ParticleState::sample(rng, ranges);
        }
    }
}
