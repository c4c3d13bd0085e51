//! 粒子群配置

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::{ConfigError, ConfigResult};
use crate::impl_default;
use crate::particles::SamplingRanges;

/// 默认人口数量
pub const DEFAULT_POPULATION: usize = 100;

/// 默认重采样周期（固定步数）
pub const DEFAULT_TICK_PERIOD: u32 = 60;

/// 粒子群配置，屏幕加载后作为只读资源插入世界
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// 粒子数量，同时是消耗计数器的初始值
    pub population_size: usize,

    /// 每隔多少个固定步整体重采样一次
    pub tick_period: u32,

    /// 固定步长（秒）
    pub fixed_time_step: f64,

    /// 分身精灵的缩放
    pub sprite_scale: f32,

    /// 速度采样范围
    pub speed_range: Range<f32>,

    /// 像素偏移采样范围
    pub offset_range: Range<i32>,
}

impl_default!(SwarmConfig {
    population_size: DEFAULT_POPULATION,
    tick_period: DEFAULT_TICK_PERIOD,
    fixed_time_step: 1.0 / 60.0,
    sprite_scale: 0.25,
    speed_range: 0.5..1.5,
    offset_range: -250..250,
});

impl SwarmConfig {
    /// 屏幕进入时使用的采样范围
    pub fn start_ranges(&self) -> SamplingRanges {
        SamplingRanges::start(self.speed_range.clone(), self.offset_range.clone())
    }

    /// 周期回绕时使用的采样范围
    pub fn wrap_ranges(&self) -> SamplingRanges {
        SamplingRanges::wrap(self.speed_range.clone(), self.offset_range.clone())
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.population_size == 0 {
            return Err(ConfigError::ValidationError(
                "population_size must be greater than zero".to_string(),
            ));
        }
        if self.tick_period == 0 {
            return Err(ConfigError::ValidationError(
                "tick_period must be greater than zero".to_string(),
            ));
        }
        if !(self.fixed_time_step > 0.0 && self.fixed_time_step.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid fixed_time_step: {}",
                self.fixed_time_step
            )));
        }
        if self.speed_range.start <= 0.0 || self.speed_range.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "speed_range must be a non-empty positive range, got {:?}",
                self.speed_range
            )));
        }
        if self.offset_range.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "offset_range must not be empty, got {:?}",
                self.offset_range
            )));
        }
        if self.sprite_scale <= 0.0 {
            return Err(ConfigError::ValidationError("Invalid sprite scale".to_string()));
        }
        Ok(())
    }
}
