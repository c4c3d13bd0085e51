//! 消耗计数器
//!
//! 剩余可显示的分身数量。只减不增，下限为 0；归零即进入终局画面。

use bevy_ecs::prelude::*;

/// 渲染分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// 绘制粒子群
    Swarm,
    /// 计数归零后的终局字幕
    Terminal,
}

/// 人口计数器资源
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationCounter {
    remaining: u32,
    initial: u32,
}

impl PopulationCounter {
    pub fn new(initial: u32) -> Self {
        Self {
            remaining: initial,
            initial,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// 减一，已为 0 时保持不变；返回是否实际减少
    pub fn decrement(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(next) => {
                self.remaining = next;
                true
            }
            None => false,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.is_depleted() {
            RenderMode::Terminal
        } else {
            RenderMode::Swarm
        }
    }

    /// 恢复到初始值（仅在屏幕重新进入时调用）
    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut counter = PopulationCounter::new(100);
        let mut changed = 0;
        for _ in 0..1000 {
            if counter.decrement() {
                changed += 1;
            }
        }
        assert_eq!(changed, 100);
        assert_eq!(counter.remaining(), 0);
        assert!(counter.is_depleted());
    }

    #[test]
    fn test_render_mode_switches_only_at_zero() {
        let mut counter = PopulationCounter::new(2);
        assert_eq!(counter.render_mode(), RenderMode::Swarm);
        counter.decrement();
        assert_eq!(counter.render_mode(), RenderMode::Swarm);
        counter.decrement();
        assert_eq!(counter.render_mode(), RenderMode::Terminal);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut counter = PopulationCounter::new(5);
        counter.decrement();
        counter.reset();
        assert_eq!(counter.remaining(), 5);
        assert_eq!(counter.initial(), 5);
    }
}
