//! 消耗控制模块
//!
//! 点击扣减人口计数，计数归零后渲染切换到终局字幕。
//! 终局只是渲染分支，模拟照常运行。

pub mod counter;
pub mod pointer;
#[cfg(test)]
mod property_tests;

pub use counter::{PopulationCounter, RenderMode};
pub use pointer::{input_system, DepletionService, PointerPhase, PointerState};
