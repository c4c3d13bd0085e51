//! 粒子群屏幕
//!
//! 定义 `SwarmScreen` 及其帧循环。
//!
//! # 帧顺序
//!
//! ```text
//! frame(delta)
//!   ├─ 事件阶段   input_system           清空输入缓冲，驱动指针状态机
//!   ├─ 逻辑阶段   integrate_system       按 delta 连续积分
//!   ├─ 固定阶段   tick_system × k        累加器每满一个固定步执行一次
//!   └─ 渲染阶段   render_system          重建 DrawList
//! ```
//!
//! 暂停或停止时只执行渲染阶段。

use bevy_ecs::prelude::*;

use super::error::{ScreenError, ScreenResult};
use super::resources::{FrameStats, ScreenSignals, Time};
use crate::audio::{AudioQueue, StreamId};
use crate::config::ScreenConfig;
use crate::depletion::{input_system, PointerPhase, PointerState, PopulationCounter, RenderMode};
use crate::particles::{
    integrate_system, reset_swarm_system, tick_system, ParticlePool, SwarmRng, TickCounter,
};
use crate::platform::{InputBuffer, InputEvent};
use crate::render::{render_system, DrawList};
use crate::resources::{AssetLoader, ScreenAssets};

/// 屏幕生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    /// 已加载，尚未开始
    Loaded,
    /// 运行中
    Running,
    /// 已暂停，只渲染
    Paused,
    /// 已停止
    Stopped,
}

/// 粒子群屏幕
///
/// 持有一个独立的 `World`，所有状态都是其中的资源，
/// 屏幕被卸载时随之释放。
///
/// # 示例
///
/// ```
/// use party_swarm::config::ScreenConfig;
/// use party_swarm::core::SwarmScreen;
/// use party_swarm::resources::UncheckedAssetLoader;
///
/// let config = ScreenConfig::default();
/// let mut screen = SwarmScreen::load(&config, &mut UncheckedAssetLoader, None).unwrap();
/// screen.start();
/// let draw_list = screen.frame(1.0 / 60.0);
/// assert!(!draw_list.is_empty());
/// ```
pub struct SwarmScreen {
    world: World,
    start_schedule: Schedule,
    event_schedule: Schedule,
    logic_schedule: Schedule,
    fixed_schedule: Schedule,
    render_schedule: Schedule,
    accumulator: f64,
    phase: ScreenPhase,
    assets: ScreenAssets,
}

impl SwarmScreen {
    /// 加载屏幕：验证配置、解析资源、分配粒子池
    ///
    /// 配置或资源错误只导致本屏幕加载失败。
    pub fn load(
        config: &ScreenConfig,
        loader: &mut dyn AssetLoader,
        audio: Option<AudioQueue>,
    ) -> ScreenResult<Self> {
        config.validate()?;
        let assets = ScreenAssets::load(&config.assets, loader)?;

        let population = config.swarm.population_size;
        let initial = u32::try_from(population).map_err(|_| {
            ScreenError::InvalidState(format!("population {} does not fit the counter", population))
        })?;

        // 加载后即可绘制，池中不留未采样的零速粒子
        let mut rng = SwarmRng::from_entropy();
        let mut pool = ParticlePool::with_population(population);
        pool.randomize(&mut rng, &config.swarm.start_ranges());

        let mut world = World::new();
        world.insert_resource(pool);
        world.insert_resource(PopulationCounter::new(initial));
        world.insert_resource(TickCounter::new(config.swarm.tick_period));
        world.insert_resource(PointerState::default());
        world.insert_resource(InputBuffer::default());
        world.insert_resource(DrawList::with_capacity(population + 4));
        world.insert_resource(Time::with_fixed_step(config.swarm.fixed_time_step));
        world.insert_resource(FrameStats::default());
        world.insert_resource(ScreenSignals::default());
        world.insert_resource(rng);
        world.insert_resource(config.swarm.clone());
        world.insert_resource(config.reference_frame);

        if let Some(audio) = audio {
            audio.set_gain(StreamId::Spray, config.assets.spray_gain);
            audio.set_stream_playing(StreamId::Spray, false);
            world.insert_resource(audio);
        }

        tracing::info!(target: "screen", population, "swarm screen loaded");

        Ok(Self {
            world,
            start_schedule: Self::create_start_schedule(),
            event_schedule: Self::create_event_schedule(),
            logic_schedule: Self::create_logic_schedule(),
            fixed_schedule: Self::create_fixed_schedule(),
            render_schedule: Self::create_render_schedule(),
            accumulator: 0.0,
            phase: ScreenPhase::Loaded,
            assets,
        })
    }

    fn create_start_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(reset_swarm_system);
        schedule
    }

    fn create_event_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(input_system);
        schedule
    }

    fn create_logic_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(integrate_system);
        schedule
    }

    fn create_fixed_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(tick_system);
        schedule
    }

    fn create_render_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(render_system);
        schedule
    }

    /// 进入屏幕：全量随机化并重置计数器、指针和累加器，开始播放背景音乐
    pub fn start(&mut self) {
        self.start_schedule.run(&mut self.world);
        self.world.resource_mut::<PopulationCounter>().reset();
        *self.world.resource_mut::<PointerState>() = PointerState::default();
        *self.world.resource_mut::<ScreenSignals>() = ScreenSignals::default();
        *self.world.resource_mut::<FrameStats>() = FrameStats::default();
        self.world.resource_mut::<InputBuffer>().events.clear();
        self.world.resource_mut::<DrawList>().clear();
        {
            let mut time = self.world.resource_mut::<Time>();
            time.elapsed_seconds = 0.0;
            time.animation_seconds = 0.0;
            time.alpha = 0.0;
        }
        self.accumulator = 0.0;

        if let Some(audio) = self.world.get_resource::<AudioQueue>() {
            audio.set_stream_playing(StreamId::Music, true);
        }
        self.phase = ScreenPhase::Running;
        tracing::info!(target: "screen", "swarm screen started");
    }

    /// 停止：关闭全部音频流，之后只渲染
    pub fn stop(&mut self) {
        if let Some(audio) = self.world.get_resource::<AudioQueue>() {
            audio.set_stream_playing(StreamId::Spray, false);
            audio.set_stream_playing(StreamId::Music, false);
        }
        self.world.resource_mut::<PointerState>().phase = PointerPhase::Idle;
        self.phase = ScreenPhase::Stopped;
        tracing::info!(target: "screen", "swarm screen stopped");
    }

    /// 暂停：只保留渲染阶段
    pub fn pause(&mut self) {
        if self.phase == ScreenPhase::Running {
            self.phase = ScreenPhase::Paused;
            tracing::debug!(target: "screen", "swarm screen paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == ScreenPhase::Paused {
            self.phase = ScreenPhase::Running;
            tracing::debug!(target: "screen", "swarm screen resumed");
        }
    }

    /// 卸载屏幕，释放全部状态
    pub fn unload(mut self) {
        if self.phase == ScreenPhase::Running || self.phase == ScreenPhase::Paused {
            self.stop();
        }
        tracing::info!(target: "screen", "swarm screen unloaded");
    }

    /// 投递一条输入，下一次事件阶段处理
    ///
    /// 只有运行中的屏幕接收输入，其余阶段的事件直接丢弃。
    pub fn push_input(&mut self, event: InputEvent) {
        if self.phase != ScreenPhase::Running {
            tracing::trace!(target: "screen", ?event, phase = ?self.phase, "input dropped");
            return;
        }
        self.world.resource_mut::<InputBuffer>().push(event);
    }

    /// 执行一帧并返回本帧绘制列表
    pub fn frame(&mut self, delta_seconds: f32) -> &DrawList {
        let _span = tracing::trace_span!(target: "screen", "frame").entered();

        if self.phase == ScreenPhase::Running {
            self.process_events();
            self.integrate(delta_seconds);
            self.advance_fixed(delta_seconds);
        } else {
            self.world.resource_mut::<InputBuffer>().events.clear();
        }
        self.world.resource_mut::<FrameStats>().frames += 1;
        self.draw()
    }

    fn is_running(&self) -> bool {
        self.phase == ScreenPhase::Running
    }

    /// 事件阶段，仅运行中生效
    pub fn process_events(&mut self) {
        if !self.is_running() {
            return;
        }
        self.event_schedule.run(&mut self.world);
    }

    /// 逻辑阶段：按 `delta_seconds` 连续积分并推进角色动画时钟，仅运行中生效
    pub fn integrate(&mut self, delta_seconds: f32) {
        if !self.is_running() {
            return;
        }
        {
            let mut time = self.world.resource_mut::<Time>();
            time.delta_seconds = delta_seconds;
            time.animation_seconds += f64::from(delta_seconds);
        }
        self.logic_schedule.run(&mut self.world);
    }

    /// 固定阶段：直接执行一个固定步，仅运行中生效
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let step = self.world.resource::<Time>().fixed_time_step;
        self.fixed_schedule.run(&mut self.world);
        self.world.resource_mut::<Time>().elapsed_seconds += step;
        self.world.resource_mut::<FrameStats>().fixed_steps += 1;
    }

    /// 累加可变步长，每满一个固定步执行一次 `tick`
    fn advance_fixed(&mut self, delta_seconds: f32) {
        self.accumulator += f64::from(delta_seconds);
        let step = self.world.resource::<Time>().fixed_time_step;
        while self.accumulator >= step {
            self.tick();
            self.accumulator -= step;
        }
        self.world.resource_mut::<Time>().alpha = self.accumulator / step;
    }

    /// 渲染阶段
    pub fn draw(&mut self) -> &DrawList {
        self.render_schedule.run(&mut self.world);
        self.world.resource::<DrawList>()
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn assets(&self) -> &ScreenAssets {
        &self.assets
    }

    pub fn pool(&self) -> &ParticlePool {
        self.world.resource::<ParticlePool>()
    }

    pub fn counter(&self) -> &PopulationCounter {
        self.world.resource::<PopulationCounter>()
    }

    pub fn tick_counter(&self) -> &TickCounter {
        self.world.resource::<TickCounter>()
    }

    pub fn pointer(&self) -> &PointerState {
        self.world.resource::<PointerState>()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.counter().render_mode()
    }

    pub fn draw_list(&self) -> &DrawList {
        self.world.resource::<DrawList>()
    }

    pub fn stats(&self) -> &FrameStats {
        self.world.resource::<FrameStats>()
    }

    pub fn time(&self) -> &Time {
        self.world.resource::<Time>()
    }

    /// 是否收到了 Escape
    pub fn termination_requested(&self) -> bool {
        self.world.resource::<ScreenSignals>().termination_requested
    }
}
