//! 音频接口模块
//!
//! 核心只切换循环音频流的播放状态，流的生命周期由宿主管理。
//! 命令通过无界通道投递，发送即返回，不等待确认：
//!
//! - 宿主在主循环里调用 [`AudioReceiver::dispatch`] 泵出命令，或
//! - 把后端交给 [`spawn_audio_driver`]，由独立线程消费

use bevy_ecs::prelude::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread::JoinHandle;

/// 本屏幕使用的音频流
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    /// 背景音乐
    Music,
    /// 按住鼠标时的消耗音效
    Spray,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    SetStreamPlaying { stream: StreamId, playing: bool },
    SetGain { stream: StreamId, gain: f32 },
}

/// 音频协作方
pub trait AudioBackend {
    fn set_stream_playing(&mut self, stream: StreamId, playing: bool);
    fn set_gain(&mut self, stream: StreamId, gain: f32);
}

/// 音频命令队列资源
#[derive(Resource, Debug, Clone)]
pub struct AudioQueue(Sender<AudioCommand>);

impl AudioQueue {
    pub fn send(&self, command: AudioCommand) {
        if self.0.send(command).is_err() {
            tracing::trace!(target: "audio", ?command, "audio receiver gone, command dropped");
        }
    }

    pub fn set_stream_playing(&self, stream: StreamId, playing: bool) {
        self.send(AudioCommand::SetStreamPlaying { stream, playing });
    }

    pub fn set_gain(&self, stream: StreamId, gain: f32) {
        self.send(AudioCommand::SetGain { stream, gain });
    }
}

/// 音频命令接收端，由宿主持有
#[derive(Debug)]
pub struct AudioReceiver(Receiver<AudioCommand>);

impl AudioReceiver {
    /// 取出当前排队的全部命令
    pub fn drain(&self) -> Vec<AudioCommand> {
        self.0.try_iter().collect()
    }

    /// 把排队命令转发给后端，返回转发数量
    pub fn dispatch(&self, backend: &mut dyn AudioBackend) -> usize {
        let mut count = 0;
        for command in self.0.try_iter() {
            apply(backend, command);
            count += 1;
        }
        count
    }
}

fn apply(backend: &mut dyn AudioBackend, command: AudioCommand) {
    match command {
        AudioCommand::SetStreamPlaying { stream, playing } => {
            backend.set_stream_playing(stream, playing)
        }
        AudioCommand::SetGain { stream, gain } => backend.set_gain(stream, gain),
    }
}

/// 创建一对命令队列和接收端
pub fn audio_channel() -> (AudioQueue, AudioReceiver) {
    let (tx, rx) = unbounded::<AudioCommand>();
    (AudioQueue(tx), AudioReceiver(rx))
}

/// 在独立线程中驱动音频后端，所有发送端释放后线程退出
pub fn spawn_audio_driver<B>(mut backend: B) -> (AudioQueue, JoinHandle<()>)
where
    B: AudioBackend + Send + 'static,
{
    let (tx, rx) = unbounded::<AudioCommand>();
    let handle = std::thread::spawn(move || {
        while let Ok(command) = rx.recv() {
            apply(&mut backend, command);
        }
        tracing::debug!(target: "audio", "audio driver stopped");
    });
    (AudioQueue(tx), handle)
}
