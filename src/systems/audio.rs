//! Audio backend on a dedicated thread.
//!
//! The simulation core is headless, so the thread keeps playback *state*
//! (which loops run, which are halted, volumes) instead of owning a device;
//! a front-end backend swaps the state bookkeeping for real playback calls
//! without touching the bridge protocol:
//! - [`audio_thread`] owns the effect bank and loop states and processes
//!   [`AudioCmd`](crate::events::audio::AudioCmd) messages, emitting
//!   [`AudioMessage`](crate::events::audio::AudioMessage) responses.
//! - [`poll_audio_messages`] non-blockingly drains the thread's message
//!   receiver into the ECS mailbox each frame.
//! - [`forward_audio_cmds`] sends ECS-written commands over the channel.
//!
//! The thread blocks on the command channel until [`AudioCmd::Shutdown`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::progress::SpeedUpdated;
use crate::resources::audio::AudioBridge;
use crate::resources::gameconfig::GameConfig;
use bevy_ecs::prelude::Messages;
use bevy_ecs::{
    prelude::{MessageReader, MessageWriter, Res},
    system::ResMut,
};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use rustc_hash::FxHashSet;

/// One-shot effects the bank knows about.
const FX_BANK: [&str; 5] = [
    "click",
    "crash",
    "deliver_start",
    "deliver_success",
    "deliver_failed",
];

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox. Non-blocking, runs every frame.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS-written [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(
    bridge: Res<AudioBridge>,
    mut reader: bevy_ecs::prelude::MessageReader<AudioCmd>,
) {
    for cmd in reader.read() {
        // Ignore send errors during shutdown.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Ride the ambient mix on the run speed: every milestone pushes the loops
/// a little louder until the speed cap pins the level at full.
pub fn update_ambient_level(
    cfg: Res<GameConfig>,
    mut speeds: MessageReader<SpeedUpdated>,
    mut audio: MessageWriter<AudioCmd>,
) {
    if let Some(update) = speeds.read().last() {
        audio.write(AudioCmd::SetAmbientLevel {
            level: (update.speed / cfg.speed_cap()).clamp(0.0, 1.0),
        });
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    #[default]
    Stopped,
    Playing,
    Halted,
}

/// Entry point of the dedicated audio thread.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    debug!(
        "audio thread starting (id={:?})",
        std::thread::current().id()
    );

    let bank: FxHashSet<&str> = FX_BANK.iter().copied().collect();
    let mut ambient = LoopState::Stopped;
    let mut drone_loop = LoopState::Stopped;
    let mut ambient_level: f32 = 1.0;
    let mut master_volume: f32 = 1.0;

    fn play_fx(bank: &FxHashSet<&str>, tx_msg: &Sender<AudioMessage>, id: String, volume: f32) {
        if bank.contains(id.as_str()) {
            debug!("audio: fx '{}' at volume {:.2}", id, volume);
            let _ = tx_msg.send(AudioMessage::FxStarted { id });
        } else {
            warn!("audio: unknown fx '{}'", id);
            let _ = tx_msg.send(AudioMessage::UnknownFx { id });
        }
    }

    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            AudioCmd::PlayFx { id } => play_fx(&bank, &tx_msg, id, master_volume),
            AudioCmd::PlayFxAt { id, position } => {
                debug!("audio: positioned fx at {:?}", position);
                play_fx(&bank, &tx_msg, id, master_volume);
            }
            AudioCmd::StartAmbient => {
                ambient = LoopState::Playing;
                let _ = tx_msg.send(AudioMessage::AmbientStarted);
            }
            AudioCmd::StopAmbient => {
                ambient = LoopState::Stopped;
                let _ = tx_msg.send(AudioMessage::AmbientStopped);
            }
            AudioCmd::HaltAmbient => {
                if ambient == LoopState::Playing {
                    ambient = LoopState::Halted;
                }
            }
            AudioCmd::ResumeAmbient => {
                if ambient == LoopState::Halted {
                    ambient = LoopState::Playing;
                }
            }
            AudioCmd::SetAmbientLevel { level } => {
                ambient_level = level.clamp(0.0, 1.0);
                debug!("audio: ambient level {:.2}", ambient_level);
            }
            AudioCmd::StartDroneLoop => drone_loop = LoopState::Playing,
            AudioCmd::StopDroneLoop => drone_loop = LoopState::Stopped,
            AudioCmd::HaltDroneLoop => {
                if drone_loop == LoopState::Playing {
                    drone_loop = LoopState::Halted;
                }
            }
            AudioCmd::ResumeDroneLoop => {
                if drone_loop == LoopState::Halted {
                    drone_loop = LoopState::Playing;
                }
            }
            AudioCmd::SetMasterVolume { volume } => {
                master_volume = volume.clamp(0.0, 1.0);
            }
            AudioCmd::Shutdown => break,
        }
    }

    debug!("audio thread exiting");
}
