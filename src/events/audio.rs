//! Audio bridge commands and messages.
//!
//! Gameplay sends [`AudioCmd`] messages which are forwarded over a channel
//! to the background audio thread; the thread answers with [`AudioMessage`]s
//! polled back into the ECS. All commands are fire-and-forget and never
//! block the simulation; an unknown effect name is logged by the thread and
//! reported as [`AudioMessage::UnknownFx`], nothing more.

use bevy_ecs::message::Message;
use glam::Vec3;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioCmd {
    /// Play a one-shot effect.
    PlayFx { id: String },
    /// Play a one-shot effect positioned in the world.
    PlayFxAt { id: String, position: Vec3 },
    /// Start the looping background ambient.
    StartAmbient,
    /// Stop the background ambient.
    StopAmbient,
    /// Pause the ambient without resetting it.
    HaltAmbient,
    /// Resume a halted ambient.
    ResumeAmbient,
    /// Set the ambient intensity level in [0, 1].
    SetAmbientLevel { level: f32 },
    /// Start the looping drone rotor sound.
    StartDroneLoop,
    /// Stop the drone rotor sound.
    StopDroneLoop,
    /// Pause the drone rotor sound without resetting it.
    HaltDroneLoop,
    /// Resume a halted drone rotor sound.
    ResumeDroneLoop,
    /// Set the master volume in [0, 1].
    SetMasterVolume { volume: f32 },
    /// Terminate the audio thread.
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioMessage {
    FxStarted { id: String },
    /// The requested effect name is not in the effect bank.
    UnknownFx { id: String },
    AmbientStarted,
    AmbientStopped,
}
