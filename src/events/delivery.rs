//! Delivery events and value feeds.
//!
//! [`DeliverStartEvent`] / [`DeliverEndEvent`] are triggered facts about the
//! current delivery leg; the `*Updated` messages are value feeds for
//! observers such as the HUD. The delivery arbiter itself is
//! [`crate::resources::delivery::DeliveryState`]; these events never carry
//! negotiation state back to the publisher.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Event;

/// A package was picked up: a delivery leg is now active.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeliverStartEvent {}

/// The active delivery leg ended.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeliverEndEvent {
    /// True on drop-off, false on a navigation failure.
    pub success: bool,
}

/// Carrying flag changed; published exactly once per transition.
#[derive(Message, Debug, Clone, Copy)]
pub struct DeliveringUpdated {
    pub delivering: bool,
}

/// Completed-deliveries count changed.
#[derive(Message, Debug, Clone, Copy)]
pub struct DeliveredUpdated {
    pub delivered: i32,
}
