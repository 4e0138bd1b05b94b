//! Station trigger glue.
//!
//! Flying through a station volume asks the [`DeliveryState`] arbiter for a
//! pickup or a drop-off. On success the station is consumed (despawned) and
//! the resulting facts go out as events and value feeds; on refusal the
//! station stays and nothing is published.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::station::Station;
use crate::events::audio::AudioCmd;
use crate::events::collision::TriggerEnterEvent;
use crate::events::delivery::{
    DeliverEndEvent, DeliverStartEvent, DeliveredUpdated, DeliveringUpdated,
};
use crate::resources::delivery::DeliveryState;
use crate::resources::worldsignals::WorldSignals;

pub fn observe_station_enter(
    trigger: On<TriggerEnterEvent>,
    mut commands: Commands,
    stations: Query<&Station>,
    mut delivery: ResMut<DeliveryState>,
    mut signals: ResMut<WorldSignals>,
    mut delivering_writer: MessageWriter<DeliveringUpdated>,
    mut delivered_writer: MessageWriter<DeliveredUpdated>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let volume = trigger.event().volume;
    let Ok(station) = stations.get(volume) else {
        return;
    };

    if station.is_dropoff {
        if delivery.try_dropoff() {
            commands.entity(volume).despawn();
            signals.set_integer("delivered", delivery.delivered());
            delivering_writer.write(DeliveringUpdated { delivering: false });
            delivered_writer.write(DeliveredUpdated {
                delivered: delivery.delivered(),
            });
            commands.trigger(DeliverEndEvent { success: true });
            audio.write(AudioCmd::PlayFx {
                id: "deliver_success".into(),
            });
            info!("Delivery #{} completed", delivery.delivered());
        }
    } else if delivery.try_pickup() {
        commands.entity(volume).despawn();
        delivering_writer.write(DeliveringUpdated { delivering: true });
        commands.trigger(DeliverStartEvent {});
        audio.write(AudioCmd::PlayFx {
            id: "deliver_start".into(),
        });
        info!("Package picked up");
    }
}
