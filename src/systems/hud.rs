//! Headless HUD: drains the value feeds and mirrors them to the log.
//!
//! A rendering front-end would replace `hud_monitor` with widgets reading
//! the same feeds; the double-buffered message stores still need their
//! per-frame `update` either way.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use log::info;

use crate::events::delivery::{DeliveredUpdated, DeliveringUpdated};
use crate::events::guidance::GpsUpdated;
use crate::events::progress::{MetersUpdated, SpeedUpdated};

/// Swap the message buffers once per tick so readers see each value once.
pub fn update_value_messages(
    mut meters: ResMut<Messages<MetersUpdated>>,
    mut speed: ResMut<Messages<SpeedUpdated>>,
    mut delivering: ResMut<Messages<DeliveringUpdated>>,
    mut delivered: ResMut<Messages<DeliveredUpdated>>,
    mut gps: ResMut<Messages<GpsUpdated>>,
) {
    meters.update();
    speed.update();
    delivering.update();
    delivered.update();
    gps.update();
}

pub fn hud_monitor(
    mut meters: MessageReader<MetersUpdated>,
    mut speed: MessageReader<SpeedUpdated>,
    mut delivering: MessageReader<DeliveringUpdated>,
    mut delivered: MessageReader<DeliveredUpdated>,
    mut gps: MessageReader<GpsUpdated>,
) {
    for m in meters.read() {
        if m.meters % 100 == 0 {
            info!("HUD: {} m", m.meters);
        }
    }
    for s in speed.read() {
        info!("HUD: speed {:.2}", s.speed);
    }
    for d in delivering.read() {
        info!(
            "HUD: {}",
            if d.delivering {
                "package on board"
            } else {
                "no package"
            }
        );
    }
    for d in delivered.read() {
        info!("HUD: {} delivered", d.delivered);
    }
    for g in gps.read() {
        match g.direction {
            Some(-1) => info!("HUD: GPS says turn left"),
            Some(1) => info!("HUD: GPS says turn right"),
            Some(_) => info!("HUD: GPS says straight on"),
            None => info!("HUD: GPS idle"),
        }
    }
}
