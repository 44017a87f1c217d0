// Assistant Console - ui/panels/status.rs
//
// Engine status header: colour-coded state badge, status message,
// last-updated time, and the Start / Stop / Refresh controls.
//
// Button enablement mirrors the engine lifecycle: Start is pointless
// while the engine is already up or coming up, Stop while it is already
// down, and everything waits while a request is outstanding.

use crate::app::health::HealthManager;
use crate::app::state::AppState;
use crate::core::model::EngineState;
use crate::ui::theme;
use chrono::{Local, TimeZone};

/// Render the engine status strip under the header.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, health: &HealthManager) {
    let busy = health.busy();
    let engine_state = health
        .latest()
        .map(|h| h.state())
        .unwrap_or(EngineState::Unknown);

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Assistant Status").strong());

        // State badge.
        let badge = format!(" \u{25cf} {} ", engine_state.label());
        ui.label(
            egui::RichText::new(badge)
                .strong()
                .color(theme::engine_state_colour(engine_state))
                .background_color(theme::engine_state_bg_colour(engine_state)),
        );

        if busy {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let can_start = !busy
                && !matches!(engine_state, EngineState::Running | EngineState::Starting);
            if ui
                .add_enabled(can_start, egui::Button::new("\u{25b6} Start"))
                .on_hover_text("Launch the assistant engine")
                .clicked()
            {
                state.request_start_engine = true;
            }

            let can_stop = !busy
                && !matches!(engine_state, EngineState::Stopped | EngineState::Offline);
            if ui
                .add_enabled(
                    can_stop,
                    egui::Button::new(
                        egui::RichText::new("\u{25a0} Stop").color(theme::DESTRUCTIVE),
                    ),
                )
                .on_hover_text("Ask the engine to shut down")
                .clicked()
            {
                state.request_stop_engine = true;
            }

            if ui
                .add_enabled(!busy, egui::Button::new("\u{21bb} Refresh"))
                .on_hover_text("Re-check the engine's health endpoint")
                .clicked()
            {
                state.request_health_check = true;
            }
        });
    });

    if let Some(error) = health.last_error() {
        ui.label(egui::RichText::new(error).color(theme::DESTRUCTIVE).small());
    }

    match health.latest() {
        Some(status) => {
            if !status.message.is_empty() {
                ui.label(egui::RichText::new(&status.message).weak());
            }
            if let Some(unix) = status.timestamp_unix() {
                if let Some(when) = Local.timestamp_opt(unix, 0).single() {
                    ui.label(
                        egui::RichText::new(format!(
                            "Last updated: {}",
                            when.format("%Y-%m-%d %H:%M:%S")
                        ))
                        .small()
                        .weak(),
                    );
                }
            }
        }
        None => {
            ui.label(
                egui::RichText::new(if busy {
                    "Checking status..."
                } else {
                    "No status information available"
                })
                .weak(),
            );
        }
    }
}
