// Assistant Console - ui/theme.rs
//
// Colour scheme, engine-state colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::EngineState;
use egui::Color32;

/// Badge colour for a given engine state.
pub fn engine_state_colour(state: EngineState) -> Color32 {
    match state {
        EngineState::Running => Color32::from_rgb(34, 197, 94),    // Green 500
        EngineState::Processing => Color32::from_rgb(59, 130, 246), // Blue 500
        EngineState::Starting => Color32::from_rgb(234, 179, 8),   // Yellow 500
        EngineState::Warning => Color32::from_rgb(234, 179, 8),    // Yellow 500
        EngineState::Error => Color32::from_rgb(239, 68, 68),      // Red 500
        EngineState::Stopped => Color32::from_rgb(107, 114, 128),  // Gray 500
        EngineState::Offline => Color32::from_rgb(156, 163, 175),  // Gray 400
        EngineState::Unknown => Color32::from_rgb(156, 163, 175),  // Gray 400
    }
}

/// Subtle background tint behind the engine-state badge.
pub fn engine_state_bg_colour(state: EngineState) -> Color32 {
    let c = engine_state_colour(state);
    Color32::from_rgba_premultiplied(c.r(), c.g(), c.b(), 30)
}

/// Accent colour for the "unsaved changes" marker.
pub const DIRTY_MARKER: Color32 = Color32::from_rgb(251, 191, 36); // Amber 400

/// Colour for destructive-action buttons (Remove, Stop).
pub const DESTRUCTIVE: Color32 = Color32::from_rgb(220, 38, 38); // Red 600

/// Layout constants.
pub const EDITOR_DIALOG_WIDTH: f32 = 520.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;

/// Apply the theme and font size to the egui context.
///
/// Called at startup and whenever the user toggles the theme or changes
/// the font size; egui restyles on the next frame.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    let mut style = if dark_mode {
        let mut s = (*ctx.style()).clone();
        s.visuals = egui::Visuals::dark();
        s
    } else {
        let mut s = (*ctx.style()).clone();
        s.visuals = egui::Visuals::light();
        s
    };

    for (text_style, font_id) in style.text_styles.iter_mut() {
        font_id.size = match text_style {
            egui::TextStyle::Heading => font_size * 1.4,
            egui::TextStyle::Small => font_size * 0.8,
            _ => font_size,
        };
    }

    ctx.set_style(style);
}
