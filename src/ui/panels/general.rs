// Assistant Console - ui/panels/general.rs
//
// General settings tab: wake phrase, LLM provider selection with the
// OpenAI-specific fields shown only when that provider is active, and the
// startup-registration toggle.
//
// Edits land in the in-memory settings copy and mark it dirty; nothing is
// persisted until the user presses Save (queued as SettingsCommand::SaveAll).

use crate::app::state::{AppState, SettingsCommand};
use crate::core::model::LlmProvider;
use crate::ui::theme;

/// Render the General tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("General Settings");
    ui.label(
        egui::RichText::new("Configure basic assistant settings and the LLM backend.")
            .small()
            .weak(),
    );
    ui.add_space(8.0);

    egui::Grid::new("general_settings_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Wake phrase:");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut state.settings.wake_phrase)
                        .hint_text("Enter wake phrase...")
                        .desired_width(260.0),
                )
                .changed()
            {
                state.settings_dirty = true;
            }
            ui.end_row();

            ui.label("LLM provider:");
            let mut provider = state.settings.llm_provider;
            egui::ComboBox::from_id_salt("llm_provider")
                .selected_text(provider.label())
                .show_ui(ui, |ui| {
                    for candidate in LlmProvider::all() {
                        ui.selectable_value(&mut provider, *candidate, candidate.label());
                    }
                });
            if provider != state.settings.llm_provider {
                state.settings.llm_provider = provider;
                state.settings_dirty = true;
            }
            ui.end_row();
        });

    if state.settings.llm_provider == LlmProvider::Openai {
        ui.add_space(4.0);
        egui::Grid::new("openai_settings_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("OpenAI API key:");
                let mut key = state.settings.openai_api_key.clone().unwrap_or_default();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut key)
                            .password(true)
                            .hint_text("sk-...")
                            .desired_width(260.0),
                    )
                    .changed()
                {
                    state.settings.openai_api_key =
                        if key.is_empty() { None } else { Some(key) };
                    state.settings_dirty = true;
                }
                ui.end_row();

                ui.label("Model:");
                let mut model = state.settings.llm_model.clone().unwrap_or_default();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut model)
                            .hint_text("gpt-4o-mini (default)")
                            .desired_width(260.0),
                    )
                    .changed()
                {
                    state.settings.llm_model =
                        if model.is_empty() { None } else { Some(model) };
                    state.settings_dirty = true;
                }
                ui.end_row();

                ui.label("Base URL (optional):");
                let mut url = state.settings.openai_base_url.clone().unwrap_or_default();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut url)
                            .hint_text("https://api.openai.com/v1")
                            .desired_width(260.0),
                    )
                    .changed()
                {
                    state.settings.openai_base_url =
                        if url.is_empty() { None } else { Some(url) };
                    state.settings_dirty = true;
                }
                ui.end_row();
            });
    }

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(6.0);

    // Startup registration.
    ui.horizontal(|ui| {
        let mut enabled = state.startup_enabled;
        let toggle = ui.add_enabled(
            state.startup_supported,
            egui::Checkbox::new(&mut enabled, "Start the assistant at login"),
        );
        if toggle.changed() {
            state.request_set_startup = Some(enabled);
        }
    });
    ui.label(
        egui::RichText::new(if state.startup_supported {
            "Registers the engine under the current user's startup entries."
        } else {
            "Startup registration is only available on Windows."
        })
        .small()
        .weak(),
    );

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.settings_dirty, egui::Button::new("Save Settings"))
            .on_hover_text("Write the settings document the engine reads")
            .clicked()
        {
            state.push_command(SettingsCommand::SaveAll);
        }
        if state.settings_dirty {
            ui.label(
                egui::RichText::new("\u{25cf} unsaved changes")
                    .small()
                    .color(theme::DIRTY_MARKER),
            );
        }
    });
    if !state.settings_path_display.is_empty() {
        ui.label(
            egui::RichText::new(format!("Document: {}", state.settings_path_display))
                .small()
                .weak(),
        );
    }
}
