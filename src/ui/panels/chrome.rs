// Assistant Console - ui/panels/chrome.rs
//
// Chrome profiles tab: list plus modal editor. A profile is a display
// name and the path of the .lnk shortcut that opens Chrome with that
// profile; the engine resolves everything else.

use crate::app::state::{AppState, ProfileEditor, SettingsCommand};
use crate::core::model::ChromeProfile;
use crate::ui::theme;

/// Render the Chrome Profiles tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Chrome Profiles");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{2795} Add Profile").clicked() {
                state.profile_editor = Some(ProfileEditor {
                    index: None,
                    profile: ChromeProfile {
                        name: String::new(),
                        shortcut_path: String::new(),
                    },
                });
            }
        });
    });
    ui.label(
        egui::RichText::new("Profiles the engine can open by name via their desktop shortcuts.")
            .small()
            .weak(),
    );
    ui.add_space(8.0);

    if state.settings.chrome_profiles.is_empty() {
        ui.label(egui::RichText::new("No Chrome profiles registered.").weak());
    }

    let mut edit_request: Option<usize> = None;
    let mut remove_request: Option<usize> = None;

    egui::ScrollArea::vertical()
        .id_salt("chrome_list")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (idx, profile) in state.settings.chrome_profiles.iter().enumerate() {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&profile.name).strong());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui
                                    .small_button(
                                        egui::RichText::new("Remove").color(theme::DESTRUCTIVE),
                                    )
                                    .clicked()
                                {
                                    remove_request = Some(idx);
                                }
                                if ui.small_button("Edit").clicked() {
                                    edit_request = Some(idx);
                                }
                            },
                        );
                    });
                    ui.monospace(egui::RichText::new(&profile.shortcut_path).small().weak());
                });
                ui.add_space(4.0);
            }
        });

    if let Some(idx) = edit_request {
        state.profile_editor = Some(ProfileEditor {
            index: Some(idx),
            profile: state.settings.chrome_profiles[idx].clone(),
        });
    }
    if let Some(idx) = remove_request {
        state.push_command(SettingsCommand::RemoveProfile(idx));
    }
}

/// Render the profile editor dialog (if open).
pub fn render_editor(ctx: &egui::Context, state: &mut AppState) {
    let Some(mut editor) = state.profile_editor.take() else {
        return;
    };

    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    let title = if editor.index.is_some() {
        "Edit Chrome Profile"
    } else {
        "Add Chrome Profile"
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(theme::EDITOR_DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("profile_editor_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(
                        egui::TextEdit::singleline(&mut editor.profile.name)
                            .hint_text("Profile name...")
                            .desired_width(300.0),
                    );
                    ui.end_row();

                    ui.label("Shortcut:");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut editor.profile.shortcut_path)
                                .hint_text("Path to the profile's .lnk shortcut")
                                .desired_width(240.0),
                        );
                        if ui.button("Browse\u{2026}").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Shortcuts", &["lnk"])
                                .pick_file()
                            {
                                editor.profile.shortcut_path =
                                    path.to_string_lossy().to_string();
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let can_save = !editor.profile.name.trim().is_empty()
                    && !editor.profile.shortcut_path.trim().is_empty();
                if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if save {
        state.push_command(SettingsCommand::SaveProfile {
            index: editor.index,
            profile: editor.profile,
        });
    } else if open && !cancel {
        state.profile_editor = Some(editor);
    }
}
