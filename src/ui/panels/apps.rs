// Assistant Console - ui/panels/apps.rs
//
// Custom apps tab: list plus modal editor. A custom app maps a spoken
// name onto an executable path so the engine can launch programs the
// standard app index does not know about.

use crate::app::state::{AppEditor, AppState, SettingsCommand};
use crate::core::model::CustomApp;
use crate::ui::theme;

/// Render the Custom Apps tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Custom Apps");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{2795} Add App").clicked() {
                state.app_editor = Some(AppEditor {
                    index: None,
                    app: CustomApp {
                        name: String::new(),
                        exe_path: String::new(),
                    },
                });
            }
        });
    });
    ui.label(
        egui::RichText::new("Executables the engine can launch by their spoken name.")
            .small()
            .weak(),
    );
    ui.add_space(8.0);

    if state.settings.custom_apps.is_empty() {
        ui.label(egui::RichText::new("No custom apps registered.").weak());
    }

    let mut edit_request: Option<usize> = None;
    let mut remove_request: Option<usize> = None;

    egui::ScrollArea::vertical()
        .id_salt("apps_list")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (idx, app) in state.settings.custom_apps.iter().enumerate() {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&app.name).strong());
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
                    ui.monospace(egui::RichText::new(&app.exe_path).small().weak());
                });
                ui.add_space(4.0);
            }
        });

    if let Some(idx) = edit_request {
        state.app_editor = Some(AppEditor {
            index: Some(idx),
            app: state.settings.custom_apps[idx].clone(),
        });
    }
    if let Some(idx) = remove_request {
        state.push_command(SettingsCommand::RemoveApp(idx));
    }
}

/// Render the custom app editor dialog (if open).
pub fn render_editor(ctx: &egui::Context, state: &mut AppState) {
    let Some(mut editor) = state.app_editor.take() else {
        return;
    };

    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    let title = if editor.index.is_some() {
        "Edit Custom App"
    } else {
        "Add Custom App"
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(theme::EDITOR_DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("app_editor_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(
                        egui::TextEdit::singleline(&mut editor.app.name)
                            .hint_text("Spoken name...")
                            .desired_width(300.0),
                    );
                    ui.end_row();

                    ui.label("Executable:");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut editor.app.exe_path)
                                .hint_text("Path to the executable")
                                .desired_width(240.0),
                        );
                        if ui.button("Browse\u{2026}").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Executables", &["exe", "bat", "cmd"])
                                .pick_file()
                            {
                                editor.app.exe_path = path.to_string_lossy().to_string();
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let can_save = !editor.app.name.trim().is_empty()
                    && !editor.app.exe_path.trim().is_empty();
                if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if save {
        state.push_command(SettingsCommand::SaveApp {
            index: editor.index,
            app: editor.app,
        });
    } else if open && !cancel {
        state.app_editor = Some(editor);
    }
}
