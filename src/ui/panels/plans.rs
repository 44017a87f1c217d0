// Assistant Console - ui/panels/plans.rs
//
// Execution plans tab: the plan list plus the modal plan editor with its
// nested action editor.
//
// Editor flow mirrors the other CRUD tabs: the list view queues
// SettingsCommands; the editors work on a detached copy in AppState and
// only queue a save when the user confirms, so Cancel is always lossless.

use crate::app::state::{ActionEditor, AppState, PlanEditor, SettingsCommand};
use crate::core::model::{ActionType, MonitorAction, WindowPosition};
use crate::ui::theme;

/// Render the Execution Plans tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Execution Plans");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{2795} Add Plan").clicked() {
                state.plan_editor = Some(PlanEditor::new());
            }
        });
    });
    ui.label(
        egui::RichText::new(
            "Named action sequences the engine runs on voice command or at startup.",
        )
        .small()
        .weak(),
    );
    ui.add_space(8.0);

    if state.settings.execution_plans.is_empty() {
        ui.label(egui::RichText::new("No execution plans yet.").weak());
    }

    let mut edit_request: Option<usize> = None;
    let mut remove_request: Option<usize> = None;

    egui::ScrollArea::vertical()
        .id_salt("plans_list")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (idx, plan) in state.settings.execution_plans.iter().enumerate() {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&plan.name).strong());
                        if plan.run_on_startup == Some(true) {
                            ui.label(egui::RichText::new("runs on startup").small().weak());
                        }
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
                    let summary: Vec<&str> =
                        plan.actions.iter().map(|a| a.action_type.label()).collect();
                    ui.label(
                        egui::RichText::new(format!(
                            "{} action(s): {}",
                            plan.actions.len(),
                            summary.join(", ")
                        ))
                        .small()
                        .weak(),
                    );
                });
                ui.add_space(4.0);
            }
        });

    if let Some(idx) = edit_request {
        let plan = state.settings.execution_plans[idx].clone();
        state.plan_editor = Some(PlanEditor::edit(idx, plan));
    }
    if let Some(idx) = remove_request {
        state.push_command(SettingsCommand::RemovePlan(idx));
    }
}

/// Render the plan editor dialog (if open). Called from gui.rs with the
/// full context so the window floats above every tab.
pub fn render_editor(ctx: &egui::Context, state: &mut AppState) {
    let Some(mut editor) = state.plan_editor.take() else {
        return;
    };

    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    let title = if editor.index.is_some() {
        "Edit Execution Plan"
    } else {
        "Add Execution Plan"
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(theme::EDITOR_DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("plan_editor_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(
                        egui::TextEdit::singleline(&mut editor.plan.name)
                            .hint_text("Plan name...")
                            .desired_width(300.0),
                    );
                    ui.end_row();
                });

            let mut run_on_startup = editor.plan.run_on_startup.unwrap_or(false);
            if ui
                .checkbox(&mut run_on_startup, "Run this plan when the engine starts")
                .changed()
            {
                editor.plan.run_on_startup = Some(run_on_startup);
            }

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Actions").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("\u{2795} Add Action").clicked() {
                        editor.action = Some(ActionEditor::new());
                    }
                });
            });

            let mut edit_action: Option<usize> = None;
            let mut remove_action: Option<usize> = None;
            for (idx, action) in editor.plan.actions.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(action.action_type.label());
                    if let Some(ref target) = action.target {
                        if !target.is_empty() {
                            ui.monospace(egui::RichText::new(target).small());
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button(egui::RichText::new("\u{2715}").color(theme::DESTRUCTIVE))
                            .clicked()
                        {
                            remove_action = Some(idx);
                        }
                        if ui.small_button("Edit").clicked() {
                            edit_action = Some(idx);
                        }
                    });
                });
            }
            if let Some(idx) = edit_action {
                editor.action = Some(ActionEditor::edit(idx, editor.plan.actions[idx].clone()));
            }
            if let Some(idx) = remove_action {
                editor.plan.actions.remove(idx);
            }

            // Nested action editor, inline below the list. The flags are
            // applied after the borrow on `editor.action` ends.
            let mut action_done = false;
            let mut action_cancel = false;
            if let Some(action_editor) = editor.action.as_mut() {
                ui.add_space(8.0);
                ui.separator();
                render_action_fields(ui, action_editor);
                ui.horizontal(|ui| {
                    if ui.button("Save Action").clicked() {
                        action_done = true;
                    }
                    if ui.button("Cancel").clicked() {
                        action_cancel = true;
                    }
                });
            }
            if action_done {
                if let Some(action_editor) = editor.action.take() {
                    let index = action_editor.index;
                    let action = action_editor.finish();
                    match index {
                        Some(idx) => editor.plan.actions[idx] = action,
                        None => editor.plan.actions.push(action),
                    }
                }
            } else if action_cancel {
                editor.action = None;
            }

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                let can_save = !editor.plan.name.trim().is_empty();
                if ui
                    .add_enabled(can_save, egui::Button::new("Save Plan"))
                    .clicked()
                {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
                if !can_save {
                    ui.label(egui::RichText::new("a name is required").small().weak());
                }
            });
        });

    if save {
        state.push_command(SettingsCommand::SavePlan {
            index: editor.index,
            plan: editor.plan,
        });
    } else if open && !cancel {
        // Dialog stays open.
        state.plan_editor = Some(editor);
    }
}

/// Render the per-type action fields.
///
/// Which fields are shown follows what the engine consumes per action
/// type; all values round-trip even when hidden.
fn render_action_fields(ui: &mut egui::Ui, editor: &mut ActionEditor) {
    let action_type = editor.action.action_type;

    egui::Grid::new("action_editor_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Action type:");
            let mut selected = action_type;
            egui::ComboBox::from_id_salt("action_type")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for candidate in ActionType::all() {
                        ui.selectable_value(&mut selected, *candidate, candidate.label());
                    }
                });
            if selected != editor.action.action_type {
                editor.action.action_type = selected;
            }
            ui.end_row();

            ui.label("Target:");
            let mut target = editor.action.target.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut target)
                        .hint_text("Application name or path")
                        .desired_width(280.0),
                )
                .changed()
            {
                editor.action.target = if target.is_empty() { None } else { Some(target) };
            }
            ui.end_row();

            if action_type == ActionType::MoveWindow {
                ui.label("Position:");
                let mut position = editor.action.position;
                egui::ComboBox::from_id_salt("action_position")
                    .selected_text(
                        position.map(|p| p.label()).unwrap_or("Select position"),
                    )
                    .show_ui(ui, |ui| {
                        for candidate in WindowPosition::all() {
                            ui.selectable_value(
                                &mut position,
                                Some(*candidate),
                                candidate.label(),
                            );
                        }
                    });
                editor.action.position = position;
                ui.end_row();
            }

            if matches!(
                action_type,
                ActionType::MoveWindow | ActionType::SplitScreen | ActionType::MonitorControl
            ) {
                ui.label("Monitor index:");
                ui.add(
                    egui::TextEdit::singleline(&mut editor.monitor_index_text)
                        .hint_text("0")
                        .desired_width(80.0),
                );
                ui.end_row();
            }

            if action_type == ActionType::UpdateAppVolume {
                ui.label("Volume change:");
                ui.add(
                    egui::TextEdit::singleline(&mut editor.volume_change_text)
                        .hint_text("10")
                        .desired_width(80.0),
                );
                ui.end_row();
            }

            if action_type == ActionType::SplitScreen {
                ui.label("Second app:");
                let mut second = editor.action.second_app.clone().unwrap_or_default();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut second)
                            .hint_text("Second application name or path")
                            .desired_width(280.0),
                    )
                    .changed()
                {
                    editor.action.second_app =
                        if second.is_empty() { None } else { Some(second) };
                }
                ui.end_row();
            }

            if action_type == ActionType::MonitorControl {
                ui.label("Monitor action:");
                let mut monitor_action = editor.action.monitor_action;
                egui::ComboBox::from_id_salt("monitor_action")
                    .selected_text(
                        monitor_action.map(|a| a.label()).unwrap_or("Select action"),
                    )
                    .show_ui(ui, |ui| {
                        for candidate in MonitorAction::all() {
                            ui.selectable_value(
                                &mut monitor_action,
                                Some(*candidate),
                                candidate.label(),
                            );
                        }
                    });
                editor.action.monitor_action = monitor_action;
                ui.end_row();
            }
        });
}
