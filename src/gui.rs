// Assistant Console - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the panels, drains the background managers, and applies
// queued settings mutations against the store.

use crate::app::health::HealthManager;
use crate::app::log_view::LogTailView;
use crate::app::prefs::{self, UiPrefs};
use crate::app::state::{AppState, SettingsCommand, Tab};
use crate::bridge::settings_store::SettingsStore;
use crate::bridge::{launcher, startup};
use crate::ui;
use crate::util::constants::{APP_VERSION, HEALTH_POLL_INTERVAL_MS};
use std::path::PathBuf;
use std::time::Instant;

/// The Assistant Console application.
pub struct ConsoleApp {
    pub state: AppState,
    pub store: SettingsStore,
    pub health: HealthManager,
    pub log_view: LogTailView,
    prefs_path: PathBuf,
    resources_dir: Option<PathBuf>,
    /// Last (dark_mode, font_size) pushed into the egui context.
    applied_style: Option<(bool, f32)>,
}

impl ConsoleApp {
    pub fn new(
        state: AppState,
        store: SettingsStore,
        health: HealthManager,
        log_view: LogTailView,
        prefs_path: PathBuf,
        resources_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            state,
            store,
            health,
            log_view,
            prefs_path,
            resources_dir,
            applied_style: None,
        }
    }

    /// Re-read the CRUD collections from disk after a mutation, leaving
    /// unsaved General-tab edits (wake phrase, provider fields) untouched.
    fn reload_collections(&mut self) {
        match self.store.load() {
            Ok(fresh) => {
                self.state.settings.execution_plans = fresh.execution_plans;
                self.state.settings.chrome_profiles = fresh.chrome_profiles;
                self.state.settings.custom_apps = fresh.custom_apps;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reload after mutation failed");
                self.state.status_message = format!("Reload failed: {e}");
            }
        }
    }

    /// Apply one queued settings mutation.
    fn apply_command(&mut self, command: SettingsCommand) {
        let result = match command {
            SettingsCommand::SaveAll => match self.store.save(&self.state.settings) {
                Ok(()) => {
                    self.state.settings_dirty = false;
                    self.state.status_message =
                        format!("Settings saved to {}", self.store.path().display());
                    return;
                }
                Err(e) => Err(e),
            },
            SettingsCommand::SavePlan { index, plan } => match index {
                Some(idx) => self.store.update_execution_plan(idx, plan),
                None => self.store.add_execution_plan(plan),
            },
            SettingsCommand::RemovePlan(idx) => self.store.remove_execution_plan(idx),
            SettingsCommand::SaveProfile { index, profile } => match index {
                Some(idx) => self.store.update_chrome_profile(idx, profile),
                None => self.store.add_chrome_profile(profile),
            },
            SettingsCommand::RemoveProfile(idx) => self.store.remove_chrome_profile(idx),
            SettingsCommand::SaveApp { index, app } => match index {
                Some(idx) => self.store.update_custom_app(idx, app),
                None => self.store.add_custom_app(app),
            },
            SettingsCommand::RemoveApp(idx) => self.store.remove_custom_app(idx),
        };

        match result {
            Ok(()) => {
                self.state.status_message = "Saved.".to_string();
                self.reload_collections();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Settings mutation failed");
                self.state.status_message = format!("Save failed: {e}");
            }
        }
    }

    fn save_prefs(&self) {
        let prefs = UiPrefs {
            version: prefs::PREFS_VERSION,
            dark_mode: self.state.dark_mode,
            font_size: self.state.font_size,
            last_tab: self.state.active_tab,
        };
        if let Err(e) = prefs::save(&prefs, &self.prefs_path) {
            tracing::warn!(error = %e, "Failed to save UI prefs");
        }
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Restyle when the theme or font size changed (and on first frame).
        let style_key = (self.state.dark_mode, self.state.font_size);
        if self.applied_style != Some(style_key) {
            ui::theme::apply(ctx, self.state.dark_mode, self.state.font_size);
            self.applied_style = Some(style_key);
        }

        // Drive the log view only while its tab is visible — leaving the
        // tab stops the poll timer, returning restarts it.
        if self.state.active_tab == Tab::Logs {
            if self.log_view.tick(now) {
                ctx.request_repaint();
            }
            if !self.log_view.is_paused() {
                ctx.request_repaint_after(self.log_view.poll_interval());
            }
        }

        // Engine health: drain and keep the badge fresh while anything is
        // pending or the engine is active.
        if self.health.tick(now) {
            ctx.request_repaint();
        }
        if self.health.busy()
            || self.health.latest().map(|h| h.is_active()).unwrap_or(false)
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                HEALTH_POLL_INTERVAL_MS / 5,
            ));
        }

        // Apply queued settings mutations.
        let commands: Vec<SettingsCommand> = self.state.pending_commands.drain(..).collect();
        for command in commands {
            self.apply_command(command);
        }

        // Engine control requests from the status strip.
        if self.state.request_start_engine {
            self.state.request_start_engine = false;
            self.state.status_message = "Starting engine...".to_string();
            self.health.request_start(self.resources_dir.clone());
        }
        if self.state.request_stop_engine {
            self.state.request_stop_engine = false;
            self.state.status_message = "Stopping engine...".to_string();
            self.health.request_stop();
        }
        if self.state.request_health_check {
            self.state.request_health_check = false;
            self.health.request_check();
        }

        // Startup registration toggle.
        if let Some(enable) = self.state.request_set_startup.take() {
            let sidecar = launcher::sidecar_path(self.resources_dir.as_deref()).ok();
            match startup::set_enabled(enable, sidecar.as_deref()) {
                Ok(()) => {
                    self.state.startup_enabled = enable;
                    self.state.status_message = if enable {
                        "Startup registration enabled.".to_string()
                    } else {
                        "Startup registration disabled.".to_string()
                    };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Startup toggle failed");
                    self.state.status_message = format!("Startup toggle failed: {e}");
                }
            }
        }

        // ---- Header: title, theme toggle, status strip, tab bar ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(crate::util::constants::APP_NAME);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if self.state.dark_mode {
                        "\u{2600}"
                    } else {
                        "\u{1f319}"
                    };
                    if ui
                        .button(icon)
                        .on_hover_text("Toggle dark/light theme")
                        .clicked()
                    {
                        self.state.dark_mode = !self.state.dark_mode;
                        self.save_prefs();
                    }
                });
            });
            ui.add_space(4.0);
            ui::panels::status::render(ui, &mut self.state, &self.health);
            ui.add_space(6.0);
            ui.separator();

            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    let selected = self.state.active_tab == *tab;
                    if ui.selectable_label(selected, tab.label()).clicked() && !selected {
                        self.state.active_tab = *tab;
                        if *tab == Tab::Logs {
                            // Re-entering the tab resumes the poll timer at
                            // once rather than on the next interval.
                            self.log_view.refresh();
                        }
                        self.save_prefs();
                    }
                }
            });
            ui.add_space(4.0);
        });

        // ---- Status bar ----
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(&self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("v{APP_VERSION}")).small().weak(),
                        );
                        if !self.state.warnings.is_empty() {
                            ui.label(
                                egui::RichText::new(format!(
                                    "\u{26a0} {} warning(s)",
                                    self.state.warnings.len()
                                ))
                                .small()
                                .color(ui::theme::DIRTY_MARKER),
                            )
                            .on_hover_text(self.state.warnings.join("\n"));
                        }
                    });
                });
            });

        // ---- Active tab ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::General => ui::panels::general::render(ui, &mut self.state),
            Tab::Plans => ui::panels::plans::render(ui, &mut self.state),
            Tab::Chrome => ui::panels::chrome::render(ui, &mut self.state),
            Tab::Apps => ui::panels::apps::render(ui, &mut self.state),
            Tab::Logs => ui::panels::logs::render(ui, &mut self.log_view),
            Tab::About => ui::panels::about::render(ui),
        });

        // ---- Editor dialogs (float above every tab) ----
        ui::panels::plans::render_editor(ctx, &mut self.state);
        ui::panels::chrome::render_editor(ctx, &mut self.state);
        ui::panels::apps::render_editor(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Persists UI prefs and reaps any engine instance the console spawned
    /// so a closed console never leaves a headless engine holding the
    /// microphone.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_prefs();
        launcher::cleanup_orphans();
    }
}
