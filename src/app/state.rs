// Assistant Console - app/state.rs
//
// Application state management. Holds the loaded settings document,
// active tab, editor dialog state, and the request flags/commands the
// panels hand to the update loop. Owned by the eframe::App implementation.
//
// Panels never perform I/O: they mutate this state and queue
// `SettingsCommand`s; gui.rs drains the queue against the settings store
// each frame and reloads.

use crate::core::model::{Action, ActionType, ChromeProfile, CustomApp, ExecutionPlan, Settings};
use serde::{Deserialize, Serialize};

/// Top-level tabs, mirroring the console's feature areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Tab {
    #[default]
    General,
    Plans,
    Chrome,
    Apps,
    Logs,
    About,
}

impl Tab {
    /// All tabs in display order.
    pub fn all() -> &'static [Tab] {
        &[
            Tab::General,
            Tab::Plans,
            Tab::Chrome,
            Tab::Apps,
            Tab::Logs,
            Tab::About,
        ]
    }

    /// Tab-bar label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::General => "General",
            Tab::Plans => "Execution Plans",
            Tab::Chrome => "Chrome Profiles",
            Tab::Apps => "Custom Apps",
            Tab::Logs => "Logs",
            Tab::About => "About",
        }
    }
}

/// A settings-document mutation queued by a panel.
#[derive(Debug)]
pub enum SettingsCommand {
    /// Persist the in-memory `settings` wholesale (General tab Save).
    SaveAll,
    SavePlan {
        index: Option<usize>,
        plan: ExecutionPlan,
    },
    RemovePlan(usize),
    SaveProfile {
        index: Option<usize>,
        profile: ChromeProfile,
    },
    RemoveProfile(usize),
    SaveApp {
        index: Option<usize>,
        app: CustomApp,
    },
    RemoveApp(usize),
}

/// Execution-plan editor dialog state. `index` is `None` for a new plan.
#[derive(Debug)]
pub struct PlanEditor {
    pub index: Option<usize>,
    pub plan: ExecutionPlan,
    /// Nested action editor, open while an action is being edited.
    pub action: Option<ActionEditor>,
}

impl PlanEditor {
    pub fn new() -> Self {
        Self {
            index: None,
            plan: ExecutionPlan::empty(),
            action: None,
        }
    }

    pub fn edit(index: usize, plan: ExecutionPlan) -> Self {
        Self {
            index: Some(index),
            plan,
            action: None,
        }
    }
}

/// Action editor dialog state nested inside the plan editor.
///
/// Numeric fields are edited as text and parsed on save so partial input
/// ("-", "1") never fights the widget.
#[derive(Debug)]
pub struct ActionEditor {
    pub index: Option<usize>,
    pub action: Action,
    pub monitor_index_text: String,
    pub volume_change_text: String,
}

impl ActionEditor {
    pub fn new() -> Self {
        Self {
            index: None,
            action: Action::new(ActionType::LaunchApp),
            monitor_index_text: String::new(),
            volume_change_text: String::new(),
        }
    }

    pub fn edit(index: usize, action: Action) -> Self {
        let monitor_index_text = action
            .monitor_index
            .map(|v| v.to_string())
            .unwrap_or_default();
        let volume_change_text = action
            .volume_change
            .map(|v| v.to_string())
            .unwrap_or_default();
        Self {
            index: Some(index),
            action,
            monitor_index_text,
            volume_change_text,
        }
    }

    /// Fold the text mirrors back into the action.
    pub fn finish(mut self) -> Action {
        self.action.monitor_index = self.monitor_index_text.trim().parse().ok();
        self.action.volume_change = self.volume_change_text.trim().parse().ok();
        self.action
    }
}

/// Chrome profile editor dialog state.
#[derive(Debug)]
pub struct ProfileEditor {
    pub index: Option<usize>,
    pub profile: ChromeProfile,
}

/// Custom app editor dialog state.
#[derive(Debug)]
pub struct AppEditor {
    pub index: Option<usize>,
    pub app: CustomApp,
}

/// Top-level application state.
pub struct AppState {
    /// In-memory copy of the engine settings document.
    pub settings: Settings,

    /// True when General-tab edits have not been saved yet.
    pub settings_dirty: bool,

    /// Currently visible tab.
    pub active_tab: Tab,

    /// Dark (true) or light (false) theme.
    pub dark_mode: bool,

    /// Body font size in points.
    pub font_size: f32,

    /// Status message for the status bar.
    pub status_message: String,

    /// Where the settings document lives (shown after a save).
    pub settings_path_display: String,

    /// Whether the engine is registered to start at login.
    pub startup_enabled: bool,

    /// False on platforms without startup registration; disables the toggle.
    pub startup_supported: bool,

    /// Non-fatal warnings from startup (config validation etc.).
    pub warnings: Vec<String>,

    // ---- Editor dialogs ----
    pub plan_editor: Option<PlanEditor>,
    pub profile_editor: Option<ProfileEditor>,
    pub app_editor: Option<AppEditor>,

    // ---- Requests consumed by gui.rs each frame ----
    /// Queued settings-document mutations.
    pub pending_commands: Vec<SettingsCommand>,
    /// Desired startup-registration state, when the user flipped the toggle.
    pub request_set_startup: Option<bool>,
    /// The user asked to start the engine.
    pub request_start_engine: bool,
    /// The user asked to stop the engine.
    pub request_stop_engine: bool,
    /// The user asked for a health re-check.
    pub request_health_check: bool,
}

impl AppState {
    /// Create initial state around a loaded settings document.
    pub fn new(settings: Settings, dark_mode: bool, font_size: f32) -> Self {
        Self {
            settings,
            settings_dirty: false,
            active_tab: Tab::default(),
            dark_mode,
            font_size,
            status_message: "Ready.".to_string(),
            settings_path_display: String::new(),
            startup_enabled: false,
            startup_supported: cfg!(target_os = "windows"),
            warnings: Vec::new(),
            plan_editor: None,
            profile_editor: None,
            app_editor: None,
            pending_commands: Vec::new(),
            request_set_startup: None,
            request_start_engine: false,
            request_stop_engine: false,
            request_health_check: false,
        }
    }

    /// Queue a settings mutation for the update loop.
    pub fn push_command(&mut self, command: SettingsCommand) {
        self.pending_commands.push(command);
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The action editor folds its text mirrors back into numeric fields,
    /// dropping unparseable input.
    #[test]
    fn test_action_editor_parses_numeric_mirrors() {
        let mut editor = ActionEditor::new();
        editor.monitor_index_text = "2".to_string();
        editor.volume_change_text = "-10".to_string();
        let action = editor.finish();
        assert_eq!(action.monitor_index, Some(2));
        assert_eq!(action.volume_change, Some(-10));

        let mut editor = ActionEditor::new();
        editor.monitor_index_text = "not a number".to_string();
        editor.volume_change_text = "  ".to_string();
        let action = editor.finish();
        assert_eq!(action.monitor_index, None);
        assert_eq!(action.volume_change, None);
    }

    /// Editing an existing action pre-fills the text mirrors.
    #[test]
    fn test_action_editor_prefills_from_action() {
        let mut action = Action::new(ActionType::MonitorControl);
        action.monitor_index = Some(1);
        let editor = ActionEditor::edit(3, action);
        assert_eq!(editor.index, Some(3));
        assert_eq!(editor.monitor_index_text, "1");
        assert_eq!(editor.volume_change_text, "");
    }
}
