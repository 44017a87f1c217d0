// Assistant Console - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers. The settings
// types mirror the engine's on-disk document exactly: field names and
// representations must stay wire-compatible with what the engine reads.

use serde::{Deserialize, Serialize};

// =============================================================================
// Settings document
// =============================================================================

/// The engine settings document (settings.json).
///
/// Owned and consumed by the engine; the console is one writer among
/// potentially several, so unknown future fields must never cause a load
/// failure and optional fields default rather than error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Phrase that wakes the voice pipeline.
    pub wake_phrase: String,

    /// User-authored automation plans.
    pub execution_plans: Vec<ExecutionPlan>,

    /// Registered Chrome profile shortcuts.
    pub chrome_profiles: Vec<ChromeProfile>,

    /// User-registered applications the engine may launch by name.
    pub custom_apps: Vec<CustomApp>,

    /// Which LLM backend the engine uses.
    #[serde(default)]
    pub llm_provider: LlmProvider,

    /// Model name override (provider-specific default when None).
    #[serde(default)]
    pub llm_model: Option<String>,

    /// API key for the OpenAI provider.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Base URL override for OpenAI-compatible endpoints.
    #[serde(default)]
    pub openai_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wake_phrase: crate::util::constants::DEFAULT_WAKE_PHRASE.to_string(),
            execution_plans: Vec::new(),
            chrome_profiles: Vec::new(),
            custom_apps: Vec::new(),
            llm_provider: LlmProvider::default(),
            llm_model: None,
            openai_api_key: None,
            openai_base_url: None,
        }
    }
}

/// LLM backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Local Ollama instance.
    #[default]
    Ollama,
    /// OpenAI (or compatible) cloud endpoint.
    Openai,
}

impl LlmProvider {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ollama => "Ollama (local)",
            Self::Openai => "OpenAI (cloud)",
        }
    }

    /// All variants in display order.
    pub fn all() -> &'static [LlmProvider] {
        &[Self::Ollama, Self::Openai]
    }
}

// =============================================================================
// Execution plans
// =============================================================================

/// A named sequence of automation actions the engine can run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionPlan {
    pub name: String,
    pub actions: Vec<Action>,
    /// When true the engine runs this plan as part of its own startup.
    #[serde(default)]
    pub run_on_startup: Option<bool>,
}

impl ExecutionPlan {
    /// Fresh empty plan for the editor dialog.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            actions: Vec::new(),
            run_on_startup: None,
        }
    }
}

/// One step of an execution plan.
///
/// The console edits these as data only; which fields an action type
/// consumes is an engine concern. The editor shows the fields that are
/// meaningful for each type, but all fields round-trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    pub action_type: ActionType,
    pub target: Option<String>,
    pub position: Option<WindowPosition>,
    pub monitor_index: Option<i32>,
    pub volume_change: Option<i32>,
    pub second_app: Option<String>,
    pub monitor_action: Option<MonitorAction>,
}

impl Action {
    /// Fresh action for the editor dialog.
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            target: None,
            position: None,
            monitor_index: None,
            volume_change: None,
            second_app: None,
            monitor_action: None,
        }
    }
}

/// Action types understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    LaunchApp,
    MoveWindow,
    SplitScreen,
    CloseApp,
    Max,
    Min,
    UpdateAppVolume,
    MonitorControl,
}

impl ActionType {
    /// All variants in editor display order.
    pub fn all() -> &'static [ActionType] {
        &[
            Self::LaunchApp,
            Self::MoveWindow,
            Self::SplitScreen,
            Self::CloseApp,
            Self::Max,
            Self::Min,
            Self::UpdateAppVolume,
            Self::MonitorControl,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LaunchApp => "Launch app",
            Self::MoveWindow => "Move window",
            Self::SplitScreen => "Split screen",
            Self::CloseApp => "Close app",
            Self::Max => "Maximise",
            Self::Min => "Minimise",
            Self::UpdateAppVolume => "Update app volume",
            Self::MonitorControl => "Monitor control",
        }
    }
}

/// Window placement targets for move/split actions.
///
/// Serialised capitalised — the engine matches these strings verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowPosition {
    Maximized,
    Top,
    Bottom,
    Left,
    Right,
}

impl WindowPosition {
    /// All variants in editor display order.
    pub fn all() -> &'static [WindowPosition] {
        &[
            Self::Maximized,
            Self::Top,
            Self::Bottom,
            Self::Left,
            Self::Right,
        ]
    }

    /// Human-readable label (matches the serialised form).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Maximized => "Maximized",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// Monitor enable/disable sub-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorAction {
    Enable,
    Disable,
}

impl MonitorAction {
    pub fn all() -> &'static [MonitorAction] {
        &[Self::Enable, Self::Disable]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

// =============================================================================
// Chrome profiles and custom apps
// =============================================================================

/// A Chrome profile launched via its desktop shortcut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChromeProfile {
    pub name: String,
    pub shortcut_path: String,
}

/// A user-registered application the engine can launch by spoken name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomApp {
    pub name: String,
    pub exe_path: String,
}

// =============================================================================
// Engine health
// =============================================================================

/// Health report from the engine's /health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Raw status string as reported by the engine.
    pub status: String,
    /// Free-form status detail.
    pub message: String,
    /// Unix seconds as a decimal string (the engine emits it as text).
    pub timestamp: String,
}

impl HealthStatus {
    /// Synthesized status used when the engine is unreachable.
    pub fn offline(now_unix_secs: u64) -> Self {
        Self {
            status: "offline".to_string(),
            message: "OS Assistant not started".to_string(),
            timestamp: now_unix_secs.to_string(),
        }
    }

    /// Normalised state for display and polling decisions.
    pub fn state(&self) -> EngineState {
        EngineState::from_status(&self.status)
    }

    /// True while the engine is in a state worth re-polling automatically.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state(),
            EngineState::Running | EngineState::Processing | EngineState::Starting
        )
    }

    /// Parsed report timestamp, if the engine sent a valid unix-seconds value.
    pub fn timestamp_unix(&self) -> Option<i64> {
        self.timestamp.trim().parse().ok()
    }
}

/// Normalised engine states the console distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Processing,
    Starting,
    Warning,
    Error,
    Stopped,
    Offline,
    Unknown,
}

impl EngineState {
    /// Map the engine's raw status string onto a known state.
    pub fn from_status(status: &str) -> Self {
        match status {
            "running" => Self::Running,
            "processing" => Self::Processing,
            "starting" => Self::Starting,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "stopped" => Self::Stopped,
            "offline" => Self::Offline,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label for the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Processing => "Processing",
            Self::Starting => "Starting",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Stopped => "Stopped",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }
}

// =============================================================================
// Log tail chunk
// =============================================================================

/// One unit of newly available log content from the tail-fetch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogChunk {
    /// Bytes appended since the requested offset; may be empty.
    pub content: String,
    /// Position immediately after the last byte returned. The transport may
    /// deliver this as a JSON number or a string; consumers must normalise.
    pub offset: RawOffset,
    /// Identifying location of the log source (display only).
    pub path: String,
}

/// Offset as it arrives on the wire: integer or decimal text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOffset {
    Number(u64),
    Text(String),
}

impl RawOffset {
    /// Normalise to an integer. `None` when the text form does not parse —
    /// callers treat that as a transport failure and skip the cycle.
    pub fn normalize(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<u64> for RawOffset {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The settings document must round-trip the exact field names the
    /// engine reads. A representative document from the engine is parsed
    /// and re-serialised without loss.
    #[test]
    fn test_settings_document_wire_compat() {
        let doc = r#"{
            "wake_phrase": "ola jarvis",
            "execution_plans": [
                {
                    "name": "Morning",
                    "actions": [
                        {
                            "action_type": "launch_app",
                            "target": "chrome",
                            "position": null,
                            "monitor_index": null,
                            "volume_change": null,
                            "second_app": null,
                            "monitor_action": null
                        },
                        {
                            "action_type": "move_window",
                            "target": "chrome",
                            "position": "Left",
                            "monitor_index": 1,
                            "volume_change": null,
                            "second_app": null,
                            "monitor_action": null
                        }
                    ],
                    "run_on_startup": true
                }
            ],
            "chrome_profiles": [
                {"name": "Work", "shortcut_path": "C:\\profiles\\work.lnk"}
            ],
            "custom_apps": [
                {"name": "editor", "exe_path": "C:\\tools\\editor.exe"}
            ],
            "llm_provider": "openai",
            "llm_model": "gpt-4o-mini"
        }"#;

        let settings: Settings = serde_json::from_str(doc).expect("parse");
        assert_eq!(settings.wake_phrase, "ola jarvis");
        assert_eq!(settings.llm_provider, LlmProvider::Openai);
        assert_eq!(settings.llm_model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(settings.execution_plans.len(), 1);
        let plan = &settings.execution_plans[0];
        assert_eq!(plan.run_on_startup, Some(true));
        assert_eq!(plan.actions[0].action_type, ActionType::LaunchApp);
        assert_eq!(plan.actions[1].position, Some(WindowPosition::Left));

        // Field names on the way back out must match the engine's reader.
        let out = serde_json::to_value(&settings).expect("serialise");
        assert_eq!(out["llm_provider"], "openai");
        assert_eq!(
            out["execution_plans"][0]["actions"][0]["action_type"],
            "launch_app"
        );
        assert_eq!(
            out["execution_plans"][0]["actions"][1]["position"],
            "Left"
        );
    }

    /// Documents written before the LLM fields existed must still load,
    /// defaulting to the Ollama provider.
    #[test]
    fn test_settings_older_document_defaults() {
        let doc = r#"{
            "wake_phrase": "hey computer",
            "execution_plans": [],
            "chrome_profiles": [],
            "custom_apps": []
        }"#;
        let settings: Settings = serde_json::from_str(doc).expect("parse");
        assert_eq!(settings.llm_provider, LlmProvider::Ollama);
        assert!(settings.llm_model.is_none());
        assert!(settings.openai_api_key.is_none());
    }

    /// Offsets arrive as numbers or text; both normalise, junk does not.
    #[test]
    fn test_raw_offset_normalization() {
        assert_eq!(RawOffset::Number(12).normalize(), Some(12));
        assert_eq!(RawOffset::Text("12".into()).normalize(), Some(12));
        assert_eq!(RawOffset::Text(" 340 ".into()).normalize(), Some(340));
        assert_eq!(RawOffset::Text("12.5".into()).normalize(), None);
        assert_eq!(RawOffset::Text("".into()).normalize(), None);
        assert_eq!(RawOffset::Text("abc".into()).normalize(), None);
    }

    /// LogChunk must accept both wire shapes of the offset field.
    #[test]
    fn test_log_chunk_offset_wire_shapes() {
        let numeric: LogChunk =
            serde_json::from_str(r#"{"content":"x","offset":42,"path":"/l"}"#).unwrap();
        assert_eq!(numeric.offset.normalize(), Some(42));

        let text: LogChunk =
            serde_json::from_str(r#"{"content":"x","offset":"42","path":"/l"}"#).unwrap();
        assert_eq!(text.offset.normalize(), Some(42));
    }

    /// Engine status strings map onto badge states; unknown strings are
    /// tolerated.
    #[test]
    fn test_engine_state_mapping() {
        assert_eq!(EngineState::from_status("running"), EngineState::Running);
        assert_eq!(EngineState::from_status("offline"), EngineState::Offline);
        assert_eq!(EngineState::from_status("banana"), EngineState::Unknown);

        let h = HealthStatus {
            status: "processing".into(),
            message: String::new(),
            timestamp: "1700000000".into(),
        };
        assert!(h.is_active());
        assert_eq!(h.timestamp_unix(), Some(1_700_000_000));

        let offline = HealthStatus::offline(1_700_000_123);
        assert!(!offline.is_active());
        assert_eq!(offline.state(), EngineState::Offline);
    }
}
