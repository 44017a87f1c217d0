// Assistant Console - tests/e2e_settings_store.rs
//
// End-to-end tests for the settings document store against the real
// filesystem: full documents round-tripped through disk, the CRUD
// sequences the UI issues, and wire-format compatibility with the
// document the engine reads.

use assistant_console::bridge::settings_store::SettingsStore;
use assistant_console::core::model::{
    Action, ActionType, ChromeProfile, CustomApp, ExecutionPlan, LlmProvider, Settings,
    WindowPosition,
};
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

fn sample_plan(name: &str) -> ExecutionPlan {
    let mut launch = Action::new(ActionType::LaunchApp);
    launch.target = Some("chrome".to_string());

    let mut split = Action::new(ActionType::SplitScreen);
    split.target = Some("chrome".to_string());
    split.second_app = Some("editor".to_string());
    split.monitor_index = Some(1);

    let mut mv = Action::new(ActionType::MoveWindow);
    mv.target = Some("editor".to_string());
    mv.position = Some(WindowPosition::Left);

    ExecutionPlan {
        name: name.to_string(),
        actions: vec![launch, split, mv],
        run_on_startup: Some(true),
    }
}

// =============================================================================
// Round trips
// =============================================================================

/// A fully populated document survives save → re-open → load, through a
/// second store instance as the engine would open it.
#[test]
fn e2e_full_document_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resources").join("settings.json");

    let store = SettingsStore::new(path.clone());
    let mut settings = Settings::default();
    settings.wake_phrase = "ola jarvis".to_string();
    settings.llm_provider = LlmProvider::Openai;
    settings.llm_model = Some("gpt-4o-mini".to_string());
    settings.openai_api_key = Some("sk-test".to_string());
    settings.execution_plans.push(sample_plan("Morning setup"));
    settings.chrome_profiles.push(ChromeProfile {
        name: "Work".to_string(),
        shortcut_path: "C:\\profiles\\work.lnk".to_string(),
    });
    settings.custom_apps.push(CustomApp {
        name: "terminal".to_string(),
        exe_path: "C:\\tools\\term.exe".to_string(),
    });

    store.save(&settings).expect("save should succeed");

    // A fresh handle on the same path sees the identical document.
    let reopened = SettingsStore::new(path);
    let loaded = reopened.load().expect("load should succeed");
    assert_eq!(loaded, settings);
}

/// The on-disk JSON uses the exact field names and enum spellings the
/// engine parses.
#[test]
fn e2e_document_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let store = SettingsStore::new(path.clone());

    let mut settings = Settings::default();
    settings.llm_provider = LlmProvider::Openai;
    settings.execution_plans.push(sample_plan("Wire"));
    store.save(&settings).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["wake_phrase"], "ola jarvis");
    assert_eq!(json["llm_provider"], "openai");
    let actions = &json["execution_plans"][0]["actions"];
    assert_eq!(actions[0]["action_type"], "launch_app");
    assert_eq!(actions[1]["action_type"], "split_screen");
    assert_eq!(actions[1]["monitor_index"], 1);
    assert_eq!(actions[2]["position"], "Left");
    assert_eq!(json["execution_plans"][0]["run_on_startup"], true);
}

/// A document written by the engine (string fields only, no LLM keys) is
/// loaded with defaults filled in and can be saved back without loss.
#[test]
fn e2e_engine_written_document_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "wake_phrase": "hey assistant",
            "execution_plans": [
                {"name": "One", "actions": [{"action_type": "max", "target": "chrome",
                  "position": null, "monitor_index": null, "volume_change": null,
                  "second_app": null, "monitor_action": null}], "run_on_startup": null}
            ],
            "chrome_profiles": [],
            "custom_apps": []
        }"#,
    )
    .unwrap();

    let store = SettingsStore::new(path);
    let loaded = store.load().unwrap();
    assert_eq!(loaded.wake_phrase, "hey assistant");
    assert_eq!(loaded.llm_provider, LlmProvider::Ollama);
    assert_eq!(loaded.execution_plans[0].actions[0].action_type, ActionType::Max);
    assert_eq!(loaded.execution_plans[0].run_on_startup, None);

    store.save(&loaded).unwrap();
    assert_eq!(store.load().unwrap(), loaded);
}

// =============================================================================
// CRUD sequences
// =============================================================================

/// The CRUD sequence a user session produces: add two of everything, edit
/// one, remove one, with every step persisted.
#[test]
fn e2e_crud_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));

    store.add_execution_plan(sample_plan("First")).unwrap();
    store.add_execution_plan(sample_plan("Second")).unwrap();
    store
        .add_chrome_profile(ChromeProfile {
            name: "Default".to_string(),
            shortcut_path: "default.lnk".to_string(),
        })
        .unwrap();
    store
        .add_custom_app(CustomApp {
            name: "calc".to_string(),
            exe_path: "calc.exe".to_string(),
        })
        .unwrap();

    let mut renamed = sample_plan("Second, renamed");
    renamed.run_on_startup = Some(false);
    store.update_execution_plan(1, renamed).unwrap();

    store.remove_execution_plan(0).unwrap();

    let settings = store.load().unwrap();
    assert_eq!(settings.execution_plans.len(), 1);
    assert_eq!(settings.execution_plans[0].name, "Second, renamed");
    assert_eq!(settings.execution_plans[0].run_on_startup, Some(false));
    assert_eq!(settings.chrome_profiles.len(), 1);
    assert_eq!(settings.custom_apps.len(), 1);
}

/// Out-of-bounds mutations fail loudly and leave the document untouched.
#[test]
fn e2e_out_of_bounds_mutation_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));
    store.add_execution_plan(sample_plan("Only")).unwrap();

    assert!(store.update_execution_plan(1, sample_plan("Nope")).is_err());
    assert!(store.remove_execution_plan(1).is_err());
    assert!(store.remove_chrome_profile(0).is_err());

    let settings = store.load().unwrap();
    assert_eq!(settings.execution_plans.len(), 1);
    assert_eq!(settings.execution_plans[0].name, "Only");
}

/// CRUD against a store whose document does not exist yet starts from
/// defaults and creates the file (first-run flow).
#[test]
fn e2e_crud_bootstraps_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("nested").join("resources").join("settings.json");
    let store = SettingsStore::new(path.clone());

    store
        .add_custom_app(CustomApp {
            name: "first".to_string(),
            exe_path: "first.exe".to_string(),
        })
        .unwrap();

    assert!(path.exists(), "document should be created on first mutation");
    let settings = store.load().unwrap();
    assert_eq!(settings.wake_phrase, "ola jarvis");
    assert_eq!(settings.custom_apps.len(), 1);
}
