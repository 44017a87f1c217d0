// Assistant Console - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config and preference loading
// 3. Logging initialisation (debug mode support)
// 4. Settings document + engine path resolution
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use assistant_console::app;

pub use assistant_console::bridge;
pub use assistant_console::core;
pub use assistant_console::platform;
pub use assistant_console::ui;
pub use assistant_console::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Compile-time-embedded icon PNG bytes (64x64 RGBA).
///
/// Using `include_bytes!` ensures the asset is baked into the binary so the
/// icon is always available regardless of the working directory at runtime.
static ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Decode the embedded PNG and return an `eframe`-compatible `IconData`.
///
/// Falls back to a transparent 1x1 placeholder if decoding fails so the
/// application always launches rather than panicking on a missing asset.
fn load_icon() -> egui::IconData {
    use image::ImageDecoder;

    match image::codecs::png::PngDecoder::new(std::io::Cursor::new(ICON_PNG)) {
        Ok(decoder) => {
            let (w, h) = decoder.dimensions();
            // Convert to RGBA8 regardless of the source colour space.
            match image::DynamicImage::from_decoder(decoder) {
                Ok(img) => {
                    let rgba = img.into_rgba8();
                    egui::IconData {
                        rgba: rgba.into_raw(),
                        width: w,
                        height: h,
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode icon PNG; using placeholder");
                    placeholder_icon()
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open icon PNG decoder; using placeholder");
            placeholder_icon()
        }
    }
}

/// 1x1 transparent RGBA icon used when the real icon cannot be loaded.
fn placeholder_icon() -> egui::IconData {
    egui::IconData {
        rgba: vec![0u8; 4],
        width: 1,
        height: 1,
    }
}

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI, Segoe UI Emoji, and Segoe UI Symbol from the
/// system font directory and sets them as the primary proportional fonts.
/// These fonts have much broader Unicode coverage than the egui built-ins,
/// preventing square-glyph rendering for the status and control symbols.
/// The built-in egui fonts are kept as final fallbacks so no glyph is ever lost.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; some symbols may render as squares"
                    );
                }
            }
        }

        if !loaded_names.is_empty() {
            // Proportional: place Windows fonts first so they take priority
            // over the egui default, while keeping it as a final fallback.
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }

            // Monospace: append Windows fonts as symbol fallbacks after the
            // primary monospace font so log-line column alignment is
            // preserved while symbols outside its range still render.
            if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
                for name in &loaded_names {
                    monospace.push((*name).to_owned());
                }
            }

            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    // On non-Windows platforms the egui built-in fonts are used unchanged.
    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// Assistant Console - settings and monitoring for the OS Assistant engine.
///
/// Configure the wake phrase, LLM backend, execution plans, Chrome
/// profiles, and custom apps, watch the engine's log live, and start or
/// stop the engine itself.
#[derive(Parser, Debug)]
#[command(name = "Assistant Console", version, about)]
struct Cli {
    /// Override the shared resources directory (settings.json, engine log,
    /// sidecar binary).
    #[arg(short = 'r', long = "resources-dir")]
    resources_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and config first so the configured log level
    // can participate in logging init.
    let platform_paths = platform::paths::PlatformPaths::resolve(cli.resources_dir.as_deref());
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Assistant Console starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Reap engine instances orphaned by a previous console crash before
    // the health manager takes its first look.
    bridge::launcher::cleanup_orphans();

    // UI prefs (set in-app) override the config file theme.
    let prefs_path = app::prefs::prefs_path(&platform_paths.data_dir);
    let prefs = app::prefs::load(&prefs_path);
    let dark_mode = prefs.as_ref().map(|p| p.dark_mode).unwrap_or(config.dark_mode);
    let font_size = prefs.as_ref().map(|p| p.font_size).unwrap_or(config.font_size);
    let last_tab = prefs.as_ref().map(|p| p.last_tab).unwrap_or_default();

    // The engine settings document.
    let store = bridge::settings_store::SettingsStore::new(platform_paths.settings_path());
    let mut warnings = config_warnings;
    let settings = match store.load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Settings document unreadable; starting with defaults");
            warnings.push(format!("Settings could not be loaded: {e}"));
            core::model::Settings::default()
        }
    };

    // The engine log tail.
    let log_path = platform_paths.engine_log_path().unwrap_or_else(|| {
        PathBuf::from(util::constants::RESOURCES_DIR_NAME)
            .join(util::constants::ENGINE_LOG_DIR_NAME)
            .join(util::constants::ENGINE_LOG_FILE_NAME)
    });
    tracing::info!(log = %log_path.display(), "Tailing engine log");
    let log_source = Arc::new(bridge::log_source::FileLogSource::new(log_path));
    let log_view = app::log_view::LogTailView::new(log_source, config.log_poll_interval_ms);

    // Engine health: one check immediately so the badge fills in.
    let mut health = app::health::HealthManager::new();
    health.request_check();

    let mut state = app::state::AppState::new(settings, dark_mode, font_size);
    state.active_tab = last_tab;
    state.warnings = warnings;
    state.settings_path_display = store.path().display().to_string();
    state.startup_enabled = bridge::startup::is_enabled().unwrap_or(false);

    // Launch the GUI.
    //
    // The icon is applied at two levels:
    //   1. OS-level (Windows EXE resource) — embedded by build.rs via winres.
    //   2. Runtime (eframe viewport) — loaded here from the PNG asset,
    //      covering the eframe-managed window icon on all platforms.
    let icon_data = load_icon();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_icon(icon_data),
        ..Default::default()
    };

    let resources_dir = platform_paths.resources_dir.clone();
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::ConsoleApp::new(
                state,
                store,
                health,
                log_view,
                prefs_path,
                resources_dir,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Assistant Console GUI: {e}");
        std::process::exit(1);
    }
}
