// Assistant Console - ui/panels/about.rs
//
// About tab: application identity, version, and a pointer at the project.

use crate::util::constants::{APP_NAME, APP_VERSION};

const REPO_URL: &str = "https://github.com/os-assistant/assistant-console";

/// Render the About tab.
pub fn render(ui: &mut egui::Ui) {
    ui.add_space(24.0);

    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!("\u{1f399}  {APP_NAME}"))
                .size(28.0)
                .strong(),
        );
        ui.add_space(4.0);
        ui.label(egui::RichText::new(format!("v{APP_VERSION}")).size(14.0).weak());
    });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    ui.vertical_centered(|ui| {
        ui.label("Settings and monitoring console for the OS Assistant");
        ui.label("voice-controlled desktop automation engine.");
    });

    ui.add_space(10.0);

    ui.vertical_centered(|ui| {
        ui.hyperlink_to(REPO_URL, REPO_URL);
    });

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(6.0);

    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new("MIT License \u{00b7} \u{00a9} 2026 Assistant Console contributors")
                .small()
                .weak(),
        );
        ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
    });
}
