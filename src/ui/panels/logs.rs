// Assistant Console - ui/panels/logs.rs
//
// Live engine log pane: the rendering half of the tail view model.
//
// The heavy lifting (polling, throttling, eviction) lives in
// app/log_view.rs; this panel draws the controls and the monospace
// buffer, and pins the scroll position when autoscroll asks for it.

use crate::app::log_view::LogTailView;

/// Render the Logs tab.
pub fn render(ui: &mut egui::Ui, view: &mut LogTailView) {
    ui.horizontal(|ui| {
        ui.heading("Engine Log");

        // Live/paused badge.
        let (badge, colour) = if view.is_paused() {
            (" \u{25cf} Paused ", egui::Color32::from_rgb(156, 163, 175))
        } else {
            (" \u{25cf} Live ", egui::Color32::from_rgb(34, 197, 94))
        };
        ui.label(
            egui::RichText::new(badge)
                .strong()
                .color(colour)
                .background_color(egui::Color32::from_rgba_premultiplied(
                    colour.r(),
                    colour.g(),
                    colour.b(),
                    30,
                )),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button("Clear")
                .on_hover_text("Empty the view and re-read the log tail from scratch")
                .clicked()
            {
                view.clear();
            }

            let autoscroll_label = if view.autoscroll() {
                "Auto-scroll: On"
            } else {
                "Auto-scroll: Off"
            };
            if ui.button(autoscroll_label).clicked() {
                view.toggle_autoscroll();
            }

            if view.is_paused() {
                if ui.button("Resume").clicked() {
                    view.resume();
                }
                if ui
                    .button("Refresh")
                    .on_hover_text("Fetch once without resuming the live poll")
                    .clicked()
                {
                    view.refresh();
                }
            } else if ui.button("Pause").clicked() {
                view.pause();
            }
        });
    });

    if !view.source_path().is_empty() {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("File:").small().weak());
            ui.monospace(egui::RichText::new(view.source_path()).small());
        });
    }

    ui.separator();

    let scroll_to_bottom = view.take_scroll_to_bottom();
    let stick = view.autoscroll();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(stick)
        .show(ui, |ui| {
            if view.buffer().is_empty() {
                ui.label(egui::RichText::new("No log content yet\u{2026}").weak());
            } else {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(view.buffer()).monospace().size(11.0),
                    )
                    .wrap(),
                );
            }
            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}
