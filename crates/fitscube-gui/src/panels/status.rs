use fitscube_core::store::LoadState;

use crate::app::{format_duration, FitscubeApp};

pub fn show(ctx: &egui::Context, app: &mut FitscubeApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if let Some(pct) = app.ui_state.progress {
            let elapsed = app
                .ui_state
                .load_started
                .map(|t| format_duration(t.elapsed()))
                .unwrap_or_default();
            ui.add(
                egui::ProgressBar::new(pct as f32 / 100.0)
                    .text(format!("Loading frames {pct}% ({elapsed})"))
                    .animate(true),
            );
        } else {
            // Invisible placeholder, same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            ui.label(state_label(app.store.state()));
            ui.separator();
            if let Some(ref size) = app.viewport.image_size {
                ui.label(format!("{}x{}", size[0], size[1]));
                ui.separator();
            }
            let count = app.frame_count();
            if count > 0 {
                ui.label(format!("Frame {} / {}", app.ui_state.frame_index, count));
                ui.separator();
            }
            let zoom = &app.viewport.zoom;
            if zoom.is_fit() {
                ui.label("Zoom: fit");
            } else {
                ui.label(format!(
                    "Zoom: {:+} ({:.0}%)",
                    zoom.step(),
                    zoom.factor() * 100.0
                ));
            }
            if let Some(ref r) = app.region.region() {
                ui.separator();
                ui.label(format!("Region: {r}"));
            }
        });

        ui.add_space(2.0);
    });
}

fn state_label(state: &LoadState) -> String {
    match state {
        LoadState::Loading { directory, .. } => format!("Loading {}", directory.display()),
        LoadState::Failed(f) => format!("Failed: {}", f.kind),
        other => other.label().to_string(),
    }
}
