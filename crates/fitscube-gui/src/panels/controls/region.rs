use tracing::{debug, warn};

use crate::app::FitscubeApp;

const FIELD_WIDTH: f32 = 64.0;

pub(super) fn region_section(ui: &mut egui::Ui, app: &mut FitscubeApp) {
    let status = app.region.region().map(|r| format!("{}x{}", r.width(), r.height()));
    crate::panels::section_header(ui, "Region", status.as_deref());
    ui.add_space(4.0);

    let mut edited = false;
    let mut left = false;
    egui::Grid::new("region_fields")
        .num_columns(4)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            let fields = &mut app.region.fields;
            for (label, text) in [("X Min", &mut fields.x_min), ("X Max", &mut fields.x_max)] {
                let response = field(ui, label, text);
                edited |= response.changed();
                left |= response.lost_focus();
            }
            ui.end_row();
            for (label, text) in [("Y Min", &mut fields.y_min), ("Y Max", &mut fields.y_max)] {
                let response = field(ui, label, text);
                edited |= response.changed();
                left |= response.lost_focus();
            }
            ui.end_row();
        });
    ui.small("Maxima are exclusive. Drag on the image to select.");

    let dims = app.frame_dimensions();
    if edited {
        if let Some(r) = dims.and_then(|(w, h)| app.region.apply_if_valid(w, h)) {
            debug!("Region edited to {r}");
        }
    }
    if left {
        if let Err(e) = app.region.fields.parse() {
            warn!("Rejected region input: {e}");
            app.ui_state.add_log(format!("Invalid region: {e}"));
        }
        app.region.sync_fields();
    }

    ui.add_space(4.0);
    let ready = app.store.is_ready();
    if ui
        .add_enabled(ready, egui::Button::new("Compute Spectrum"))
        .clicked()
    {
        app.compute_spectrum();
    }
}

fn field(ui: &mut egui::Ui, label: &str, text: &mut String) -> egui::Response {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(text).desired_width(FIELD_WIDTH))
}
