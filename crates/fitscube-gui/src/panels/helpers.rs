pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    egui::Frame::NONE.inner_margin(4.0).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.strong(label);
            if let Some(s) = status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(s);
                });
            }
        });
    });
}

/// Convert between egui positions and the (x, y) tuples used by the core view math.
pub(crate) fn to_tuple(p: egui::Pos2) -> (f32, f32) {
    (p.x, p.y)
}

pub(crate) fn to_pos(p: (f32, f32)) -> egui::Pos2 {
    egui::pos2(p.0, p.1)
}
