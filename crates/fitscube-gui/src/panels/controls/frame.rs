use crate::app::FitscubeApp;

pub(super) fn frame_section(ui: &mut egui::Ui, app: &mut FitscubeApp) {
    crate::panels::section_header(ui, "Display", None);
    ui.add_space(4.0);

    let count = app.frame_count();
    ui.add_enabled_ui(count > 0, |ui| {
        let max_frame = count.saturating_sub(1);

        // Slider and index field edit the same value, so they never disagree.
        ui.add(
            egui::Slider::new(&mut app.ui_state.frame_index, 0..=max_frame)
                .text("Frame")
                .clamping(egui::SliderClamping::Always),
        );
        ui.horizontal(|ui| {
            ui.label("Index");
            ui.add(egui::DragValue::new(&mut app.ui_state.frame_index).range(0..=max_frame));
            if ui.small_button("<").clicked() {
                app.ui_state.frame_index = app.ui_state.frame_index.saturating_sub(1);
            }
            if ui.small_button(">").clicked() {
                app.ui_state.frame_index = (app.ui_state.frame_index + 1).min(max_frame);
            }
        });
    });

    ui.add_space(4.0);
    ui.add(
        egui::Slider::new(&mut app.ui_state.contrast, 0..=255)
            .text("Contrast")
            .clamping(egui::SliderClamping::Always),
    )
    .on_hover_text("Lowers the brightest display level by this amount");
}
