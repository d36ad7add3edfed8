mod file;
mod frame;
mod region;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut crate::app::FitscubeApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file::file_section(ui, app);
                ui.separator();
                frame::frame_section(ui, app);
                ui.separator();
                region::region_section(ui, app);
            });
        });
}
