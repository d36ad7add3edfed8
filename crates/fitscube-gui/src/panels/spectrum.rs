use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::app::FitscubeApp;

const RIGHT_PANEL_WIDTH: f32 = 360.0;

/// Aggregate series against frame index, with a marker at the displayed frame.
pub fn show(ctx: &egui::Context, app: &mut FitscubeApp) {
    egui::SidePanel::right("spectrum")
        .default_width(RIGHT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            crate::panels::section_header(ui, "Spectrum", None);
            ui.add_space(4.0);

            let Some(report) = app.ui_state.spectrum.as_ref() else {
                ui.weak("Select a region and press Compute Spectrum.");
                return;
            };

            ui.small(format!(
                "x {}..{}, y {}..{}, {} frames",
                report.x_range[0],
                report.x_range[1],
                report.y_range[0],
                report.y_range[1],
                report.len()
            ));
            if let Some((index, value)) = report.peak() {
                ui.small(format!("Peak {value:.3e} at frame {index}"));
            }

            let points: PlotPoints = report
                .series
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, v])
                .collect();
            let line = Line::new("sum", points).color(egui::Color32::from_rgb(100, 170, 255));
            let marker = VLine::new("frame", app.ui_state.frame_index as f64)
                .color(egui::Color32::from_rgb(255, 160, 40))
                .width(1.5);

            let clicked_frame = Plot::new("spectrum_plot")
                .x_axis_label("frame")
                .y_axis_label("sum")
                .allow_boxed_zoom(false)
                .show(ui, |plot_ui| {
                    plot_ui.line(line);
                    plot_ui.vline(marker);
                    if plot_ui.response().clicked() {
                        plot_ui.pointer_coordinate().map(|p| p.x.round())
                    } else {
                        None
                    }
                })
                .inner;

            // Clicking the plot jumps to that frame.
            if let Some(x) = clicked_frame {
                let last = report.len().saturating_sub(1);
                app.ui_state.frame_index = (x.max(0.0) as usize).min(last);
            }
        });
}
