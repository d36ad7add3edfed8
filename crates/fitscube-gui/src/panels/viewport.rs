use fitscube_core::view::ViewTransform;

use crate::app::FitscubeApp;
use crate::panels::helpers::{to_pos, to_tuple};
use crate::panels::region_interaction;

pub fn show(ctx: &egui::Context, app: &mut FitscubeApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());

        match (texture_id, app.viewport.transform(rect)) {
            (Some(texture_id), Some(_)) => {
                let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

                handle_zoom(ui, &response, app, rect);
                handle_pan(ui, &response, app);

                if response.double_clicked() {
                    app.viewport.fit_to_window();
                }

                // Recompute after zoom/pan so overlay and image agree this frame.
                let Some(transform) = app.viewport.transform(rect) else {
                    return;
                };
                region_interaction::handle_region_interaction(ctx, &response, ui, app, &transform);

                let img_rect = image_rect(&transform);
                draw_image(ui, texture_id, img_rect);

                if let (Some(overlay), Some(region)) =
                    (app.region.selector.overlay_rect(&transform), app.region.region())
                {
                    let label = format!("{}x{}", region.width(), region.height());
                    region_interaction::draw_region_overlay(ui, overlay, img_rect, &label);
                }

                draw_viewing_label(ui, rect, &app.viewport.viewing_label);
            }
            _ => show_placeholder(ui, app),
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// One zoom step per wheel notch, keeping the point under the cursor fixed.
/// Step 0 is the fitted view.
fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut FitscubeApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    let Some(mut transform) = app.viewport.transform(rect) else {
        return;
    };
    let anchor = ui
        .input(|i| i.pointer.hover_pos())
        .unwrap_or_else(|| rect.center());
    if transform.wheel_zoom(&mut app.viewport.zoom, to_tuple(anchor), scroll_delta) {
        app.viewport.pan_offset = egui::vec2(transform.pan.0, transform.pan.1);
    }
}

fn handle_pan(ui: &egui::Ui, response: &egui::Response, app: &mut FitscubeApp) {
    if response.dragged_by(egui::PointerButton::Middle)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command))
    {
        app.viewport.pan_offset += response.drag_delta();
    }
}

fn image_rect(transform: &ViewTransform) -> egui::Rect {
    let (min, max) = transform.image_rect_on_screen();
    egui::Rect::from_min_max(to_pos(min), to_pos(max))
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui, app: &FitscubeApp) {
    let text = if app.store.is_loading() {
        "Loading frames..."
    } else {
        "Open a directory of FITS frames to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
