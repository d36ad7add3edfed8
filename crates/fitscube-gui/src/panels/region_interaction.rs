use fitscube_core::view::ViewTransform;

use crate::app::FitscubeApp;
use crate::panels::helpers::{to_pos, to_tuple};

const BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);

/// Primary drag (without ctrl) draws a new region; cursor shows a crosshair over the image.
pub fn handle_region_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    app: &mut FitscubeApp,
    transform: &ViewTransform,
) {
    handle_region_drag(response, ui, app, transform);
    update_cursor(ctx, response, ui, transform);
}

fn handle_region_drag(
    response: &egui::Response,
    ui: &egui::Ui,
    app: &mut FitscubeApp,
    transform: &ViewTransform,
) {
    let no_ctrl = !ui.input(|i| i.modifiers.command);
    let selector = &mut app.region.selector;

    if response.drag_started_by(egui::PointerButton::Primary) && no_ctrl {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = origin {
            selector.press(to_tuple(pos), transform);
        }
    }

    if !selector.is_dragging() {
        return;
    }

    let current = ui.input(|i| i.pointer.hover_pos());
    if response.drag_stopped_by(egui::PointerButton::Primary) {
        match current {
            Some(pos) => {
                selector.release(to_tuple(pos), transform);
            }
            None => selector.cancel_drag(),
        }
        app.region.sync_fields();
        if let Some(r) = app.region.region() {
            app.ui_state.add_log(format!("Region set to {r}"));
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = current {
            if selector.drag(to_tuple(pos), transform).is_some() {
                app.region.sync_fields();
            }
        }
    }
}

fn update_cursor(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    transform: &ViewTransform,
) {
    if let Some(hover) = ui.input(|i| i.pointer.hover_pos()) {
        if response.rect.contains(hover) && transform.is_over_image(to_tuple(hover)) {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    }
}

/// Draw the region overlay (dim surroundings + border + size label).
pub fn draw_region_overlay(
    ui: &egui::Ui,
    overlay: ((f32, f32), (f32, f32)),
    img_rect: egui::Rect,
    label: &str,
) {
    let region_screen = egui::Rect::from_min_max(to_pos(overlay.0), to_pos(overlay.1));

    draw_dim_regions(ui, img_rect, region_screen);
    draw_border(ui, region_screen);
    draw_size_label(ui, label, region_screen);
}

fn draw_dim_regions(ui: &egui::Ui, img_rect: egui::Rect, region_screen: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(110);
    let painter = ui.painter();

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(img_rect.left_top(), egui::pos2(img_rect.right(), region_screen.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(img_rect.left(), region_screen.bottom()), img_rect.right_bottom()),
        0.0,
        dim_color,
    );
    // Left (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(img_rect.left(), region_screen.top()),
            egui::pos2(region_screen.left(), region_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(region_screen.right(), region_screen.top()),
            egui::pos2(img_rect.right(), region_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
}

fn draw_border(ui: &egui::Ui, region_screen: egui::Rect) {
    ui.painter().rect_stroke(
        region_screen,
        0.0,
        egui::Stroke::new(1.5, BORDER_COLOR),
        egui::epaint::StrokeKind::Outside,
    );
}

fn draw_size_label(ui: &egui::Ui, label: &str, region_screen: egui::Rect) {
    let label_pos = egui::pos2(region_screen.right() - 4.0, region_screen.bottom() + 4.0);
    ui.painter().text(
        label_pos,
        egui::Align2::RIGHT_TOP,
        label,
        egui::FontId::proportional(12.0),
        BORDER_COLOR,
    );
}
