use fitscube_core::view::GrayRaster;

/// Convert a normalized 8-bit raster to an egui ColorImage.
pub fn raster_to_color_image(raster: &GrayRaster) -> egui::ColorImage {
    egui::ColorImage::from_gray([raster.width, raster.height], &raster.pixels)
}
