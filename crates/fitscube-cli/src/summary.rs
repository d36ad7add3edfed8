use std::path::Path;

use console::Style;
use fitscube_core::aggregate::SpectrumReport;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

/// Echo the request and headline numbers to stderr, keeping stdout for the series.
pub fn print_spectrum_summary(dir: &Path, report: &SpectrumReport) {
    let s = Styles::new();

    eprintln!();
    eprintln!("  {}", s.title.apply_to("Region Spectrum"));
    eprintln!();
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Directory"),
        s.path.apply_to(dir.display())
    );
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("X range"),
        s.value.apply_to(format!("{}..{}", report.x_range[0], report.x_range[1]))
    );
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Y range"),
        s.value.apply_to(format!("{}..{}", report.y_range[0], report.y_range[1]))
    );
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(report.len())
    );
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Frame"),
        s.value.apply_to(report.frame_index)
    );
    if let Some((index, value)) = report.peak() {
        eprintln!(
            "  {:<14}{}",
            s.label.apply_to("Peak"),
            s.value.apply_to(format!("{value} at frame {index}"))
        );
    }
    eprintln!();
}
