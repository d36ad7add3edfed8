mod region;
mod ui;
mod viewport;

pub use region::RegionState;
pub use ui::UIState;
pub use viewport::{RenderKey, ViewportState};
