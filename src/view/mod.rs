// src/view/mod.rs
mod render;
mod status_view;

pub use render::{Rendered, VIEW_WIDTH};
pub use status_view::{Phase, StatusView, ViewError, ViewState};
