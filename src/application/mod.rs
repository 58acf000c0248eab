// Application layer - Rendering use cases and their seams
pub mod chart_options;
pub mod chart_presenter;
pub mod chart_source;
pub mod mount;
pub mod resize;
