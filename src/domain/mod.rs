// Domain layer - Chart payloads, growth rates and render lifecycle
pub mod chart_data;
pub mod growth;
pub mod mount_target;
pub mod render_state;
