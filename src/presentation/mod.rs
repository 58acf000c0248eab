// Presentation layer - HTTP surface of the hosted page
pub mod app_state;
pub mod handlers;
pub mod router;
