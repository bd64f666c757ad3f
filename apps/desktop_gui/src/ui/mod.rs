//! UI layer for the desktop wizard: app shell and widgets.

pub mod app;
pub mod preview;
pub mod widgets;

pub use app::RegistrationApp;
