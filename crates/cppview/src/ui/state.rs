//! UI-facing state shared by runtime handlers and renderers.

pub mod app_mode;
pub mod help_action;
