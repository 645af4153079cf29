//! `AppMode`-specific key handling modules.

pub(crate) mod delete_confirmation;
pub(crate) mod explorer;
pub(crate) mod prompt;
