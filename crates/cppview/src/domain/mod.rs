//! Entry types and the pure path rules for header/source pairing.

pub mod entry;
pub mod input;
pub mod pairing;
pub mod row;
