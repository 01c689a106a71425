//! API request handlers

pub mod campaigns;
pub mod health;
pub mod sync;

pub use health::*;
