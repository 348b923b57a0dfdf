//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants, text parsing and the scraper scroll policy.

pub mod constants;
pub mod parser;
pub mod scroll;

pub use constants::*;
pub use parser::*;
pub use scroll::*;
