//! Shared building blocks for the Almanac workspace: settings, errors,
//! constants and the small enums every layer agrees on.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;
