//! Link handling: URL scanning and Safe Links unwrapping.

pub mod safelinks;
pub mod scanner;
