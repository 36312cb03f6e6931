//! REST API operations

mod source;

pub use source::*;
