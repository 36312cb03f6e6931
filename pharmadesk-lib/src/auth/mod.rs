//! Authentication: access tokens and token providers

mod token;

pub use token::*;
