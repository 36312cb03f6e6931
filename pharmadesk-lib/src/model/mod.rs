//! Data model: cell values, roles and entity rows

mod drug;
mod order;
mod role;
mod row;
mod user;
mod value;

pub use drug::*;
pub use order::*;
pub use role::*;
pub use row::*;
pub use user::*;
pub use value::*;
