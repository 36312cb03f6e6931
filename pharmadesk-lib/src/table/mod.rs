//! The client-side table core
//!
//! A generic table is the composition of three inputs: the row model (a
//! fetched snapshot of entity rows), a [`ColumnPolicy`] (declarative
//! per-column behavior and role-based visibility) and a [`ViewState`] (the
//! user-driven sort/filter/page/selection state). [`Snapshot`] is the pure
//! derivation of the visible slice from those inputs; [`TableView`] owns
//! them for one mounted view; [`MutationCoordinator`] sequences remote
//! writes with the required post-mutation reload.

mod column;
mod engine;
mod mutation;
mod policies;
mod view;
mod view_state;

pub use column::*;
pub use engine::*;
pub use mutation::*;
pub use policies::*;
pub use view::*;
pub use view_state::*;
