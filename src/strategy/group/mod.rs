//! Study grouping.
//!
//! Grouping happens in two steps:
//! - [`classify`] walks the discovered tests once and routes each one into the
//!   ungrouped list or into the prerequisite or study bucket of a named group
//! - [`sequence`] orders the prerequisites inside every group and the groups
//!   themselves by the priority of their study
//!
//! Both steps work on local data only. Nothing is kept between runs.

mod classify;
pub use classify::*;

mod sequence;
pub use sequence::*;
