//! One module per operation the command line can select.

pub mod delete;
pub mod get;
pub mod list;
pub mod set;
