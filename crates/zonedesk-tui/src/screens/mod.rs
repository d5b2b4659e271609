//! Panel components.

pub mod credential;
pub mod vertical;
