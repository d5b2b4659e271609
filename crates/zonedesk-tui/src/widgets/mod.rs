//! Small rendering helpers shared by the panels.

pub mod hints;
pub mod input_field;
