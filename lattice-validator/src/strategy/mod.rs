//! README sources.
//!
//! Only the filesystem strategy exists. The validators themselves take
//! already-materialized [`crate::Readme`] values, so a second source needs no
//! trait here until one actually appears.

pub mod fs;
