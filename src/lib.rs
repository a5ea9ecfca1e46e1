//! # nbmarks
//!
//! Course-administration utilities for instructors grading notebook-based
//! assignments: injects point-value annotations into nbgrader notebooks and
//! validates student runtime scopes.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Assertion toolkit for checking a student's runtime scope
pub mod check;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// For injecting mark annotations into notebook cells
pub mod marks;
/// The notebook document model and its (de)serialization
pub mod notebook;
/// Utility functions for convenience
pub mod util;
