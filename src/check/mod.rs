#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Assertion toolkit for validating student nbgrader assignments.
//!
//! Every check inspects its arguments, collects every violation it can find,
//! and either returns `Ok(())` or fails once with a [`ValidationError`] whose
//! message enumerates all of them. Checks are stateless and never mutate the
//! scope they are given; callers surface the error text directly to the
//! instructor or autograder.

pub mod funcs;
pub mod modules;
pub mod value;
pub mod vars;

pub use funcs::{Captured, ReturnSpec, captured_result, equivalent_behavior, no_failure, return_types};
pub use modules::{ModuleInventory, StaticInventory, allowed_modules};
pub use value::{NdArray, Scope, ScopeFn, TypeSpec, TypeTag, Value};
pub use vars::{attribute_values, variable_types, variable_values, variables_exist};

/// A failed validation, aggregating every violation found in a single call
/// into one human-readable multi-line message.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Expected variables absent from the scope, or expected callables that
    /// turned out not to be invocable.
    #[error("The following expected variables are missing or not callable: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
    /// Variables bound to values of the wrong type.
    #[error("The following variables had an incorrect type:\n{}", .0.join("\n"))]
    WrongTypes(Vec<String>),
    /// Variables bound to the wrong value.
    #[error("The following variables had incorrect values:\n{}", .0.join("\n"))]
    WrongValues(Vec<String>),
    /// Attributes that were absent or held the wrong value.
    #[error("The following attributes were missing or incorrect:\n{}", .0.join("\n"))]
    WrongAttributes(Vec<String>),
    /// Inputs on which a function raised.
    #[error("The function failed on some inputs:\n{}", .0.join("\n"))]
    FailedInputs(Vec<String>),
    /// Inputs for which a function's return value had the wrong type shape.
    #[error("The function returned incorrect types:\n{}", .0.join("\n"))]
    WrongReturnTypes(Vec<String>),
    /// Loaded third-party modules outside the allow-list.
    #[error("The following disallowed modules were imported: {}", .0.join(", "))]
    DisallowedModules(Vec<String>),
    /// Two functions whose captured behavior differed.
    #[error("The two functions behaved differently: {0}")]
    DivergentBehavior(String),
}
