#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Checks over callables: that they do not fail, return the right types, and
//! behave equivalently to a reference implementation.

use std::fmt;

use itertools::Itertools;

use super::{
    ValidationError,
    value::{ScopeFn, TypeTag, Value},
};

/// Invokes `func` once per input, unpacking `List` inputs as positional
/// arguments when `multi_args` is set, and fails listing every input that
/// raised along with its message. Inputs that succeed are silent.
pub fn no_failure(func: &ScopeFn, inputs: &[Value], multi_args: bool) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for input in inputs {
        let result = match (multi_args, input) {
            (true, Value::List(args)) => func.call(args),
            _ => func.call(std::slice::from_ref(input)),
        };

        if let Err(err) = result {
            errors.push(format!("failed on {input}: {err}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::FailedInputs(errors))
    }
}

/// The expected type shape of a function's return value.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnSpec {
    /// A single return value of the given type.
    Single(TypeTag),
    /// A returned sequence whose element types match positionally.
    Sequence(Vec<TypeTag>),
}

/// Invokes `func` once per input and fails listing every invocation that
/// raised or returned the wrong type shape.
///
/// A failed invocation reports only the failure; it never also produces a
/// spurious type mismatch for the same input.
pub fn return_types(
    func: &ScopeFn,
    expected: &ReturnSpec,
    inputs: &[Value],
) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for input in inputs {
        let got = match func.call(std::slice::from_ref(input)) {
            Ok(value) => value,
            Err(err) => {
                errors.push(format!("failed on {input}: {err}"));
                continue;
            }
        };

        match expected {
            ReturnSpec::Single(tag) => {
                if got.type_tag() != *tag {
                    errors.push(format!("{} != {tag}", got.type_tag()));
                }
            }
            ReturnSpec::Sequence(tags) => match got {
                Value::List(items) => {
                    let got_tags: Vec<TypeTag> = items.iter().map(Value::type_tag).collect();
                    if got_tags != *tags {
                        errors.push(format!(
                            "[{}] != [{}]",
                            got_tags.iter().join(", "),
                            tags.iter().join(", ")
                        ));
                    }
                }
                other => {
                    errors.push(format!("returned {}, expected a sequence", other.type_tag()));
                }
            },
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WrongReturnTypes(errors))
    }
}

/// What invoking a function produced: either its return value or the failure
/// signature (the last line of its error text).
#[derive(Debug, Clone, PartialEq)]
pub enum Captured {
    /// The function returned normally.
    Value(Value),
    /// The function failed; only the final line of the error is kept, so
    /// failure signatures compare without the noise of a full trace.
    Failure(String),
}

impl fmt::Display for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Captured::Value(value) => write!(f, "{value}"),
            Captured::Failure(line) => write!(f, "failure({line})"),
        }
    }
}

/// Invokes `func` and captures either its return value or its failure
/// signature.
pub fn captured_result(func: &ScopeFn, args: &[Value]) -> Captured {
    match func.call(args) {
        Ok(value) => Captured::Value(value),
        Err(err) => Captured::Failure(err.lines().last().unwrap_or_default().to_string()),
    }
}

/// Fails unless `func_a` and `func_b` behave identically on `args`: both
/// return equal values, or both fail with the same failure signature.
///
/// Equality of the failure *message text* is part of the contract, not just
/// the failure kind. Arguments are cloned independently per call so neither
/// function can observe the other's effects on its input.
pub fn equivalent_behavior(
    func_a: &ScopeFn,
    func_b: &ScopeFn,
    args: &[Value],
) -> Result<(), ValidationError> {
    let args_a: Vec<Value> = args.to_vec();
    let args_b: Vec<Value> = args.to_vec();

    let a = captured_result(func_a, &args_a);
    let b = captured_result(func_b, &args_b);

    if a == b {
        Ok(())
    } else {
        Err(ValidationError::DivergentBehavior(format!("{a} != {b}")))
    }
}
