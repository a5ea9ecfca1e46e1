#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Checks over the variables bound in a scope: presence, type, value, and
//! attribute value.

use super::{
    ValidationError,
    value::{Scope, TypeSpec, Value},
};

/// Fails if any of `names` is absent from the scope, or if any of
/// `callable_names` is present but not invocable. Both categories merge into
/// one failure; a name already reported absent is not re-reported as
/// non-callable.
pub fn variables_exist(
    names: &[&str],
    scope: &Scope,
    callable_names: &[&str],
) -> Result<(), ValidationError> {
    let absent: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !scope.contains_key(*name))
        .collect();

    let mut problems: Vec<String> = absent.iter().map(|name| name.to_string()).collect();

    for name in callable_names {
        if absent.contains(name) {
            continue;
        }
        if let Some(value) = scope.get(*name)
            && !value.is_callable()
        {
            problems.push(format!("'{name}' is not callable"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingVariables(problems))
    }
}

/// Fails for every `(name, spec)` pair whose variable is absent or bound to a
/// value of the wrong type.
///
/// With `array_mode` the value must be a numeric array and the spec is
/// matched against the array's dtype descriptor by prefix (`Int` admits
/// `"int64"`); otherwise the value's concrete type tag must be admitted by
/// the spec.
pub fn variable_types(
    pairs: &[(&str, TypeSpec)],
    scope: &Scope,
    array_mode: bool,
) -> Result<(), ValidationError> {
    let mut wrong = Vec::new();

    for (name, spec) in pairs {
        let Some(value) = scope.get(*name) else {
            wrong.push(format!("'{name}' not present"));
            continue;
        };

        if array_mode {
            match value {
                Value::Array(arr) => {
                    if !spec.admits_dtype(arr.dtype()) {
                        wrong.push(format!(
                            "dtype of '{name}'='{}' not in {}",
                            arr.dtype(),
                            spec.describe()
                        ));
                    }
                }
                other => {
                    wrong.push(format!("'{name}'={} is not an array", other.type_tag()));
                }
            }
        } else if !spec.admits(value.type_tag()) {
            wrong.push(format!(
                "type of '{name}'='{}' not in {}",
                value.type_tag(),
                spec.describe()
            ));
        }
    }

    if wrong.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WrongTypes(wrong))
    }
}

/// Fails for every `(name, expected)` pair whose variable is absent or not
/// structurally equal to `expected`. String values are rendered quoted so
/// `'1'` and `1` read differently.
pub fn variable_values(pairs: &[(&str, Value)], scope: &Scope) -> Result<(), ValidationError> {
    let mut wrong = Vec::new();

    for (name, expect) in pairs {
        let Some(got) = scope.get(*name) else {
            wrong.push(format!("'{name}' not present"));
            continue;
        };

        if got != expect {
            wrong.push(format!("value of {name}={got} does not equal {expect}"));
        }
    }

    if wrong.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WrongValues(wrong))
    }
}

/// Fails for every `(name, expected)` pair whose variable is absent, lacks
/// the named attribute, or whose attribute value is not equal to `expected`.
pub fn attribute_values(
    pairs: &[(&str, Value)],
    attribute: &str,
    scope: &Scope,
) -> Result<(), ValidationError> {
    let mut wrong = Vec::new();

    for (name, expect) in pairs {
        let Some(value) = scope.get(*name) else {
            wrong.push(format!("'{name}' not present"));
            continue;
        };

        let Some(got) = value.attribute(attribute) else {
            wrong.push(format!("'{name}' has no attribute '{attribute}'"));
            continue;
        };

        if got != *expect {
            wrong.push(format!("{attribute} of {name}={got} does not equal {expect}"));
        }
    }

    if wrong.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WrongAttributes(wrong))
    }
}
