#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Guard against students importing disallowed third-party libraries.
//!
//! Enumerating "currently loaded third-party modules" is a platform
//! reflection facility, so it sits behind the narrow [`ModuleInventory`]
//! trait; the rest of the validator has no dependency on runtime
//! introspection. The check is a function of process-global import state and
//! is only meaningful from a single-shot grading process with no concurrent
//! imports in flight.

use std::collections::BTreeSet;

use tracing::debug;

use super::ValidationError;
use crate::constants::ACCESSORY_BUNDLES;

/// Enumerates the third-party modules currently loaded in the grading
/// process.
pub trait ModuleInventory {
    /// Names of loaded modules whose origin is a third-party package
    /// location.
    fn loaded_third_party_modules(&self) -> BTreeSet<String>;
}

/// A fixed inventory, built by the caller from whatever introspection the
/// host environment provides.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    /// The module names reported as loaded.
    modules: BTreeSet<String>,
}

impl StaticInventory {
    /// Builds an inventory from an iterator of module names.
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }
}

impl ModuleInventory for StaticInventory {
    fn loaded_third_party_modules(&self) -> BTreeSet<String> {
        self.modules.clone()
    }
}

/// Fails if any loaded third-party module falls outside `allowed`.
///
/// The allow-list is augmented with accessory bundles: permitting `pandas`
/// also permits numpy, dateutil, and pytz, since importing the former loads
/// the latter.
pub fn allowed_modules(
    allowed: &[&str],
    inventory: &dyn ModuleInventory,
) -> Result<(), ValidationError> {
    let mut allow: BTreeSet<&str> = allowed.iter().copied().collect();
    for (name, companions) in ACCESSORY_BUNDLES {
        if allow.contains(name) {
            allow.extend(companions.iter().copied());
        }
    }

    let loaded = inventory.loaded_third_party_modules();
    debug!(loaded = loaded.len(), allowed = allow.len(), "checking loaded modules");

    let violations: Vec<String> = loaded
        .into_iter()
        .filter(|module| !allow.contains(module.as_str()))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::DisallowedModules(violations))
    }
}
