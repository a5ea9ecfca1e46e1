//! Tests for the loaded-module allow-list check.

use nbmarks::check::{StaticInventory, ValidationError, allowed_modules};

#[test]
fn empty_inventory_always_passes() {
    let inventory = StaticInventory::default();
    allowed_modules(&[], &inventory).expect("nothing loaded");
}

#[test]
fn allowed_modules_pass() {
    let inventory = StaticInventory::new(["numpy"]);
    allowed_modules(&["numpy"], &inventory).expect("numpy is allowed");
}

#[test]
fn accessory_bundles_extend_the_allow_list() {
    let inventory = StaticInventory::new(["pandas", "numpy", "dateutil", "pytz"]);
    allowed_modules(&["pandas"], &inventory).expect("pandas drags its companions in");
}

#[test]
fn disallowed_modules_are_listed() {
    let inventory = StaticInventory::new(["numpy", "requests", "sklearn"]);

    let err = allowed_modules(&["numpy"], &inventory).expect_err("two disallowed modules");
    match err {
        ValidationError::DisallowedModules(modules) => {
            assert_eq!(modules, vec!["requests".to_string(), "sklearn".to_string()]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn bundles_do_not_apply_unless_their_anchor_is_allowed() {
    let inventory = StaticInventory::new(["numpy"]);

    // numpy is a pandas companion, but pandas itself was not permitted
    assert!(allowed_modules(&["matplotlib"], &inventory).is_ok());
    assert!(allowed_modules(&[], &inventory).is_err());
}
