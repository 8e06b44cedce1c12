//! Soft-fail assertion predicates.
//!
//! Every predicate takes a [`TestHandle`] plus the values to check and
//! returns `true` when the assertion held. On failure it records one
//! message on the handle and returns `false`; the test keeps running.
//! Predicates are `#[track_caller]`, so recorded failures point at the
//! calling test, not at this module.
//!
//! ```
//! use kild_assert::{assert, Recorder};
//!
//! let t = Recorder::new();
//! assert::equal(&t, &vec![1, 2], &vec![1, 2]);
//! assert::contains(&t, "hello world", "wor");
//! assert!(!assert::zero(&t, &5));
//! assert_eq!(t.messages(), vec!["Value should be zero, got: 5"]);
//! ```

use std::fmt::Debug;

use serde::Serialize;

use crate::errors::MembershipError;
use crate::handle::{Check, Failure, TestHandle};
use crate::inspect::{Shape, Value, inspect};

/// An error-like value that may be absent.
///
/// Implemented for `Result<T, E>` (an error is present for `Err`) and
/// `Option<E>` (an error is present for `Some`).
pub trait MaybeError {
    fn err_value(&self) -> Option<&dyn Debug>;
}

impl<T, E: Debug> MaybeError for Result<T, E> {
    fn err_value(&self) -> Option<&dyn Debug> {
        self.as_ref().err().map(|e| e as &dyn Debug)
    }
}

impl<E: Debug> MaybeError for Option<E> {
    fn err_value(&self) -> Option<&dyn Debug> {
        self.as_ref().map(|e| e as &dyn Debug)
    }
}

impl<M: MaybeError + ?Sized> MaybeError for &M {
    fn err_value(&self) -> Option<&dyn Debug> {
        (**self).err_value()
    }
}

#[track_caller]
fn report<H: TestHandle + ?Sized>(t: &H, check: Check, message: String) {
    let failure = Failure::new(check, message);
    tracing::debug!(
        event = "assert.check.failed",
        check = %check,
        location = %failure.location
    );
    t.error(failure);
}

/// Asserts that an error is present.
#[track_caller]
pub fn error<H, M>(t: &H, err: &M) -> bool
where
    H: TestHandle + ?Sized,
    M: MaybeError + ?Sized,
{
    t.helper();
    if err.err_value().is_none() {
        report(t, Check::Error, "Expected error, got nil".to_string());
        return false;
    }
    true
}

/// Asserts that no error is present.
#[track_caller]
pub fn no_error<H, M>(t: &H, err: &M) -> bool
where
    H: TestHandle + ?Sized,
    M: MaybeError + ?Sized,
{
    t.helper();
    if let Some(e) = err.err_value() {
        let message = format!("Unexpected error: {}", t.config().render.render(e));
        report(t, Check::NoError, message);
        return false;
    }
    true
}

/// Asserts that `value` equals the default value of its type.
///
/// The comparison is `PartialEq` against `T::default()`, so `-0.0` counts
/// as zero for floats.
#[track_caller]
pub fn zero<H, T>(t: &H, value: &T) -> bool
where
    H: TestHandle + ?Sized,
    T: Default + PartialEq + Debug,
{
    t.helper();
    if *value != T::default() {
        let message = format!(
            "Value should be zero, got: {}",
            t.config().render.render(value)
        );
        report(t, Check::Zero, message);
        return false;
    }
    true
}

/// Asserts that `value` differs from the default value of its type.
#[track_caller]
pub fn not_zero<H, T>(t: &H, value: &T) -> bool
where
    H: TestHandle + ?Sized,
    T: Default + PartialEq + Debug,
{
    t.helper();
    if *value == T::default() {
        report(t, Check::NotZero, "Value should not be zero".to_string());
        return false;
    }
    true
}

/// Asserts that `actual` is structurally equal to `expected`.
#[track_caller]
pub fn equal<H, E, A>(t: &H, expected: &E, actual: &A) -> bool
where
    H: TestHandle + ?Sized,
    E: PartialEq<A> + Debug + ?Sized,
    A: Debug + ?Sized,
{
    t.helper();
    if expected != actual {
        let render = t.config().render;
        let message = format!(
            "Expected: {}\nActual:    {}",
            render.render(&expected),
            render.render(&actual)
        );
        report(t, Check::Equal, message);
        return false;
    }
    true
}

/// Asserts that `actual` is not structurally equal to `expected`.
#[track_caller]
pub fn not_equal<H, E, A>(t: &H, expected: &E, actual: &A) -> bool
where
    H: TestHandle + ?Sized,
    E: PartialEq<A> + Debug + ?Sized,
    A: Debug + ?Sized,
{
    t.helper();
    if expected == actual {
        let render = t.config().render;
        let message = format!(
            "Should not be equal.\nExpected: {}\nActual:    {}",
            render.render(&expected),
            render.render(&actual)
        );
        report(t, Check::NotEqual, message);
        return false;
    }
    true
}

/// Membership test shared by [`contains`] and [`not_contains`].
///
/// Sequences are scanned for a structurally equal element; text is searched
/// for a substring and requires a text item. Anything else, including a
/// collection that cannot be inspected at all, is a usage error.
fn membership<C, I>(collection: &C, item: &I) -> Result<bool, MembershipError>
where
    C: Serialize + ?Sized,
    I: Serialize + ?Sized,
{
    let invalid_collection = || MembershipError::InvalidCollection {
        type_name: std::any::type_name::<C>(),
    };
    let collection_value = inspect(collection).map_err(|e| {
        tracing::debug!(
            event = "assert.membership.collection_uninspectable",
            error = %e
        );
        invalid_collection()
    })?;
    let item_value = || {
        inspect(item).map_err(|source| MembershipError::InvalidItemValue {
            type_name: std::any::type_name::<I>(),
            source,
        })
    };

    if let Value::Seq(elements) = &collection_value {
        let item_value = item_value()?;
        return Ok(elements.iter().any(|candidate| *candidate == item_value));
    }

    if let Some(text) = collection_value.as_text() {
        let item_value = item_value()?;
        return match item_value.as_text() {
            Some(needle) => Ok(text.contains(&*needle)),
            None => Err(MembershipError::InvalidItem {
                type_name: std::any::type_name::<I>(),
            }),
        };
    }

    tracing::debug!(
        event = "assert.membership.invalid_collection",
        shape = ?Shape::of(&collection_value)
    );
    Err(invalid_collection())
}

/// Asserts that `collection` contains `item`.
///
/// `collection` may be any sequence (compared element-wise for structural
/// equality) or text (substring search, `item` must be text too).
#[track_caller]
pub fn contains<H, C, I>(t: &H, collection: &C, item: &I) -> bool
where
    H: TestHandle + ?Sized,
    C: Serialize + Debug + ?Sized,
    I: Serialize + Debug + ?Sized,
{
    t.helper();
    match membership(collection, item) {
        Ok(true) => true,
        Ok(false) => {
            let render = t.config().render;
            let message = format!(
                "Collection does not contain expected item:\nCollection: {}\nExpected item: {}",
                render.render(&collection),
                render.render(&item)
            );
            report(t, Check::Contains, message);
            false
        }
        Err(e) => {
            report(t, Check::Contains, e.to_string());
            false
        }
    }
}

/// Asserts that `collection` does not contain `item`.
///
/// Same collection rules as [`contains`]. A collection or item of the wrong
/// shape fails here as well.
#[track_caller]
pub fn not_contains<H, C, I>(t: &H, collection: &C, item: &I) -> bool
where
    H: TestHandle + ?Sized,
    C: Serialize + Debug + ?Sized,
    I: Serialize + Debug + ?Sized,
{
    t.helper();
    match membership(collection, item) {
        Ok(false) => true,
        Ok(true) => {
            let render = t.config().render;
            let message = format!(
                "Collection contains unexpected item:\nCollection: {}\nUnexpected item: {}",
                render.render(&collection),
                render.render(&item)
            );
            report(t, Check::NotContains, message);
            false
        }
        Err(e) => {
            report(t, Check::NotContains, e.to_string());
            false
        }
    }
}
