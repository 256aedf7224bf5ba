//! The recursive validation engine.
//!
//! [`check`] is the single entry point every node recurses through. It
//! matches on the [`Spec`] variant and routes to the base-type checker, a
//! combinator, the object-shape checker, or a nested validator. Sibling
//! checks fan out through [`aggregate::settle_all`] (all must pass) or
//! [`race::first_success`] (one must pass).

pub mod aggregate;
pub mod race;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::trace;

use crate::foundation::{CheckResult, ErrorEntry, Failure, Path, Resolved, Target};
use crate::spec::{ClassMarker, Primitive, ShapeMap, Spec};

pub use aggregate::settle_all;
pub use race::first_success;

static NULL: Value = Value::Null;

// ============================================================================
// DISPATCHER
// ============================================================================

/// Checks `value` against `spec`.
///
/// `target` is the accumulator shape checks write into; `path` locates the
/// value for error reports.
pub fn check<'a>(
    spec: &'a Spec,
    target: &'a Target,
    value: &'a Value,
    path: &'a Path,
) -> BoxFuture<'a, CheckResult> {
    async move {
        trace!(%path, spec = spec.kind(), "check");
        match spec {
            Spec::Named(validator) => validator.check_nested(value, path).await,
            Spec::Combinator(combinator) => combinator.validate(target, value, path).await,
            Spec::Null => check_base_type(None, value, path),
            Spec::Primitive(primitive) => check_base_type(Some(*primitive), value, path),
            Spec::Class(class) => check_class(class, value, path),
            Spec::Shape(shape) => check_object(shape, target, value, path).await,
        }
    }
    .boxed()
}

// ============================================================================
// BASE TYPES
// ============================================================================

/// Strict category check. `None` expects null.
pub fn check_base_type(expected: Option<Primitive>, value: &Value, path: &Path) -> CheckResult {
    let accepted = match expected {
        None => value.is_null(),
        Some(primitive) => primitive.matches(value),
    };
    if accepted {
        return Ok(Resolved::new(value.clone()));
    }

    let label = path.display_label();
    let message = match expected {
        None => format!("{label} must be null, but saw `{value}`"),
        Some(primitive) => format!("{label} must be a {primitive}, but saw `{value}`"),
    };
    Err(ErrorEntry::type_mismatch(path, message).into())
}

fn check_class(class: &ClassMarker, value: &Value, path: &Path) -> CheckResult {
    if class.is_instance(value) {
        Ok(Resolved::new(value.clone()))
    } else {
        Err(ErrorEntry::type_mismatch(
            path,
            format!("Invalid type: Expected {}, Got: {value}", class.name()),
        )
        .into())
    }
}

// ============================================================================
// OBJECT SHAPES
// ============================================================================

/// Checks every declared field of `shape` concurrently.
///
/// On success each field is written to `target` (see
/// [`Resolved`] for the write rule) and a snapshot of the target is
/// returned. On failure the failures of every rejected field are returned
/// in declaration order and nothing is written.
pub async fn check_object(
    shape: &ShapeMap,
    target: &Target,
    value: &Value,
    path: &Path,
) -> CheckResult {
    let Value::Object(data) = value else {
        return Err(ErrorEntry::type_mismatch(
            path,
            format!(
                "{} should be an Object, but saw `{value}`",
                path.display_label()
            ),
        )
        .into());
    };

    let fields: Vec<_> = shape
        .iter()
        .map(|(key, spec)| {
            let field_value = data.get(key).unwrap_or(&NULL);
            (key, spec, target.child(key), path.child(key), field_value)
        })
        .collect();

    let resolved = settle_all(
        fields
            .iter()
            .map(|(_, spec, field_target, field_path, field_value)| {
                check(spec, field_target, field_value, field_path)
            }),
    )
    .await
    .map_err(Failure::Many)?;

    for ((key, ..), result) in fields.iter().zip(resolved) {
        if result.should_write(data.contains_key(*key)) {
            target.insert(*key, result.into_value());
        }
    }

    Ok(Resolved::new(target.snapshot()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user_shape() -> ShapeMap {
        ShapeMap::new()
            .field("name", Spec::text())
            .field("age", Spec::number())
    }

    #[test]
    fn base_type_messages() {
        let path = Path::named("User").child("name");
        let err = check_base_type(Some(Primitive::Text), &json!(123), &path).unwrap_err();
        assert_eq!(
            err.flatten()[0].message,
            "name must be a String, but saw `123`"
        );

        let path = Path::root().child("value");
        let err = check_base_type(None, &json!("abc"), &path).unwrap_err();
        assert_eq!(
            err.flatten()[0].message,
            r#"value must be null, but saw `"abc"`"#
        );
    }

    #[test]
    fn base_type_accepts_matching_category() {
        let path = Path::root();
        assert_eq!(
            check_base_type(Some(Primitive::Boolean), &json!(false), &path),
            Ok(Resolved::new(json!(false)))
        );
        assert!(check_base_type(None, &Value::Null, &path).is_ok());
    }

    #[tokio::test]
    async fn object_reports_every_field_in_order() {
        let target = Target::new();
        let path = Path::named("User");
        let err = check_object(&user_shape(), &target, &json!({ "name": 1, "age": "x" }), &path)
            .await
            .unwrap_err();

        let entries = err.flatten();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path.as_deref(), Some("User.name"));
        assert_eq!(entries[1].path.as_deref(), Some("User.age"));
        assert!(!target.contains("name"));
    }

    #[tokio::test]
    async fn object_rejects_non_objects() {
        for value in [json!(null), json!([1]), json!("x")] {
            let err = check_object(&user_shape(), &Target::new(), &value, &Path::named("User"))
                .await
                .unwrap_err();
            let entry = &err.flatten()[0];
            assert_eq!(entry.code, ErrorCode::TypeMismatch);
            assert_eq!(entry.path.as_deref(), Some("User"));
            assert!(entry.message.starts_with("User should be an Object"));
        }
    }

    #[tokio::test]
    async fn object_drops_undeclared_fields() {
        let resolved = check_object(
            &user_shape(),
            &Target::new(),
            &json!({ "name": "bob", "age": 3, "extra": true }),
            &Path::root(),
        )
        .await
        .unwrap();
        assert_eq!(resolved.value, json!({ "name": "bob", "age": 3 }));
    }

    #[tokio::test]
    async fn class_spec_checks_instances() {
        #[derive(serde::Deserialize)]
        #[allow(dead_code)]
        struct Point {
            x: f64,
            y: f64,
        }

        let spec = Spec::class::<Point>();
        let path = Path::root().child("origin");
        let ok = check(&spec, &Target::new(), &json!({ "x": 0, "y": 0 }), &path).await;
        assert_eq!(ok, Ok(Resolved::new(json!({ "x": 0, "y": 0 }))));

        let err = check(&spec, &Target::new(), &json!(null), &path)
            .await
            .unwrap_err();
        assert_eq!(
            err.flatten()[0].message,
            "Invalid type: Expected Point, Got: null"
        );
    }
}
