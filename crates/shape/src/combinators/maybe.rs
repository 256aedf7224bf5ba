//! MAYBE combinator - null-tolerant wrapper with an optional default

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::check;
use crate::foundation::{CheckResult, Combinator, ErrorEntry, Path, Resolved, Target};
use crate::spec::Spec;

/// Accepts null, substituting `default` when one is configured.
///
/// A present value is checked against the inner spec; any rejection is
/// collapsed into one `"<label> must be a <Type> or null"` entry.
#[derive(Debug, Clone)]
pub struct Maybe {
    pub(crate) inner: Spec,
    pub(crate) default: Option<Value>,
}

impl Maybe {
    pub fn new(inner: impl Into<Spec>) -> Self {
        Self {
            inner: inner.into(),
            default: None,
        }
    }

    /// Substitutes `default` for null. The default is not checked against
    /// the inner spec, and is kept by object shapes even when falsy.
    pub fn with_default(inner: impl Into<Spec>, default: Value) -> Self {
        Self {
            inner: inner.into(),
            default: Some(default),
        }
    }

    pub fn inner(&self) -> &Spec {
        &self.inner
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

#[async_trait]
impl Combinator for Maybe {
    async fn validate(&self, target: &Target, value: &Value, path: &Path) -> CheckResult {
        if value.is_null() {
            return Ok(match &self.default {
                Some(default) => Resolved::defaulted(default.clone()),
                None => Resolved::new(Value::Null),
            });
        }

        check(&self.inner, target, value, path).await.map_err(|_| {
            ErrorEntry::type_mismatch(
                path,
                format!(
                    "{} must be a {} or null, but saw `{value}`",
                    path.display_label(),
                    self.inner.type_name()
                ),
            )
            .into()
        })
    }

    fn type_name(&self) -> String {
        format!("{} or null", self.inner.type_name())
    }
}

pub fn maybe(inner: impl Into<Spec>) -> Spec {
    Spec::combinator(Maybe::new(inner))
}

pub fn maybe_or(inner: impl Into<Spec>, default: Value) -> Spec {
    Spec::combinator(Maybe::with_default(inner, default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ShapeMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_maybe_null_passes_through() {
        let resolved = Maybe::new(Spec::text())
            .validate(&Target::new(), &Value::Null, &Path::root())
            .await
            .unwrap();
        assert_eq!(resolved, Resolved::new(Value::Null));
    }

    #[tokio::test]
    async fn test_maybe_default_is_marked() {
        let resolved = Maybe::with_default(Spec::boolean(), json!(false))
            .validate(&Target::new(), &Value::Null, &Path::root())
            .await
            .unwrap();
        assert_eq!(resolved, Resolved::defaulted(json!(false)));
    }

    #[tokio::test]
    async fn test_maybe_collapses_inner_errors() {
        let shape = ShapeMap::new()
            .field("a", Spec::text())
            .field("b", Spec::text());
        let path = Path::named("data").child("thing");
        let err = Maybe::new(shape)
            .validate(&Target::new(), &json!({ "a": 1, "b": 2 }), &path)
            .await
            .unwrap_err()
            .flatten();

        assert_eq!(err.len(), 1);
        assert_eq!(err[0].path.as_deref(), Some("data.thing"));
        assert_eq!(
            err[0].message,
            r#"thing must be a {"a":"String","b":"String"} or null, but saw `{"a":1,"b":2}`"#
        );
    }

    #[tokio::test]
    async fn test_maybe_present_value_is_checked() {
        let combinator = Maybe::new(Spec::number());
        let ok = combinator
            .validate(&Target::new(), &json!(7), &Path::root())
            .await;
        assert_eq!(ok, Ok(Resolved::new(json!(7))));
    }

    #[test]
    fn test_maybe_type_name() {
        assert_eq!(Maybe::new(Spec::text()).type_name(), "String or null");
    }
}
