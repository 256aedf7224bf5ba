//! CUSTOM combinator - user-supplied async predicate

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::foundation::{CheckResult, Combinator, ErrorEntry, Path, Resolved, Target};
use crate::spec::Spec;

type Predicate = dyn Fn(Path, Value) -> BoxFuture<'static, Result<Value, ErrorEntry>> + Send + Sync;

/// Delegates the decision to a user function.
///
/// The function receives the current path and value and resolves to the
/// (possibly transformed) value or one [`ErrorEntry`], which is reported
/// verbatim. It does not see the target.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_shape::prelude::*;
///
/// let positive = Custom::from_fn(|path, value| match value.as_f64() {
///     Some(n) if n > 0.0 => Ok(value),
///     _ => Err(ErrorEntry::custom(&path, format!("{} must be positive", path.display_label()))),
/// })
/// .named("PositiveNumber");
/// ```
#[derive(Clone)]
pub struct Custom {
    predicate: Arc<Predicate>,
    name: Option<String>,
}

impl Custom {
    /// Wraps an async predicate.
    pub fn new<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Path, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ErrorEntry>> + Send + 'static,
    {
        Self {
            predicate: Arc::new(move |path: Path, value: Value| predicate(path, value).boxed()),
            name: None,
        }
    }

    /// Wraps a synchronous predicate.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(Path, Value) -> Result<Value, ErrorEntry> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |path: Path, value: Value| {
                futures::future::ready(predicate(path, value)).boxed()
            }),
            name: None,
        }
    }

    /// Name shown when this predicate appears in `Or` / `Maybe` messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[async_trait]
impl Combinator for Custom {
    async fn validate(&self, _target: &Target, value: &Value, path: &Path) -> CheckResult {
        (self.predicate)(path.clone(), value.clone())
            .await
            .map(Resolved::new)
            .map_err(Into::into)
    }

    fn type_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "Custom".to_owned())
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl From<Custom> for Spec {
    fn from(custom: Custom) -> Self {
        Self::combinator(custom)
    }
}

/// Async predicate spec.
pub fn custom<F, Fut>(predicate: F) -> Spec
where
    F: Fn(Path, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ErrorEntry>> + Send + 'static,
{
    Spec::combinator(Custom::new(predicate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorCode;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_custom_error_is_reported_verbatim() {
        let combinator = Custom::new(|path: Path, _value| async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err::<Value, _>(ErrorEntry::custom(&path, "something is wrong"))
        });

        let err = combinator
            .validate(&Target::new(), &json!(1), &Path::named("data").child("x"))
            .await
            .unwrap_err()
            .flatten();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].message, "something is wrong");
        assert_eq!(err[0].path.as_deref(), Some("data.x"));
        assert_eq!(err[0].code, ErrorCode::CustomValidationFailure);
    }

    #[tokio::test]
    async fn test_custom_may_transform() {
        let upper = Custom::from_fn(|_path, value| {
            Ok(Value::String(value.as_str().unwrap_or_default().to_uppercase()))
        });
        let resolved = upper
            .validate(&Target::new(), &json!("abc"), &Path::root())
            .await
            .unwrap();
        assert_eq!(resolved.value, json!("ABC"));
    }

    #[test]
    fn test_custom_type_name() {
        let anonymous = Custom::from_fn(|_, value| Ok(value));
        assert_eq!(anonymous.type_name(), "Custom");
        assert_eq!(anonymous.named("Even").type_name(), "Even");
    }
}
