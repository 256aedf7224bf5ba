//! The trait every combinator implements.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use super::{CheckResult, Path, Target};

/// A composable validation node.
///
/// Built-in combinators (`Required`, `Maybe`, `Custom`, `And`, `Or`, `Any`,
/// `List`, `Cast`) implement this trait; so can user types, which are then
/// usable anywhere a [`Spec`](crate::Spec) is accepted via
/// [`Spec::combinator`](crate::Spec::combinator).
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_shape::prelude::*;
///
/// #[derive(Debug)]
/// struct Even;
///
/// #[async_trait::async_trait]
/// impl Combinator for Even {
///     async fn validate(&self, _target: &Target, value: &Value, path: &Path) -> CheckResult {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Ok(Resolved::new(value.clone())),
///             _ => Err(ErrorEntry::custom(path, format!("{} must be even", path.display_label())).into()),
///         }
///     }
///
///     fn type_name(&self) -> String {
///         "Even".to_owned()
///     }
/// }
///
/// let spec = Spec::combinator(Even);
/// ```
#[async_trait]
pub trait Combinator: Send + Sync + Debug {
    /// Checks `value` located at `path`.
    ///
    /// `target` is the accumulator of the enclosing object check; combinators
    /// that delegate to nested specs pass it through unchanged.
    async fn validate(&self, target: &Target, value: &Value, path: &Path) -> CheckResult;

    /// Name used when this combinator appears in another node's message,
    /// e.g. `"String or Number"`.
    fn type_name(&self) -> String;
}
