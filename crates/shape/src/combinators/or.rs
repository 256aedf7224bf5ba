//! OR combinator - at least one branch must accept the value

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{check, first_success};
use crate::foundation::{CheckResult, Combinator, ErrorCode, ErrorEntry, Path, SpecError, Target};
use crate::spec::Spec;

/// Races every branch against the same target, value and path.
///
/// The first success observed wins. Branches are never cancelled: the
/// result is only produced once every branch settled, so an `Or` takes as
/// long as its slowest branch even when a fast one already accepted. Keep
/// slow predicates out of unions on latency-sensitive paths. When all of them
/// rejected, the branch details are replaced by a single entry naming
/// every alternative in declaration order.
#[derive(Debug, Clone)]
pub struct Or {
    pub(crate) specs: Vec<Spec>,
}

impl Or {
    pub fn new<I, S>(specs: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        let specs: Vec<Spec> = specs.into_iter().map(Into::into).collect();
        if specs.is_empty() {
            return Err(SpecError::EmptyBranches { combinator: "Or" });
        }
        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }
}

#[async_trait]
impl Combinator for Or {
    async fn validate(&self, target: &Target, value: &Value, path: &Path) -> CheckResult {
        first_success(self.specs.iter().map(|spec| check(spec, target, value, path)))
            .await
            .map_err(|_| {
                ErrorEntry::new(
                    ErrorCode::UnionMismatch,
                    path,
                    format!(
                        "{} must be a {}, but saw `{value}`",
                        path.display_label(),
                        self.type_name()
                    ),
                )
                .into()
            })
    }

    fn type_name(&self) -> String {
        self.specs
            .iter()
            .map(Spec::type_name)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

pub fn or<I, S>(specs: I) -> Result<Spec, SpecError>
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Or::new(specs).map(Spec::combinator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::Custom;
    use crate::foundation::Resolved;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_or_requires_a_branch() {
        assert_eq!(
            Or::new(Vec::<Spec>::new()).unwrap_err(),
            SpecError::EmptyBranches { combinator: "Or" }
        );
    }

    #[tokio::test]
    async fn test_or_any_branch_accepts() {
        let combinator = Or::new([Spec::text(), Spec::number()]).unwrap();
        for value in [json!("a"), json!(1)] {
            let resolved = combinator
                .validate(&Target::new(), &value, &Path::root())
                .await;
            assert_eq!(resolved, Ok(Resolved::new(value)));
        }
    }

    #[tokio::test]
    async fn test_or_message_names_every_branch() {
        let combinator = Or::new([Spec::text(), Spec::number()]).unwrap();
        let err = combinator
            .validate(&Target::new(), &json!(true), &Path::named("data").child("value"))
            .await
            .unwrap_err()
            .flatten();

        assert_eq!(err.len(), 1);
        assert_eq!(err[0].code, ErrorCode::UnionMismatch);
        assert_eq!(err[0].path.as_deref(), Some("data.value"));
        assert_eq!(err[0].message, "value must be a String or Number, but saw `true`");
    }

    #[tokio::test]
    async fn test_or_uses_custom_names() {
        let even = Custom::from_fn(|path, value| match value.as_i64() {
            Some(n) if n % 2 == 0 => Ok(value),
            _ => Err(ErrorEntry::custom(&path, "odd")),
        })
        .named("Even");
        let combinator = Or::new([Spec::from(even), Spec::null()]).unwrap();

        let err = combinator
            .validate(&Target::new(), &json!(3), &Path::root())
            .await
            .unwrap_err()
            .flatten();
        assert_eq!(err[0].message, "value must be a Even or null, but saw `3`");
        assert_eq!(err[0].path, None);
    }
}
