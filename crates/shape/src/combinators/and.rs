//! AND combinator - every branch must accept the value

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{check, settle_all};
use crate::foundation::{CheckResult, Combinator, Failure, Path, Resolved, SpecError, Target};
use crate::spec::Spec;

/// Runs every branch concurrently against the same value and path.
///
/// Each branch writes into its own fork of the target. Once every branch
/// accepted, the forks are merged back in declaration order, so field order
/// never depends on which branch settled first.
///
/// Succeeds with the last branch's result. When that result is the object
/// its fork accumulated (a shape, bare or wrapped in `required`/`maybe`),
/// the merged target is returned instead, carrying the fields of every
/// branch. Fails with the failures of every rejecting branch, in order.
#[derive(Debug, Clone)]
pub struct And {
    pub(crate) specs: Vec<Spec>,
}

impl And {
    pub fn new<I, S>(specs: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        let specs: Vec<Spec> = specs.into_iter().map(Into::into).collect();
        if specs.is_empty() {
            return Err(SpecError::EmptyBranches { combinator: "And" });
        }
        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }
}

#[async_trait]
impl Combinator for And {
    async fn validate(&self, target: &Target, value: &Value, path: &Path) -> CheckResult {
        let forks: Vec<Target> = self.specs.iter().map(|_| target.fork()).collect();
        let mut results = settle_all(
            self.specs
                .iter()
                .zip(&forks)
                .map(|(spec, fork)| check(spec, fork, value, path)),
        )
        .await
        .map_err(Failure::Many)?;

        for fork in &forks {
            target.merge(fork);
        }

        let last = results.pop().unwrap_or_else(|| Resolved::new(Value::Null));
        let accumulated = last.value.is_object()
            && forks.last().is_some_and(|fork| fork.snapshot() == last.value);
        if accumulated {
            Ok(Resolved {
                value: target.snapshot(),
                defaulted: last.defaulted,
            })
        } else {
            Ok(last)
        }
    }

    fn type_name(&self) -> String {
        self.specs
            .iter()
            .map(Spec::type_name)
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

pub fn and<I, S>(specs: I) -> Result<Spec, SpecError>
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    And::new(specs).map(Spec::combinator)
}
