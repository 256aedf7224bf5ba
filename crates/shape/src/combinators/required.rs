//! REQUIRED combinator - rejects null / absent values

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::check;
use crate::foundation::{CheckResult, Combinator, ErrorEntry, Path, Target};
use crate::spec::Spec;

/// Fails with `"<label> is required."` on null, otherwise delegates to the
/// inner spec unchanged.
#[derive(Debug, Clone)]
pub struct Required {
    pub(crate) inner: Spec,
}

impl Required {
    pub fn new(inner: impl Into<Spec>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    pub fn inner(&self) -> &Spec {
        &self.inner
    }
}

#[async_trait]
impl Combinator for Required {
    async fn validate(&self, target: &Target, value: &Value, path: &Path) -> CheckResult {
        if value.is_null() {
            return Err(ErrorEntry::missing_field(path).into());
        }
        check(&self.inner, target, value, path).await
    }

    fn type_name(&self) -> String {
        self.inner.type_name()
    }
}

pub fn required(inner: impl Into<Spec>) -> Spec {
    Spec::combinator(Required::new(inner))
}
