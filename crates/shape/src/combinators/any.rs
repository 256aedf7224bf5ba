//! ANY combinator - accepts everything

use async_trait::async_trait;
use serde_json::Value;

use crate::foundation::{CheckResult, Combinator, Path, Resolved, Target};
use crate::spec::Spec;

/// Returns the value unchanged, null included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Any;

#[async_trait]
impl Combinator for Any {
    async fn validate(&self, _target: &Target, value: &Value, _path: &Path) -> CheckResult {
        Ok(Resolved::new(value.clone()))
    }

    fn type_name(&self) -> String {
        "Any".to_owned()
    }
}

pub fn any() -> Spec {
    Spec::combinator(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_any_accepts_everything() {
        for value in [json!(null), json!(0), json!("x"), json!([1]), json!({ "a": {} })] {
            let resolved = Any.validate(&Target::new(), &value, &Path::root()).await;
            assert_eq!(resolved, Ok(Resolved::new(value)));
        }
    }
}
