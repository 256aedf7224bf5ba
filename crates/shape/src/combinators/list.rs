//! LIST combinator - homogeneous arrays with length bounds

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{check, settle_all};
use crate::foundation::{
    CheckResult, Combinator, ErrorCode, ErrorEntry, Failure, Path, Resolved, SpecError, Target,
};
use crate::spec::Spec;

/// Checks an array and each of its elements.
///
/// Bounds are checked before any element; a length error is located at
/// the list itself. Elements are checked concurrently, each with a fresh
/// target, at `<list>.<index>`. The failures of every rejected element are
/// reported in index order.
#[derive(Debug, Clone)]
pub struct List {
    pub(crate) element: Spec,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl List {
    /// Unbounded list.
    pub fn new(element: impl Into<Spec>) -> Self {
        Self {
            element: element.into(),
            min: 0,
            max: None,
        }
    }

    /// List with `min <= len <= max` (no upper bound when `max` is `None`).
    pub fn bounded(
        element: impl Into<Spec>,
        min: usize,
        max: Option<usize>,
    ) -> Result<Self, SpecError> {
        if let Some(max) = max
            && min > max
        {
            return Err(SpecError::InvalidBounds { min, max });
        }
        Ok(Self {
            element: element.into(),
            min,
            max,
        })
    }

    pub fn element(&self) -> &Spec {
        &self.element
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    fn check_length(&self, len: usize, path: &Path) -> Result<(), ErrorEntry> {
        let label = path.display_label();
        if len < self.min {
            return Err(ErrorEntry::new(
                ErrorCode::LengthBound,
                path,
                format!(
                    "{label} must be of minimum length {}, but length was {len}",
                    self.min
                ),
            ));
        }
        if let Some(max) = self.max
            && len > max
        {
            return Err(ErrorEntry::new(
                ErrorCode::LengthBound,
                path,
                format!("{label} must be of maximum length {max}, but length was {len}"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Combinator for List {
    async fn validate(&self, _target: &Target, value: &Value, path: &Path) -> CheckResult {
        let Value::Array(items) = value else {
            return Err(ErrorEntry::type_mismatch(
                path,
                format!("{} must be an array, but saw `{value}`", path.display_label()),
            )
            .into());
        };

        self.check_length(items.len(), path)?;

        let elements: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(index, item)| (Target::new(), path.item(index), item))
            .collect();

        let resolved = settle_all(
            elements
                .iter()
                .map(|(target, item_path, item)| check(&self.element, target, item, item_path)),
        )
        .await
        .map_err(Failure::Many)?;

        Ok(Resolved::new(Value::Array(
            resolved.into_iter().map(Resolved::into_value).collect(),
        )))
    }

    fn type_name(&self) -> String {
        format!("List({})", self.element.type_name())
    }
}

pub fn list(element: impl Into<Spec>) -> Spec {
    Spec::combinator(List::new(element))
}

pub fn list_bounded(
    element: impl Into<Spec>,
    min: usize,
    max: Option<usize>,
) -> Result<Spec, SpecError> {
    List::bounded(element, min, max).map(Spec::combinator)
}
