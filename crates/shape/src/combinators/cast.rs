//! CAST combinator - coerces loosely typed values into a primitive
//!
//! Two forms:
//!
//! - [`Cast::to`] applies the built-in coercion for the target category.
//! - [`Cast::convert`] checks the value against a source spec, runs a user
//!   converter, and requires its output to be of the target category.
//!
//! Coercions never guess: a conversion that would lose information fails
//! with `"<label> must be castable to <Type>, but saw `<value>`"`.

use async_trait::async_trait;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

use crate::engine::check;
use crate::foundation::{
    CheckResult, Combinator, ErrorCode, ErrorEntry, Path, Resolved, SpecError, Target,
};
use crate::spec::{Primitive, Spec};

type Converter = dyn Fn(Value) -> Value + Send + Sync;

#[derive(Clone)]
enum Conversion {
    Auto,
    Explicit {
        source: Spec,
        converter: Arc<Converter>,
    },
}

/// Coerces into one [`Primitive`] category.
#[derive(Clone)]
pub struct Cast {
    target: Primitive,
    conversion: Conversion,
}

impl Cast {
    /// Built-in coercion into `target`.
    pub const fn to(target: Primitive) -> Self {
        Self {
            target,
            conversion: Conversion::Auto,
        }
    }

    /// Built-in coercion into `target`, which must be a primitive spec.
    pub fn try_to(target: impl Into<Spec>) -> Result<Self, SpecError> {
        primitive_target(&target.into()).map(Self::to)
    }

    /// Explicit conversion from `source` into `target` through `converter`.
    pub fn convert<F>(
        source: impl Into<Spec>,
        target: impl Into<Spec>,
        converter: F,
    ) -> Result<Self, SpecError>
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Ok(Self {
            target: primitive_target(&target.into())?,
            conversion: Conversion::Explicit {
                source: source.into(),
                converter: Arc::new(converter),
            },
        })
    }

    pub const fn target(&self) -> Primitive {
        self.target
    }

    fn failure(&self, value: &Value, path: &Path) -> ErrorEntry {
        ErrorEntry::new(
            ErrorCode::CastFailure,
            path,
            format!(
                "{} must be castable to {}, but saw `{value}`",
                path.display_label(),
                self.target
            ),
        )
    }
}

fn primitive_target(spec: &Spec) -> Result<Primitive, SpecError> {
    spec.as_primitive()
        .ok_or_else(|| SpecError::NonPrimitiveCastTarget {
            target: spec.type_name(),
        })
}

#[async_trait]
impl Combinator for Cast {
    async fn validate(&self, target: &Target, value: &Value, path: &Path) -> CheckResult {
        match &self.conversion {
            Conversion::Auto => coerce(self.target, value)
                .map(Resolved::new)
                .ok_or_else(|| self.failure(value, path).into()),
            Conversion::Explicit { source, converter } => {
                let checked = check(source, target, value, path).await?;
                let converted = converter(checked.into_value());
                if self.target.matches(&converted) {
                    Ok(Resolved::new(converted))
                } else {
                    Err(self.failure(value, path).into())
                }
            }
        }
    }

    fn type_name(&self) -> String {
        format!("Cast({})", self.target)
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Cast");
        debug.field("target", &self.target);
        if let Conversion::Explicit { source, .. } = &self.conversion {
            debug.field("source", source);
        }
        debug.finish_non_exhaustive()
    }
}

pub fn cast(target: Primitive) -> Spec {
    Spec::combinator(Cast::to(target))
}

pub fn cast_with<F>(
    source: impl Into<Spec>,
    target: impl Into<Spec>,
    converter: F,
) -> Result<Spec, SpecError>
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Cast::convert(source, target, converter).map(Spec::combinator)
}

// ============================================================================
// COERCIONS
// ============================================================================

/// Built-in coercion of `value` into `target`, `None` when lossy.
pub fn coerce(target: Primitive, value: &Value) -> Option<Value> {
    match target {
        Primitive::Text => to_text(value),
        Primitive::Numeric => to_number(value),
        Primitive::Boolean => to_boolean(value),
    }
}

fn to_text(value: &Value) -> Option<Value> {
    let text = match value {
        Value::Array(_) | Value::Object(_) => return None,
        Value::String(text) => text.clone(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
    };
    Some(Value::String(text))
}

fn to_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(text) => parse_number(text).map(Value::Number),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn to_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(text) => match text.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(Value::Bool(false)),
            Some(f) if f == 1.0 => Some(Value::Bool(true)),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Shortest text of a number: integral values print without a fraction,
/// magnitudes from 1e21 up and below 1e-6 use exponent notation (`1e+21`,
/// `1e-7`).
pub fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        "0".to_owned()
    } else if f.abs() >= 1e21 || f.abs() < 1e-6 {
        let text = format!("{f:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Parses trimmed text as a finite number.
///
/// Integer text must fit `i64` or `u64` exactly; anything else written
/// with digits and signs only is too large to keep and is rejected.
/// Decimal and exponent text is kept only when the parsed `f64` spells the
/// same significant digits at the same scale, so `"1.50"` and `"1e3"` pass
/// while `"9007199254740993.0"` is rejected.
pub fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(int) = text.parse::<i64>() {
        return Some(int.into());
    }
    if let Ok(uint) = text.parse::<u64>() {
        return Some(uint.into());
    }
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-' || b == b'+') {
        return None;
    }
    let parsed = text.parse::<f64>().ok()?;
    let number = Number::from_f64(parsed)?;
    let exact = decimal_digits(text)? == decimal_digits(&format!("{parsed:e}"))?;
    exact.then_some(number)
}

/// Sign, significant digits and power of ten of decimal text, with
/// leading and trailing zeros stripped. Zero of either sign is `(false, "", 0)`.
fn decimal_digits(text: &str) -> Option<(bool, String, i64)> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, mut exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let fraction_len = i64::try_from(fraction.len()).ok()?;
    exponent = exponent.checked_sub(fraction_len)?;
    let digits = format!("{whole}{fraction}");
    let significant = digits.trim_start_matches('0');
    let trimmed = significant.trim_end_matches('0');
    if trimmed.is_empty() {
        return Some((false, String::new(), 0));
    }
    let zeros = i64::try_from(significant.len() - trimmed.len()).ok()?;
    Some((negative, trimmed.to_owned(), exponent.checked_add(zeros)?))
}
