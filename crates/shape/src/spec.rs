//! Specifications: what a value is expected to look like.
//!
//! A [`Spec`] is a closed sum type. Leaves are [`Spec::Null`],
//! [`Primitive`] markers and [`ClassMarker`]s; [`ShapeMap`]s nest specs per
//! object field; combinators wrap other specs; and a built [`Validator`]
//! can be nested as [`Spec::Named`].
//!
//! Specs are immutable once built and cheap to clone.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::Validator;
use crate::foundation::Combinator;

// ============================================================================
// PRIMITIVE MARKERS
// ============================================================================

/// The fixed registry of primitive categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// JSON strings.
    Text,
    /// JSON numbers.
    Numeric,
    /// JSON booleans.
    Boolean,
}

impl Primitive {
    /// Every registered category.
    pub const ALL: [Self; 3] = [Self::Text, Self::Numeric, Self::Boolean];

    /// Name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Numeric => "Number",
            Self::Boolean => "Boolean",
        }
    }

    /// The category of `value`, if it has a primitive one.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(Self::Text),
            Value::Number(_) => Some(Self::Numeric),
            Value::Bool(_) => Some(Self::Boolean),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Strict category identity.
    pub fn matches(self, value: &Value) -> bool {
        Self::of(value) == Some(self)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// CLASS MARKER
// ============================================================================

/// An arbitrary Rust type used as a spec.
///
/// A value is an instance of the class when it is non-null and deserializes
/// into the type. The value itself is passed through unchanged.
#[derive(Clone, Copy)]
pub struct ClassMarker {
    name: &'static str,
    probe: fn(&Value) -> bool,
}

impl ClassMarker {
    /// Marker for `T`.
    pub fn of<T: DeserializeOwned + 'static>() -> Self {
        let full = std::any::type_name::<T>();
        let base = full.split('<').next().unwrap_or(full);
        let name = base.rsplit("::").next().unwrap_or(base);
        Self {
            name,
            probe: deserializes_into::<T>,
        }
    }

    /// Short type name of the class.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// "is-instance-of" check.
    pub fn is_instance(&self, value: &Value) -> bool {
        !value.is_null() && (self.probe)(value)
    }
}

fn deserializes_into<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}

impl fmt::Debug for ClassMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassMarker").field(&self.name).finish()
    }
}

// ============================================================================
// SHAPE MAP
// ============================================================================

/// Ordered mapping of field names to specs.
///
/// Fields are checked, reported and written in declaration order.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_shape::prelude::*;
///
/// let user = ShapeMap::new()
///     .field("name", required(Primitive::Text))
///     .field("age", Primitive::Numeric);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShapeMap {
    fields: Arc<Vec<(String, Spec)>>,
}

impl ShapeMap {
    /// An empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing an earlier declaration of the same name in
    /// place.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<Spec>) -> Self {
        let name = name.into();
        let spec = spec.into();
        let fields = Arc::make_mut(&mut self.fields);
        match fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = spec,
            None => fields.push((name, spec)),
        }
        self
    }

    /// Declared fields, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Spec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Spec of one field.
    pub fn get(&self, name: &str) -> Option<&Spec> {
        self.iter().find(|(n, _)| *n == name).map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON rendering of the field names and their type names, e.g.
    /// `{"name":"String"}`.
    pub fn type_name(&self) -> String {
        let names: Map<String, Value> = self
            .iter()
            .map(|(name, spec)| (name.to_owned(), Value::String(spec.type_name())))
            .collect();
        Value::Object(names).to_string()
    }
}

impl<K, S> FromIterator<(K, S)> for ShapeMap
where
    K: Into<String>,
    S: Into<Spec>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |shape, (name, spec)| shape.field(name, spec))
    }
}

// ============================================================================
// SPEC
// ============================================================================

/// Expected shape of a value.
#[derive(Debug, Clone)]
pub enum Spec {
    /// Matches only null / absence.
    Null,
    /// Matches one primitive category.
    Primitive(Primitive),
    /// Matches instances of a Rust type.
    Class(ClassMarker),
    /// Matches objects field by field.
    Shape(ShapeMap),
    /// A composable validation node.
    Combinator(Arc<dyn Combinator>),
    /// A previously built validator.
    Named(Validator),
}

impl Spec {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn text() -> Self {
        Self::Primitive(Primitive::Text)
    }

    pub const fn number() -> Self {
        Self::Primitive(Primitive::Numeric)
    }

    pub const fn boolean() -> Self {
        Self::Primitive(Primitive::Boolean)
    }

    /// Instance-of check for `T`.
    pub fn class<T: DeserializeOwned + 'static>() -> Self {
        Self::Class(ClassMarker::of::<T>())
    }

    /// An object shape from `(field, spec)` pairs.
    pub fn shape<K, S, I>(fields: I) -> Self
    where
        K: Into<String>,
        S: Into<Spec>,
        I: IntoIterator<Item = (K, S)>,
    {
        Self::Shape(fields.into_iter().collect())
    }

    /// Wraps any combinator.
    pub fn combinator(combinator: impl Combinator + 'static) -> Self {
        Self::Combinator(Arc::new(combinator))
    }

    /// Name used inside other specs' messages.
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Primitive(primitive) => primitive.name().to_owned(),
            Self::Class(class) => class.name().to_owned(),
            Self::Shape(shape) => shape.type_name(),
            Self::Combinator(combinator) => combinator.type_name(),
            Self::Named(validator) => validator.display_name().to_owned(),
        }
    }

    /// Variant name, for tracing.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Primitive(_) => "primitive",
            Self::Class(_) => "class",
            Self::Shape(_) => "shape",
            Self::Combinator(_) => "combinator",
            Self::Named(_) => "named",
        }
    }

    pub const fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }
}

impl From<Primitive> for Spec {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<ClassMarker> for Spec {
    fn from(class: ClassMarker) -> Self {
        Self::Class(class)
    }
}

impl From<ShapeMap> for Spec {
    fn from(shape: ShapeMap) -> Self {
        Self::Shape(shape)
    }
}

impl From<Validator> for Spec {
    fn from(validator: Validator) -> Self {
        Self::Named(validator)
    }
}

impl From<&Validator> for Spec {
    fn from(validator: &Validator) -> Self {
        Self::Named(validator.clone())
    }
}
