//! Locations used in error reports.

use std::fmt;

/// Where a value sits inside the input being validated.
///
/// A path carries two things: the accumulated dotted/indexed `location`
/// (e.g. `"User.tags.0"`) and the bare `label` of the current field
/// (e.g. `"tags"`). Both are absent at an anonymous root.
///
/// Paths are values: descending creates a new path, the parent is never
/// touched.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_shape::foundation::Path;
///
/// let root = Path::named("User");
/// let name = root.child("name");
/// assert_eq!(name.location(), Some("User.name"));
/// assert_eq!(name.label(), Some("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    location: Option<String>,
    label: Option<String>,
}

impl Path {
    /// Label used in messages when the path has none.
    pub const FALLBACK_LABEL: &'static str = "value";

    /// An anonymous root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A root path for a named validator: location and label are the name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            location: Some(name.clone()),
            label: Some(name),
        }
    }

    /// Descends into an object field.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        Self {
            location: Some(join(self.location.as_deref(), key)),
            label: Some(key.to_owned()),
        }
    }

    /// Descends into a sequence element.
    ///
    /// The element is labelled with its whole location, so a rejected item
    /// reads `"tags.2 must be ..."` rather than a bare index.
    #[must_use]
    pub fn item(&self, index: usize) -> Self {
        let location = join(self.location.as_deref(), &index.to_string());
        Self {
            label: Some(location.clone()),
            location: Some(location),
        }
    }

    /// The dotted/indexed location, `None` at an anonymous root.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The current field's bare label, `None` at an anonymous root.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The label to print in messages.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(Self::FALLBACK_LABEL)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.location.as_deref().unwrap_or("<root>"))
    }
}

fn join(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{parent}.{key}"),
        _ => key.to_owned(),
    }
}
