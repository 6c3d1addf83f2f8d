//! Locations of values inside a document, used to pin binding failures.
use core::fmt;

/// A component in the path to a JSON value: an object key or an array index.
///
/// # Examples
///
/// ```
/// use lspbind::PathComponent;
///
/// let key = PathComponent::from("position");
/// assert_eq!(key.as_key(), Some("position"));
///
/// let idx = PathComponent::from(3usize);
/// assert_eq!(idx.as_index(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

impl PathComponent {
    /// Returns the index if this component is an index, otherwise `None`.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if let Self::Index(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the key if this component is a key, otherwise `None`.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        if let Self::Key(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.to_owned())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<usize> for PathComponent {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

// `path![0, "foo"]` passes integer literals, which default to `i32`.
impl From<i32> for PathComponent {
    #[allow(clippy::cast_sign_loss)]
    fn from(i: i32) -> Self {
        Self::Index(i.max(0) as usize)
    }
}

/// A path from the document root to a value.
///
/// Displays in the familiar `$.params.items[2].label` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathComponent>);

impl JsonPath {
    /// The empty path, pointing at the document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// The components from the root outwards.
    #[must_use]
    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    /// The innermost component, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathComponent> {
        self.0.last()
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Re-roots the path under `component`.
    #[must_use]
    pub fn prefixed(mut self, component: impl Into<PathComponent>) -> Self {
        self.0.insert(0, component.into());
        self
    }
}

impl From<Vec<PathComponent>> for JsonPath {
    fn from(components: Vec<PathComponent>) -> Self {
        Self(components)
    }
}

impl FromIterator<PathComponent> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathComponent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for component in &self.0 {
            match component {
                PathComponent::Key(k) => write!(f, ".{k}")?,
                PathComponent::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// Builds a [`JsonPath`] from a heterogeneous list of keys and indices.
///
/// ```rust
/// use lspbind::{path, PathComponent};
///
/// let p = path!["params", "items", 0, "label"];
/// assert_eq!(p.to_string(), "$.params.items[0].label");
/// assert_eq!(p.components()[2], PathComponent::Index(0));
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        let components: ::std::vec::Vec<$crate::PathComponent> =
            ::std::vec![$($crate::PathComponent::from($elem)),*];
        $crate::JsonPath::from(components)
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn root_displays_as_dollar() {
        assert_eq!(crate::JsonPath::root().to_string(), "$");
    }

    #[test]
    fn nested_path_display() {
        let p = path!["contentChanges", 1, "range", "start"];
        assert_eq!(p.to_string(), "$.contentChanges[1].range.start");
        assert_eq!(p.len(), 4);
    }
}
