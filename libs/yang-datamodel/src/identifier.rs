//! Schema node identifier
//!
//! The `(name, namespace)` key used for child registry lookups and collision checks.
//! Namespace is absent until the linking pass assigns it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaNodeIdentifier {
    name: String,
    namespace: Option<String>,
}

impl SchemaNodeIdentifier {
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Identifier without a namespace, as produced by the parser
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn qualified(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::new(name, Some(namespace.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Same name under a different namespace
    pub fn with_namespace(&self, namespace: Option<String>) -> Self {
        Self {
            name: self.name.clone(),
            namespace,
        }
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_namespace(&mut self, namespace: Option<String>) {
        self.namespace = namespace;
    }
}

impl fmt::Display for SchemaNodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<(&str, &str)> for SchemaNodeIdentifier {
    fn from((name, namespace): (&str, &str)) -> Self {
        Self::qualified(name, namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_covers_both_fields() {
        let a = SchemaNodeIdentifier::qualified("c", "urn:a");
        assert_eq!(a, SchemaNodeIdentifier::from(("c", "urn:a")));
        assert_ne!(a, SchemaNodeIdentifier::qualified("c", "urn:b"));
        assert_ne!(a, SchemaNodeIdentifier::unqualified("c"));
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(SchemaNodeIdentifier::qualified("c", "urn:a"), 1);
        map.insert(SchemaNodeIdentifier::unqualified("c"), 2);

        assert_eq!(map.get(&("c", "urn:a").into()), Some(&1));
        assert_eq!(map.get(&SchemaNodeIdentifier::unqualified("c")), Some(&2));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SchemaNodeIdentifier::qualified("c", "urn:a").to_string(),
            "{urn:a}c"
        );
        assert_eq!(SchemaNodeIdentifier::unqualified("c").to_string(), "c");
    }
}
