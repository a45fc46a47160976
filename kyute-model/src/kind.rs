//! Static descriptors of the kinds declared in a model schema.
use std::fmt;

/// Whether instances of a kind are elements of the live tree, or plain values assigned to properties.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KindCategory {
    Element,
    Value,
}

/// How a property is written to the live object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyCategory {
    /// Assigned directly.
    Scalar,
    /// Converted through the underlying representation of the named enum.
    Enum { name: &'static str },
    /// Freshly created from a nested description of the named kind, then assigned.
    Nested { kind: &'static str },
    /// Child collection, rebuilt from the list of descriptions.
    List { item: &'static str },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub category: PropertyCategory,
}

/// Describes a kind of live object: its base kind and the properties it declares.
pub struct KindInfo {
    pub name: &'static str,
    pub base: Option<&'static KindInfo>,
    pub category: KindCategory,
    /// `false` for abstract kinds.
    pub constructible: bool,
    /// Properties declared by this kind, not including inherited ones.
    pub properties: &'static [PropertyInfo],
}

impl KindInfo {
    /// Iterates over this kind and its base kinds, most derived first.
    pub fn ancestors(&'static self) -> impl Iterator<Item = &'static KindInfo> {
        let mut next = Some(self);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.base;
            Some(current)
        })
    }

    /// Returns whether this kind is `other` or derives from it.
    pub fn is_a(&'static self, other: &KindInfo) -> bool {
        self.ancestors().any(|k| k == other)
    }

    /// Looks up a property by name, including inherited ones.
    pub fn property(&'static self, name: &str) -> Option<&'static PropertyInfo> {
        self.ancestors().flat_map(|k| k.properties.iter()).find(|p| p.name == name)
    }

    /// All properties, base kinds first, in the order they are applied.
    pub fn all_properties(&'static self) -> Vec<&'static PropertyInfo> {
        let mut chain: Vec<_> = self.ancestors().collect();
        chain.reverse();
        chain.into_iter().flat_map(|k| k.properties.iter()).collect()
    }
}

// Descriptors are emitted as constants and may be duplicated in memory, so identity is the name.
impl PartialEq for KindInfo {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.name == other.name
    }
}

impl Eq for KindInfo {}

impl fmt::Debug for KindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindInfo")
            .field("name", &self.name)
            .field("base", &self.base.map(|b| b.name))
            .field("category", &self.category)
            .field("constructible", &self.constructible)
            .field("properties", &self.properties)
            .finish()
    }
}

impl fmt::Display for KindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE: KindInfo = KindInfo {
        name: "Base",
        base: None,
        category: KindCategory::Element,
        constructible: false,
        properties: &[PropertyInfo {
            name: "opacity",
            category: PropertyCategory::Scalar,
        }],
    };

    static DERIVED: KindInfo = KindInfo {
        name: "Derived",
        base: Some(&BASE),
        category: KindCategory::Element,
        constructible: true,
        properties: &[
            PropertyInfo {
                name: "text",
                category: PropertyCategory::Scalar,
            },
            PropertyInfo {
                name: "children",
                category: PropertyCategory::List { item: "Node" },
            },
        ],
    };

    #[test]
    fn ancestry() {
        let names: Vec<_> = DERIVED.ancestors().map(|k| k.name).collect();
        assert_eq!(names, ["Derived", "Base"]);
        assert!(DERIVED.is_a(&BASE));
        assert!(!BASE.is_a(&DERIVED));
    }

    #[test]
    fn property_lookup() {
        assert_eq!(DERIVED.property("opacity").map(|p| p.category), Some(PropertyCategory::Scalar));
        assert!(BASE.property("text").is_none());
        let order: Vec<_> = DERIVED.all_properties().iter().map(|p| p.name).collect();
        assert_eq!(order, ["opacity", "text", "children"]);
    }
}
