//! Leaf Component Registry
//!
//! Maps the server's type tags to concrete renderable primitives and
//! their property contracts. Each leaf declares which prop keys it
//! consumes as behavioral hooks (resolved through the action table)
//! versus passthrough display props.
//!
//! The registry is fixed at construction and extensible only by
//! adding entries; registering a new tag never disturbs existing
//! resolution. An unknown tag is non-fatal: the interpreter skips the
//! offending node and keeps going with its siblings.

use std::collections::HashMap;

/// The concrete renderable primitives a surface knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// Layout container
    View,
    /// Static text (also the designated raw-text leaf)
    Text,
    /// Pressable button with a `title` prop
    Button,
    /// Image placeholder with a `source` prop
    Image,
    /// Stateful text input reporting edits by field name
    TextInput,
    /// Pressable container; its text content becomes the label
    Touchable,
}

/// A leaf's property contract.
#[derive(Clone, Debug)]
pub struct LeafSpec {
    pub kind: LeafKind,
    /// Prop keys interpreted as action references. Everything else is
    /// passed through verbatim, even if it textually matches an
    /// action name.
    pub hook_keys: &'static [&'static str],
    /// Whether this leaf writes user edits into the form state store
    pub stateful: bool,
}

impl LeafSpec {
    pub fn new(kind: LeafKind, hook_keys: &'static [&'static str], stateful: bool) -> Self {
        Self {
            kind,
            hook_keys,
            stateful,
        }
    }

    /// Whether `key` is one of this leaf's behavioral hook keys
    pub fn is_hook_key(&self, key: &str) -> bool {
        self.hook_keys.contains(&key)
    }
}

/// Registry of known leaf component types.
pub struct LeafRegistry {
    leaves: HashMap<String, LeafSpec>,
}

impl LeafRegistry {
    /// The standard component map: the tags the agent backend is
    /// prompted to emit.
    pub fn standard() -> Self {
        let mut registry = Self {
            leaves: HashMap::new(),
        };
        registry.register("View", LeafSpec::new(LeafKind::View, &[], false));
        registry.register("Text", LeafSpec::new(LeafKind::Text, &[], false));
        registry.register("Button", LeafSpec::new(LeafKind::Button, &["onPress"], false));
        registry.register("Image", LeafSpec::new(LeafKind::Image, &[], false));
        registry.register(
            "TextInput",
            LeafSpec::new(LeafKind::TextInput, &["onChangeText"], true),
        );
        registry.register(
            "TouchableOpacity",
            LeafSpec::new(LeafKind::Touchable, &["onPress"], false),
        );
        registry
    }

    /// Add (or replace) a tag. Additive: existing tags are untouched.
    pub fn register(&mut self, tag: impl Into<String>, spec: LeafSpec) {
        self.leaves.insert(tag.into(), spec);
    }

    /// Resolve a type tag. `None` means the node should be skipped.
    pub fn resolve(&self, tag: &str) -> Option<&LeafSpec> {
        self.leaves.get(tag)
    }

    /// The designated leaf for bare string content
    pub fn raw_text(&self) -> LeafSpec {
        LeafSpec::new(LeafKind::Text, &[], false)
    }
}

impl Default for LeafRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tags_resolve() {
        let registry = LeafRegistry::standard();
        for tag in ["View", "Text", "Button", "Image", "TextInput", "TouchableOpacity"] {
            assert!(registry.resolve(tag).is_some(), "tag {tag} should resolve");
        }
    }

    #[test]
    fn test_unknown_and_empty_tags_do_not_resolve() {
        let registry = LeafRegistry::standard();
        assert!(registry.resolve("Carousel").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_hook_key_contracts() {
        let registry = LeafRegistry::standard();
        let button = registry.resolve("Button").unwrap();
        assert!(button.is_hook_key("onPress"));
        assert!(!button.is_hook_key("title"));

        let input = registry.resolve("TextInput").unwrap();
        assert!(input.is_hook_key("onChangeText"));
        assert!(input.stateful);

        let text = registry.resolve("Text").unwrap();
        assert!(text.hook_keys.is_empty());
        assert!(!text.stateful);
    }

    #[test]
    fn test_registration_is_additive() {
        let mut registry = LeafRegistry::standard();
        registry.register("Card", LeafSpec::new(LeafKind::View, &[], false));
        assert_eq!(registry.resolve("Card").unwrap().kind, LeafKind::View);
        // Existing resolution unchanged
        assert_eq!(registry.resolve("Button").unwrap().kind, LeafKind::Button);
    }
}
