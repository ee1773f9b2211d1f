//! Tree Interpreter
//!
//! The recursive core: consumes a server-sent node description,
//! resolves its leaf through the registry, merges inherited and local
//! props, replaces hook-key action references with resolved
//! callables, recurses into children, and composes the result into a
//! [`RenderedNode`] the surface can draw.
//!
//! # Prop precedence
//!
//! The effective prop set is the caller's inherited props overlaid by
//! the node's own props, with local props always winning on key
//! collision. This is the single precedence rule the whole system
//! depends on: a child never silently loses its own declared prop to
//! something the parent passed down.
//!
//! # Error posture
//!
//! Nothing in here returns an error. Unknown node types are skipped
//! with a diagnostic (siblings keep rendering); unresolved actions
//! become warning no-ops. The tree is server-controlled and assumed
//! bounded, so recursion depth is not capped.

use std::collections::HashMap;

use crate::actions::{ActionTable, Invokable};
use crate::form::FieldSetter;
use crate::node::{Children, NodeDescription, PropMap, PropValue, UiPayload};
use crate::registry::{LeafKind, LeafRegistry, LeafSpec};

/// Children of a rendered node: nothing, literal text, or an ordered
/// composite of rendered sub-nodes.
#[derive(Debug, Default)]
pub enum RenderedChildren {
    #[default]
    None,
    Text(String),
    Nodes(Vec<RenderedNode>),
}

/// The composed output for one node: resolved leaf, effective display
/// props, resolved behavioral hooks, and rendered children.
#[derive(Debug)]
pub struct RenderedNode {
    pub kind: LeafKind,
    /// Effective props with hook keys removed
    pub props: PropMap,
    /// Hook key -> resolved callable
    pub hooks: HashMap<&'static str, Invokable>,
    /// Declared field name, for the stateful input leaf
    pub field: Option<String>,
    pub children: RenderedChildren,
}

impl RenderedNode {
    /// String prop lookup helper
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(PropValue::as_str)
    }

    /// Concatenated text content of this subtree, in document order.
    /// Used for flattening pressable containers into labels.
    pub fn gather_text(&self, out: &mut String) {
        if let Some(title) = self.prop_str("title") {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(title);
        }
        match &self.children {
            RenderedChildren::Text(text) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(text);
            }
            RenderedChildren::Nodes(nodes) => {
                for node in nodes {
                    node.gather_text(out);
                }
            }
            RenderedChildren::None => {}
        }
    }
}

/// The interpreter owns the fixed collaborators of one screen: the
/// leaf registry, the screen's action table, and a write handle into
/// the session's form state store.
pub struct Interpreter {
    registry: LeafRegistry,
    actions: ActionTable,
    form: FieldSetter,
}

impl Interpreter {
    pub fn new(registry: LeafRegistry, actions: ActionTable, form: FieldSetter) -> Self {
        Self {
            registry,
            actions,
            form,
        }
    }

    /// Render a top-level payload with no inherited props.
    pub fn render(&self, payload: &UiPayload) -> Option<RenderedNode> {
        self.render_with(payload, &PropMap::new())
    }

    /// Render a payload beneath a set of inherited props.
    pub fn render_with(&self, payload: &UiPayload, inherited: &PropMap) -> Option<RenderedNode> {
        match payload {
            UiPayload::Text(text) => Some(self.render_raw_text(text)),
            UiPayload::Node(node) => self.render_node(node, inherited),
        }
    }

    /// Bare strings render through the registry's raw-text leaf.
    fn render_raw_text(&self, text: &str) -> RenderedNode {
        RenderedNode {
            kind: self.registry.raw_text().kind,
            props: PropMap::new(),
            hooks: HashMap::new(),
            field: None,
            children: RenderedChildren::Text(text.to_string()),
        }
    }

    fn render_node(&self, node: &NodeDescription, inherited: &PropMap) -> Option<RenderedNode> {
        let spec = match self.registry.resolve(&node.kind) {
            Some(spec) => spec,
            None => {
                tracing::warn!(tag = %node.kind, "component type is not supported, skipping node");
                return None;
            }
        };

        // Inherited props overlaid by local props; local wins.
        let mut effective = inherited.clone();
        for (key, value) in &node.props {
            effective.insert(key.clone(), value.clone());
        }

        let hooks = self.resolve_hooks(spec, &mut effective);
        let field = spec
            .stateful
            .then(|| effective.get("name").and_then(PropValue::as_str))
            .flatten()
            .map(str::to_string);

        // Children see the caller's inherited props, not this node's
        // merged set.
        let children = self.render_children(&node.children, inherited);

        Some(RenderedNode {
            kind: spec.kind,
            props: effective,
            hooks,
            field,
            children,
        })
    }

    /// Replace hook-key action references with resolved callables.
    /// Only declared hook keys are interpreted; display props pass
    /// through verbatim even when they textually match an action
    /// name. Each hook on a node resolves independently.
    fn resolve_hooks(
        &self,
        spec: &LeafSpec,
        effective: &mut PropMap,
    ) -> HashMap<&'static str, Invokable> {
        let mut hooks = HashMap::new();
        for &key in spec.hook_keys {
            // Only string values are action references; anything else
            // stays in the display props untouched.
            if matches!(effective.get(key), Some(PropValue::Text(_))) {
                if let Some(PropValue::Text(action_name)) = effective.remove(key) {
                    hooks.insert(key, self.actions.resolve(&action_name));
                }
            }
        }

        // The stateful input must always be able to report edits:
        // without a wired change action it gets the form store's
        // setter directly.
        if spec.stateful && !hooks.contains_key("onChangeText") {
            let setter = self.form.clone();
            hooks.insert(
                "onChangeText",
                Invokable::new("form-state.set", move |args| {
                    if let [field, value] = args {
                        setter.set(field, value);
                    } else {
                        tracing::warn!("field setter invoked without [field, value] arguments");
                    }
                }),
            );
        }
        hooks
    }

    fn render_children(&self, children: &Children, inherited: &PropMap) -> RenderedChildren {
        match children {
            Children::None => RenderedChildren::None,
            Children::Text(text) => RenderedChildren::Text(text.clone()),
            Children::One(node) => {
                match self.render_node(node, inherited) {
                    Some(rendered) => RenderedChildren::Nodes(vec![rendered]),
                    None => RenderedChildren::None,
                }
            }
            Children::Many(nodes) => {
                // Unresolvable nodes drop out; siblings keep going.
                let rendered: Vec<_> = nodes
                    .iter()
                    .filter_map(|node| self.render_node(node, inherited))
                    .collect();
                RenderedChildren::Nodes(rendered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn interpreter(actions: ActionTable) -> (Interpreter, FormState) {
        let form = FormState::new();
        let interp = Interpreter::new(LeafRegistry::standard(), actions, form.setter());
        (interp, form)
    }

    fn node_payload(node: NodeDescription) -> UiPayload {
        UiPayload::Node(node)
    }

    #[test]
    fn test_bare_string_renders_through_raw_text_leaf() {
        let (interp, _form) = interpreter(ActionTable::new());
        let rendered = interp.render(&UiPayload::Text("hello".into())).unwrap();
        assert_eq!(rendered.kind, LeafKind::Text);
        match rendered.children {
            RenderedChildren::Text(ref text) => assert_eq!(text, "hello"),
            ref other => panic!("expected text children, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_skips_node_but_keeps_siblings() {
        let (interp, _form) = interpreter(ActionTable::new());
        let tree = NodeDescription::new("View").with_children(Children::Many(vec![
            NodeDescription::new("Text").with_children(Children::Text("first".into())),
            NodeDescription::new("Carousel"),
            NodeDescription::new("Text").with_children(Children::Text("last".into())),
        ]));

        let rendered = interp.render(&node_payload(tree)).unwrap();
        match rendered.children {
            RenderedChildren::Nodes(ref nodes) => {
                assert_eq!(nodes.len(), 2);
                let mut text = String::new();
                nodes[0].gather_text(&mut text);
                assert_eq!(text, "first");
            }
            ref other => panic!("expected node children, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_type_treated_as_unresolved() {
        let (interp, _form) = interpreter(ActionTable::new());
        assert!(interp.render(&node_payload(NodeDescription::new(""))).is_none());
    }

    #[test]
    fn test_local_props_win_over_inherited() {
        let (interp, _form) = interpreter(ActionTable::new());
        let mut inherited = PropMap::new();
        inherited.insert("a".into(), PropValue::Number(1.0));
        inherited.insert("b".into(), PropValue::Number(2.0));

        let node = NodeDescription::new("View").with_prop("b", 3.0);
        let rendered = interp
            .render_with(&node_payload(node), &inherited)
            .unwrap();

        assert_eq!(rendered.props.get("a"), Some(&PropValue::Number(1.0)));
        assert_eq!(rendered.props.get("b"), Some(&PropValue::Number(3.0)));
    }

    #[test]
    fn test_children_inherit_callers_props_not_parents_merge() {
        let (interp, _form) = interpreter(ActionTable::new());
        let mut inherited = PropMap::new();
        inherited.insert("tone".into(), PropValue::from("root"));

        let tree = NodeDescription::new("View")
            .with_prop("tone", "parent-local")
            .with_children(Children::One(Box::new(NodeDescription::new("Text"))));

        let rendered = interp.render_with(&node_payload(tree), &inherited).unwrap();
        match rendered.children {
            RenderedChildren::Nodes(ref nodes) => {
                assert_eq!(nodes[0].prop_str("tone"), Some("root"));
            }
            ref other => panic!("expected node children, got {other:?}"),
        }
    }

    #[test]
    fn test_press_hook_resolves_through_action_table() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut actions = ActionTable::new();
        let counter = Arc::clone(&hits);
        actions.insert("handleSubmit", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let (interp, _form) = interpreter(actions);

        let button = NodeDescription::new("Button")
            .with_prop("title", "Let's go!")
            .with_prop("onPress", "handleSubmit");
        let rendered = interp.render(&node_payload(button)).unwrap();

        rendered.hooks.get("onPress").unwrap().invoke(&[]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        // Hook keys are consumed, display props pass through
        assert!(rendered.props.get("onPress").is_none());
        assert_eq!(rendered.prop_str("title"), Some("Let's go!"));
    }

    #[test]
    fn test_missing_action_renders_and_press_is_a_diagnostic_noop() {
        let (interp, _form) = interpreter(ActionTable::new());
        let button = NodeDescription::new("Button")
            .with_prop("title", "Go")
            .with_prop("onPress", "submit");
        let rendered = interp.render(&node_payload(button)).unwrap();

        let press = rendered.hooks.get("onPress").unwrap();
        assert_eq!(press.name(), "submit");
        // Must not panic
        press.invoke(&[]);
    }

    #[test]
    fn test_display_prop_matching_action_name_passes_through() {
        let mut actions = ActionTable::new();
        actions.insert("handleSubmit", |_| {});
        let (interp, _form) = interpreter(actions);

        // "title" is not a hook key on Button, so the collision with
        // an action name is irrelevant.
        let button = NodeDescription::new("Button").with_prop("title", "handleSubmit");
        let rendered = interp.render(&node_payload(button)).unwrap();
        assert_eq!(rendered.prop_str("title"), Some("handleSubmit"));
        assert!(rendered.hooks.get("onPress").is_none());
    }

    #[test]
    fn test_text_input_change_hook_writes_into_form_state() {
        let mut actions = ActionTable::new();
        let form = FormState::new();
        let setter = form.setter();
        actions.insert("storeData", move |args| {
            if let [field, value] = args {
                setter.set(field, value);
            }
        });
        let interp = Interpreter::new(LeafRegistry::standard(), actions, form.setter());

        let input = NodeDescription::new("TextInput")
            .with_prop("name", "name")
            .with_prop("onChangeText", "storeData");
        let rendered = interp.render(&node_payload(input)).unwrap();

        assert_eq!(rendered.field.as_deref(), Some("name"));
        rendered
            .hooks
            .get("onChangeText")
            .unwrap()
            .invoke(&["name", "hello"]);
        assert_eq!(form.get("name").as_deref(), Some("hello"));
    }

    #[test]
    fn test_text_input_without_change_action_gets_injected_setter() {
        let (interp, form) = interpreter(ActionTable::new());
        let input = NodeDescription::new("TextInput").with_prop("name", "city");
        let rendered = interp.render(&node_payload(input)).unwrap();

        let change = rendered.hooks.get("onChangeText").unwrap();
        change.invoke(&["city", "lisbon"]);
        assert_eq!(form.get("city").as_deref(), Some("lisbon"));
    }

    #[test]
    fn test_touchable_gathers_label_text() {
        let mut actions = ActionTable::new();
        actions.insert("handleSubmit", |_| {});
        let (interp, _form) = interpreter(actions);

        let touchable = NodeDescription::new("TouchableOpacity")
            .with_prop("onPress", "handleSubmit")
            .with_children(Children::One(Box::new(
                NodeDescription::new("Text").with_children(Children::Text("Tap me".into())),
            )));
        let rendered = interp.render(&node_payload(touchable)).unwrap();

        assert!(rendered.hooks.contains_key("onPress"));
        let mut label = String::new();
        rendered.gather_text(&mut label);
        assert_eq!(label, "Tap me");
    }

    #[test]
    fn test_single_child_and_text_children_shapes() {
        let (interp, _form) = interpreter(ActionTable::new());
        let tree = NodeDescription::new("View").with_children(Children::One(Box::new(
            NodeDescription::new("Text").with_children(Children::Text("only".into())),
        )));
        let rendered = interp.render(&node_payload(tree)).unwrap();
        match rendered.children {
            RenderedChildren::Nodes(ref nodes) => assert_eq!(nodes.len(), 1),
            ref other => panic!("expected one rendered child, got {other:?}"),
        }
    }
}
