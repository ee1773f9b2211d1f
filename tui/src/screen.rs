//! Screen State
//!
//! Flattens an interpreted tree into an ordered list of drawable,
//! focusable elements. The element list is the surface's working
//! state for one displayed tree: it carries each input's transient
//! value and each button's resolved press hook.
//!
//! A new tree means a new `Screen` built from scratch, so per-leaf
//! state (typed text, focus) from the old tree is gone before the new
//! one appears. There is no partial reuse and no remount trickery.

use adapta_core::{Invokable, LeafKind, RenderedChildren, RenderedNode};

/// One drawable element, in document order.
#[derive(Debug)]
pub enum Element {
    /// Static text
    Text { content: String },
    /// Pressable button
    Button {
        title: String,
        press: Option<Invokable>,
    },
    /// Stateful text input; `value` is transient surface state, only
    /// pushed into the form store through the change hook
    Input {
        field: Option<String>,
        placeholder: String,
        value: String,
        change: Option<Invokable>,
    },
    /// Image placeholder (terminals don't do pixels)
    Image { source: String },
}

impl Element {
    pub fn focusable(&self) -> bool {
        matches!(self, Element::Button { .. } | Element::Input { .. })
    }
}

/// The flattened, focusable representation of one displayed tree.
#[derive(Debug, Default)]
pub struct Screen {
    elements: Vec<Element>,
    /// Index into `elements`; always points at a focusable element
    focus: Option<usize>,
}

impl Screen {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flatten an interpreted tree. Focus lands on the first
    /// focusable element.
    pub fn from_tree(root: &RenderedNode) -> Self {
        let mut elements = Vec::new();
        collect(root, &mut elements);
        let focus = elements.iter().position(Element::focusable);
        Self { elements, focus }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Move focus to the next focusable element, wrapping around
    pub fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    /// Move focus to the previous focusable element, wrapping around
    pub fn focus_prev(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, direction: isize) {
        let focusable: Vec<usize> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.focusable())
            .map(|(i, _)| i)
            .collect();
        if focusable.is_empty() {
            self.focus = None;
            return;
        }
        let current = self
            .focus
            .and_then(|f| focusable.iter().position(|&i| i == f))
            .unwrap_or(0);
        let len = focusable.len() as isize;
        let next = (current as isize + direction).rem_euclid(len) as usize;
        self.focus = Some(focusable[next]);
    }

    /// Press the focused button, if the focus is on one. Returns
    /// whether a press hook fired.
    pub fn press_focused(&self) -> bool {
        let Some(index) = self.focus else {
            return false;
        };
        if let Some(Element::Button { press, title }) = self.elements.get(index) {
            match press {
                Some(hook) => {
                    tracing::debug!(button = %title, action = hook.name(), "button pressed");
                    hook.invoke(&[]);
                    true
                }
                None => false,
            }
        } else {
            false
        }
    }

    /// Type a character into the focused input. The updated value is
    /// reported through the change hook as `[field, value]`.
    pub fn type_char(&mut self, c: char) {
        self.edit_focused(|value| value.push(c));
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) {
        self.edit_focused(|value| {
            value.pop();
        });
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(index) = self.focus else {
            return;
        };
        if let Some(Element::Input {
            field,
            value,
            change,
            ..
        }) = self.elements.get_mut(index)
        {
            edit(value);
            match (field, change) {
                (Some(field), Some(hook)) => hook.invoke(&[field.as_str(), value.as_str()]),
                (None, _) => {
                    tracing::warn!("input has no field name, edit not reported");
                }
                _ => {}
            }
        }
    }
}

/// Walk the rendered tree in document order, emitting elements.
fn collect(node: &RenderedNode, out: &mut Vec<Element>) {
    match node.kind {
        LeafKind::Text => {
            let mut content = String::new();
            node.gather_text(&mut content);
            if !content.is_empty() {
                out.push(Element::Text { content });
            }
        }
        LeafKind::Button | LeafKind::Touchable => {
            let title = match node.prop_str("title") {
                Some(title) => title.to_string(),
                None => {
                    // Pressable containers label themselves with
                    // their text content
                    let mut label = String::new();
                    node.gather_text(&mut label);
                    label
                }
            };
            out.push(Element::Button {
                title,
                press: node.hooks.get("onPress").cloned(),
            });
        }
        LeafKind::TextInput => {
            out.push(Element::Input {
                field: node.field.clone(),
                placeholder: node
                    .prop_str("placeholder")
                    .unwrap_or_default()
                    .to_string(),
                value: node.prop_str("initialValue").unwrap_or_default().to_string(),
                change: node.hooks.get("onChangeText").cloned(),
            });
        }
        LeafKind::Image => {
            out.push(Element::Image {
                source: node.prop_str("source").unwrap_or_default().to_string(),
            });
        }
        LeafKind::View => {
            match &node.children {
                RenderedChildren::Text(text) => {
                    if !text.is_empty() {
                        out.push(Element::Text {
                            content: text.clone(),
                        });
                    }
                }
                RenderedChildren::Nodes(children) => {
                    for child in children {
                        collect(child, out);
                    }
                }
                RenderedChildren::None => {}
            }
        }
    }
}
