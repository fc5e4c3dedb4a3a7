//! Value bindings attached to built widgets.
//!
//! Constructors return a [`WidgetHandle`]: the widget id together with
//! whatever the host needs to read and write its value. Single-value widgets
//! bind a toolkit [`Variable`]; text widgets have no such variable, so they
//! get a [`TextVar`] over their buffer with the same get/set shape.

use crate::toolkit::{
    EffectId, TextBuffer, TextIndex, ToolkitError, VarRef, Variable, WidgetId, WidgetKind,
    WidgetTree,
};

// ---------------------------------------------------------------------------
// TextVar
// ---------------------------------------------------------------------------

/// Variable-like access to a text widget's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextVar {
    buffer: Variable<TextBuffer>,
}

impl TextVar {
    pub fn new(buffer: Variable<TextBuffer>) -> Self {
        Self { buffer }
    }

    /// The whole buffer, with leading and trailing whitespace removed.
    pub fn get(&self) -> String {
        self.buffer
            .with(|b| b.get(TextIndex::START, TextIndex::End).trim().to_owned())
    }

    /// Replace the buffer with `value`.
    ///
    /// The write goes through the buffer's variable, so every trace on it
    /// runs and the widget redraws on the next frame.
    pub fn set(&self, value: &str) {
        self.buffer.update(|b| {
            b.delete(TextIndex::START, TextIndex::End);
            b.insert(TextIndex::End, value);
        });
    }

    pub fn buffer(&self) -> Variable<TextBuffer> {
        self.buffer
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// The value binding of a widget, whatever its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Int(Variable<i64>),
    Str(Variable<String>),
    Text(TextVar),
}

impl Binding {
    /// Current value as text.
    pub fn get_string(&self) -> String {
        match self {
            Binding::Int(v) => v.get().to_string(),
            Binding::Str(v) => v.get(),
            Binding::Text(t) => t.get(),
        }
    }

    /// Set the value from text. Integer bindings reject non-integers.
    pub fn set_string(&self, value: &str) -> Result<(), ToolkitError> {
        match self {
            Binding::Int(v) => {
                let parsed = value.trim().parse::<i64>().map_err(|_| ToolkitError::InvalidValue {
                    value: value.to_owned(),
                })?;
                v.set(parsed);
            }
            Binding::Str(v) => v.set(value.to_owned()),
            Binding::Text(t) => t.set(value),
        }
        Ok(())
    }

    /// Call `f` with the new value (as text) after every write.
    pub fn trace(&self, mut f: impl FnMut(String) + 'static) -> EffectId {
        match *self {
            Binding::Int(v) => v.trace(move |n| f(n.to_string())),
            Binding::Str(v) => v.trace(move |s| f(s.clone())),
            Binding::Text(t) => {
                t.buffer.trace(move |b| f(b.get(TextIndex::START, TextIndex::End).trim().to_owned()))
            }
        }
    }

    pub fn as_int(&self) -> Option<Variable<i64>> {
        match self {
            Binding::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<Variable<String>> {
        match self {
            Binding::Str(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<TextVar> {
        match self {
            Binding::Text(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<VarRef> for Binding {
    fn from(var: VarRef) -> Self {
        match var {
            VarRef::Int(v) => Binding::Int(v),
            VarRef::Str(v) => Binding::Str(v),
        }
    }
}

// ---------------------------------------------------------------------------
// WidthAdjuster
// ---------------------------------------------------------------------------

/// Sizes a list widget to its longest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthAdjuster {
    widget: WidgetId,
}

impl WidthAdjuster {
    pub fn new(widget: WidgetId) -> Self {
        Self { widget }
    }

    /// Set the widget's width to the length of its longest value. A widget
    /// with no values keeps its width; `Ok(None)` is returned then.
    pub fn adjust(&self, tree: &mut WidgetTree) -> Result<Option<u16>, ToolkitError> {
        let data = tree.get(self.widget).ok_or(ToolkitError::NoSuchWidget)?;
        let Some(longest) = data.options.values.iter().map(|v| v.chars().count()).max() else {
            return Ok(None);
        };
        let width = u16::try_from(longest).unwrap_or(u16::MAX);
        tree.configure_width(self.widget, width)?;
        Ok(Some(width))
    }
}

// ---------------------------------------------------------------------------
// WidgetHandle
// ---------------------------------------------------------------------------

/// A built widget together with its auxiliary bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetHandle {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub binding: Option<Binding>,
    pub width_adjuster: Option<WidthAdjuster>,
}

impl WidgetHandle {
    /// A handle with no bindings.
    pub fn plain(id: WidgetId, kind: WidgetKind) -> Self {
        Self {
            id,
            kind,
            binding: None,
            width_adjuster: None,
        }
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn with_width_adjuster(mut self) -> Self {
        self.width_adjuster = Some(WidthAdjuster::new(self.id));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{Options, WidgetData};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn text_var_round_trips_trimmed() {
        let var = TextVar::new(Variable::new(TextBuffer::new()));
        var.set("  hello\nworld \n\n");
        assert_eq!(var.get(), "hello\nworld");
        var.set("again");
        assert_eq!(var.get(), "again");
    }

    #[test]
    fn text_var_starts_from_buffer() {
        let var = TextVar::new(Variable::new(TextBuffer::from_text("initial")));
        assert_eq!(var.get(), "initial");
    }

    #[test]
    fn text_var_set_notifies_traces() {
        let var = TextVar::new(Variable::new(TextBuffer::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = seen.clone();
        Binding::Text(var).trace(move |v| seen_c.borrow_mut().push(v));
        var.set("one");
        var.set(" two ");
        assert_eq!(*seen.borrow(), vec!["one".to_owned(), "two".to_owned()]);
    }

    #[test]
    fn int_binding_parses() {
        let binding = Binding::Int(Variable::new(0));
        binding.set_string(" 1 ").unwrap();
        assert_eq!(binding.get_string(), "1");
        assert_eq!(
            binding.set_string("on"),
            Err(ToolkitError::InvalidValue { value: "on".into() })
        );
    }

    #[test]
    fn str_binding_round_trips() {
        let binding: Binding = VarRef::Str(Variable::new(String::new())).into();
        binding.set_string("abc").unwrap();
        assert_eq!(binding.get_string(), "abc");
        assert!(binding.as_str().is_some());
        assert!(binding.as_int().is_none());
    }

    #[test]
    fn width_adjuster_uses_longest_value() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let options = Options {
            values: vec!["a".into(), "three".into(), "xy".into()],
            ..Options::default()
        };
        let combo = tree
            .create(window, WidgetData::new(WidgetKind::Combobox).with_options(options))
            .unwrap();
        let adjuster = WidthAdjuster::new(combo);
        assert_eq!(adjuster.adjust(&mut tree).unwrap(), Some(5));
        assert_eq!(tree.get(combo).unwrap().options.width, Some(5));
    }

    #[test]
    fn width_adjuster_without_values_keeps_width() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let combo = tree.create(window, WidgetData::new(WidgetKind::Combobox)).unwrap();
        assert_eq!(WidthAdjuster::new(combo).adjust(&mut tree).unwrap(), None);
        assert_eq!(tree.get(combo).unwrap().options.width, None);
    }
}
