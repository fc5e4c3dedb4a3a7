//! Recursive element-tree walk that instantiates widgets.

use std::collections::HashMap;

use crate::binding::WidgetHandle;
use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::placement::GeometryIntent;
use crate::toolkit::{WidgetId, WidgetTree};
use crate::widgets::TagRegistry;

/// Widgets registered by id plus every geometry intent, in document order.
#[derive(Debug, Default)]
pub struct BuildOutput {
    pub widgets: HashMap<String, WidgetHandle>,
    pub intents: Vec<GeometryIntent>,
}

/// Walks an element tree depth-first, building one widget per element.
pub struct TreeBuilder<'r> {
    registry: &'r TagRegistry,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(registry: &'r TagRegistry) -> Self {
        Self { registry }
    }

    /// Build `element` and its descendants under `parent`.
    ///
    /// Any failure aborts the whole walk. Widgets created before the failure
    /// stay in the tree; nothing refers to them.
    pub fn build(&self, tree: &mut WidgetTree, parent: WidgetId, element: &Element) -> Result<BuildOutput> {
        let mut output = BuildOutput::default();
        self.build_into(tree, parent, element, &mut output)?;
        Ok(output)
    }

    fn build_into(
        &self,
        tree: &mut WidgetTree,
        parent: WidgetId,
        element: &Element,
        output: &mut BuildOutput,
    ) -> Result<()> {
        let constructor = self.registry.get(&element.tag)?;
        let built = constructor(tree, parent, element)?;
        let widget = built.handle.id;
        tracing::debug!(tag = %element.tag, id = ?element.id(), "built element");

        if let Some(id) = element.id() {
            if output.widgets.contains_key(id) {
                return Err(BuildError::DuplicateId(id.to_owned()));
            }
            output.widgets.insert(id.to_owned(), built.handle);
        }
        output.intents.extend(built.intent);

        for child in &element.children {
            if self.registry.is_data_tag(&child.tag) {
                continue;
            }
            self.build_into(tree, widget, child, output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_str;
    use crate::toolkit::WidgetKind;
    use pretty_assertions::assert_eq;

    fn build(markup: &str) -> Result<(WidgetTree, WidgetId, BuildOutput)> {
        let registry = TagRegistry::with_defaults();
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let root = parse_str(markup)?;
        let output = TreeBuilder::new(&registry).build(&mut tree, window, &root)?;
        Ok((tree, window, output))
    }

    #[test]
    fn builds_nested_tree_in_document_order() {
        let (tree, window, output) = build(
            r#"<toplevel geometry="pack">
                 <frame id="outer">
                   <label id="a" text="A"/>
                   <button id="b" text="B"/>
                 </frame>
                 <entry id="c"/>
               </toplevel>"#,
        )
        .unwrap();
        let outer = output.widgets["outer"].id;
        assert_eq!(tree.parent(outer), Some(window));
        assert_eq!(tree.parent(output.widgets["a"].id), Some(outer));
        assert_eq!(tree.parent(output.widgets["c"].id), Some(window));
        let order: Vec<WidgetId> = output.intents.iter().map(|i| i.widget).collect();
        assert_eq!(
            order,
            vec![
                outer,
                output.widgets["a"].id,
                output.widgets["b"].id,
                output.widgets["c"].id,
            ]
        );
    }

    #[test]
    fn value_children_are_not_widgets() {
        let (tree, window, output) = build(
            r#"<toplevel geometry="grid"><combobox id="cb"><value>x</value></combobox></toplevel>"#,
        )
        .unwrap();
        assert_eq!(tree.children(window).len(), 1);
        assert!(tree.children(output.widgets["cb"].id).is_empty());
    }

    #[test]
    fn unrecognized_tag_aborts() {
        match build(r#"<toplevel geometry="grid"><frame><frobnicate/></frame></toplevel>"#) {
            Err(BuildError::UnrecognizedTag(tag)) => assert_eq!(tag, "frobnicate"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn duplicate_ids_fail() {
        let result = build(
            r#"<toplevel geometry="grid"><label id="x"/><frame><label id="x"/></frame></toplevel>"#,
        );
        match result {
            Err(BuildError::DuplicateId(id)) => assert_eq!(id, "x"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn toplevel_registers_the_window() {
        let (_, window, output) =
            build(r#"<toplevel id="root" geometry="grid" title="T"/>"#).unwrap();
        assert_eq!(output.widgets["root"].id, window);
        assert_eq!(output.widgets["root"].kind, WidgetKind::Window);
        assert!(output.intents.is_empty());
    }

    #[test]
    fn pages_produce_no_intents() {
        let (_, _, output) = build(
            r#"<toplevel geometry="grid">
                 <notebook id="nb"><page id="p1" text="One"><label id="l"/></page></notebook>
               </toplevel>"#,
        )
        .unwrap();
        let placed: Vec<WidgetId> = output.intents.iter().map(|i| i.widget).collect();
        assert_eq!(placed, vec![output.widgets["nb"].id, output.widgets["l"].id]);
    }
}
