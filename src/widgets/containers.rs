//! Container widgets: frame, labelframe, notebook and its pages,
//! panedwindow, and `<toplevel>`.

use crate::binding::WidgetHandle;
use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::toolkit::{Options, Orient, Relief, WidgetData, WidgetId, WidgetKind, WidgetTree};

use super::options::Attrs;
use super::registry::Built;
use super::text::LabelConfig;
use super::create_placed;

/// Attributes of `<frame>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameConfig {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub relief: Relief,
}

impl FrameConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            width: attrs.cells("width")?,
            height: attrs.cells("height")?,
            relief: attrs.parse::<Relief>("relief")?.unwrap_or_default(),
        })
    }
}

fn structure_error(tag: &str, message: &str) -> BuildError {
    BuildError::Structure {
        tag: tag.to_owned(),
        message: message.to_owned(),
    }
}

pub fn frame(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = FrameConfig::parse(Attrs::new(element))?;
    let options = Options {
        width: config.width,
        height: config.height,
        relief: config.relief,
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Frame).with_options(options))
}

pub fn labelframe(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = LabelConfig::parse(Attrs::new(element))?;
    let data = WidgetData::new(WidgetKind::LabelFrame).with_options(config.into_options());
    create_placed(tree, master, element, data)
}

pub fn notebook(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Notebook))
}

/// A notebook page. It must sit directly inside a `<notebook>`, which it
/// joins as a new tab; the notebook places it, so it has no intent.
pub fn page(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    if tree.kind(master) != Some(WidgetKind::Notebook) {
        return Err(structure_error(&element.tag, "<page> must be inside a <notebook>"));
    }
    let config = LabelConfig::parse(Attrs::new(element))?;
    let id = tree.create(master, WidgetData::new(WidgetKind::Page))?;
    tree.notebook_add(master, id, &config.text)?;
    Ok(Built::unplaced(WidgetHandle::plain(id, WidgetKind::Page)))
}

pub fn panedwindow(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let orient = Attrs::new(element).parse::<Orient>("orient")?;
    let options = Options {
        orient: Some(orient.unwrap_or(Orient::Vertical)),
        ..Options::default()
    };
    create_placed(
        tree,
        master,
        element,
        WidgetData::new(WidgetKind::PanedWindow).with_options(options),
    )
}

/// `<toplevel>` configures the window it is built into rather than making
/// a widget: it sets the title and hands back the window itself, so its
/// children are built straight into the window.
pub fn toplevel(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    if tree.kind(master) != Some(WidgetKind::Window) {
        return Err(structure_error(
            &element.tag,
            "<toplevel> must be built directly into a window",
        ));
    }
    if let Some(title) = Attrs::new(element).raw("title") {
        tree.set_title(master, Some(title))?;
    }
    Ok(Built::unplaced(WidgetHandle::plain(master, WidgetKind::Window)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn window() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(Some("Tk"));
        (tree, window)
    }

    #[test]
    fn frame_reads_relief_and_size() {
        let (mut tree, window) = window();
        let el = Element::new("frame")
            .with_attr("relief", "groove")
            .with_attr("width", "30")
            .with_attr("height", "5");
        let built = frame(&mut tree, window, &el).unwrap();
        let options = &tree.get(built.handle.id).unwrap().options;
        assert_eq!(options.relief, Relief::Groove);
        assert_eq!((options.width, options.height), (Some(30), Some(5)));
    }

    #[test]
    fn page_joins_notebook() {
        let (mut tree, window) = window();
        let nb = notebook(&mut tree, window, &Element::new("notebook")).unwrap();
        let el = Element::new("page").with_attr("text", "General");
        let built = page(&mut tree, nb.handle.id, &el).unwrap();
        assert!(built.intent.is_none());
        let tabs = &tree.get(nb.handle.id).unwrap().tabs;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].text, "General");
        assert_eq!(tabs[0].page, built.handle.id);
    }

    #[test]
    fn page_outside_notebook_is_structural_error() {
        let (mut tree, window) = window();
        let fr = frame(&mut tree, window, &Element::new("frame")).unwrap();
        match page(&mut tree, fr.handle.id, &Element::new("page")) {
            Err(BuildError::Structure { tag, .. }) => assert_eq!(tag, "page"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn toplevel_titles_its_window() {
        let (mut tree, window) = window();
        let el = Element::new("toplevel").with_attr("title", "Settings");
        let built = toplevel(&mut tree, window, &el).unwrap();
        assert_eq!(built.handle.id, window);
        assert!(built.intent.is_none());
        assert_eq!(tree.get(window).unwrap().title.as_deref(), Some("Settings"));
    }

    #[test]
    fn toplevel_without_title_keeps_it() {
        let (mut tree, window) = window();
        toplevel(&mut tree, window, &Element::new("toplevel")).unwrap();
        assert_eq!(tree.get(window).unwrap().title.as_deref(), Some("Tk"));
    }

    #[test]
    fn nested_toplevel_is_structural_error() {
        let (mut tree, window) = window();
        let fr = frame(&mut tree, window, &Element::new("frame")).unwrap();
        assert!(matches!(
            toplevel(&mut tree, fr.handle.id, &Element::new("toplevel")),
            Err(BuildError::Structure { .. })
        ));
    }

    #[test]
    fn panedwindow_orientation() {
        let (mut tree, window) = window();
        let el = Element::new("panedwindow").with_attr("orient", "horizontal");
        let built = panedwindow(&mut tree, window, &el).unwrap();
        assert_eq!(tree.get(built.handle.id).unwrap().options.orient, Some(Orient::Horizontal));
    }

    #[test]
    fn page_under_missing_master_is_structural_error() {
        let (mut tree, _) = window();
        assert!(matches!(
            page(&mut tree, WidgetId::default(), &Element::new("page")),
            Err(BuildError::Structure { .. })
        ));
    }
}
