//! End-to-end tests: markup in, placed widgets and rendered text out.

use markup_ui::binding::Binding;
use markup_ui::testing::{render_window_to_string, Pilot};
use markup_ui::toolkit::{Axis, Manager, Side, ToolkitError, ViewCommand, WidgetId, WidgetKind, WidgetTree};
use markup_ui::widgets::{Built, TagRegistry};
use markup_ui::{BuildError, GeometryMode, MarkupUi};
use pretty_assertions::assert_eq;

fn window() -> (WidgetTree, WidgetId) {
    let mut tree = WidgetTree::new();
    let window = tree.create_window(None);
    (tree, window)
}

fn built(markup: &str) -> (WidgetTree, WidgetId, MarkupUi) {
    let (mut tree, window) = window();
    let mut ui = MarkupUi::from_string(&mut tree, window, markup).unwrap();
    ui.build(&mut tree).unwrap();
    (tree, window, ui)
}

fn manager(tree: &WidgetTree, ui: &MarkupUi, id: &str) -> Option<Manager> {
    tree.get(ui.get(id).unwrap().id).unwrap().manager
}

// ── Geometry modes ───────────────────────────────────────────────────

#[test]
fn grid_documents_ignore_pack_attributes() {
    let (tree, _, ui) = built(
        r#"<toplevel geometry="grid">
             <label id="a" side="sideways" fill="lots" row="2" column="3" sticky="nsew"/>
             <frame id="f" expand="maybe"><button id="b" columnspan="2"/></frame>
           </toplevel>"#,
    );
    match manager(&tree, &ui, "a") {
        Some(Manager::Grid(info)) => {
            assert_eq!((info.row, info.column), (2, 3));
            assert_eq!(info.sticky.to_string(), "nsew");
        }
        other => panic!("expected grid, got {other:?}"),
    }
    assert!(matches!(manager(&tree, &ui, "f"), Some(Manager::Grid(_))));
    match manager(&tree, &ui, "b") {
        Some(Manager::Grid(info)) => assert_eq!(info.columnspan, 2),
        other => panic!("expected grid, got {other:?}"),
    }
    assert_eq!(ui.geometry(), GeometryMode::Grid);
}

#[test]
fn pack_documents_ignore_grid_attributes() {
    let (tree, _, ui) = built(
        r#"<toplevel geometry="pack">
             <label id="a" row="x" column="-1" sticky="q" side="left" expand="true"/>
             <entry id="e"/>
           </toplevel>"#,
    );
    match manager(&tree, &ui, "a") {
        Some(Manager::Pack(info)) => {
            assert_eq!(info.side, Side::Left);
            assert!(info.expand);
        }
        other => panic!("expected pack, got {other:?}"),
    }
    match manager(&tree, &ui, "e") {
        Some(Manager::Pack(info)) => assert_eq!(info.side, Side::Top),
        other => panic!("expected pack, got {other:?}"),
    }
}

#[test]
fn missing_or_unknown_geometry_builds_nothing() {
    for markup in [
        r#"<toplevel geometry="scroll"><label/></toplevel>"#,
        "<toplevel><label/></toplevel>",
    ] {
        let (mut tree, window) = window();
        let err = MarkupUi::from_string(&mut tree, window, markup).unwrap_err();
        assert!(matches!(err, BuildError::MissingGeometry | BuildError::InvalidGeometry(_)));
        assert!(tree.children(window).is_empty());
    }
}

// ── Lookup ───────────────────────────────────────────────────────────

#[test]
fn lookup_returns_the_constructed_widgets() {
    let (tree, window, ui) = built(
        r#"<toplevel geometry="grid">
             <frame id="outer">
               <button id="ok" text="OK"/>
             </frame>
             <listbox id="list"><value>x</value></listbox>
           </toplevel>"#,
    );
    let outer = ui.get("outer").unwrap();
    assert_eq!(outer.kind, WidgetKind::Frame);
    assert_eq!(tree.parent(outer.id), Some(window));

    let ok = ui.get("ok").unwrap();
    assert_eq!(tree.parent(ok.id), Some(outer.id));
    assert_eq!(tree.get(ok.id).unwrap().options.text.as_deref(), Some("OK"));

    let batch = ui.get_many(["list", "ok", "outer"]).unwrap();
    let kinds: Vec<WidgetKind> = batch.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, vec![WidgetKind::Listbox, WidgetKind::Button, WidgetKind::Frame]);

    assert!(matches!(ui.get("nope"), Err(BuildError::UnknownId(_))));
    assert!(ui.get_many(["ok", "nope"]).is_err());
}

#[test]
fn duplicate_ids_fail() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_string(
        &mut tree,
        window,
        r#"<toplevel geometry="pack"><label id="x"/><button id="x"/></toplevel>"#,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateId(id) if id == "x"));
}

// ── Construction errors ──────────────────────────────────────────────

#[test]
fn unknown_tag_is_named_in_the_error() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_string(&mut tree, window, r#"<toplevel geometry="grid"><frobnicate/></toplevel>"#)
        .unwrap_err();
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn message_rejects_text_attribute_with_content() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_string(
        &mut tree,
        window,
        r#"<toplevel geometry="grid"><message text="x">hi</message></toplevel>"#,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::ConflictingAttributes { .. }));
}

#[test]
fn spinbox_rejects_range_with_values() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_string(
        &mut tree,
        window,
        r#"<toplevel geometry="grid"><spinbox from="1" to="10"><value>a</value></spinbox></toplevel>"#,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::ConflictingAttributes { .. }));
}

#[test]
fn page_outside_notebook_is_structural_error() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_string(
        &mut tree,
        window,
        r#"<toplevel geometry="grid"><frame><page text="p"/></frame></toplevel>"#,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::Structure { tag, .. } if tag == "page"));
}

#[test]
fn malformed_xml_is_a_markup_error() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_string(&mut tree, window, r#"<toplevel geometry="grid"><label></toplevel>"#)
        .unwrap_err();
    assert!(matches!(err, BuildError::Markup(_)));
}

#[test]
fn missing_file_is_reported() {
    let (mut tree, window) = window();
    let err = MarkupUi::from_file(&mut tree, window, "/nonexistent/form.xml").unwrap_err();
    assert!(err.to_string().contains("form.xml"));
}

// ── Variables ────────────────────────────────────────────────────────

#[test]
fn text_adapter_round_trips_stripped() {
    let (_, _, ui) = built(r#"<toplevel geometry="pack"><text id="t">initial</text></toplevel>"#);
    let text = ui.get("t").unwrap().binding.and_then(|b| b.as_text()).unwrap();
    assert_eq!(text.get(), "initial");
    text.set("  hello world \n");
    assert_eq!(text.get(), "hello world");
}

#[test]
fn choice_variables_start_at_first_value_and_size_to_fit() {
    let (tree, _, ui) = built(
        r#"<toplevel geometry="grid">
             <combobox id="cb"><value>small</value><value>enormous</value></combobox>
             <optionmenu id="om" width="3"><value>a</value><value>bb</value></optionmenu>
           </toplevel>"#,
    );
    let cb = ui.get("cb").unwrap();
    assert_eq!(cb.binding.unwrap().get_string(), "small");
    assert_eq!(tree.get(cb.id).unwrap().options.width, Some(8));

    let om = ui.get("om").unwrap();
    assert_eq!(om.binding.unwrap().get_string(), "a");
    assert_eq!(tree.get(om.id).unwrap().options.width, Some(3));
}

#[test]
fn entry_variable_starts_from_text_and_accepts_writes() {
    let (_, _, ui) = built(r#"<toplevel geometry="pack"><entry id="e" text="bob"/></toplevel>"#);
    let binding = ui.get("e").unwrap().binding.unwrap();
    assert_eq!(binding.get_string(), "bob");
    binding.set_string("alice").unwrap();
    assert_eq!(binding.get_string(), "alice");
}

#[test]
fn checkbutton_binding_rejects_non_integers() {
    let (_, _, ui) = built(r#"<toplevel geometry="pack"><checkbutton id="c" text="On"/></toplevel>"#);
    let binding = ui.get("c").unwrap().binding.unwrap();
    assert!(matches!(binding, Binding::Int(_)));
    assert!(binding.set_string("yes").is_err());
    binding.set_string("1").unwrap();
    assert_eq!(binding.get_string(), "1");
}

// ── Build and scroll ─────────────────────────────────────────────────

#[test]
fn second_build_does_not_replace() {
    let (mut tree, window) = window();
    let mut ui =
        MarkupUi::from_string(&mut tree, window, r#"<toplevel geometry="grid"><label id="l"/></toplevel>"#)
            .unwrap();
    ui.build(&mut tree).unwrap();
    let first = manager(&tree, &ui, "l");
    ui.build(&mut tree).unwrap();
    assert_eq!(manager(&tree, &ui, "l"), first);
    assert_eq!(tree.slaves(window).len(), 1);
}

#[test]
fn scrollbars_follow_and_drive_their_view() {
    let (mut tree, window, ui) = built(
        r#"<toplevel geometry="grid">
             <listbox id="list" height="4">
               <value>1</value><value>2</value><value>3</value><value>4</value>
               <value>5</value><value>6</value><value>7</value><value>8</value>
             </listbox>
             <scrollbar id="ys" row="0" column="1" sticky="ns"/>
           </toplevel>"#,
    );
    ui.map_scrollbars(&mut tree, "list", None, Some("ys")).unwrap();
    let list = ui.get("list").unwrap().id;
    let ys = ui.get("ys").unwrap().id;
    render_window_to_string(&mut tree, window, 30, 6).unwrap();

    let bar = tree.get(ys).unwrap().scrollbar;
    assert_eq!((bar.first, bar.last), (0.0, 0.5));

    tree.view(list, Axis::Y, ViewCommand::Units(2)).unwrap();
    let bar = tree.get(ys).unwrap().scrollbar;
    assert_eq!((bar.first, bar.last), (0.25, 0.75));

    tree.scrollbar_move(ys, ViewCommand::MoveTo(0.5)).unwrap();
    assert_eq!(tree.get(list).unwrap().scroll.offset.y, 4);
}

fn wide_text(lines: usize) -> String {
    let line = "0123456789".repeat(4);
    vec![line; lines].join("\n")
}

#[test]
fn horizontal_scrollbar_follows_and_drives_x() {
    let markup = format!(
        r#"<toplevel geometry="grid">
             <text id="wide" width="10" height="2">{}</text>
             <scrollbar id="xs" orient="horizontal" row="1" sticky="ew"/>
           </toplevel>"#,
        wide_text(1)
    );
    let (mut tree, window, ui) = built(&markup);
    ui.map_scrollbars(&mut tree, "wide", Some("xs"), None).unwrap();
    let wide = ui.get("wide").unwrap().id;
    let xs = ui.get("xs").unwrap().id;
    render_window_to_string(&mut tree, window, 30, 6).unwrap();

    let bar = tree.get(xs).unwrap().scrollbar;
    assert_eq!((bar.first, bar.last), (0.0, 0.25));

    tree.view(wide, Axis::X, ViewCommand::Units(10)).unwrap();
    let bar = tree.get(xs).unwrap().scrollbar;
    assert_eq!((bar.first, bar.last), (0.25, 0.5));

    tree.scrollbar_move(xs, ViewCommand::MoveTo(0.5)).unwrap();
    assert_eq!(tree.get(wide).unwrap().scroll.offset.x, 20);
    let bar = tree.get(xs).unwrap().scrollbar;
    assert_eq!((bar.first, bar.last), (0.5, 0.75));
}

#[test]
fn each_scrollbar_moves_only_its_own_axis() {
    let markup = format!(
        r#"<toplevel geometry="grid">
             <text id="wide" width="10" height="3">{}</text>
             <scrollbar id="ys" row="0" column="1" sticky="ns"/>
             <scrollbar id="xs" orient="horizontal" row="1" column="0" sticky="ew"/>
           </toplevel>"#,
        wide_text(6)
    );
    let (mut tree, window, ui) = built(&markup);
    ui.map_scrollbars(&mut tree, "wide", Some("xs"), Some("ys")).unwrap();
    let wide = ui.get("wide").unwrap().id;
    let [xs, ys] = [ui.get("xs").unwrap().id, ui.get("ys").unwrap().id];
    render_window_to_string(&mut tree, window, 30, 8).unwrap();
    let span = |tree: &WidgetTree, id| {
        let bar = tree.get(id).unwrap().scrollbar;
        (bar.first, bar.last)
    };
    assert_eq!(span(&tree, xs), (0.0, 0.25));
    assert_eq!(span(&tree, ys), (0.0, 0.5));

    tree.scrollbar_move(ys, ViewCommand::Units(1)).unwrap();
    let scroll = tree.get(wide).unwrap().scroll.offset;
    assert_eq!((scroll.x, scroll.y), (0, 1));
    assert_eq!(span(&tree, ys), (1.0 / 6.0, 4.0 / 6.0));
    assert_eq!(span(&tree, xs), (0.0, 0.25));

    tree.scrollbar_move(xs, ViewCommand::Units(5)).unwrap();
    let scroll = tree.get(wide).unwrap().scroll.offset;
    assert_eq!((scroll.x, scroll.y), (5, 1));
    assert_eq!(span(&tree, xs), (0.125, 0.375));
    assert_eq!(span(&tree, ys), (1.0 / 6.0, 4.0 / 6.0));
}

#[test]
fn huge_grid_positions_are_rejected_not_panicking() {
    for markup in [
        r#"<toplevel geometry="grid"><label row="65535"/><label/></toplevel>"#,
        r#"<toplevel geometry="grid"><label row="32767"/></toplevel>"#,
        r#"<toplevel geometry="grid"><label text="A" row="0"/><label text="B" row="40000"/></toplevel>"#,
    ] {
        let (mut tree, window) = window();
        let err = MarkupUi::from_string(&mut tree, window, markup).unwrap_err();
        assert!(
            matches!(&err, BuildError::InvalidAttribute { attribute, .. } if attribute == "row"),
            "{markup}: {err}"
        );
    }

    // The last usable row is accepted; defaulting past it is a toolkit error.
    let (mut tree, window) = window();
    let mut ui = MarkupUi::from_string(
        &mut tree,
        window,
        r#"<toplevel geometry="grid"><label row="32765"/><label/></toplevel>"#,
    )
    .unwrap();
    assert!(matches!(
        ui.build(&mut tree),
        Err(BuildError::Toolkit(ToolkitError::GridOutOfRange { row: 32766, .. }))
    ));
}

#[test]
fn grid_layout_respects_rows_and_columns() {
    let (mut tree, window, ui) = built(
        r#"<toplevel geometry="grid">
             <label id="tl" text="TL"/>
             <label id="tr" text="TR" row="0" column="1"/>
             <label id="bl" text="BL" row="1" column="0"/>
           </toplevel>"#,
    );
    let text = render_window_to_string(&mut tree, window, 10, 2).unwrap();
    assert_eq!(text, "TLTR\nBL");
    assert!(ui.contains("tr"));
}

#[test]
fn pack_left_lays_out_left_to_right() {
    let (mut tree, window, _) = built(
        r#"<toplevel geometry="pack">
             <button text="A" side="left"/>
             <button text="B" side="left"/>
             <button text="C" side="left"/>
           </toplevel>"#,
    );
    let text = render_window_to_string(&mut tree, window, 20, 1).unwrap();
    assert_eq!(text, "[ A ][ B ][ C ]");
}

// ── Registry and preview ─────────────────────────────────────────────

fn shout(tree: &mut WidgetTree, master: WidgetId, element: &markup_ui::markup::Element) -> markup_ui::Result<Built> {
    let label = TagRegistry::with_defaults().get("label")?;
    label(tree, master, element)
}

#[test]
fn custom_registry_adds_tags() {
    let mut registry = TagRegistry::with_defaults();
    registry.register("shout", shout);
    let (mut tree, window) = window();
    let root = markup_ui::markup::parse_str(r#"<toplevel geometry="pack"><shout id="s" text="HEY"/></toplevel>"#)
        .unwrap();
    let mut ui = MarkupUi::with_registry(&registry, &mut tree, window, &root).unwrap();
    ui.build(&mut tree).unwrap();
    assert_eq!(ui.get("s").unwrap().kind, WidgetKind::Label);

    let err = MarkupUi::from_element(&mut tree, window, &root).unwrap_err();
    assert!(matches!(err, BuildError::UnrecognizedTag(tag) if tag == "shout"));
}

#[test]
fn preview_dump_outlines_documents() {
    let mut pilot = Pilot::new(40, 8);
    pilot
        .load(
            r#"<toplevel geometry="grid" title="Settings">
                 <labelframe id="box" text="Display">
                   <checkbutton id="dark" text="Dark mode"/>
                   <scale id="zoom" from="50" to="200" row="1"/>
                 </labelframe>
               </toplevel>"#,
        )
        .unwrap();
    insta::assert_snapshot!(pilot.preview().dump(), @r###"
    window "Settings"
      labelframe #box "Display" [grid row=0 column=0]
        checkbutton #dark "Dark mode" [grid row=0 column=0]
        scale #zoom [grid row=1 column=0]
    "###);
}
