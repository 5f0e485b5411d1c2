use super::*;

fn surface() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn svg_tree(inner: &str) -> MarkupTree {
    MarkupTree::with_mount("svg", [("viewBox", "0 0 10 10")], inner, surface())
}

#[test]
fn without_mount_has_no_mount() {
    let tree = MarkupTree::without_mount(surface());
    assert!(tree.mount().is_none());
}

#[test]
fn with_mount_serializes_original_markup() {
    let tree = svg_tree("<rect width=\"4\"/>");
    let root = tree.mount();
    assert_eq!(root.map(|r| tree.serialize(r)).as_deref(), Some("<svg viewBox=\"0 0 10 10\"><rect width=\"4\"/></svg>"));
}

#[test]
fn attribute_read_and_overwrite() {
    let mut tree = svg_tree("");
    let Some(root) = tree.mount() else {
        panic!("mount expected");
    };
    assert_eq!(tree.attribute(&root, "viewBox").as_deref(), Some("0 0 10 10"));
    assert!(tree.attribute(&root, "width").is_none());

    tree.set_attribute(&root, "width", "800");
    tree.set_attribute(&root, "width", "1024");
    assert_eq!(tree.attribute(&root, "width").as_deref(), Some("1024"));
    assert_eq!(tree.serialize(root), "<svg viewBox=\"0 0 10 10\" width=\"1024\"></svg>");
}

#[test]
fn append_group_nests_in_order() {
    let mut tree = svg_tree("");
    let Some(root) = tree.mount() else {
        panic!("mount expected");
    };
    let a = tree.append_group(&root);
    let b = tree.append_group(&root);
    assert!(a.is_some() && b.is_some());
    assert_eq!(tree.element_children(root), vec![a.unwrap_or(root), b.unwrap_or(root)]);
    assert_eq!(a.and_then(|id| tree.tag(id)), Some("g"));
}

#[test]
fn append_group_to_unknown_parent_fails() {
    let mut tree = MarkupTree::without_mount(surface());
    assert!(tree.append_group(&NodeId(3)).is_none());
}

#[test]
fn remove_children_clears_elements_and_markup() {
    let mut tree = svg_tree("<circle r=\"1\"/>");
    let Some(root) = tree.mount() else {
        panic!("mount expected");
    };
    tree.append_group(&root);
    tree.remove_children(&root);
    assert_eq!(tree.inner_markup(&root), "");
    assert!(tree.element_children(root).is_empty());
}

#[test]
fn set_inner_markup_replaces_content() {
    let mut tree = svg_tree("<circle r=\"1\"/>");
    let Some(root) = tree.mount() else {
        panic!("mount expected");
    };
    tree.set_inner_markup(&root, "<path d=\"M0 0\"/>");
    assert_eq!(tree.inner_markup(&root), "<path d=\"M0 0\"/>");
}

#[test]
fn inner_markup_includes_nested_groups() {
    let mut tree = svg_tree("");
    let Some(root) = tree.mount() else {
        panic!("mount expected");
    };
    let Some(group) = tree.append_group(&root) else {
        panic!("group expected");
    };
    tree.set_attribute(&group, "class", "zoom-group");
    tree.set_inner_markup(&group, "<text>hi</text>");
    assert_eq!(tree.inner_markup(&root), "<g class=\"zoom-group\"><text>hi</text></g>");
}

#[test]
fn attribute_values_are_escaped() {
    let mut tree = svg_tree("");
    let Some(root) = tree.mount() else {
        panic!("mount expected");
    };
    tree.set_attribute(&root, "data-x", "a\"b<c&d");
    assert!(tree.serialize(root).contains("data-x=\"a&quot;b&lt;c&amp;d\""));
}

#[test]
fn surface_size_follows_updates() {
    let mut tree = svg_tree("");
    assert_eq!(tree.surface_size(), surface());
    tree.set_surface_size(1280.0, 720.0);
    assert_eq!(tree.surface_size(), Viewport::new(1280.0, 720.0));
}
