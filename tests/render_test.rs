//! Tests for outline lines, textual description and box-drawing trees

use rstest::{fixture, rstest};

use outline_tree::sample::{device_catalogue, Catalogue};
use outline_tree::tree_traits::{to_tree_strings, TreeNodeConvert};
use outline_tree::util::testing;
use outline_tree::{OutlineRenderer, OutlineSettings, TreeArena};

#[fixture]
fn catalogue() -> Catalogue {
    testing::init_test_setup();
    device_catalogue().expect("build catalogue")
}

#[rstest]
fn given_default_settings_when_rendering_catalogue_then_dashes_follow_depth(catalogue: Catalogue) {
    let lines = OutlineRenderer::default().render_visible(&catalogue.tree, catalogue.root);

    let expected = vec![
        "-Devices",
        "--Smartphone",
        "---IOS",
        "----Iphone",
        "-----Iphone 4s",
        "-----Iphone 5s",
        "-----Iphone 7",
        "----Apple Watch",
        "----TVOS",
        "---Android",
        "----Nexus",
        "----Samsung",
        "----Huawei",
        "--PC",
        "--Wearable",
        "--TV",
        "---Bravia",
        "---Trinitron",
    ];
    assert_eq!(lines, expected);
}

#[rstest]
fn given_level_prefix_when_rendering_catalogue_then_depth_precedes_value(catalogue: Catalogue) {
    let renderer = OutlineRenderer::new(OutlineSettings {
        level_prefix: true,
        ..Default::default()
    });

    let lines = renderer.render_visible(&catalogue.tree, catalogue.root);

    assert_eq!(lines[0], "-0.Devices");
    assert_eq!(lines[1], "--1.Smartphone");
    assert_eq!(lines[4], "-----4.Iphone 4s");
}

#[rstest]
fn given_unindented_roots_when_rendering_then_root_has_no_marker(catalogue: Catalogue) {
    let renderer = OutlineRenderer::new(OutlineSettings {
        marker: "  ".into(),
        indent_root: false,
        ..Default::default()
    });

    let lines = renderer.render_visible(&catalogue.tree, catalogue.root);

    assert_eq!(lines[0], "Devices");
    assert_eq!(lines[1], "  Smartphone");
}

#[rstest]
#[case("TV", "TV {Bravia, Trinitron} ")]
#[case("Android", "Android {Nexus, Samsung, Huawei} ")]
#[case("PC", "PC")]
#[case("IOS", "IOS {Iphone {Iphone 4s, Iphone 5s, Iphone 7} , Apple Watch, TVOS} ")]
fn given_subtree_when_describing_then_children_are_bracketed(
    catalogue: Catalogue,
    #[case] value: &'static str,
    #[case] expected: &str,
) {
    let tree = &catalogue.tree;
    let id = tree.find(catalogue.root, &value).unwrap();

    assert_eq!(tree.node(id).unwrap().to_string(), expected);
}

#[rstest]
fn given_catalogue_when_converting_to_termtree_then_all_values_are_drawn(catalogue: Catalogue) {
    let rendered = catalogue
        .tree
        .node(catalogue.root)
        .unwrap()
        .to_tree_string()
        .to_string();

    assert!(rendered.starts_with("Devices"));
    for (_, node) in catalogue.tree.iter_from(catalogue.root) {
        assert!(rendered.contains(node.value()));
    }
}

#[test]
fn given_forest_when_converting_without_root_then_one_tree_per_root() {
    let mut tree = TreeArena::new();
    let a = tree.insert("a");
    let b = tree.insert("b");
    let a1 = tree.insert("a1");
    tree.attach(a, a1).unwrap();

    assert_eq!(to_tree_strings(&tree, None).len(), 2);
    assert_eq!(to_tree_strings(&tree, Some(b)).len(), 1);
}
