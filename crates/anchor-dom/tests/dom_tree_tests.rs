//! Tests for tree traversal and mutation: pre-order iteration, descendant
//! checks, connectedness, and removal.

use anchor_dom::{DomTree, ElementData, NodeId};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, ElementData::new(tag))
}

// ========== tree order ==========

#[test]
fn test_iter_all_is_preorder() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let body = element(&mut tree, html, "body");
    let a = element(&mut tree, body, "div");
    let a1 = element(&mut tree, a, "span");
    let a2 = element(&mut tree, a, "span");
    let b = element(&mut tree, body, "div");
    let b1 = element(&mut tree, b, "p");

    let order: Vec<NodeId> = tree.iter_all().collect();
    assert_eq!(order, vec![NodeId::ROOT, html, body, a, a1, a2, b, b1]);
}

#[test]
fn test_descendants_includes_subtree_root_only_once() {
    let mut tree = DomTree::new();
    let a = element(&mut tree, NodeId::ROOT, "div");
    let b = element(&mut tree, a, "div");
    let _sibling = element(&mut tree, NodeId::ROOT, "div");

    let order: Vec<NodeId> = tree.descendants(a).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn test_descendants_of_unknown_node_is_empty() {
    let tree = DomTree::new();
    assert_eq!(tree.descendants(NodeId(42)).count(), 0);
}

// ========== descendant / ancestor ==========

#[test]
fn test_is_descendant_of() {
    let mut tree = DomTree::new();
    let outer = element(&mut tree, NodeId::ROOT, "div");
    let middle = element(&mut tree, outer, "div");
    let inner = element(&mut tree, middle, "div");
    let other = element(&mut tree, NodeId::ROOT, "div");

    assert!(tree.is_descendant_of(inner, outer));
    assert!(tree.is_descendant_of(inner, middle));
    assert!(!tree.is_descendant_of(outer, inner));
    assert!(!tree.is_descendant_of(inner, other));
    // A node is not its own descendant.
    assert!(!tree.is_descendant_of(inner, inner));
}

#[test]
fn test_ancestors_walks_to_document() {
    let mut tree = DomTree::new();
    let outer = element(&mut tree, NodeId::ROOT, "div");
    let inner = element(&mut tree, outer, "div");

    let chain: Vec<NodeId> = tree.ancestors(inner).collect();
    assert_eq!(chain, vec![outer, NodeId::ROOT]);
}

#[test]
fn test_parent_element_skips_document() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let body = element(&mut tree, html, "body");

    assert_eq!(tree.parent_element(body), Some(html));
    assert_eq!(tree.parent_element(html), None);
}

// ========== removal ==========

#[test]
fn test_remove_child_disconnects_subtree() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let child = element(&mut tree, parent, "div");
    let grandchild = element(&mut tree, child, "div");

    assert!(tree.is_connected(grandchild));
    tree.remove_child(parent, child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert!(!tree.is_connected(child));
    assert!(!tree.is_connected(grandchild));
    // The removed subtree is still internally linked.
    assert_eq!(tree.parent(grandchild), Some(child));
    assert!(!tree.iter_all().any(|id| id == grandchild));
}

#[test]
fn test_remove_child_ignores_non_children() {
    let mut tree = DomTree::new();
    let a = element(&mut tree, NodeId::ROOT, "div");
    let b = element(&mut tree, NodeId::ROOT, "div");
    tree.remove_child(a, b);
    assert_eq!(tree.parent(b), Some(NodeId::ROOT));
}

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let a = element(&mut tree, NodeId::ROOT, "div");
    let b = element(&mut tree, NodeId::ROOT, "div");
    let moved = element(&mut tree, a, "span");

    tree.append_child(b, moved);
    assert!(tree.children(a).is_empty());
    assert_eq!(tree.children(b), &[moved]);
}

// ========== lookups ==========

#[test]
fn test_get_element_by_id_returns_first_in_tree_order() {
    let mut tree = DomTree::new();
    let first = tree.append_element(NodeId::ROOT, ElementData::new("div").with_attr("id", "x"));
    let _second = tree.append_element(first, ElementData::new("div").with_attr("id", "x"));

    assert_eq!(tree.get_element_by_id("x"), Some(first));
    assert_eq!(tree.get_element_by_id("missing"), None);
}

#[test]
fn test_body_lookup() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let _head = element(&mut tree, html, "head");
    let body = element(&mut tree, html, "BODY");

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
}
