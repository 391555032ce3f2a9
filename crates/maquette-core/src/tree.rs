#![forbid(unsafe_code)]

//! Hierarchy derivation, tree search, and display flattening.
//!
//! The store owns the flat collection; this module derives hierarchical
//! views from it. [`build_hierarchy`] produces a fresh forest on every
//! call and never mutates its input — callers replace their reference.
//!
//! # Edge cases
//!
//! - A widget whose `parent_id` does not resolve to any input widget is
//!   promoted to a root instead of failing construction; this arises
//!   transiently while the external persistence layer is mid-sync.
//! - Sibling lists are sorted by `order`; the builder tolerates gaps and
//!   duplicates in transient input (sort is stable on id as tiebreaker).

use std::collections::{HashMap, HashSet};

use crate::id::WidgetId;
use crate::widget::Widget;

/// A node of a derived hierarchy view.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetNode {
    /// Snapshot of the widget at derivation time.
    pub widget: Widget,
    /// Ordered children.
    pub children: Vec<WidgetNode>,
    /// Whether the node passes the current search filter.
    pub visible: bool,
    /// Whether the node's children are shown in the layer tree.
    pub expanded: bool,
}

impl WidgetNode {
    fn new(widget: Widget) -> Self {
        Self {
            widget,
            children: Vec::new(),
            visible: true,
            expanded: true,
        }
    }

    /// Total node count of this subtree (self included).
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(WidgetNode::subtree_len).sum::<usize>()
    }
}

/// Group a flat widget collection into an order-sorted forest.
///
/// Orphaned parent references are tolerated: the orphan becomes a root.
/// The input is cloned into the forest; the original list is untouched.
#[must_use]
pub fn build_hierarchy<'a, I>(widgets: I) -> Vec<WidgetNode>
where
    I: IntoIterator<Item = &'a Widget>,
{
    let widgets: Vec<&Widget> = widgets.into_iter().collect();
    let known: HashSet<WidgetId> = widgets.iter().map(|w| w.id).collect();

    // Group children by (resolvable) parent; orphans become roots.
    let mut by_parent: HashMap<Option<WidgetId>, Vec<&Widget>> = HashMap::new();
    for w in &widgets {
        let key = match w.parent_id {
            Some(pid) if known.contains(&pid) => Some(pid),
            _ => None,
        };
        by_parent.entry(key).or_default().push(w);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by_key(|w| (w.order, w.id));
    }

    let mut roots = Vec::new();
    if let Some(top) = by_parent.get(&None) {
        for w in top.clone() {
            roots.push(attach_children(w, &by_parent));
        }
    }
    roots
}

fn attach_children(
    widget: &Widget,
    by_parent: &HashMap<Option<WidgetId>, Vec<&Widget>>,
) -> WidgetNode {
    let mut node = WidgetNode::new(widget.clone());
    if let Some(children) = by_parent.get(&Some(widget.id)) {
        for child in children {
            node.children.push(attach_children(child, by_parent));
        }
    }
    node
}

/// A searchable, flattenable hierarchy view for the layer tree.
#[derive(Debug, Clone, Default)]
pub struct TreeView {
    roots: Vec<WidgetNode>,
}

/// One row of the flattened layer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Widget on this row.
    pub id: WidgetId,
    /// Nesting depth (roots are 0).
    pub depth: usize,
}

impl TreeView {
    /// Build a view from a flat widget collection.
    #[must_use]
    pub fn build<'a, I>(widgets: I) -> Self
    where
        I: IntoIterator<Item = &'a Widget>,
    {
        Self {
            roots: build_hierarchy(widgets),
        }
    }

    /// The derived forest.
    #[must_use]
    pub fn roots(&self) -> &[WidgetNode] {
        &self.roots
    }

    /// Collapse or expand one node by widget id.
    pub fn set_expanded(&mut self, id: WidgetId, expanded: bool) {
        fn walk(nodes: &mut [WidgetNode], id: WidgetId, expanded: bool) -> bool {
            for node in nodes {
                if node.widget.id == id {
                    node.expanded = expanded;
                    return true;
                }
                if walk(&mut node.children, id, expanded) {
                    return true;
                }
            }
            false
        }
        walk(&mut self.roots, id, expanded);
    }

    /// Apply a substring search over kind display names and user-assigned
    /// widget names (case-insensitive).
    ///
    /// Matches and every strict ancestor of a match become visible;
    /// ancestors are additionally auto-expanded so the match is reachable.
    /// Unrelated branches are hidden. An empty query restores full
    /// visibility without touching expansion state. Returns the match
    /// count.
    pub fn apply_filter(&mut self, query: &str) -> usize {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            fn show_all(nodes: &mut [WidgetNode]) {
                for node in nodes {
                    node.visible = true;
                    show_all(&mut node.children);
                }
            }
            show_all(&mut self.roots);
            return 0;
        }

        fn mark(node: &mut WidgetNode, query: &str) -> (bool, usize) {
            let direct = node.widget.kind.display_name().to_lowercase().contains(query)
                || node
                    .widget
                    .name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(query));

            let mut matches = usize::from(direct);
            let mut descendant_hit = false;
            for child in &mut node.children {
                let (hit, n) = mark(child, query);
                descendant_hit |= hit;
                matches += n;
            }

            node.visible = direct || descendant_hit;
            if descendant_hit {
                // Strict ancestor of a match: auto-expand.
                node.expanded = true;
            }
            (node.visible, matches)
        }

        let mut total = 0;
        for root in &mut self.roots {
            let (_, n) = mark(root, &query);
            total += n;
        }
        total
    }

    /// Pre-order flatten for display.
    ///
    /// Skips invisible subtrees and the children of collapsed nodes.
    #[must_use]
    pub fn flatten(&self) -> Vec<TreeRow> {
        fn walk(node: &WidgetNode, depth: usize, out: &mut Vec<TreeRow>) {
            if !node.visible {
                return;
            }
            out.push(TreeRow {
                id: node.widget.id,
                depth,
            });
            if node.expanded {
                for child in &node.children {
                    walk(child, depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        for root in &self.roots {
            walk(root, 0, &mut out);
        }
        out
    }
}
