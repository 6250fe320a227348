#![forbid(unsafe_code)]

//! Read-only document abstraction consumed by the click decision.
//!
//! The browser DOM is only one possible backing store. [`DocumentView`]
//! captures the handful of queries the anchor behavior needs:
//! - an inclusive ancestor walk ([`DocumentView::parent`]),
//! - tag and attribute reads,
//! - identifier lookup ([`DocumentView::element_by_id`]), and
//! - document-relative vertical measurement.
//!
//! [`InMemoryDocument`] is an arena-backed implementation used by native
//! hosts and tests.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Debug;

/// Read-only view over a live document.
///
/// Every query is infallible: lookups that cannot be answered return `None`.
pub trait DocumentView {
    /// Cheap node handle.
    type Node: Copy + Eq + Debug;

    /// Parent node, or `None` at the root or for detached nodes.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element tag name. `None` for text and document nodes.
    fn tag_name(&self, node: Self::Node) -> Option<Cow<'_, str>>;

    /// Attribute value on an element.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<Cow<'_, str>>;

    /// Element carrying the given identifier.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Top edge of the element relative to the document origin.
    fn document_top(&self, node: Self::Node) -> Option<f64>;
}

/// Anchor element found by [`closest_fragment_anchor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentAnchor<N> {
    pub node: N,
    pub href: String,
}

/// Walk from `node` up to the root, starting with `node` itself.
pub fn ancestors_inclusive<D>(doc: &D, node: D::Node) -> impl Iterator<Item = D::Node> + '_
where
    D: DocumentView + ?Sized,
{
    std::iter::successors(Some(node), move |&current| doc.parent(current))
}

/// Nearest inclusive ancestor matching `a[href^="#"]`.
///
/// Anchors whose `href` does not start with `#` are skipped, so a plain link
/// nested inside a fragment link still resolves to the outer fragment link.
pub fn closest_fragment_anchor<D>(doc: &D, target: D::Node) -> Option<FragmentAnchor<D::Node>>
where
    D: DocumentView + ?Sized,
{
    ancestors_inclusive(doc, target).find_map(|node| {
        let tag = doc.tag_name(node)?;
        if !tag.eq_ignore_ascii_case("a") {
            return None;
        }
        let href = doc.attribute(node, "href")?;
        href.starts_with('#').then(|| FragmentAnchor {
            node,
            href: href.into_owned(),
        })
    })
}

// ---------------------------------------------------------------------------
// In-memory document
// ---------------------------------------------------------------------------

/// Node handle into an [`InMemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag_name: String,
    attrs: Vec<(String, String)>,
    top: f64,
}

impl ElementData {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Arena-backed document tree.
///
/// Node handles stay valid for the lifetime of the document; removed subtrees
/// become detached (no parent, not reachable by identifier).
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    nodes: Vec<Node>,
    id_index: HashMap<String, Vec<NodeId>>,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocument {
    /// Empty document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            id_index: HashMap::new(),
        }
    }

    /// Document root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever created, including detached ones.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.push(id);
        }
        id
    }

    /// Append an element with no attributes.
    pub fn append_element(&mut self, parent: NodeId, tag_name: &str) -> NodeId {
        self.push_node(
            parent,
            NodeKind::Element(ElementData {
                tag_name: tag_name.to_ascii_lowercase(),
                attrs: Vec::new(),
                top: 0.0,
            }),
        )
    }

    /// Append an element and set its attributes in order.
    pub fn append_element_with(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let node = self.append_element(parent, tag_name);
        for (name, value) in attrs {
            self.set_attribute(node, name, value);
        }
        node
    }

    /// Append a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    /// Text content of a text node.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Set an attribute. Returns `false` when `node` is not an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let attached = self.is_connected(node);
        let Some(NodeKind::Element(element)) = self.nodes.get_mut(node.0).map(|n| &mut n.kind)
        else {
            return false;
        };
        let previous = match element.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value.to_string())),
            None => {
                element.attrs.push((name.to_string(), value.to_string()));
                None
            }
        };
        if name == "id" && attached {
            if let Some(old) = previous {
                self.unindex_id(&old, node);
            }
            self.id_index
                .entry(value.to_string())
                .or_default()
                .push(node);
        }
        true
    }

    /// Remove an attribute. Returns `true` when the attribute existed.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        let Some(NodeKind::Element(element)) = self.nodes.get_mut(node.0).map(|n| &mut n.kind)
        else {
            return false;
        };
        let Some(pos) = element.attrs.iter().position(|(key, _)| key == name) else {
            return false;
        };
        let (_, old) = element.attrs.remove(pos);
        if name == "id" {
            self.unindex_id(&old, node);
        }
        true
    }

    /// Set the document-relative top offset used for scroll targeting.
    pub fn set_document_top(&mut self, node: NodeId, top: f64) -> bool {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(element)) => {
                element.top = top;
                true
            }
            _ => false,
        }
    }

    /// Detach `node` and its subtree from the document.
    ///
    /// The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root() || node.0 >= self.nodes.len() {
            return false;
        }
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return false;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.retain(|&child| child != node);
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let entry = &self.nodes[current.0];
            stack.extend(entry.children.iter().copied());
            if let NodeKind::Element(element) = &entry.kind
                && let Some(id) = element.attr("id").map(str::to_string)
            {
                self.unindex_id(&id, current);
            }
        }
        true
    }

    /// Whether `node` is reachable from the root.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        let root = self.root();
        ancestors_inclusive(self, node).any(|ancestor| ancestor == root)
    }

    fn unindex_id(&mut self, id: &str, node: NodeId) {
        if let Some(entries) = self.id_index.get_mut(id) {
            entries.retain(|&entry| entry != node);
            if entries.is_empty() {
                self.id_index.remove(id);
            }
        }
    }

    /// First of `candidates` in pre-order document traversal.
    fn first_in_document_order(&self, candidates: &[NodeId]) -> Option<NodeId> {
        let mut stack = vec![self.root()];
        while let Some(current) = stack.pop() {
            if candidates.contains(&current) {
                return Some(current);
            }
            if let Some(node) = self.nodes.get(current.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        None
    }
}

impl DocumentView for InMemoryDocument {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn tag_name(&self, node: NodeId) -> Option<Cow<'_, str>> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(element) => Some(Cow::Borrowed(element.tag_name.as_str())),
            _ => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(element) => element.attr(name).map(Cow::Borrowed),
            _ => None,
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        match self.id_index.get(id)?.as_slice() {
            [] => None,
            [only] => Some(*only),
            many => self.first_in_document_order(many),
        }
    }

    fn document_top(&self, node: NodeId) -> Option<f64> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(element) => Some(element.top),
            _ => None,
        }
    }
}
