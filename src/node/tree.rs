//! The expression tree.
//!
//! An [Expression] owns every node of one tree in an arena, and nodes refer to each other by
//! [NodeId]. Each node records its parent, which is only ever used to look up the context a node
//! is evaluated in; ownership always flows from the [Expression] downwards.
//!
//! Trees are built bottom-up: a child tree is created first and then moved under a parent node
//! with [add_subexpression](Expression::add_subexpression). Because the child is moved, one tree
//! can never be attached in two places. When the same subexpression is needed twice, take a
//! [deep_copy](NodeRef::deep_copy) for each use instead.

use core::fmt::{self, Write};

use alloc::{string::String, vec, vec::Vec};

use super::label::{BinaryOp, Label};

/// Identifies a node within one [Expression]. An ID is meaningless for any other expression.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    label: Label,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// A tree of labelled nodes. The root never has a parent.
#[derive(Debug, Clone)]
pub struct Expression {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Expression {
    /// Creates a tree consisting of a single node, which has no children and no parent.
    pub fn new(label: impl Into<Label>) -> Self {
        Self {
            nodes: vec![Node { label: label.into(), children: vec![], parent: None }],
            root: NodeId(0),
        }
    }

    /// Creates a binary operator node with the given operands.
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        let mut result = Self::new(op);
        result.add_subexpression(left);
        result.add_subexpression(right);
        result
    }

    /// Creates a node with a single child, such as `log` or `()`.
    pub fn unary(label: impl Into<Label>, child: Expression) -> Self {
        let mut result = Self::new(label);
        result.add_subexpression(child);
        result
    }

    /// A view of the root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { expression: self, id: self.root }
    }

    /// A view of the node with the given ID, or `None` if there is no such node.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id.0 < self.nodes.len() {
            Some(NodeRef { expression: self, id })
        } else {
            None
        }
    }

    /// The label of the root node.
    pub fn label(&self) -> &Label {
        &self.nodes[self.root.0].label
    }

    /// The number of nodes in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, since a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `child` as the last child of the root node, and returns the ID which the child's
    /// root has within this tree.
    pub fn add_subexpression(&mut self, child: Expression) -> NodeId {
        self.attach(self.root, child)
    }

    /// Appends `child` as the last child of the node `parent`, and returns the ID which the
    /// child's root has within this tree. Children must be added in operand order.
    ///
    /// Returns `None`, dropping `child`, if `parent` is not a node of this tree.
    pub fn add_subexpression_to(&mut self, parent: NodeId, child: Expression) -> Option<NodeId> {
        if parent.0 < self.nodes.len() {
            Some(self.attach(parent, child))
        } else {
            None
        }
    }

    fn attach(&mut self, parent: NodeId, child: Expression) -> NodeId {
        let offset = self.nodes.len();
        let shift = |id: NodeId| NodeId(id.0 + offset);

        self.nodes.extend(child.nodes.into_iter().map(|node| Node {
            label: node.label,
            children: node.children.into_iter().map(shift).collect(),
            parent: node.parent.map(shift),
        }));

        let child_root = shift(child.root);
        self.nodes[parent.0].children.push(child_root);
        self.set_parent(child_root, parent);

        child_root
    }

    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.0].parent = Some(parent);
    }

    /// A fully independent copy of this tree.
    pub fn deep_copy(&self) -> Expression {
        self.root().deep_copy()
    }

    /// See [NodeRef::convert_to_string].
    pub fn convert_to_string(&self, indent_level: usize) -> String {
        self.root().convert_to_string(indent_level)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.root().write_tree(f, 0)
    }
}

/// A borrowed view of one node of an [Expression].
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    expression: &'a Expression,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.expression.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef { expression: self.expression, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &'a Label {
        &self.node().label
    }

    pub fn name(&self) -> &'a str {
        self.label().name()
    }

    /// The children of this node, in operand order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let expression = self.expression;
        self.node().children.iter().map(move |&id| NodeRef { expression, id })
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.node().children.get(index).map(|&id| self.at(id))
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// The enclosing node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.at(id))
    }

    /// Both operands, if this node has exactly two children.
    pub fn operands(&self) -> Option<(NodeRef<'a>, NodeRef<'a>)> {
        match self.node().children[..] {
            [left, right] => Some((self.at(left), self.at(right))),
            _ => None,
        }
    }

    /// The only operand, if this node has exactly one child.
    pub fn operand(&self) -> Option<NodeRef<'a>> {
        match self.node().children[..] {
            [only] => Some(self.at(only)),
            _ => None,
        }
    }

    /// Copies the subtree rooted at this node into a new tree. No node is shared with the
    /// original, and the copy's root has no parent until it is attached somewhere.
    pub fn deep_copy(&self) -> Expression {
        let mut copy = Expression::new(self.label().clone());
        for child in self.children() {
            copy.add_subexpression(child.deep_copy());
        }
        copy
    }

    /// Renders the subtree as one node per line, in pre-order. Each line is the node's name
    /// preceded by one tab per level, starting at `indent_level` tabs for this node.
    pub fn convert_to_string(&self, indent_level: usize) -> String {
        let mut result = String::new();
        // Writing into a String cannot fail
        let _ = self.write_tree(&mut result, indent_level);
        result
    }

    fn write_tree(&self, out: &mut impl Write, indent_level: usize) -> fmt::Result {
        for _ in 0..indent_level {
            out.write_char('\t')?;
        }
        out.write_str(self.name())?;
        out.write_char('\n')?;

        for child in self.children() {
            child.write_tree(out, indent_level + 1)?;
        }

        Ok(())
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", self.label())
            .finish()
    }
}
