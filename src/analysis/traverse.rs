//! Generic syntax-tree traversal
//!
//! One walk serves both analysis passes: each node is visited twice,
//! entering before its children and exiting after them, and siblings follow
//! only once the whole subtree (including the exit hook) is done. A visitor
//! that leaves one hook as the default no-op gets a pure pre-order or pure
//! post-order walk.

use crate::syntax::{NodeId, SyntaxTree, MAX_CHILDREN};

/// Visitor hooks invoked around every node's subtree
pub trait Visitor {
    /// Called before the node's children are traversed
    fn enter(&mut self, tree: &mut SyntaxTree, node: NodeId) {
        let _ = (tree, node);
    }

    /// Called after the node's children are traversed
    fn exit(&mut self, tree: &mut SyntaxTree, node: NodeId) {
        let _ = (tree, node);
    }
}

/// Walk the sibling chain starting at `start`, bracketing every node's
/// subtree with the visitor's enter/exit hooks
pub fn traverse<V: Visitor>(visitor: &mut V, tree: &mut SyntaxTree, start: Option<NodeId>) {
    let mut next = start;
    while let Some(node) = next {
        visitor.enter(tree, node);
        for slot in 0..MAX_CHILDREN {
            let child = tree.node(node).children[slot];
            traverse(visitor, tree, child);
        }
        visitor.exit(tree, node);
        next = tree.node(node).sibling;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ArithOp, ExpKind, NodeKind};

    /// Records the order constants are entered and exited in
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn label(tree: &SyntaxTree, node: NodeId) -> String {
            match &tree.node(node).kind {
                NodeKind::Exp(ExpKind::Const(v)) => v.to_string(),
                NodeKind::Exp(ExpKind::Arith(_)) => "op".to_string(),
                _ => "?".to_string(),
            }
        }
    }

    impl Visitor for Recorder {
        fn enter(&mut self, tree: &mut SyntaxTree, node: NodeId) {
            self.events.push(format!("enter {}", Self::label(tree, node)));
        }

        fn exit(&mut self, tree: &mut SyntaxTree, node: NodeId) {
            self.events.push(format!("exit {}", Self::label(tree, node)));
        }
    }

    #[test]
    fn test_enter_exit_bracket_subtree_before_sibling() {
        let mut tree = SyntaxTree::new();
        let one = tree.constant(1, 1);
        let two = tree.constant(2, 1);
        let sum = tree.arith(ArithOp::Add, one, two, 1);
        let three = tree.constant(3, 2);
        tree.link(sum, three);

        let mut recorder = Recorder { events: Vec::new() };
        traverse(&mut recorder, &mut tree, Some(sum));

        assert_eq!(
            recorder.events,
            vec![
                "enter op", "enter 1", "exit 1", "enter 2", "exit 2", "exit op", "enter 3",
                "exit 3",
            ]
        );
    }

    #[test]
    fn test_traverse_of_nothing_is_a_no_op() {
        let mut tree = SyntaxTree::new();
        let mut recorder = Recorder { events: Vec::new() };
        traverse(&mut recorder, &mut tree, None);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_default_hooks_allow_single_phase_visitors() {
        struct ExitOnly(usize);
        impl Visitor for ExitOnly {
            fn exit(&mut self, _tree: &mut SyntaxTree, _node: NodeId) {
                self.0 += 1;
            }
        }

        let mut tree = SyntaxTree::new();
        let a = tree.constant(1, 1);
        let b = tree.constant(2, 1);
        tree.link(a, b);

        let mut visitor = ExitOnly(0);
        traverse(&mut visitor, &mut tree, Some(a));
        assert_eq!(visitor.0, 2);
    }
}
