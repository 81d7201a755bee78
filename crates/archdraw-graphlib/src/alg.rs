//! Helper traversals over the compound tree.

use crate::Graph;

/// Visits `root` and its compound descendants depth-first, parents before children.
pub fn preorder_descendants<'a, N, E>(g: &'a Graph<N, E>, root: &'a str) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    let mut stack: Vec<&str> = vec![root];
    while let Some(v) = stack.pop() {
        out.push(v);
        // Reverse so that siblings come out in attachment order.
        for child in g.children(v).into_iter().rev() {
            stack.push(child);
        }
    }
    out
}
