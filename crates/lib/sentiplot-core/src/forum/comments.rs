use super::{CommentNode, ForumComment};

/// Flattens a comment forest depth-first, parents before their replies.
///
/// `limit` caps the length of the flattened list, not each branch.
#[must_use]
pub fn flatten_comments(forest: Vec<CommentNode>, limit: usize) -> Vec<ForumComment> {
    let mut flat = Vec::new();
    let mut stack: Vec<std::vec::IntoIter<CommentNode>> = vec![forest.into_iter()];

    while flat.len() < limit {
        let Some(level) = stack.last_mut() else {
            break;
        };
        match level.next() {
            Some(node) => {
                flat.push(node.comment);
                if !node.replies.is_empty() {
                    stack.push(node.replies.into_iter());
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    flat
}
