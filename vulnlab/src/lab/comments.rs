use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: u64,
    /// Stored exactly as submitted.
    pub content: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("content required")]
pub struct EmptyComment;

#[derive(Debug, Default)]
struct Board {
    comments: Vec<Comment>,
    next_id: u64,
}

/// Append-only comment list backing the stored XSS demo.
///
/// Ids are assigned under the write lock, so they are unique and increase in
/// insertion order. Clones share the same board.
#[derive(Debug, Clone, Default)]
pub struct CommentBoard {
    inner: Arc<RwLock<Board>>,
}

impl CommentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn post(&self, content: String) -> Result<Comment, EmptyComment> {
        if content.is_empty() {
            return Err(EmptyComment);
        }

        let mut board = self.inner.write().await;
        board.next_id += 1;
        let comment = Comment {
            id: board.next_id,
            content,
        };
        board.comments.push(comment.clone());
        tracing::debug!(comment_id = comment.id, "Stored comment");
        Ok(comment)
    }

    pub async fn snapshot(&self) -> Vec<Comment> {
        self.inner.read().await.comments.clone()
    }
}
