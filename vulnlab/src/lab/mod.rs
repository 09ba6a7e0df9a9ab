//! Demonstration endpoints that sit behind the auth gate but carry no
//! session or authorization logic of their own.

pub mod comments;
pub mod sqli;
pub mod ssrf;

pub use comments::{Comment, CommentBoard, EmptyComment};
pub use sqli::{SqliReport, SqliRequest};
pub use ssrf::{FetchError, FetchReport, Fetcher};
