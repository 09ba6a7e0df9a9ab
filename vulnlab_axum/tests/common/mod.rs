pub mod test_server;

pub use mock_browser::MockBrowser;
pub use test_server::TestServer;

/// Seeded demo users as `(username, password, user id)`.
pub const ADMIN: (&str, &str, i64) = ("admin", "admin123", 1);
pub const BOB: (&str, &str, i64) = ("bob", "bob123", 7);
pub const ALICE: (&str, &str, i64) = ("alice", "alice123", 42);
