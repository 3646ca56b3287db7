pub mod http;
pub mod traits;

pub use http::HttpWorktrayClient;
pub use traits::{ClientError, ClientResult, WorktrayClient};
