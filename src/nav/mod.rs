pub mod port;
pub mod query_string;

pub use port::{
    initial_query, FileSessionStore, InMemoryNavigator, InMemorySessionStore, Navigator,
    SessionStore,
};
pub use query_string::{hydrate, serialize};
