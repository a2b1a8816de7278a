mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::{Error, FALLBACK_MESSAGE};
pub use self::query::{FileQuery, ListQuery, Query, QueryCommon, SortDirection};
