mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod list;
pub use self::list::ListQuery;

mod file;
pub use self::file::FileQuery;
