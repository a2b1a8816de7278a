use url::Url;

use super::common::{Query, QueryCommon};

/// Query for the file manager listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileQuery {
    pub common: QueryCommon,
    pub path: Option<String>,
    pub search: Option<String>,
}

impl Query for FileQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(path) = &self.path {
            url.query_pairs_mut().append_pair("path", path.as_str());
        }
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        }
        url
    }
}

impl FileQuery {
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}
