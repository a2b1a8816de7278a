use url::Url;

use super::common::{Query, QueryCommon, SortDirection};

/// Listing query shared by every entity endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub common: QueryCommon,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                url.query_pairs_mut().append_pair("search", search);
            }
        }
        if let Some(status) = &self.status {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }
        if let Some(sort_by) = &self.sort_by {
            url.query_pairs_mut()
                .append_pair("sortBy", sort_by.as_str())
                .append_pair("order", &self.common.sort_direction.to_string());
        }
        url
    }
}

impl ListQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: &str) -> Self {
        self.sort_by = Some(sort_by.to_string());
        self
    }

    /// Shorthand for a sort column plus direction.
    pub fn sorted(self, sort_by: &str, direction: SortDirection) -> Self {
        self.with_sort_by(sort_by).with_sort_direction(direction)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ListQuery, Query, SortDirection};

    #[test]
    fn test_list_query() {
        let url = Url::parse("https://example.com/brand").unwrap();

        insta::assert_snapshot!(
            ListQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/brand?page=1"
        );

        insta::assert_snapshot!(
            ListQuery::default()
                .with_page(2)
                .with_limit(10)
                .with_search("land rover")
                .with_status("active")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/brand?page=2&limit=10&search=land+rover&status=active"
        );

        insta::assert_snapshot!(
            ListQuery::default()
                .sorted("createdAt", SortDirection::Asc)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/brand?page=1&sortBy=createdAt&order=asc"
        );
    }

    #[test]
    fn blank_search_is_not_sent() {
        let url = Url::parse("https://example.com/car").unwrap();
        let out = ListQuery::default()
            .with_search("   ")
            .add_to_url(&url)
            .to_string();
        assert_eq!(out, "https://example.com/car?page=1");
    }

    #[test]
    fn page_is_clamped() {
        let q = ListQuery::default().with_page(0);
        assert_eq!(q.common.page, 1);
    }
}
