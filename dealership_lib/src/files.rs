//! File manager listing, file-type picker and plain downloads.

use std::path::Path;
use std::sync::Arc;

use dealership_api::types::{FileEntry, ListResult};
use dealership_api::{Client, FileQuery};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::error::AdminError;
use crate::notify::{Notification, Notifier};

pub const FILES_PATH: &str = "/files";

/// Lists files stored on the file host. Like the entity services, it never
/// returns an error; failures become a notification and an empty page.
pub struct FileManager {
    client: Arc<Client>,
    notifier: Arc<dyn Notifier>,
}

impl FileManager {
    pub fn new(client: Arc<Client>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    pub async fn list(&self, query: &FileQuery) -> ListResult<FileEntry> {
        match self
            .client
            .get_json::<ListResult<FileEntry>, _>(FILES_PATH, query)
            .await
        {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!("file listing failed: {}", err);
                self.notifier.notify(Notification::error(format!(
                    "Failed to load files: {}",
                    err.user_message()
                )));
                ListResult::empty()
            }
        }
    }
}

/// Accepts file names by extension, e.g. `[".csv"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePicker {
    accepted: Vec<String>,
}

impl FilePicker {
    /// `accepted` entries may be written `.csv`, `csv` or `*`. An empty list accepts anything.
    pub fn new<S: AsRef<str>>(accepted: &[S]) -> Self {
        Self {
            accepted: accepted
                .iter()
                .map(|s| s.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn accepts(&self, name: &str) -> bool {
        if self.accepted.is_empty() || self.accepted.iter().any(|a| a == "*") {
            return true;
        }
        let ext = match Path::new(name).extension() {
            Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
            None => return false,
        };
        self.accepted.iter().any(|a| *a == ext)
    }

    /// Keeps directories and the files this picker accepts.
    pub fn filter(&self, entries: Vec<FileEntry>) -> Vec<FileEntry> {
        entries
            .into_iter()
            .filter(|e| e.is_directory || self.accepts(&e.name))
            .collect()
    }

    /// Comma separated list for prompts, e.g. `.csv, .xlsx`.
    pub fn describe(&self) -> String {
        if self.accepted.is_empty() {
            return "*".to_string();
        }
        self.accepted
            .iter()
            .map(|a| if a == "*" { a.clone() } else { format!(".{}", a) })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `{file_host}/download?path=<path>`.
pub fn download_url(file_host: &str, path: &str) -> Result<Url, AdminError> {
    let raw = format!("{}/download", file_host.trim_end_matches('/'));
    let mut url = Url::parse(&raw)
        .map_err(|e| AdminError::Config(format!("invalid file host {}: {}", file_host, e)))?;
    url.query_pairs_mut().append_pair("path", path);
    Ok(url)
}

/// Streams `url` into `dest`. Returns the number of bytes written.
pub async fn download(http: &reqwest::Client, url: Url, dest: &Path) -> Result<u64, AdminError> {
    tracing::debug!("GET {} -> {}", url, dest.display());
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| AdminError::Api(dealership_api::Error::RequestFailed(e.to_string())))?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AdminError::Api(dealership_api::Error::HttpStatus {
            status: status.as_u16(),
            body,
        }));
    }

    let file = tokio::fs::File::create(dest).await?;
    discard_partial(dest, write_body(file, resp).await).await
}

/// Removes `dest` when writing it failed part way.
async fn discard_partial<T>(dest: &Path, result: Result<T, AdminError>) -> Result<T, AdminError> {
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(dest).await {
            tracing::warn!("could not remove partial {}: {}", dest.display(), e);
        }
    }
    result
}

async fn write_body(mut file: tokio::fs::File, resp: reqwest::Response) -> Result<u64, AdminError> {
    let mut written = 0u64;
    let mut body = resp.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk
            .map_err(|e| AdminError::Api(dealership_api::Error::RequestFailed(e.to_string())))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, dir: bool) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: format!("imports/{}", name),
            size: 0,
            mime_type: None,
            is_directory: dir,
            updated_at: None,
        }
    }

    #[test]
    fn picker_matches_extensions_case_insensitively() {
        let picker = FilePicker::new(&[".csv", "XLSX"]);
        assert!(picker.accepts("cars.csv"));
        assert!(picker.accepts("CARS.CSV"));
        assert!(picker.accepts("stock.xlsx"));
        assert!(!picker.accepts("cars.json"));
        assert!(!picker.accepts("csv"));
        assert_eq!(picker.describe(), ".csv, .xlsx");
    }

    #[test]
    fn wildcard_and_empty_accept_everything() {
        assert!(FilePicker::new(&["*"]).accepts("photo.jpg"));
        assert!(FilePicker::new::<&str>(&[]).accepts("anything"));
    }

    #[test]
    fn filter_keeps_directories() {
        let picker = FilePicker::new(&[".csv"]);
        let kept = picker.filter(vec![
            entry("2024", true),
            entry("cars.csv", false),
            entry("logo.png", false),
        ]);
        let names: Vec<_> = kept.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["2024", "cars.csv"]);
    }

    #[test]
    fn download_url_encodes_path() {
        let url = download_url("http://localhost:4000/", "banners/summer sale.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/download?path=banners%2Fsummer+sale.jpg"
        );
    }

    #[tokio::test]
    async fn failed_write_removes_partial_file() {
        let dest =
            std::env::temp_dir().join(format!("dealership-partial-{}.csv", std::process::id()));
        tokio::fs::write(&dest, b"title,pr").await.unwrap();

        let failed: Result<u64, AdminError> =
            Err(AdminError::Api(dealership_api::Error::RequestFailed("reset".into())));
        assert!(discard_partial(&dest, failed).await.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn successful_write_keeps_file() {
        let dest = std::env::temp_dir().join(format!("dealership-kept-{}.csv", std::process::id()));
        tokio::fs::write(&dest, b"title,price\n").await.unwrap();

        assert_eq!(discard_partial(&dest, Ok(12u64)).await.unwrap(), 12);
        assert!(dest.exists());
        tokio::fs::remove_file(&dest).await.unwrap();
    }
}
