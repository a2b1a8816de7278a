use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dealership_lib::files::{download, download_url};
use dealership_lib::types::FileEntry;
use dealership_lib::{FileManager, FilePicker, FileQuery, Query};

use super::AppContext;
use crate::output::{format_size, print, Rows};

#[derive(Args)]
pub struct FilesArgs {
    /// Directory to list
    #[arg(long)]
    pub path: Option<String>,

    /// Search by file name
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "50")]
    pub page_size: i64,

    /// Only show these file types, e.g. .csv,.xlsx
    #[arg(long, value_delimiter = ',')]
    pub accept: Vec<String>,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// File path as shown by `files`
    pub path: String,

    /// Where to write the file (defaults to its name in the current directory)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

fn file_rows(entries: &[FileEntry]) -> Rows {
    let mut rows = Rows::new(["Name", "Path", "Size", "Type", "Modified"]);
    for entry in entries {
        rows.push(vec![
            entry.name.clone(),
            entry.path.clone(),
            if entry.is_directory {
                "-".to_string()
            } else {
                format_size(entry.size)
            },
            if entry.is_directory {
                "directory".to_string()
            } else {
                entry.mime_type.clone().unwrap_or_default()
            },
            entry
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]);
    }
    rows
}

pub async fn run(args: &FilesArgs, ctx: &AppContext) -> Result<()> {
    let mut query = FileQuery::default()
        .with_page(args.page)
        .with_limit(args.page_size);
    if let Some(path) = &args.path {
        query = query.with_path(path);
    }
    if let Some(search) = &args.search {
        query = query.with_search(search);
    }

    let manager = FileManager::new(ctx.client.clone(), ctx.notifier.clone());
    let page = manager.list(&query).await;
    let picker = FilePicker::new(&args.accept);
    let entries = picker.filter(page.data);

    eprintln!(
        "Page {}/{} ({} total)",
        page.pagination.current_page, page.pagination.total_pages, page.pagination.total_items
    );
    print(ctx.format, &file_rows(&entries), &entries)
}

pub async fn download_file(args: &DownloadArgs, ctx: &AppContext) -> Result<()> {
    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => {
            let name = args
                .path
                .rsplit('/')
                .find(|part| !part.is_empty())
                .unwrap_or("download");
            PathBuf::from(name)
        }
    };
    let url = download_url(&ctx.config.file_host, &args.path)?;
    let http = reqwest::Client::builder()
        .timeout(ctx.config.request_timeout)
        .build()?;
    let written = download(&http, url, &dest).await?;
    eprintln!("Saved {} ({})", dest.display(), format_size(written));
    Ok(())
}
