use anyhow::Result;
use clap::Args;
use dealership_lib::types::Entity;
use dealership_lib::{EntityKind, EntityVisitor, Phase, StateChange, Table, Validate};
use futures::future::{FutureExt, LocalBoxFuture};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use super::AppContext;
use crate::output::{print, Rows};

#[derive(Args)]
pub struct ListArgs {
    /// Entity to list (see `entities`), e.g. cars, brands, blog-posts
    pub entity: EntityKind,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page (defaults to DEALERSHIP_PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Search text
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status, e.g. active, inactive, draft
    #[arg(long)]
    pub status: Option<String>,

    /// Sort column accessor, e.g. name, price, createdAt
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort_by")]
    pub desc: bool,

    /// Read search text line by line from stdin; only text left unchanged
    /// for DEALERSHIP_SEARCH_DEBOUNCE_MS is fetched
    #[arg(long, conflicts_with = "search")]
    pub search_stdin: bool,
}

/// Streams stdin lines into the table's debounced search.
async fn follow_stdin<E: Entity>(table: &mut Table<E>) {
    let (tx, rx) = watch::channel(String::new());
    let reader = async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line.trim().to_string()).is_err() {
                break;
            }
        }
    };
    tokio::join!(reader, table.drive_search(rx));
}

/// Applies the CLI filters to a fresh table, in the order a user would click.
pub fn apply_filters<E: Entity>(table: &mut Table<E>, args: &ListArgs) {
    if let Some(size) = args.page_size {
        table.apply(StateChange::PageSize(size));
    }
    if let Some(search) = &args.search {
        table.apply(StateChange::Search(search.clone()));
    }
    if let Some(status) = &args.status {
        table.apply(StateChange::Status(Some(status.clone())));
    }
    if let Some(sort_by) = &args.sort_by {
        if table.apply(StateChange::Sort(sort_by.clone())).is_none() {
            tracing::warn!("'{}' is not a sortable column", sort_by);
        } else if args.desc {
            table.apply(StateChange::Sort(sort_by.clone()));
        }
    }
    table.apply(StateChange::Page(args.page));
}

async fn list<E>(ctx: &AppContext, args: &ListArgs) -> Result<()>
where
    E: Entity,
    E::Input: Validate,
{
    let kind = args.entity;
    let mut table = Table::new(ctx.service::<E>(), kind.columns())
        .with_status_options(kind.status_options())
        .with_actions(kind.actions())
        .with_page_size(ctx.config.page_size)
        .with_search_debounce(ctx.config.search_debounce);
    apply_filters(&mut table, args);
    table.refresh().await;
    if args.search_stdin {
        follow_stdin(&mut table).await;
    }

    if table.phase() == Phase::Error {
        anyhow::bail!("failed to load {}", kind.title().to_lowercase());
    }

    eprintln!("{} - {}", kind.title(), table.summary());
    let rows = Rows::new(table.columns().iter().map(|c| c.title)).with_rows(table.rows());
    print(ctx.format, &rows, table.records())
}

struct ListVisitor<'a> {
    ctx: &'a AppContext,
    args: &'a ListArgs,
}

impl<'a> EntityVisitor for ListVisitor<'a> {
    type Output = LocalBoxFuture<'a, Result<()>>;

    fn visit<E>(self, _kind: EntityKind) -> Self::Output
    where
        E: Entity,
        E::Input: Validate,
    {
        list::<E>(self.ctx, self.args).boxed_local()
    }
}

pub async fn run(args: &ListArgs, ctx: &AppContext) -> Result<()> {
    args.entity.dispatch(ListVisitor { ctx, args }).await
}
