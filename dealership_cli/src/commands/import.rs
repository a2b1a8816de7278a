use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use dealership_lib::import::Uploader;
use dealership_lib::types::Entity;
use dealership_lib::{
    EntityKind, EntityVisitor, ImportPhase, ImportSession, PushChannel, SseChannel, Table,
    Validate,
};
use futures::future::{FutureExt, LocalBoxFuture};
use indicatif::{ProgressBar, ProgressStyle};

use super::AppContext;

#[derive(Args)]
pub struct ImportArgs {
    /// Entity to import into, e.g. cars, brands
    pub entity: EntityKind,

    /// CSV file to upload
    pub file: PathBuf,

    /// Push host to follow progress on (defaults to DEALERSHIP_PUSH_URL)
    #[arg(long)]
    pub push_url: Option<String>,
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Reloads the first listing page once an import lands.
struct Reload<'a> {
    ctx: &'a AppContext,
}

impl<'a> EntityVisitor for Reload<'a> {
    type Output = LocalBoxFuture<'a, ()>;

    fn visit<E>(self, kind: EntityKind) -> Self::Output
    where
        E: Entity,
        E::Input: Validate,
    {
        let ctx = self.ctx;
        async move {
            let mut table = Table::<E>::new(ctx.service::<E>(), kind.columns())
                .with_page_size(ctx.config.page_size);
            table.refresh().await;
            eprintln!("{} - {}", kind.title(), table.summary());
        }
        .boxed_local()
    }
}

pub async fn run(args: &ImportArgs, ctx: &AppContext) -> Result<()> {
    let Some(config) = args.entity.import_config() else {
        bail!("{} do not support import", args.entity.title().to_lowercase());
    };

    let completed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&completed);
    let config = config.on_complete(move || flag.store(true, Ordering::SeqCst));

    let push_host = args
        .push_url
        .clone()
        .or_else(|| config.socket_url.clone())
        .unwrap_or_else(|| ctx.config.push_url.clone());
    let channel = Arc::new(SseChannel::open(&push_host, reqwest::Client::new())?);
    tracing::debug!("following import progress at {}", channel.url());

    let bar = progress_bar();
    let listener_bar = bar.clone();
    let uploader: Arc<dyn Uploader> = ctx.client.clone();
    let push: Arc<dyn PushChannel> = channel.clone();
    let mut session = ImportSession::new(config, uploader, push, Arc::clone(&ctx.notifier))
        .with_listener(move |modal| {
            listener_bar.set_position(u64::from(modal.percent));
            listener_bar.set_message(modal.message.clone());
        });

    session.open_dialog();
    let outcome = session.run(&args.file).await;
    session.teardown();
    channel.close();

    match outcome? {
        ImportPhase::Succeeded => {
            bar.finish_with_message(session.modal().message.clone());
            if completed.load(Ordering::SeqCst) {
                args.entity.dispatch(Reload { ctx }).await;
            }
            Ok(())
        }
        _ => {
            bar.abandon_with_message(session.modal().message.clone());
            bail!("import of {} failed", args.file.display())
        }
    }
}
