use anyhow::{bail, Result};
use clap::Args;
use dealership_lib::types::{Entity, EntityId};
use dealership_lib::validation::parse_id;
use dealership_lib::{
    DeleteOutcome, EntityKind, EntityVisitor, FormMode, FormPage, LoadOutcome, RemoteService,
    SubmitOutcome, Table, Validate,
};
use futures::future::{FutureExt, LocalBoxFuture};

use super::{confirmer, merge, AppContext, PayloadArgs};
use crate::output::{print, Rows};

#[derive(Args)]
pub struct GetArgs {
    /// Entity kind, e.g. cars
    pub entity: EntityKind,
    /// Record ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Entity kind, e.g. cars
    pub entity: EntityKind,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Entity kind, e.g. cars
    pub entity: EntityKind,
    /// Record ID
    pub id: String,
    /// Fields to change; omitted fields keep their current values
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Entity kind, e.g. cars
    pub entity: EntityKind,
    /// Record ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct BulkDeleteArgs {
    /// Entity kind, e.g. cars
    pub entity: EntityKind,
    /// Record IDs, comma separated
    #[arg(value_delimiter = ',', required = true)]
    pub ids: Vec<String>,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// One parsed subcommand, ready to run against a concrete entity type.
pub enum Action<'a> {
    Get(&'a GetArgs),
    Add(&'a AddArgs),
    Update(&'a UpdateArgs),
    Delete(&'a DeleteArgs),
    BulkDelete(&'a BulkDeleteArgs),
}

impl Action<'_> {
    fn kind(&self) -> EntityKind {
        match self {
            Action::Get(a) => a.entity,
            Action::Add(a) => a.entity,
            Action::Update(a) => a.entity,
            Action::Delete(a) => a.entity,
            Action::BulkDelete(a) => a.entity,
        }
    }
}

fn record_rows<E: Entity>(kind: EntityKind, records: &[E]) -> Result<Rows> {
    let columns = kind.columns();
    let mut rows = Rows::new(columns.iter().map(|c| c.title));
    for record in records {
        let json = serde_json::to_value(record)?;
        rows.push(columns.iter().map(|c| c.cell(&json)).collect());
    }
    Ok(rows)
}

fn settle(outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Saved { message, redirect } => {
            tracing::debug!("saved, continuing at {}", redirect);
            println!("{}", message);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for error in &errors {
                eprintln!("  {}", error);
            }
            bail!("{} field(s) failed validation", errors.len())
        }
        SubmitOutcome::Failed(message) => bail!(message),
    }
}

async fn get<E>(ctx: &AppContext, args: &GetArgs) -> Result<()>
where
    E: Entity,
    E::Input: Validate,
{
    let id = parse_id(&args.id)?;
    let Some(record) = ctx.service::<E>().get_by_id(id).await else {
        bail!("{} {} not found", E::NAME, id);
    };
    let records = [record];
    print(ctx.format, &record_rows(args.entity, &records)?, &records[0])
}

async fn add<E>(ctx: &AppContext, args: &AddArgs) -> Result<()>
where
    E: Entity,
    E::Input: Validate,
{
    let input: E::Input = serde_json::from_value(args.payload.read()?)?;
    let mut form =
        FormPage::<E>::new(ctx.service::<E>(), FormMode::Add, args.entity.listing_route());
    form.load().await;
    settle(form.submit_with(input).await)
}

async fn update<E>(ctx: &AppContext, args: &UpdateArgs) -> Result<()>
where
    E: Entity,
    E::Input: Validate,
{
    let mode = FormMode::from_route(Some(args.id.as_str()))?;
    let mut form = FormPage::<E>::new(ctx.service::<E>(), mode, args.entity.listing_route());
    if form.load().await == LoadOutcome::NotFound {
        bail!("{} {} not found", E::NAME, args.id);
    }

    let mut values = serde_json::to_value(form.values())?;
    merge(&mut values, args.payload.read()?);
    let input: E::Input = serde_json::from_value(values)?;
    settle(form.submit_with(input).await)
}

async fn delete<E>(ctx: &AppContext, args: &DeleteArgs) -> Result<()>
where
    E: Entity,
    E::Input: Validate,
{
    let id = parse_id(&args.id)?;
    let mut table = Table::new(ctx.service::<E>(), args.entity.columns())
        .with_page_size(ctx.config.page_size);
    match table.delete_row(id, confirmer(args.yes)).await {
        DeleteOutcome::Declined => eprintln!("Cancelled."),
        DeleteOutcome::Deleted => eprintln!("{} - {}", args.entity.title(), table.summary()),
        DeleteOutcome::Failed => bail!("{} {} was not deleted", E::NAME, id),
        DeleteOutcome::NothingSelected => {}
    }
    Ok(())
}

async fn bulk_delete<E>(ctx: &AppContext, args: &BulkDeleteArgs) -> Result<()>
where
    E: Entity,
    E::Input: Validate,
{
    let ids = args
        .ids
        .iter()
        .map(|raw| parse_id(raw))
        .collect::<Result<Vec<EntityId>, _>>()?;
    let prompt = format!(
        "Are you sure you want to delete {} {} records?",
        ids.len(),
        E::NAME.to_lowercase()
    );
    if !confirmer(args.yes).confirm(&prompt) {
        eprintln!("Cancelled.");
        return Ok(());
    }
    if !ctx.service::<E>().bulk_delete(&ids).await {
        bail!("no {} records were deleted", E::NAME.to_lowercase());
    }
    Ok(())
}

struct RecordVisitor<'a> {
    ctx: &'a AppContext,
    action: Action<'a>,
}

impl<'a> EntityVisitor for RecordVisitor<'a> {
    type Output = LocalBoxFuture<'a, Result<()>>;

    fn visit<E>(self, _kind: EntityKind) -> Self::Output
    where
        E: Entity,
        E::Input: Validate,
    {
        let ctx = self.ctx;
        match self.action {
            Action::Get(args) => get::<E>(ctx, args).boxed_local(),
            Action::Add(args) => add::<E>(ctx, args).boxed_local(),
            Action::Update(args) => update::<E>(ctx, args).boxed_local(),
            Action::Delete(args) => delete::<E>(ctx, args).boxed_local(),
            Action::BulkDelete(args) => bulk_delete::<E>(ctx, args).boxed_local(),
        }
    }
}

pub async fn run(action: Action<'_>, ctx: &AppContext) -> Result<()> {
    action.kind().dispatch(RecordVisitor { ctx, action }).await
}
