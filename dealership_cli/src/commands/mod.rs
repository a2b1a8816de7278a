pub mod entities;
pub mod files;
pub mod import;
pub mod list;
pub mod records;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::Args;
use dealership_lib::notify::Notifier;
use dealership_lib::table::Confirm;
use dealership_lib::types::Entity;
use dealership_lib::{AdminConfig, Client, EntityService};
use serde_json::Value;

use crate::output::OutputFormat;

/// Shared state for every subcommand.
pub struct AppContext {
    pub config: AdminConfig,
    pub client: Arc<Client>,
    pub notifier: Arc<dyn Notifier>,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn service<E: Entity>(&self) -> Arc<EntityService<E>> {
        Arc::new(EntityService::new(
            Arc::clone(&self.client),
            Arc::clone(&self.notifier),
        ))
    }
}

/// Asks on stderr and reads the answer from stdin. Anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub fn confirmer(yes: bool) -> &'static dyn Confirm {
    if yes {
        &dealership_lib::table::AssumeYes
    } else {
        &StdinConfirm
    }
}

/// Record payload given inline or from a file.
#[derive(Args)]
pub struct PayloadArgs {
    /// JSON object with the record fields
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Path to a JSON file with the record fields
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn read(&self) -> Result<Value> {
        let raw = match (&self.data, &self.file) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => bail!("provide the record with --data or --file"),
        };
        let value: Value = serde_json::from_str(&raw).context("record is not valid JSON")?;
        if !value.is_object() {
            bail!("record must be a JSON object");
        }
        Ok(value)
    }
}

/// Overlays the keys of `patch` onto `base`.
pub fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                base.insert(key, value);
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_overlays_top_level_keys() {
        let mut base = json!({"name": "Audi", "slug": "audi", "status": "active"});
        merge(&mut base, json!({"status": "inactive", "logo": "/a.png"}));
        assert_eq!(
            base,
            json!({"name": "Audi", "slug": "audi", "status": "inactive", "logo": "/a.png"})
        );
    }

    #[test]
    fn payload_requires_an_object() {
        let args = PayloadArgs {
            data: Some("[1, 2]".into()),
            file: None,
        };
        assert!(args.read().is_err());

        let missing = PayloadArgs {
            data: None,
            file: None,
        };
        assert!(missing.read().is_err());
    }
}
