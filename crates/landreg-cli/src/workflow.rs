//! Workflow commands: `register` and `transfer`.
//!
//! Online runs talk to the collaborators configured through
//! `LANDREG_*` environment variables. `--offline` swaps in in-memory stores,
//! which is enough to rehearse a registration end to end. Offline stores
//! start empty, so an offline transfer takes `--tiers` to put the parcel on
//! the in-memory ledger first.
//!
//! ```bash
//! landreg register registration.json --role officer --doc deed=deed.pdf
//! landreg separate registration.json > tiers.json
//! landreg transfer '1001|Colombo|GovRef-7QK2ZD' --new-owner 0xabc... --role officer --offline --tiers tiers.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use landreg_client::{ClientConfig, Collaborators, InMemoryStores, Ledger, LedgerRegistration};
use landreg_core::{CallerClaims, ParcelId};
use landreg_tier::{RawRegistrationInput, SeparatedTiers};
use landreg_workflow::{WorkflowOrchestrator, WorkflowResult};
use serde::Serialize;

use crate::input::{load_documents, parse_doc_arg, print_json, read_json, DocArg};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Registration input JSON.
    pub input: PathBuf,
    #[command(flatten)]
    pub common: WorkflowArgs,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Parcel identifier as recorded on the ledger.
    pub parcel_id: String,
    /// Wallet address of the new owner.
    #[arg(long)]
    pub new_owner: String,
    /// Separated tiers to register on the in-memory ledger before the
    /// transfer. Offline runs only.
    #[arg(long, value_name = "TIERS_JSON", requires = "offline")]
    pub tiers: Option<PathBuf>,
    #[command(flatten)]
    pub common: WorkflowArgs,
}

#[derive(Args, Debug)]
pub struct WorkflowArgs {
    /// Role asserted for the caller. Unknown roles run with no visibility.
    #[arg(long)]
    pub role: String,
    /// Attach a document as TYPE=PATH. Repeatable.
    #[arg(long = "doc", value_name = "TYPE=PATH", value_parser = parse_doc_arg)]
    pub docs: Vec<DocArg>,
    /// Use in-memory collaborators instead of the configured services.
    #[arg(long)]
    pub offline: bool,
}

impl WorkflowArgs {
    fn collaborators(&self) -> Result<Collaborators> {
        if self.offline {
            tracing::info!("using in-memory collaborators");
            Ok(Collaborators::in_memory())
        } else {
            let config = ClientConfig::from_env().context("loading collaborator configuration")?;
            tracing::debug!(?config, "collaborator configuration");
            Ok(Collaborators::http(&config)?)
        }
    }

    fn orchestrator_with(&self, collaborators: Collaborators) -> WorkflowOrchestrator {
        let claims = CallerClaims::from_assertion(&self.role);
        tracing::debug!(role = %claims.role, asserted = claims.role_label(), "caller claims");
        WorkflowOrchestrator::new(claims, collaborators)
    }

    fn orchestrator(&self) -> Result<WorkflowOrchestrator> {
        Ok(self.orchestrator_with(self.collaborators()?))
    }
}

/// In-memory stores whose ledger already holds the parcel in `path`.
async fn seeded_stores(path: &Path) -> Result<InMemoryStores> {
    let tiers: SeparatedTiers = read_json(path)?;
    let stores = InMemoryStores::new();
    let receipt = stores
        .ledger
        .register(&LedgerRegistration::from_tiers(&tiers))
        .await
        .with_context(|| format!("seeding ledger from {}", path.display()))?;
    tracing::info!(parcel_id = %receipt.parcel_id, tx = %receipt.transaction_ref, "seeded in-memory ledger");
    Ok(stores)
}

pub async fn run_register(args: &RegisterArgs) -> Result<u8> {
    let input: RawRegistrationInput = read_json(&args.input)?;
    let documents = load_documents(&args.common.docs)?;
    let mut orchestrator = args.common.orchestrator()?;
    let result = orchestrator.register_land(input, documents).await;
    report(&result)
}

pub async fn run_transfer(args: &TransferArgs) -> Result<u8> {
    let parcel_id = ParcelId::new(args.parcel_id.trim());
    if !parcel_id.is_well_formed() {
        tracing::warn!(%parcel_id, "parcel identifier is not in plot|district|GovRef-XXXXXX form");
    }
    let documents = load_documents(&args.common.docs)?;
    let mut orchestrator = match &args.tiers {
        Some(path) => {
            if !args.common.offline {
                bail!("--tiers only applies to --offline runs");
            }
            let stores = seeded_stores(path).await?;
            args.common.orchestrator_with(stores.collaborators())
        }
        None => args.common.orchestrator()?,
    };
    let result = orchestrator
        .transfer_land(&parcel_id, &args.new_owner, documents)
        .await;
    report(&result)
}

fn report<R: Serialize>(result: &WorkflowResult<R>) -> Result<u8> {
    print_json(result)?;
    Ok(if result.is_success() { 0 } else { 1 })
}
