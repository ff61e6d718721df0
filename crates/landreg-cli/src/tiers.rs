//! Offline tier commands: `parcel-id`, `separate`, `project`, `verify`.
//!
//! ```bash
//! landreg parcel-id --plot 1001 --district Colombo
//! landreg separate registration.json > tiers.json
//! landreg project tiers.json --role citizen
//! landreg verify tiers.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use landreg_core::{ParcelId, Role};
use landreg_tier::{project, separate, verify_tiers, IntegrityReport, RawRegistrationInput, RoleProjection, SeparatedTiers};

use crate::input::{print_json, read_json};

#[derive(Args, Debug)]
pub struct ParcelIdArgs {
    /// Plot number.
    #[arg(long)]
    pub plot: String,
    /// District name.
    #[arg(long)]
    pub district: String,
}

#[derive(Args, Debug)]
pub struct SeparateArgs {
    /// Registration input JSON.
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Separated tiers JSON (output of `separate`).
    pub tiers: PathBuf,
    /// Caller role (admin, officer, citizen, user, public).
    #[arg(long)]
    pub role: Role,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Separated tiers JSON (output of `separate`).
    pub tiers: PathBuf,
}

pub fn run_parcel_id(args: &ParcelIdArgs) -> Result<u8> {
    println!("{}", ParcelId::generate(&args.plot, &args.district));
    Ok(0)
}

pub fn run_separate(args: &SeparateArgs) -> Result<u8> {
    print_json(&separate_file(&args.input)?)?;
    Ok(0)
}

pub fn run_project(args: &ProjectArgs) -> Result<u8> {
    print_json(&project_file(&args.tiers, args.role)?)?;
    Ok(0)
}

/// Exit status 1 when any link is broken.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let report = verify_file(&args.tiers)?;
    print_json(&report)?;
    if report.overall_integrity {
        Ok(0)
    } else {
        tracing::warn!(
            private_to_public = report.private_to_public,
            public_to_ledger = report.public_to_ledger,
            "integrity check failed"
        );
        Ok(1)
    }
}

pub fn separate_file(path: &Path) -> Result<SeparatedTiers> {
    let input: RawRegistrationInput = read_json(path)?;
    Ok(separate(input)?)
}

pub fn project_file(path: &Path, role: Role) -> Result<RoleProjection> {
    let tiers: SeparatedTiers = read_json(path)?;
    Ok(project(&tiers, role))
}

pub fn verify_file(path: &Path) -> Result<IntegrityReport> {
    let tiers: SeparatedTiers = read_json(path)?;
    Ok(verify_tiers(&tiers))
}
