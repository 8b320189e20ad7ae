//! Change proposal submission
//!
//! Builds a [`ChangeProposal`] against one loaded feature, validates it and
//! posts it to the review endpoint. Without an endpoint the submission is
//! simulated and only logged.

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use featcat_catalog::{ChangeProposal, ProposalField};

use crate::{command::common::SourceArgs, util::Output};

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Args)]
pub(crate) struct ProposeArg {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Id of the feature to correct
    #[arg(long)]
    pub id: u64,

    /// Field to change (primary_category, feature_type, feature_subtype, feature_l3 or comment_only)
    #[arg(long, default_value = "comment_only")]
    pub field: ProposalField,

    /// Proposed value of the field
    #[arg(long, default_value = "")]
    pub new_value: String,

    /// Your name
    #[arg(long)]
    pub name: String,

    /// Your email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Reason for the change
    #[arg(long)]
    pub comment: String,

    /// Review endpoint receiving proposals (empty simulates the submission)
    #[arg(long, env = "FEATCAT_PROPOSAL_URL")]
    pub proposal_url: Option<String>,

    /// Print the payload without submitting it
    #[arg(long)]
    pub dry_run: bool,
}

pub(crate) fn run(arg: &ProposeArg) -> anyhow::Result<()> {
    let catalog = arg.source.load()?;
    let feature = catalog
        .get(arg.id)
        .ok_or_else(|| anyhow::anyhow!("Feature {} not found", arg.id))?;

    let proposal = ChangeProposal::for_feature(
        feature,
        arg.field,
        &arg.new_value,
        &arg.name,
        &arg.email,
        &arg.comment,
    );
    proposal.validate().context("Invalid change proposal")?;

    if arg.dry_run {
        return Output::save_json(&proposal, None);
    }

    match arg.proposal_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            submit(url, &proposal)?;
            tracing::info!(url, feature_id = proposal.feature_id, "change proposal submitted");
            println!("Submitted proposal for feature {}", proposal.feature_id);
        }
        None => {
            tracing::info!(
                feature_id = proposal.feature_id,
                field = %proposal.field_changed,
                "no proposal endpoint configured, simulating submission"
            );
            println!(
                "Submitted proposal for feature {} (simulated, no endpoint configured)",
                proposal.feature_id
            );
        }
    }
    if proposal.field_changed != ProposalField::CommentOnly {
        println!(
            "  {}: {:?} -> {:?}",
            proposal.field_changed.label(),
            proposal.old_value,
            proposal.new_value
        );
    }

    Ok(())
}

fn submit(url: &str, proposal: &ChangeProposal) -> anyhow::Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(SUBMIT_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    client
        .post(url)
        .json(proposal)
        .send()
        .with_context(|| format!("Failed to submit change proposal to {url}"))?
        .error_for_status()
        .with_context(|| format!("Review endpoint rejected the change proposal: {url}"))?;
    Ok(())
}
