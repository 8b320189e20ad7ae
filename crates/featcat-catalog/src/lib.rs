//! Feature catalog data model
//!
//! This crate defines the records the analysis engine operates on and the
//! immutable collection that holds them for a session:
//!
//! - [`Feature`]: one model input signal with its taxonomy and ranking tags
//! - [`FilterKey`]: the nine categorical fields the explorer filters by
//! - [`FeatureCatalog`]: the validated, loaded dataset
//! - [`ChangeProposal`]: a reviewer's suggested correction to one record

pub use self::{catalog::*, feature::*, proposal::*};

pub mod catalog;
pub mod feature;
mod lenient;
pub mod proposal;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CatalogError {
    #[display("failed to parse feature payload: {_0}")]
    Parse(serde_json::Error),
    #[display("duplicate feature id {id}")]
    #[from(ignore)]
    DuplicateId { id: u64 },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown filter key: {input}")]
pub struct ParseFilterKeyError {
    #[error(not(source))]
    pub input: String,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown proposal field: {input}")]
pub struct ParseProposalFieldError {
    #[error(not(source))]
    pub input: String,
}

#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProposalError {
    #[display("please enter your name")]
    MissingProposerName,
    #[display("please enter a new value")]
    MissingNewValue,
    #[display("please provide a reason")]
    MissingComment,
}
