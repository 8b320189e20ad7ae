//! Change proposals
//!
//! Reviewers who spot a misclassified feature can propose a correction to
//! one of its taxonomy fields, or leave a comment without changing anything.
//! The proposal is a flat payload posted to an external review endpoint; it
//! never modifies the loaded catalog.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Feature, FilterKey, ParseProposalFieldError, ProposalError};

/// What a proposal changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalField {
    PrimaryCategory,
    FeatureType,
    FeatureSubtype,
    FeatureL3,
    /// Comment only, no field change
    CommentOnly,
}

impl ProposalField {
    pub const ALL: [ProposalField; 5] = [
        ProposalField::PrimaryCategory,
        ProposalField::FeatureType,
        ProposalField::FeatureSubtype,
        ProposalField::FeatureL3,
        ProposalField::CommentOnly,
    ];

    /// The catalog field this proposal edits, if any.
    #[must_use]
    pub const fn filter_key(self) -> Option<FilterKey> {
        match self {
            ProposalField::PrimaryCategory => Some(FilterKey::PrimaryCategory),
            ProposalField::FeatureType => Some(FilterKey::FeatureType),
            ProposalField::FeatureSubtype => Some(FilterKey::FeatureSubtype),
            ProposalField::FeatureL3 => Some(FilterKey::FeatureL3),
            ProposalField::CommentOnly => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.filter_key() {
            Some(key) => key.as_str(),
            None => "comment_only",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ProposalField::PrimaryCategory => "Primary Category",
            ProposalField::FeatureType => "Feature Type",
            ProposalField::FeatureSubtype => "Feature Subtype",
            ProposalField::FeatureL3 => "Feature L3",
            ProposalField::CommentOnly => "Comment only",
        }
    }
}

impl fmt::Display for ProposalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for ProposalField {
    type Err = ParseProposalFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProposalField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseProposalFieldError {
                input: s.to_owned(),
            })
    }
}

/// Payload submitted to the review endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeProposal {
    pub feature_id: u64,
    pub feature_name: String,
    pub field_changed: ProposalField,
    pub old_value: String,
    pub new_value: String,
    pub proposer_name: String,
    pub proposer_email: String,
    pub comment: String,
}

impl ChangeProposal {
    /// Drafts a proposal against `feature`, capturing the current value.
    ///
    /// For [`ProposalField::CommentOnly`] both old and new values are empty.
    #[must_use]
    pub fn for_feature(
        feature: &Feature,
        field: ProposalField,
        new_value: &str,
        proposer_name: &str,
        proposer_email: &str,
        comment: &str,
    ) -> Self {
        let (old_value, new_value) = match field.filter_key() {
            Some(key) => (feature.field(key).to_owned(), new_value.to_owned()),
            None => (String::new(), String::new()),
        };
        Self {
            feature_id: feature.id,
            feature_name: feature.feature_name.clone(),
            field_changed: field,
            old_value,
            new_value,
            proposer_name: proposer_name.to_owned(),
            proposer_email: proposer_email.to_owned(),
            comment: comment.to_owned(),
        }
    }

    /// Checks the required fields, reporting the first one missing.
    pub fn validate(&self) -> Result<(), ProposalError> {
        if self.proposer_name.trim().is_empty() {
            return Err(ProposalError::MissingProposerName);
        }
        if self.field_changed != ProposalField::CommentOnly && self.new_value.trim().is_empty() {
            return Err(ProposalError::MissingNewValue);
        }
        if self.comment.trim().is_empty() {
            return Err(ProposalError::MissingComment);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature() -> Feature {
        Feature {
            id: 42,
            feature_name: "days_since_last_loan".into(),
            primary_category: "Loan Activity".into(),
            feature_type: "Credit/Loan History".into(),
            ..Feature::default()
        }
    }

    #[test]
    fn test_captures_old_value() {
        let proposal = ChangeProposal::for_feature(
            &feature(),
            ProposalField::PrimaryCategory,
            "Bureau",
            "Ana",
            "",
            "sourced from bureau pull",
        );
        assert_eq!(proposal.feature_id, 42);
        assert_eq!(proposal.old_value, "Loan Activity");
        assert_eq!(proposal.new_value, "Bureau");
        assert_eq!(proposal.validate(), Ok(()));
    }

    #[test]
    fn test_comment_only_clears_values() {
        let proposal = ChangeProposal::for_feature(
            &feature(),
            ProposalField::CommentOnly,
            "ignored",
            "Ana",
            "ana@example.com",
            "description is stale",
        );
        assert_eq!(proposal.old_value, "");
        assert_eq!(proposal.new_value, "");
        assert_eq!(proposal.validate(), Ok(()));
    }

    #[test]
    fn test_validation_order() {
        let mut proposal = ChangeProposal::for_feature(
            &feature(),
            ProposalField::FeatureType,
            " ",
            " ",
            "",
            "",
        );
        assert_eq!(proposal.validate(), Err(ProposalError::MissingProposerName));
        proposal.proposer_name = "Ana".into();
        assert_eq!(proposal.validate(), Err(ProposalError::MissingNewValue));
        proposal.new_value = "App Ecosystem".into();
        assert_eq!(proposal.validate(), Err(ProposalError::MissingComment));
        proposal.comment = "wrong type".into();
        assert_eq!(proposal.validate(), Ok(()));
    }

    #[test]
    fn test_payload_shape() {
        let proposal = ChangeProposal::for_feature(
            &feature(),
            ProposalField::FeatureL3,
            "Tenure",
            "Ana",
            "",
            "more specific",
        );
        let json = serde_json::to_value(&proposal).unwrap();
        assert_eq!(json["feature_id"], 42);
        assert_eq!(json["field_changed"], "feature_l3");
        assert_eq!(json["old_value"], "");
    }

    #[test]
    fn test_field_from_str() {
        for field in ProposalField::ALL {
            assert_eq!(field.as_str().parse::<ProposalField>().unwrap(), field);
        }
        assert!("geo".parse::<ProposalField>().is_err());
    }
}
