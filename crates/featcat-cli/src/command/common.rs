//! Arguments shared by several subcommands

use std::path::PathBuf;

use clap::Args;
use featcat_analysis::filter::{ActiveFilter, FilterState};
use featcat_catalog::{FeatureCatalog, FilterKey};
use serde::Serialize;

use crate::{
    source,
    util::{Output, Report},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct SourceArgs {
    /// Path to the static features JSON file
    #[arg(long = "data", env = "FEATCAT_DATA", default_value = "data/features.json")]
    pub data_path: PathBuf,

    /// Remote features endpoint, tried before the static file (empty disables it)
    #[arg(long, env = "FEATCAT_SOURCE_URL")]
    pub source_url: Option<String>,
}

impl SourceArgs {
    pub fn load(&self) -> anyhow::Result<FeatureCatalog> {
        source::load_catalog(self.source_url.as_deref(), &self.data_path)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    /// Select a value for a filter key, e.g. `geo=US` (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(FilterKey, String)>,

    /// Keep only features whose SHAP rank is at most this value
    #[arg(long)]
    pub shap_max: Option<f64>,

    /// Case-insensitive substring match on name and description
    #[arg(long, default_value = "")]
    pub search: String,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let state = self
            .filters
            .iter()
            .fold(FilterState::default(), |state, (key, value)| {
                if state.is_selected(*key, value) {
                    state
                } else {
                    state.toggled(*key, value.clone())
                }
            });
        state
            .with_shap_rank_max(self.shap_max)
            .with_search(self.search.clone())
    }
}

fn parse_filter(s: &str) -> Result<(FilterKey, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    let key = key.trim().parse::<FilterKey>().map_err(|e| e.to_string())?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("empty value for filter `{key}`"));
    }
    Ok((key, value.to_owned()))
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct OutputArgs {
    /// Emit the view as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write the JSON report to this file (implies --json)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn is_json(&self) -> bool {
        self.json || self.output.is_some()
    }

    pub fn save<T>(
        &self,
        view: &'static str,
        record_count: usize,
        filters: &FilterState,
        data: &T,
    ) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let report = Report::new(view, record_count, filters, data);
        Output::save_json(&report, self.output.clone())
    }
}

/// Prints the active filters, if any, as a single line.
pub(crate) fn print_active_filters(filters: &FilterState, matched: usize, total: usize) {
    if filters.is_empty() {
        println!("Records: {total}");
        return;
    }
    let badges = filters
        .active_filters()
        .iter()
        .map(|filter| match filter {
            ActiveFilter::Value { key, value } => {
                format!("{}={value}", key.as_str())
            }
            ActiveFilter::ShapRankMax { max } => {
                format!("shap_rank<={max}")
            }
            ActiveFilter::Search { text } => format!("search=\"{text}\""),
        })
        .collect::<Vec<_>>();
    println!(
        "Records: {matched} of {total} ({} filters: {})",
        filters.active_filter_count(),
        badges.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("geo=US").unwrap(),
            (FilterKey::Geo, "US".to_owned())
        );
        assert_eq!(
            parse_filter("primary_category = Cash Flow").unwrap(),
            (FilterKey::PrimaryCategory, "Cash Flow".to_owned())
        );
        assert!(parse_filter("geo").is_err());
        assert!(parse_filter("geo=").is_err());
        assert!(parse_filter("country=US").is_err());
    }

    #[test]
    fn test_repeated_filter_stays_selected() {
        let args = FilterArgs {
            filters: vec![
                (FilterKey::Geo, "US".to_owned()),
                (FilterKey::Geo, "US".to_owned()),
                (FilterKey::Geo, "PH".to_owned()),
            ],
            shap_max: Some(20.0),
            search: String::new(),
        };
        let state = args.to_state();
        assert_eq!(state.values(FilterKey::Geo), ["US", "PH"]);
        assert_eq!(state.shap_rank_max(), Some(20.0));
        assert_eq!(state.active_filter_count(), 3);
    }
}
