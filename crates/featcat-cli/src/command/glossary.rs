use clap::Args;
use featcat_analysis::{crosstab::Dimension, filter::FilterState, table::SortKey};
use featcat_catalog::FilterKey;
use serde::Serialize;

use crate::{command::common::OutputArgs, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct GlossaryArg {
    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Term {
    term: &'static str,
    definition: &'static str,
}

const DEFINITIONS: [Term; 8] = [
    Term {
        term: "Market",
        definition: "The country or region a product is offered in: US, Mexico, Philippines, India",
    },
    Term {
        term: "Product",
        definition: "What a market offers, such as Cash Advance, Thrive or Credit Card",
    },
    Term {
        term: "Credit Policy (CP)",
        definition: "Decisioning rules combining model scores, thresholds and business rules; the policy decides, not the model",
    },
    Term {
        term: "ML Model",
        definition: "Scoring engine producing a risk score between 0 and 1, lower is better",
    },
    Term {
        term: "Feature",
        definition: "One input signal of a model: bank data, credit bureau, device signals or platform behavior",
    },
    Term {
        term: "SHAP Rank",
        definition: "Importance rank of a feature within its model, 1 being the most important",
    },
    Term {
        term: "Top 20/50",
        definition: "Flag marking features among the most important of their model",
    },
    Term {
        term: "Coverage Gap",
        definition: "A market and category pair with too few features to support decisioning",
    },
];

const HIERARCHY: [&str; 5] = ["Market", "Product", "Credit Policy", "ML Model", "Features"];

#[derive(Debug, Clone, Copy, Serialize)]
struct KeyLabel {
    key: &'static str,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct GlossaryView {
    definitions: &'static [Term],
    hierarchy: &'static [&'static str],
    filter_keys: Vec<KeyLabel>,
    sort_columns: Vec<KeyLabel>,
    dimensions: Vec<KeyLabel>,
}

impl GlossaryView {
    fn new() -> Self {
        Self {
            definitions: &DEFINITIONS,
            hierarchy: &HIERARCHY,
            filter_keys: FilterKey::ALL
                .into_iter()
                .map(|key| KeyLabel {
                    key: key.as_str(),
                    label: key.label(),
                })
                .collect(),
            sort_columns: SortKey::ALL
                .into_iter()
                .map(|key| KeyLabel {
                    key: key.as_str(),
                    label: key.label(),
                })
                .collect(),
            dimensions: Dimension::ALL
                .into_iter()
                .map(|dim| KeyLabel {
                    key: dim.as_str(),
                    label: dim.label(),
                })
                .collect(),
        }
    }
}

pub(crate) fn run(arg: &GlossaryArg) -> anyhow::Result<()> {
    let view = GlossaryView::new();

    if arg.output.is_json() {
        return arg
            .output
            .save("glossary", 0, &FilterState::default(), &view);
    }

    util::print_title("Glossary");
    for term in view.definitions {
        println!("  {:<20} {}", term.term, term.definition);
    }
    println!();

    println!("Hierarchy: {}", view.hierarchy.join(" > "));
    println!();

    print_keys("Filter Keys (--filter KEY=VALUE)", &view.filter_keys);
    print_keys("Sort Columns (--sort)", &view.sort_columns);
    print_keys("Cross-Tab Dimensions (--dimension)", &view.dimensions);

    Ok(())
}

fn print_keys(title: &str, keys: &[KeyLabel]) {
    println!("{title}:");
    for entry in keys {
        println!("  {:<20} {}", entry.key, entry.label);
    }
    println!();
}
