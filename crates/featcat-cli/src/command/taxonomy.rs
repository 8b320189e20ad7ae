use clap::Args;
use featcat_analysis::{
    filter::{FilterOptions, FilterState},
    taxonomy::{self, TaxonomyNode},
};
use featcat_catalog::FilterKey;
use serde::Serialize;

use crate::{
    command::common::{OutputArgs, SourceArgs},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct TaxonomyArg {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Also list the selectable values of every filter key
    #[arg(long)]
    pub options: bool,
}

#[derive(Debug, Serialize)]
struct TaxonomyView<'a> {
    #[serde(flatten)]
    structures: &'a taxonomy::TaxonomyStructures,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_options: Option<Vec<FilterKeyOptions<'a>>>,
}

#[derive(Debug, Serialize)]
struct FilterKeyOptions<'a> {
    key: FilterKey,
    values: &'a [String],
}

pub(crate) fn run(arg: &TaxonomyArg) -> anyhow::Result<()> {
    let catalog = arg.source.load()?;
    let features = catalog.features();
    let structures = taxonomy::build(features);
    let options = FilterOptions::from_features(features);

    if arg.output.is_json() {
        let view = TaxonomyView {
            structures: &structures,
            filter_options: arg.options.then(|| {
                FilterKey::ALL
                    .into_iter()
                    .map(|key| FilterKeyOptions {
                        key,
                        values: options.get(key),
                    })
                    .collect()
            }),
        };
        return arg
            .output
            .save("taxonomy", features.len(), &FilterState::default(), &view);
    }

    util::print_title("Feature Taxonomy");
    println!("Records: {}", features.len());
    println!(
        "SHAP rank range: {} - {}",
        structures.shap_range.min, structures.shap_range.max
    );
    println!();

    print_tree("By Category", &structures.by_category);
    print_tree("By Geo", &structures.by_geo);
    print_tree("By Product", &structures.by_product);
    print_tree("By Model", &structures.by_model);
    print_tree("By Model (geo > product > model)", &structures.by_model_grouped);
    print_tree("Top 20/50 Features", &structures.by_top_rank);

    if arg.options {
        println!("Filter Options:");
        for key in FilterKey::ALL {
            println!("  {} ({}):", key.label(), key.as_str());
            for value in options.get(key) {
                println!("    {value}");
            }
        }
    }

    Ok(())
}

fn print_tree(title: &str, nodes: &[TaxonomyNode]) {
    println!("{title}:");
    if nodes.is_empty() {
        println!("  (none)");
    }
    for node in nodes {
        print_node(node, 1);
    }
    println!();
}

fn print_node(node: &TaxonomyNode, level: usize) {
    let indent = "  ".repeat(level);
    let width = 44usize.saturating_sub(indent.len());
    println!(
        "{indent}{:<width$} {:>8}",
        util::truncate(&node.name, width),
        node.count
    );
    for child in node.children.iter().flatten() {
        print_node(child, level + 1);
    }
}
