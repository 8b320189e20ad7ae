use clap::Args;
use featcat_analysis::summary::{self, CategoryBreakdown, HierarchyNode, NamedCount, Summary};

use crate::{
    command::common::{self, FilterArgs, OutputArgs, SourceArgs},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[clap(flatten)]
    pub filter: FilterArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Number of hierarchy levels to print (1-4)
    #[arg(long, default_value_t = 2)]
    pub depth: usize,

    /// Show the geo, model and product breakdown of one primary category
    #[arg(long)]
    pub category: Option<String>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let catalog = arg.source.load()?;
    let filters = arg.filter.to_state();
    let features = filters.apply(catalog.features());
    tracing::info!(matched = features.len(), total = catalog.len(), "applied filters");

    let summary = summary::summarize(&features);

    let breakdown = match &arg.category {
        Some(category) => Some(summary.breakdown(category).ok_or_else(|| {
            anyhow::anyhow!("Category {category} not found in the filtered features")
        })?),
        None => None,
    };

    if arg.output.is_json() {
        return arg
            .output
            .save("summary", features.len(), &filters, &summary);
    }

    util::print_title("Feature Catalog Summary");
    common::print_active_filters(&filters, features.len(), catalog.len());
    println!();

    print_kpis(&summary);
    println!();

    print_category_distribution(&summary);
    println!();

    print_hierarchy(&summary.tree, arg.depth);

    if let Some(breakdown) = breakdown {
        println!();
        print_breakdown(breakdown);
    }

    Ok(())
}

fn print_kpis(summary: &Summary) {
    let kpis = &summary.kpis;
    println!("Key Figures:");
    println!("  {:<22} {:>8}", "Total features", kpis.total);
    println!("  {:<22} {:>8}", "Models", kpis.models);
    println!("  {:<22} {:>8}", "Geos", kpis.geos);
    println!("  {:<22} {:>8}", "Primary categories", kpis.categories);
    println!("  {:<22} {:>7}%", "Top 20/50 features", kpis.top_pct);
}

fn print_category_distribution(summary: &Summary) {
    println!("Category Distribution:");
    println!("  {:<28} {:>8} {:>8}", "Category", "Count", "Share");
    print!("  ");
    util::print_separator(46);
    for share in &summary.category_bar {
        println!(
            "  {:<28} {:>8} {:>7.1}%",
            util::truncate(&share.name, 28),
            share.count,
            share.pct
        );
    }
}

fn print_hierarchy(tree: &[HierarchyNode], depth: usize) {
    println!("Hierarchy (category > type > subtype > L3):");
    for node in tree {
        print_node(node, 0, depth);
    }
}

fn print_node(node: &HierarchyNode, level: usize, depth: usize) {
    if level >= depth {
        return;
    }
    let indent = "  ".repeat(level + 1);
    let width = 40usize.saturating_sub(indent.len());
    println!(
        "{indent}{:<width$} {:>8} {:>7.1}%",
        util::truncate(&node.name, width),
        node.count,
        node.pct
    );
    for child in node.children.iter().flatten() {
        print_node(child, level + 1, depth);
    }
}

fn print_breakdown(breakdown: &CategoryBreakdown) {
    println!("{} ({} features)", breakdown.name, breakdown.total);
    print_counts("By geo", &breakdown.by_geo);
    print_counts("By model", &breakdown.by_model);
    print_counts("By product", &breakdown.by_product);
}

fn print_counts(title: &str, counts: &[NamedCount]) {
    println!("  {title}:");
    if counts.is_empty() {
        println!("    (none)");
    }
    for entry in counts {
        println!("    {:<30} {:>8}", util::truncate(&entry.name, 30), entry.count);
    }
}
