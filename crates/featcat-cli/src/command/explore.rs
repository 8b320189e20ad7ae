use clap::Args;
use featcat_analysis::table::{self, PAGE_SIZE, SortDirection, SortKey, SortOrder};
use featcat_catalog::{Feature, FilterKey};
use serde::Serialize;

use crate::{
    command::common::{self, FilterArgs, OutputArgs, SourceArgs},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct ExploreArg {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[clap(flatten)]
    pub filter: FilterArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Column to sort by
    #[arg(long, default_value = "feature_name")]
    pub sort: SortKey,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Features per page
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: usize,

    /// Print every field of one feature instead of the table
    #[arg(long, value_name = "ID")]
    pub show: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ExploreView<'a> {
    order: SortOrder,
    #[serde(flatten)]
    page: table::Page<'a, Feature>,
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let catalog = arg.source.load()?;
    let filters = arg.filter.to_state();

    if let Some(id) = arg.show {
        let feature = catalog
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Feature {id} not found"))?;
        if arg.output.is_json() {
            return arg.output.save("feature", 1, &filters, feature);
        }
        print_feature(feature);
        return Ok(());
    }

    let mut features = filters.apply(catalog.features());
    tracing::info!(matched = features.len(), total = catalog.len(), "applied filters");

    let direction = if arg.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let order = SortOrder::new(arg.sort, direction);
    table::sort_features(&mut features, order);
    let page = table::paginate(&features, arg.page.saturating_sub(1), arg.page_size);

    if arg.output.is_json() {
        let view = ExploreView { order, page };
        return arg.output.save("explore", features.len(), &filters, &view);
    }

    util::print_title("Feature Explorer");
    common::print_active_filters(&filters, features.len(), catalog.len());
    println!(
        "Sorted by {} ({})",
        order.key.label(),
        match order.direction {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    );
    println!();

    println!(
        "{:>6}  {:<6} {:<18} {:<16} {:<20} {:<32} {:>5}",
        "ID", "Geo", "Model", "Category", "Type", "Feature", "SHAP"
    );
    util::print_separator(111);
    for feature in page.items {
        let shap = feature
            .shap_rank
            .map_or_else(String::new, |rank| rank.to_string());
        println!(
            "{:>6}  {:<6} {:<18} {:<16} {:<20} {:<32} {:>5}",
            feature.id,
            util::truncate(&feature.geo, 6),
            util::truncate(&feature.model_name, 18),
            util::truncate(&feature.primary_category, 16),
            util::truncate(&feature.feature_type, 20),
            util::truncate(&feature.feature_name, 32),
            shap
        );
    }
    println!();

    if page.total_pages == 0 {
        println!("No features match the current filters");
    } else {
        println!(
            "Showing {}-{} of {} (page {} of {})",
            page.first,
            page.last,
            page.total,
            page.page + 1,
            page.total_pages
        );
        if page.has_next() {
            println!("Next: --page {}", page.page + 2);
        }
    }

    Ok(())
}

fn print_feature(feature: &Feature) {
    util::print_title(&format!("Feature {}", feature.id));
    println!("  {:<18} {}", "Name", feature.feature_name);
    println!("  {:<18} {}", "Description", feature.description);
    for key in FilterKey::ALL {
        println!("  {:<18} {}", key.label(), feature.field(key));
    }
    let shap = feature
        .shap_rank
        .map_or_else(|| "-".to_owned(), |rank| rank.to_string());
    println!("  {:<18} {}", "SHAP Rank", shap);
}
