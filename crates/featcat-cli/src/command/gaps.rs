use clap::Args;
use featcat_analysis::{
    crosstab::{self, CrossTab, Dimension},
    gap::{
        self, BrainstormSectionResult, COVERAGE_GAP_THRESHOLD, CoverageGap, GeoMatrix, KNOWN_GAPS,
        KnownGap, RiskBucket,
    },
};
use featcat_catalog::FilterKey;
use featcat_stats::heat::{self, HeatLevel};
use serde::Serialize;

use crate::{
    command::common::{self, FilterArgs, OutputArgs, SourceArgs},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct GapsArg {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[clap(flatten)]
    pub filter: FilterArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Row dimension of the cross-tab (geo, model_name or product_business)
    #[arg(long, default_value = "geo")]
    pub dimension: Dimension,

    /// Cells below this count are reported as coverage gaps
    #[arg(long, default_value_t = COVERAGE_GAP_THRESHOLD)]
    pub threshold: usize,

    /// Print the explore filters reproducing one cross-tab cell, as `ROW|CATEGORY`
    #[arg(long, value_name = "ROW|CATEGORY")]
    pub drill: Option<String>,
}

#[derive(Debug, Serialize)]
struct GapsView<'a> {
    crosstab: &'a CrossTab,
    geo_matrix: &'a GeoMatrix,
    coverage_gaps: &'a [CoverageGap],
    brainstorm: &'a [BrainstormSectionResult],
    risk: &'a [RiskBucket],
    known_gaps: &'a [KnownGap],
}

pub(crate) fn run(arg: &GapsArg) -> anyhow::Result<()> {
    let catalog = arg.source.load()?;
    let filters = arg.filter.to_state();
    let features = filters.apply(catalog.features());
    tracing::info!(matched = features.len(), total = catalog.len(), "applied filters");

    let crosstab = crosstab::build_matrix(&features, arg.dimension);
    let geo_matrix = GeoMatrix::build(&features);
    let coverage_gaps = geo_matrix.coverage_gaps(arg.threshold);
    let brainstorm = gap::brainstorm(&features);
    let risk = gap::risk_distribution(&features);

    if let Some(drill) = &arg.drill {
        let toggles = drill_down(&crosstab, drill)?;
        println!("{}", explore_command(&toggles));
        return Ok(());
    }

    if arg.output.is_json() {
        let view = GapsView {
            crosstab: &crosstab,
            geo_matrix: &geo_matrix,
            coverage_gaps: &coverage_gaps,
            brainstorm: &brainstorm,
            risk: &risk,
            known_gaps: &KNOWN_GAPS,
        };
        return arg.output.save("gaps", features.len(), &filters, &view);
    }

    util::print_title("Gap Analysis");
    common::print_active_filters(&filters, features.len(), catalog.len());
    println!();

    print_crosstab(&crosstab);
    println!();

    print_geo_matrix(&geo_matrix);
    println!();

    print_coverage_gaps(&coverage_gaps, arg.threshold);
    println!();

    print_brainstorm(&brainstorm);
    println!();

    print_risk(&risk);
    println!();

    print_known_gaps();

    Ok(())
}

fn drill_down(crosstab: &CrossTab, cell: &str) -> anyhow::Result<Vec<(FilterKey, String)>> {
    let (row, category) = cell
        .split_once('|')
        .ok_or_else(|| anyhow::anyhow!("Expected ROW|CATEGORY, got `{cell}`"))?;
    let (row, category) = (row.trim(), category.trim());
    let key = crosstab
        .rows
        .iter()
        .map(|r| &r.key)
        .find(|key| key.to_string() == row)
        .ok_or_else(|| anyhow::anyhow!("Row {row} not found in the {} cross-tab", crosstab.dimension))?;
    if !crosstab.categories.iter().any(|c| c == category) {
        anyhow::bail!("Category {category} not found in the cross-tab");
    }
    Ok(crosstab.drill_down(key, category))
}

fn explore_command(toggles: &[(FilterKey, String)]) -> String {
    let mut command = String::from("featcat explore");
    for (key, value) in toggles {
        command.push_str(&format!(" --filter '{}={value}'", key.as_str()));
    }
    command
}

const CELL_WIDTH: usize = 10;

fn print_crosstab(crosstab: &CrossTab) {
    let row_width = match crosstab.dimension {
        Dimension::ModelName => 36,
        Dimension::Geo | Dimension::ProductBusiness => 20,
    };
    println!(
        "Cross-Tab: {} x Primary Category",
        crosstab.dimension.label()
    );

    print!("  {:<row_width$}", crosstab.dimension.label());
    for category in &crosstab.categories {
        print!(" {:>CELL_WIDTH$}", util::truncate(category, CELL_WIDTH));
    }
    println!(" {:>CELL_WIDTH$}", "Total");
    print!("  ");
    util::print_separator(row_width + (crosstab.categories.len() + 1) * (CELL_WIDTH + 1));

    for row in &crosstab.rows {
        print!(
            "  {:<row_width$}",
            util::truncate(&row.key.to_string(), row_width)
        );
        for &count in &row.counts {
            let cell = format!("{count} {}", crosstab.heat_level(count).glyph());
            print!(" {cell:>CELL_WIDTH$}");
        }
        println!(" {:>CELL_WIDTH$}", row.total);
    }

    print!("  {:<row_width$}", "Total");
    for total in crosstab.column_totals() {
        print!(" {total:>w$}  ", w = CELL_WIDTH - 2);
    }
    println!(" {:>CELL_WIDTH$}", crosstab.grand_total());
}

fn print_geo_matrix(matrix: &GeoMatrix) {
    println!("Coverage Heatmap (geo x category):");
    print!("  {:<8}", "Geo");
    for category in matrix.categories {
        print!(" {:>CELL_WIDTH$}", util::truncate(category, CELL_WIDTH));
    }
    println!(" {:>CELL_WIDTH$}", "Total");
    print!("  ");
    util::print_separator(8 + (matrix.categories.len() + 1) * (CELL_WIDTH + 1));
    for row in &matrix.rows {
        print!("  {:<8}", row.geo);
        for count in row.counts {
            let cell = format!("{count} {}", matrix.heat_level(count).glyph());
            print!(" {cell:>CELL_WIDTH$}");
        }
        println!(" {:>CELL_WIDTH$}", row.total);
    }
    println!(
        "  Legend: '{}' >= {:.0}%, '{}' > {:.0}%, '{}' > {:.0}%, '{}' > 0% of the busiest cell",
        HeatLevel::Strong.glyph(),
        heat::STRONG_THRESHOLD * 100.0,
        HeatLevel::Medium.glyph(),
        heat::MEDIUM_THRESHOLD * 100.0,
        HeatLevel::Light.glyph(),
        heat::LIGHT_THRESHOLD * 100.0,
        HeatLevel::Faint.glyph(),
    );
}

fn print_coverage_gaps(gaps: &[CoverageGap], threshold: usize) {
    println!("Coverage Gaps (< {threshold} features):");
    if gaps.is_empty() {
        println!("  (none)");
    }
    for gap in gaps {
        println!("  {:<8} {:<22} {:>6}", gap.geo, gap.category, gap.count);
    }
}

fn print_brainstorm(sections: &[BrainstormSectionResult]) {
    println!("Brainstorm Comparison:");
    for section in sections {
        println!("  {} ({} features)", section.label, section.total);
        println!(
            "    {:<26} {:>8} {:>8} {:>9}  {}",
            "Category", "Current", "Planned", "Progress", "Status"
        );
        for result in &section.categories {
            let planned = result
                .category
                .planned
                .map_or_else(|| "-".to_owned(), |p| p.to_string());
            let progress = result
                .progress
                .map_or_else(|| "-".to_owned(), |p| format!("{p}%"));
            println!(
                "    {:<26} {:>8} {:>8} {:>9}  {}",
                util::truncate(result.category.label, 26),
                result.current,
                planned,
                progress,
                result.status.label()
            );
        }
    }
}

fn print_risk(buckets: &[RiskBucket]) {
    println!("Manipulation Risk:");
    for bucket in buckets {
        println!(
            "  {:<24} {:>8} {:>5}%",
            bucket.label, bucket.count, bucket.percentage
        );
    }
}

fn print_known_gaps() {
    println!("Known Gaps:");
    for known in &KNOWN_GAPS {
        println!(
            "  {:<6} {:<20} {:>4}  {}",
            known.geo, known.category, known.current, known.description
        );
        if let Some(toggles) = known.drill_down() {
            println!("         -> {}", explore_command(&toggles));
        }
    }
}

#[cfg(test)]
mod tests {
    use featcat_catalog::Feature;

    use super::*;

    fn feature(id: u64, geo: &str, category: &str) -> Feature {
        Feature {
            id,
            geo: geo.to_owned(),
            primary_category: category.to_owned(),
            ..Feature::default()
        }
    }

    #[test]
    fn test_drill_down_cell() {
        let features = vec![feature(1, "US", "Bureau"), feature(2, "PH", "Cash Flow")];
        let crosstab = crosstab::build_matrix(&features, Dimension::Geo);
        let toggles = drill_down(&crosstab, "US|Bureau").unwrap();
        assert_eq!(
            toggles,
            vec![
                (FilterKey::Geo, "US".to_owned()),
                (FilterKey::PrimaryCategory, "Bureau".to_owned()),
            ]
        );
        assert_eq!(
            explore_command(&toggles),
            "featcat explore --filter 'geo=US' --filter 'primary_category=Bureau'"
        );
        assert!(drill_down(&crosstab, "MX|Bureau").is_err());
        assert!(drill_down(&crosstab, "US|Device Data").is_err());
        assert!(drill_down(&crosstab, "US").is_err());
    }
}
