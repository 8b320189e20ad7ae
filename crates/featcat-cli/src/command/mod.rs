use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    explore::ExploreArg, gaps::GapsArg, glossary::GlossaryArg, propose::ProposeArg,
    summary::SummaryArg, taxonomy::TaxonomyArg,
};

mod common;
mod explore;
mod gaps;
mod glossary;
mod propose;
mod summary;
mod taxonomy;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for info, -vv for debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// What view to produce
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Show KPIs, category distribution and the category hierarchy
    Summary(#[clap(flatten)] SummaryArg),
    /// Show the navigation trees built from the full dataset
    Taxonomy(#[clap(flatten)] TaxonomyArg),
    /// Show cross-tab coverage, coverage gaps, brainstorm targets and risk
    Gaps(#[clap(flatten)] GapsArg),
    /// List features with filtering, sorting and pagination
    Explore(#[clap(flatten)] ExploreArg),
    /// Print glossary definitions and filter keys
    Glossary(#[clap(flatten)] GlossaryArg),
    /// Propose a correction to a feature's taxonomy
    Propose(#[clap(flatten)] ProposeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);

    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Taxonomy(arg) => taxonomy::run(&arg)?,
        Mode::Gaps(arg) => gaps::run(&arg)?,
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Glossary(arg) => glossary::run(&arg)?,
        Mode::Propose(arg) => propose::run(&arg)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
