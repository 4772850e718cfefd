use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "basketlens",
    about = "Funnel conversion and basket-affinity analytics"
)]
pub struct Cli {
    /// Config file (defaults to ./basketlens.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and print the strategy report
    Report {
        #[command(flatten)]
        inputs: Inputs,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Print the basket-affinity table
    Affinity {
        /// Order-line export (CSV)
        #[arg(long)]
        orders: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Print the segment table for landing pages
    Segments {
        /// Funnel export (CSV)
        #[arg(long)]
        funnel: PathBuf,
        /// Only pages in this segment (e.g. "Checkout Leaker")
        #[arg(long)]
        segment: Option<String>,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Show how titles and paths normalize to join keys, and the match counts
    Keys {
        #[command(flatten)]
        inputs: Inputs,
        #[command(flatten)]
        tuning: Tuning,
    },
}

#[derive(Args)]
pub struct Inputs {
    /// Funnel export (CSV)
    #[arg(long)]
    pub funnel: PathBuf,
    /// Order-line export (CSV)
    #[arg(long)]
    pub orders: PathBuf,
}

#[derive(Args, Default)]
pub struct Tuning {
    #[arg(long)]
    pub min_pair_count: Option<u64>,
    /// Pair count a checkout upsell or post-purchase row must reach
    #[arg(long)]
    pub min_candidate_pair_count: Option<u64>,
    #[arg(long)]
    pub min_cart_additions: Option<u64>,
    /// Completion rate (%) a checkout upsell page must exceed
    #[arg(long)]
    pub min_completion_rate: Option<f64>,
    /// Abandonment rate (%) a post-purchase page must exceed
    #[arg(long)]
    pub min_abandonment_rate: Option<f64>,
    #[arg(long)]
    pub min_sessions: Option<u64>,
    #[arg(long)]
    pub aov: Option<f64>,
    /// Target recovery rate (%)
    #[arg(long)]
    pub recovery_rate: Option<f64>,
}

impl From<&Tuning> for ConfigOverrides {
    fn from(t: &Tuning) -> Self {
        ConfigOverrides {
            min_pair_count: t.min_pair_count,
            min_pair_count_for_candidates: t.min_candidate_pair_count,
            min_cart_additions_for_upsell: t.min_cart_additions,
            min_completion_rate_for_upsell: t.min_completion_rate,
            min_abandonment_rate_for_post_purchase: t.min_abandonment_rate,
            min_sessions_threshold: t.min_sessions,
            average_order_value: t.aov,
            target_recovery_rate: t.recovery_rate,
        }
    }
}

impl Commands {
    pub fn tuning(&self) -> &Tuning {
        match self {
            Commands::Report { tuning, .. }
            | Commands::Affinity { tuning, .. }
            | Commands::Segments { tuning, .. }
            | Commands::Keys { tuning, .. } => tuning,
        }
    }
}
