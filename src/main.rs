//! Plan Advisor CLI
//!
//! Command-line access to the calculators, the plan filter, plan comparison
//! and poster matching.
//!
//! # Usage
//!
//! ```bash
//! plan_advisor premium --age 30 --sum-assured 500000 --term 20
//! plan_advisor roi --premium 25000 --term 15 --age 35
//! plan_advisor filter --min-age 62 --max-age 70 --goal pension
//! plan_advisor compare jivan-umang jivan-labh --language mr
//! plan_advisor match-files LIC-Jeevan-Umang.jpg LIC-Jeevan-Umang-2.jpg --upload
//! ```

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use plan_advisor::backend::{InMemoryBackend, PlanBackend};
use plan_advisor::calculators::{MaturityQuery, PremiumQuery};
use plan_advisor::catalog::Catalog;
use plan_advisor::comparison::{ComparisonTable, PlanSelection, MIN_COMPARED_PLANS};
use plan_advisor::filter::{filter_plans, PlanFilterCriteria};
use plan_advisor::i18n::{format_inr, labels, plan_name, Language};
use plan_advisor::matching::build_best_candidate_mapping;
use plan_advisor::plan::{Plan, PosterImage};
use plan_advisor::quotes::{maturity_quotes, premium_quotes, rank_by_roi};
use plan_advisor::upload::{CannedPosterText, UploadQueue};
use plan_advisor::{AdvisorConfig, Band, FinancialGoal, ValidationErrors};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plan_advisor")]
#[command(version = "0.1.0")]
#[command(about = "Premium, maturity and ROI calculators over the plan catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display language: mr, hi or en
    #[arg(long, short = 'l', global = true)]
    language: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Premium at every payment frequency for each eligible plan
    Premium {
        #[arg(long)]
        age: String,
        #[arg(long)]
        sum_assured: String,
        #[arg(long)]
        term: String,
    },

    /// Projected maturity benefit for each eligible plan
    Maturity {
        #[arg(long)]
        premium: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        age: String,
    },

    /// Eligible plans ranked by effective annual return
    Roi {
        #[arg(long)]
        premium: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        age: String,
    },

    /// Plans matching age range, monthly budget and goals
    Filter {
        #[arg(long, requires = "max_age")]
        min_age: Option<u32>,
        #[arg(long, requires = "min_age")]
        max_age: Option<u32>,
        #[arg(long, requires = "max_budget")]
        min_budget: Option<f64>,
        #[arg(long, requires = "min_budget")]
        max_budget: Option<f64>,
        /// savings, pension, moneyBack or guaranteedReturns; repeatable
        #[arg(long = "goal")]
        goals: Vec<String>,
    },

    /// Side-by-side comparison of two or more plans
    Compare {
        /// Plan identifiers, e.g. jivan-umang
        plan_ids: Vec<String>,
        /// Compare every plan in the catalog
        #[arg(long)]
        all: bool,
    },

    /// Map poster file names to plan titles, picking one file per plan
    MatchFiles {
        files: Vec<PathBuf>,
        /// Upload the chosen posters into an in-memory store and report
        #[arg(long)]
        upload: bool,
    },

    /// List the plan catalog
    Plans,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config =
        AdvisorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(code) = &cli.language {
        config.language = code.parse().context("Invalid --language")?;
    }

    match cli.command {
        Commands::MatchFiles { files, upload } => match_files(&files, upload),
        command => run(command, &config),
    }
}

fn run(command: Commands, config: &AdvisorConfig) -> Result<()> {
    let catalog = config.load_catalog().with_context(|| {
        format!("Failed to load catalog from {}", config.catalog_dir.display())
    })?;
    let plans = config.load_plans().with_context(|| {
        format!("Failed to load plans from {}", config.catalog_dir.display())
    })?;
    let language = config.language;

    match command {
        Commands::Premium { age, sum_assured, term } => {
            let query = PremiumQuery::from_form(&age, &sum_assured, &term)?;
            check(query.validate(&config.limits))?;
            print_premiums(&catalog, &plans, &query, language);
        }
        Commands::Maturity { premium, term, age } => {
            let query = MaturityQuery::from_form(&premium, &term, &age)?;
            check(query.validate(&config.limits))?;
            print_maturities(&catalog, &plans, &query, language);
        }
        Commands::Roi { premium, term, age } => {
            let query = MaturityQuery::from_form(&premium, &term, &age)?;
            check(query.validate(&config.limits))?;
            print_roi(&catalog, &plans, &query, language);
        }
        Commands::Filter { min_age, max_age, min_budget, max_budget, goals } => {
            let mut criteria = PlanFilterCriteria::default();
            if let (Some(min), Some(max)) = (min_age, max_age) {
                criteria = criteria.with_age_range(min, max);
            }
            if let (Some(min), Some(max)) = (min_budget, max_budget) {
                criteria = criteria.with_budget_range(min, max);
            }
            let goals = goals
                .iter()
                .map(|g| g.parse::<FinancialGoal>())
                .collect::<plan_advisor::Result<Vec<_>>>()?;
            criteria = criteria.with_goals(&goals);

            let matches = filter_plans(&catalog, &criteria);
            println!("{} of {} plans match", matches.len(), catalog.profiles().len());
            for id in matches {
                let fallback = plans.iter().find(|p| p.id == id).map_or(id, |p| p.name.as_str());
                println!("  {:<16} {}", id, plan_name(id, fallback, language));
            }
        }
        Commands::Compare { plan_ids, all } => {
            let mut selection = PlanSelection::new();
            if all {
                selection.select_all(&plans);
            }
            for id in &plan_ids {
                if !plans.iter().any(|p| &p.id == id) {
                    bail!("Unknown plan: {}", id);
                }
                if !selection.is_selected(id) {
                    selection.toggle(id);
                }
            }
            if selection.len() < MIN_COMPARED_PLANS {
                bail!("{}", labels::MINIMUM_TWO_PLANS.get(language));
            }
            let table = selection.compare(&plans, language)?;
            print_comparison(&table, language);
        }
        Commands::Plans => print_plans(&catalog, &plans, language),
        Commands::MatchFiles { files, upload } => match_files(&files, upload)?,
    }

    Ok(())
}

fn check(result: std::result::Result<(), ValidationErrors>) -> Result<()> {
    if let Err(errors) = result {
        for (field, message) in errors.iter() {
            eprintln!("  {}: {}", field, message);
        }
        bail!("Invalid input ({} field errors)", errors.len());
    }
    Ok(())
}

fn print_premiums(catalog: &Catalog, plans: &[Plan], query: &PremiumQuery, language: Language) {
    let quotes = premium_quotes(catalog, plans, query);
    println!(
        "{:<28} {:>14} {:>14} {:>14} {:>14}",
        labels::PLAN_NAME.get(language),
        labels::MONTHLY_PREMIUM.get(language),
        labels::QUARTERLY_PREMIUM.get(language),
        labels::HALF_YEARLY_PREMIUM.get(language),
        labels::ANNUAL_PREMIUM.get(language),
    );
    println!("{}", "-".repeat(88));
    for quote in &quotes {
        let r = &quote.result;
        println!(
            "{:<28} {:>14} {:>14} {:>14} {:>14}{}",
            plan_name(&quote.plan_id, &quote.plan_name, language),
            format_inr(r.monthly),
            format_inr(r.quarterly),
            format_inr(r.half_yearly),
            format_inr(r.annual),
            if r.basis.is_estimated() { " *" } else { "" },
        );
    }
    print_footer(quotes.len(), quotes.iter().any(|q| q.result.basis.is_estimated()));
}

fn print_maturities(catalog: &Catalog, plans: &[Plan], query: &MaturityQuery, language: Language) {
    let quotes = maturity_quotes(catalog, plans, query);
    println!(
        "{:<28} {:>14} {:>16} {:>14} {:>14}",
        labels::PLAN_NAME.get(language),
        labels::SUM_ASSURED.get(language),
        labels::GUARANTEED_ADDITIONS.get(language),
        labels::BONUSES.get(language),
        labels::MATURITY_BENEFITS.get(language),
    );
    println!("{}", "-".repeat(90));
    for quote in &quotes {
        let r = &quote.result;
        println!(
            "{:<28} {:>14} {:>16} {:>14} {:>14}{}",
            plan_name(&quote.plan_id, &quote.plan_name, language),
            format_inr(r.sum_assured),
            format_inr(r.guaranteed_additions),
            format_inr(r.bonuses),
            format_inr(r.total_maturity),
            if r.basis.is_estimated() { " *" } else { "" },
        );
    }
    print_footer(quotes.len(), quotes.iter().any(|q| q.result.basis.is_estimated()));
}

fn print_roi(catalog: &Catalog, plans: &[Plan], query: &MaturityQuery, language: Language) {
    let ranked = rank_by_roi(catalog, plans, query);
    println!(
        "{:>3} {:<28} {:>14} {:>14} {:>14} {:>9} {:>9}",
        "#", labels::PLAN_NAME.get(language), "Paid", "Maturity", "Net Gain", "ROI %", "IRR %"
    );
    println!("{}", "-".repeat(97));
    for (rank, quote) in ranked.iter().enumerate() {
        let r = &quote.result;
        let irr = r.money_weighted_return.map_or_else(
            || labels::NOT_AVAILABLE.get(language).to_string(),
            |v| format!("{:.2}", v),
        );
        println!(
            "{:>3} {:<28} {:>14} {:>14} {:>14} {:>9.2} {:>9}",
            rank + 1,
            plan_name(&quote.plan_id, &quote.plan_name, language),
            format_inr(r.total_premiums_paid),
            format_inr(r.maturity_benefits),
            format_inr(r.net_gain),
            r.effective_annual_roi,
            irr,
        );
    }
    print_footer(ranked.len(), false);
}

fn print_footer(count: usize, any_estimated: bool) {
    if count == 0 {
        println!("No plan accepts this age and term");
    }
    if any_estimated {
        println!("\n* estimated from standard rates; published tables not available");
    }
}

fn print_comparison(table: &ComparisonTable, language: Language) {
    let na = labels::NOT_AVAILABLE.get(language);
    for row in &table.rows {
        println!("{}", row.name);
        println!("  {}", row.description);
        match &row.sample_premium {
            Some(p) => println!(
                "  {}: {} {} | {} {} | {} {}",
                labels::SAMPLE_PREMIUM.get(language),
                labels::AGE.get(language),
                p.age,
                labels::ANNUAL.get(language),
                format_inr(p.annual),
                labels::MONTHLY.get(language),
                format_inr(p.monthly),
            ),
            None => println!("  {}: {}", labels::SAMPLE_PREMIUM.get(language), na),
        }
        match &row.sample_maturity {
            Some(m) => println!(
                "  {}: {} {} | {} {} | {} {}",
                labels::SAMPLE_MATURITY.get(language),
                labels::TERM.get(language),
                m.term,
                labels::SUM_ASSURED.get(language),
                format_inr(m.sum_assured),
                labels::BONUS.get(language),
                format_inr(m.bonus),
            ),
            None => println!("  {}: {}", labels::SAMPLE_MATURITY.get(language), na),
        }
        let amount = |v: Option<f64>| v.map_or_else(|| na.to_string(), format_inr);
        println!(
            "  {}: {} {} | {} {}",
            labels::RISK_COVER.get(language),
            labels::NATURAL_DEATH.get(language),
            amount(row.natural_death_benefit),
            labels::ACCIDENTAL_DEATH.get(language),
            amount(row.accidental_death_benefit),
        );
        println!();
    }
}

fn print_plans(catalog: &Catalog, plans: &[Plan], language: Language) {
    println!(
        "{:<16} {:<28} {:>9} {:>9}",
        "ID",
        labels::PLAN_NAME.get(language),
        labels::AGE.get(language),
        labels::TERM.get(language)
    );
    println!("{}", "-".repeat(65));
    for plan in plans {
        let band = |b: Option<Band<u32>>| {
            b.map_or_else(|| "-".to_string(), |b| format!("{}-{}", b.min, b.max))
        };
        println!(
            "{:<16} {:<28} {:>9} {:>9}",
            plan.id,
            plan_name(&plan.id, &plan.name, language),
            band(catalog.age_band(&plan.id)),
            band(catalog.term_band(&plan.id)),
        );
    }
}

fn match_files(files: &[PathBuf], upload: bool) -> Result<()> {
    let names: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    if names.is_empty() {
        bail!("No files given");
    }

    let mapping = build_best_candidate_mapping(&names);
    println!("{:<24} Chosen file", "Plan");
    println!("{}", "-".repeat(60));
    for (title, file) in mapping.iter() {
        println!("{:<24} {}", title, file);
    }

    if !upload {
        return Ok(());
    }

    let mut posters = Vec::with_capacity(files.len());
    for path in files {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        posters.push(PosterImage::new(name, bytes));
    }

    let backend = InMemoryBackend::new(Vec::new()).with_admin();
    let mut queue = UploadQueue::new("cli");
    queue.add_files(posters);
    let report = queue.upload_all(&backend, &CannedPosterText, Utc::now())?;

    println!();
    for done in &report.uploaded {
        println!("Uploaded {} as {} ({})", done.title, done.plan_id, done.file_name);
    }
    for failed in &report.failed {
        println!("Failed {} ({}): {}", failed.title, failed.file_name, failed.reason);
    }
    println!("{} plan entries stored", backend.get_plan_entries(usize::MAX)?.len());
    Ok(())
}
