//! Finance Calculator CLI
//!
//! Command-line interface for running calculators and formatting helpers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finance_calculator::format::{format_compact, title_case};
use finance_calculator::{
    amount_in_words, format_indian_groups, format_rupees, to_indian_words, CalculationResult,
    Metrics, ProductType, RawInputs, ScenarioRunner,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finance_calculator", version, about = "Indian financial calculators")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one calculator, e.g. `calc sip -i monthly_investment=5,000 -i rate=12 -i years=10`
    Calc {
        /// Product tag (sip, lumpsum, fd, rd, ppf, emi, cagr, retirement, swp, step-up-sip, sip-per-day, tax)
        product: ProductType,

        /// Input field as name=value; values may use Indian grouping
        #[arg(short, long = "input", value_parser = parse_field)]
        inputs: Vec<(String, String)>,

        /// Directory holding tax slab CSVs (built-in tables when omitted)
        #[arg(long)]
        tax_dir: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spell an amount in Indian-scale words
    Words { amount: String },

    /// Re-render a numeral with Indian digit grouping
    Format { raw: String },
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    Ok((field.trim().to_string(), value.to_string()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Calc {
            product,
            inputs,
            tax_dir,
            json,
        } => {
            let runner = match tax_dir {
                Some(dir) => ScenarioRunner::from_csv_path(&dir)
                    .with_context(|| format!("loading tax tables from {}", dir.display()))?,
                None => ScenarioRunner::new(),
            };
            let inputs: RawInputs = inputs.into_iter().collect();
            let result = runner.run(product, &inputs)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result)?;
            }
        }
        Command::Words { amount } => {
            let value = finance_calculator::parse_formatted_number(&amount)
                .with_context(|| format!("'{amount}' is not a number"))?;
            println!("{}", title_case(&to_indian_words(value)?));
            println!("{}", amount_in_words(value)?);
        }
        Command::Format { raw } => {
            println!("{}", format_indian_groups(&raw));
        }
    }

    Ok(())
}

fn print_result(result: &CalculationResult) -> Result<()> {
    println!("Finance Calculator v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Product: {}", result.product);
    if result.degenerate {
        println!("  (zero rate or zero duration)");
    }
    println!();

    if !result.series.is_empty() {
        let period_label = match result.product {
            ProductType::Retirement => "Age",
            _ => "Year",
        };
        println!("{:>5} {:>16} {:>16} {:>16}", period_label, "Invested", "Value", "Gain");
        println!("{}", "-".repeat(56));
        for point in &result.series {
            println!(
                "{:>5} {:>16} {:>16} {:>16}",
                point.period,
                format_rupees(point.invested),
                format_rupees(point.value),
                format_rupees(point.gain()),
            );
        }
        println!();
    }

    println!("Summary:");
    println!("  Invested: {}", format_rupees(result.invested_amount));
    println!(
        "  Maturity: {} ({})",
        format_rupees(result.maturity_amount),
        format_compact(result.maturity_amount)
    );
    println!("  Profit:   {}", format_rupees(result.profit));

    match &result.metrics {
        Metrics::Loan(m) => {
            println!("  EMI: {} for {} months", format_rupees(m.emi), m.tenure_months);
            println!("  Total interest: {}", format_rupees(m.total_interest));
        }
        Metrics::Cagr(m) => {
            println!("  CAGR: {:.2}%", m.cagr_percent);
            println!("  Absolute return: {:.2}%", m.absolute_return_percent);
        }
        Metrics::Retirement(m) => {
            println!(
                "  In today's money: {} ({} years away)",
                format_rupees(m.inflation_adjusted_corpus),
                m.years_to_retirement
            );
        }
        Metrics::Withdrawal(m) => {
            println!("  Total withdrawn: {}", format_rupees(m.total_withdrawn));
            println!("  Final balance: {}", format_rupees(m.final_balance));
            if let Some(month) = m.depleted_in_month {
                println!("  Corpus runs out in month {}", month);
            }
        }
        Metrics::StepUp(m) => {
            println!("  Final monthly SIP: {}", format_rupees(m.final_monthly_sip));
        }
        Metrics::Goal(m) => {
            println!("  Monthly SIP needed: {}", format_rupees(m.monthly_investment));
            println!("  Daily saving: {}", format_rupees(m.daily_saving));
        }
        Metrics::Tax(m) => {
            println!("  Regime: {}", m.regime);
            println!("  Taxable income: {}", format_rupees(m.taxable_income));
            for slab in m.breakdown.iter().filter(|s| s.tax > 0.0) {
                println!(
                    "    {:>5.1}% on {}: {}",
                    slab.rate_percent,
                    format_rupees(slab.taxable_amount),
                    format_rupees(slab.tax)
                );
            }
            println!("  Cess: {}", format_rupees(m.cess));
            println!("  Total tax: {}", format_rupees(m.total_tax));
            println!("  Effective rate: {:.2}%", m.effective_rate_percent);
        }
        Metrics::Plain => {}
    }

    let words = amount_in_words(result.maturity_amount.abs())?;
    if !words.is_empty() {
        println!("\n  {}", words);
    }

    Ok(())
}
