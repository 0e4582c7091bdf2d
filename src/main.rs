use clap::{Parser, ValueEnum};
use credit_simulator::{CreditPlan, CreditTerms, NumberFormat, Rounding, SimulatorError};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::process;
use tabled::{builder::Builder, Table};

/// Installment plan for a credit card purchase
#[derive(Parser)]
#[command(
    name = "credit-simulator",
    version,
    about = "Installment plan for a credit card purchase",
    long_about = "Splits the purchase into equal capital installments. The first installment \
                  carries no interest, the second bills two months of interest and the rest \
                  bill one month on the outstanding balance."
)]
struct Cli {
    /// Total amount financed, e.g. 1.000.000
    principal: String,

    /// Number of monthly installments
    installments: u32,

    /// Monthly interest rate in percent, e.g. 2,5
    #[arg(allow_hyphen_values = true)]
    rate: String,

    /// Separator convention for amounts and rates
    #[arg(long, value_enum, default_value = "es")]
    locale: Locale,

    /// Round so that capital and interest add up to each payment
    #[arg(long)]
    reconcile: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Locale {
    Es,
    En,
}

impl Locale {
    fn number_format(self) -> NumberFormat {
        match self {
            Locale::Es => NumberFormat::es(),
            Locale::En => NumberFormat::en(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level.into()).init() {
        eprintln!("warning: logger not initialised: {}", e);
    }

    let fmt = cli.locale.number_format();
    match build_plan(&cli, &fmt) {
        Ok(plan) => {
            match cli.output {
                OutputFormat::Table => print_table(&plan, &fmt),
                OutputFormat::Plain => plan.show_plan(),
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn build_plan(cli: &Cli, fmt: &NumberFormat) -> Result<CreditPlan, SimulatorError> {
    let principal = fmt.parse(&cli.principal)?;
    let rate = fmt.parse(&cli.rate)?;
    let rounding = if cli.reconcile {
        Rounding::Reconciled
    } else {
        Rounding::Legacy
    };

    info!(
        "principal {}, {} installments, monthly rate {}%, {:?} rounding",
        principal, cli.installments, rate, rounding
    );
    CreditPlan::new(CreditTerms::new(principal, cli.installments, rate).with_rounding(rounding))
}

fn print_table(plan: &CreditPlan, fmt: &NumberFormat) {
    let money = |amt: f64| format!("${}", fmt.format_amount(amt));

    let mut builder = Builder::default();
    builder.push_record(["Installment", "Payment", "Capital", "Interest", "Balance"]);
    for inst in plan.installments() {
        builder.push_record([
            inst.number.to_string(),
            money(inst.payment),
            money(inst.capital),
            money(inst.interest),
            money(inst.balance),
        ]);
    }
    println!("{}", Table::from(builder));
    println!(
        "\nTotal paid: {}, total interest: {}",
        money(plan.total_paid()),
        money(plan.total_interest())
    );
}

// verifies that the public types can cross thread boundaries
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<credit_simulator::Installment>();
    is_normal::<CreditPlan>();
    is_normal::<CreditTerms>();
    is_normal::<SimulatorError>();
}

#[test]
fn oversized_installment_count_is_rejected() {
    let cli = Cli::try_parse_from(["credit-simulator", "1000", "4294967295", "2"]).unwrap();
    let fmt = cli.locale.number_format();
    assert!(matches!(
        build_plan(&cli, &fmt),
        Err(SimulatorError::InvalidInput { ref field, .. }) if field == "installments"
    ));
}
