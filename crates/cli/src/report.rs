//! `dlens report` / `dlens validate`: load transactions, run the engine,
//! render the month table.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use discountlens_yoy::{
    InputFormat, MonthRow, TotalsRow, YearMetrics, YoyConfig, YoyError, YoyReport, TOTAL_LABEL,
};

use crate::CliError;

fn load_config(path: Option<&Path>) -> Result<YoyConfig, CliError> {
    let Some(path) = path else {
        return Ok(YoyConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    YoyConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))
}

fn input_err(e: YoyError) -> CliError {
    match e {
        YoyError::Io(msg) => CliError::io(msg),
        YoyError::ConfigParse(msg) | YoyError::ConfigValidation(msg) => CliError::config(msg),
        other => CliError::parse(other.to_string()),
    }
}

// Undecodable bytes are bad input, not a failed read.
fn read_err(path: &Path, e: std::io::Error) -> CliError {
    if e.kind() == std::io::ErrorKind::InvalidData {
        CliError::parse(format!("{} is not valid UTF-8: {e}", path.display()))
    } else {
        CliError::io(format!("cannot read {}: {e}", path.display()))
    }
}

pub fn cmd_report(
    input: PathBuf,
    config_path: Option<PathBuf>,
    format: Option<InputFormat>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;

    let format = format.or_else(|| InputFormat::from_path(&input)).ok_or_else(|| {
        CliError::usage(format!("cannot infer format of {}", input.display()))
            .with_hint("pass --format csv or --format json")
    })?;

    let data = std::fs::read_to_string(&input).map_err(|e| read_err(&input, e))?;
    let transactions = discountlens_yoy::load_transactions(&data, format, &config.columns)
        .map_err(|e| input_err(e).with_hint(format!("while loading {}", input.display())))?;

    log::info!("loaded {} transaction(s) from {}", transactions.len(), input.display());

    let report = discountlens_yoy::run(&config, &transactions);

    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }

        if json_output {
            println!("{json_str}");
        }
    }

    if !json_output {
        print!("{}", render_table(&report));
    }

    let m = &report.meta;
    eprintln!(
        "{} vs {}: {} transactions, {} discounted, {} skipped (bad date)",
        m.baseline_year, m.current_year, m.input_count, m.discounted_count, m.skipped_dates,
    );

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&config_path))?;
    eprintln!(
        "valid: {} vs {}, date column '{}'{}",
        config.baseline_year,
        config.current_year,
        config.columns.payment_date,
        if config.filters.is_some() { " (filters ignored)" } else { "" },
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Signed one-decimal percentage: `+12.5%`, `-4.0%`, `0.0%`.
pub fn format_change(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

fn format_optional_change(value: Option<f64>) -> String {
    value.map(format_change).unwrap_or_else(|| "N/A".into())
}

fn write_row(out: &mut String, label: &str, b: &YearMetrics, c: &YearMetrics, changes: [f64; 3]) {
    let [tx_change, discount_change, atv_change] = changes.map(format_change);
    let _ = writeln!(
        out,
        "{label:<10} {:>8} {:>8} {tx_change:>9} {:>12.2} {:>12.2} {discount_change:>9} {:>10.2} {:>10.2} {atv_change:>9}",
        b.transactions, c.transactions, b.discount, c.discount, b.atv, c.atv,
    );
}

fn write_month(out: &mut String, row: &MonthRow) {
    let ch = &row.changes;
    write_row(
        out,
        row.month.name(),
        &row.baseline,
        &row.current,
        [ch.transaction_change, ch.discount_change, ch.atv_change],
    );
}

fn write_totals(out: &mut String, totals: &TotalsRow) {
    let ch = &totals.changes;
    write_row(
        out,
        TOTAL_LABEL,
        &totals.baseline,
        &totals.current,
        [ch.transaction_change, ch.discount_change, ch.atv_change],
    );
}

pub fn render_table(report: &YoyReport) -> String {
    let (b, c) = (report.meta.baseline_year, report.meta.current_year);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<10} {:>8} {:>8} {:>9} {:>12} {:>12} {:>9} {:>10} {:>10} {:>9}",
        "Month",
        format!("{b} Tx"),
        format!("{c} Tx"),
        "Tx Chg",
        format!("{b} Disc"),
        format!("{c} Disc"),
        "Disc Chg",
        format!("{b} ATV"),
        format!("{c} ATV"),
        "ATV Chg",
    );
    let _ = writeln!(out, "{}", "-".repeat(107));
    for row in &report.rows {
        write_month(&mut out, row);
    }
    let _ = writeln!(out, "{}", "-".repeat(107));
    write_totals(&mut out, &report.totals);

    let s = &report.summary;
    let _ = writeln!(
        out,
        "\n{b} discount: {:.2}  {c} discount: {:.2}  change: {}  revenue impact: {:.2}",
        s.discount_baseline,
        s.discount_current,
        format_optional_change(s.discount_change),
        s.revenue_impact,
    );
    out
}
