use chrono::{DateTime, Utc};
use engine::{ComparisonResult, baseline_change_pct};

pub mod error;

pub use error::ExportError;

/// Which value columns the report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Normalized,
    Actual,
}

impl ExportMode {
    fn label(&self) -> &'static str {
        match self {
            ExportMode::Normalized => "Normalized (Base 100)",
            ExportMode::Actual => "Actual Values",
        }
    }
}

/// Caller-supplied presentation details for one report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub mode: ExportMode,
    pub fund_label: String,
    pub index_label: String,
}

/// Renders a comparison result as a delimited text report.
///
/// The report is a metadata block (title, generation timestamp, fund and
/// index labels, value-type line), a blank separator row, a header row, and
/// one data row per date. The performance columns are percentage changes
/// against index 0 of the exported series. Pure: no I/O and no clock read;
/// delivering the text is the caller's concern.
pub fn render_report(
    result: &ComparisonResult,
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    writer.write_record(["Performance Data Export"])?;
    writer.write_record(["Generated on", generated.as_str()])?;
    writer.write_record(["Fund", options.fund_label.as_str()])?;
    writer.write_record(["Index", options.index_label.as_str()])?;
    writer.write_record(["Value Type", options.mode.label()])?;
    // Two empty fields: a single empty field would be quoted by the writer,
    // which spreadsheet imports render as a literal "".
    writer.write_record(["", ""])?;

    let (fund_header, index_header) = match options.mode {
        ExportMode::Normalized => ("Fund (Normalized)", "Index (Normalized)"),
        ExportMode::Actual => ("Fund Value (₹)", "Index Value"),
    };
    writer.write_record([
        "Date",
        fund_header,
        index_header,
        "Fund Performance (%)",
        "Index Performance (%)",
    ])?;

    let (fund_values, index_values) = match options.mode {
        ExportMode::Normalized => (&result.fund_normalized, &result.index_normalized),
        ExportMode::Actual => (&result.fund_actual, &result.index_actual),
    };

    for (i, date) in result.dates.iter().enumerate() {
        let fund_perf = baseline_change_pct(fund_values[0], fund_values[i]);
        let index_perf = baseline_change_pct(index_values[0], index_values[i]);

        writer.write_record([
            date.to_string(),
            format_value(fund_values[i], options.mode, true),
            format_value(index_values[i], options.mode, false),
            format_performance(fund_perf),
            format_performance(index_perf),
        ])?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Renders a report stamped with the current UTC time.
pub fn render_report_now(
    result: &ComparisonResult,
    options: &ReportOptions,
) -> Result<String, ExportError> {
    render_report(result, options, Utc::now())
}

fn format_value(value: f64, mode: ExportMode, currency: bool) -> String {
    match mode {
        ExportMode::Normalized => format!("{value:.0}"),
        ExportMode::Actual if currency => format!("₹{value:.2}"),
        ExportMode::Actual => format!("{value:.2}"),
    }
}

fn format_performance(pct: Option<f64>) -> String {
    match pct {
        Some(pct) => format!("{pct:.2}%"),
        None => "N/A".to_string(),
    }
}
