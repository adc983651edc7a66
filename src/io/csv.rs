use std::io;

use chrono::NaiveDate;
use thiserror::Error;

use crate::state::compute::{derived_line, format_triple, Aggregates};
use crate::state::row::{NumericColumn, NumericField, Row};

/// The fixed export header: index, date, unit, the eight measurement
/// columns, then the three derived columns.
pub const HEADERS: [&str; 14] = [
    "序号", "日期", "单位", "入库", "全灰", "内灰", "硫", "挥发", "粘结", "中煤", "矸石",
    "内灰合计", "挥发合计", "粘结合计",
];

const TOTALS_LABEL: &str = "合计";
const AVERAGES_LABEL: &str = "平均";
const PLACEHOLDER: &str = "—";

// Prepended so common spreadsheet readers detect UTF-8.
const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv write failed: {0}")]
    Io(#[from] io::Error),
    #[error("exported document is malformed: {0}")]
    Malformed(String),
}

/// Renders rows plus their aggregates as a BOM-prefixed, comma-delimited
/// document: header, one record per row, a totals row and an averages row.
pub fn build_csv(rows: &[Row], aggregates: &Aggregates) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for row in rows {
        let derived = format_triple(derived_line(row));
        let mut record = vec![row.display_index.to_string(), row.date.clone(), row.unit.clone()];
        for column in NumericColumn::ALL {
            record.push(row.numeric(column).raw().to_string());
        }
        record.push(derived.ash_internal);
        record.push(derived.volatile);
        record.push(derived.caking);
        writer.write_record(&record)?;
    }

    let totals = &aggregates.totals;
    let mut totals_record = vec![TOTALS_LABEL.to_string(), String::new(), String::new()];
    for column in NumericColumn::ALL {
        totals_record.push(totals.get(column).to_string());
    }
    totals_record.push(aggregates.derived_totals.ash_internal.to_string());
    totals_record.push(aggregates.derived_totals.volatile.to_string());
    totals_record.push(aggregates.derived_totals.caking.to_string());
    writer.write_record(&totals_record)?;

    let simple = format_triple(aggregates.simple_averages);
    let weighted = format_triple(aggregates.weighted_averages);
    writer.write_record([
        AVERAGES_LABEL,
        PLACEHOLDER,
        PLACEHOLDER,
        PLACEHOLDER,
        PLACEHOLDER,
        simple.ash_internal.as_str(),
        PLACEHOLDER,
        simple.volatile.as_str(),
        simple.caking.as_str(),
        PLACEHOLDER,
        PLACEHOLDER,
        weighted.ash_internal.as_str(),
        weighted.volatile.as_str(),
        weighted.caking.as_str(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    let body = String::from_utf8(bytes)
        .map_err(|_| ExportError::Malformed("csv output is not valid UTF-8".to_string()))?;
    Ok(format!("{BOM}{body}"))
}

/// Export filename for a given date, e.g. `原煤指标_2026-08-26.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("原煤指标_{}.csv", date.format("%Y-%m-%d"))
}

/// Reads the data rows back out of an exported document, restoring the raw
/// field text verbatim. The header and the totals/averages trailer are
/// skipped; derived columns are recomputable and therefore dropped.
pub fn parse_rows(content: &str) -> Result<Vec<Row>, ExportError> {
    let body = content.strip_prefix(BOM).unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let label = record.get(0).unwrap_or_default();
        if label == TOTALS_LABEL || label == AVERAGES_LABEL {
            break;
        }
        let display_index: u32 = label
            .parse()
            .map_err(|_| ExportError::Malformed(format!("bad row index '{label}'")))?;

        let mut row = Row::blank(display_index);
        row.date = record.get(1).unwrap_or_default().to_string();
        row.unit = record.get(2).unwrap_or_default().to_string();
        for (offset, column) in NumericColumn::ALL.into_iter().enumerate() {
            let raw = record.get(3 + offset).unwrap_or_default();
            row.set_numeric(column, NumericField::from_raw(raw));
        }
        rows.push(row);
    }
    Ok(rows)
}
