use std::io::{self, Write};

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Envelope;

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_envelope(&mut out, envelope, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn write_envelope<W: Write>(
    out: &mut W,
    envelope: &Envelope,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(out, envelope)?,
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, envelope: &Envelope) -> Result<(), CliError> {
    let meta = &envelope.meta;
    writeln!(out, "request_id  : {}", meta.request_id)?;
    writeln!(out, "generated_at: {}", meta.generated_at)?;
    if let Some(market) = &meta.market {
        writeln!(out, "market      : {market}")?;
    }
    if let Some(origin) = &meta.origin {
        writeln!(out, "origin      : {origin}")?;
    }
    writeln!(out, "latency_ms  : {}", meta.latency_ms)?;

    if !meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if let Some(stocks) = envelope.data.get("stocks").and_then(Value::as_array) {
        write_rows(
            out,
            &["TICKER", "NAME", "P/E", "P/B", "D/E", "YIELD%", "PEG"],
            stocks.iter().map(|stock| {
                vec![
                    text(stock, "ticker"),
                    text(stock, "name"),
                    ratio(stock, "priceToEarnings"),
                    ratio(stock, "priceToBook"),
                    ratio(stock, "debtToEquity"),
                    ratio(stock, "dividendYieldPercent"),
                    ratio(stock, "priceEarningsToGrowth"),
                ]
            }),
        )?;
    } else if let Some(segments) = envelope.data.get("segments").and_then(Value::as_array) {
        write_rows(
            out,
            &["MARKET", "VENUE", "MIC", "CURRENCY", "NAME"],
            segments.iter().map(|segment| {
                vec![
                    text(segment, "market"),
                    text(segment, "venueCode"),
                    text(segment, "marketIdentifierCode"),
                    text(segment, "currency"),
                    text(segment, "displayName"),
                ]
            }),
        )?;
    } else {
        writeln!(out, "data:")?;
        let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
        for line in pretty_data.lines() {
            writeln!(out, "  {line}")?;
        }
    }

    Ok(())
}

fn write_rows<W, I>(out: &mut W, header: &[&str], rows: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = Vec<String>>,
{
    let rows: Vec<Vec<String>> = rows.collect();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = header.iter().map(|h| (*h).to_owned()).collect();
    writeln!(out)?;
    write_row(out, &header, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    writeln!(out, "({} rows)", rows.len())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

fn text(value: &Value, field: &str) -> String {
    match value.get(field).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => String::from("-"),
    }
}

fn ratio(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_f64)
        .map_or_else(|| String::from("-"), |number| format!("{number:.2}"))
}
