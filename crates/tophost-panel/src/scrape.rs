//! DNS management page scraping
//!
//! The panel renders current record state as a table with the identifier
//! `dns-norm`, one row per record. Each row carries a stable identifier
//! (`tr-{id}`) and four sub-elements addressable by identifiers derived from
//! it: a value input (`valueo-{id}`), a priority input (`priorityo-{id}`), a
//! name cell (`name-{id}`) and a type cell (`type-{id}`).
//!
//! This module is the only code coupled to that markup. The contract is
//! all-or-nothing: a missing table, a missing row container, zero rows, or
//! any single malformed row fails the whole parse. Partial record lists are
//! never returned.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use tophost_core::error::{Error, Result};
use tophost_core::record::DnsRecord;

/// Prefix of every row identifier in the records table
const ROW_ID_PREFIX: &str = "tr-";

static RECORDS_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#dns-norm").expect("static selector"));
static ROW_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody").expect("static selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("static selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));

/// Parse the DNS management page into the current record list
///
/// Records are returned in document row order.
///
/// # Errors
///
/// `Error::ScrapeFailed` if the records table is absent, has no row
/// container, has zero rows, or any row is malformed.
pub fn parse_records(html: &str) -> Result<Vec<DnsRecord>> {
    let document = Html::parse_document(html);

    let table = document
        .select(&RECORDS_TABLE)
        .next()
        .ok_or_else(|| Error::scrape_failed("dns-norm table not found"))?;

    let body = table
        .select(&ROW_CONTAINER)
        .next()
        .ok_or_else(|| Error::scrape_failed("dns-norm table has no row container"))?;

    let rows: Vec<ElementRef<'_>> = body.select(&ROW).collect();
    if rows.is_empty() {
        return Err(Error::scrape_failed("dns-norm table has no rows"));
    }

    rows.into_iter().map(parse_row).collect()
}

/// Parse one table row into a record
fn parse_row(row: ElementRef<'_>) -> Result<DnsRecord> {
    let raw_id = row.value().id().unwrap_or("");
    let row_id = raw_id.strip_prefix(ROW_ID_PREFIX).unwrap_or(raw_id);
    if row_id.is_empty() {
        return Err(Error::scrape_failed("row without identifier"));
    }

    let value_input = descendant_by_id(row, &INPUT, &format!("valueo-{}", row_id));
    let priority_input = descendant_by_id(row, &INPUT, &format!("priorityo-{}", row_id));
    let name_cell = descendant_by_id(row, &CELL, &format!("name-{}", row_id));
    let type_cell = descendant_by_id(row, &CELL, &format!("type-{}", row_id));

    match (value_input, priority_input, name_cell, type_cell) {
        (Some(value), Some(priority), Some(name), Some(record_type)) => Ok(DnsRecord {
            id: row_id.to_string(),
            name: cell_text(name),
            record_type: cell_text(record_type),
            value: value_attr(value),
            priority: value_attr(priority),
        }),
        _ => Err(Error::scrape_failed(format!(
            "malformed row for record {}",
            row_id
        ))),
    }
}

fn descendant_by_id<'a>(
    row: ElementRef<'a>,
    selector: &Selector,
    id: &str,
) -> Option<ElementRef<'a>> {
    row.select(selector).find(|el| el.value().id() == Some(id))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// The input's `value` attribute; empty string when absent
fn value_attr(input: ElementRef<'_>) -> String {
    input.value().attr("value").unwrap_or_default().to_string()
}
