use crate::domain::model::PortRecord;
use crate::utils::error::{PortsError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn table_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<table([^>]*)>(.*?)</table>").unwrap())
}

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap())
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap())
}

fn locode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9]{5}$").unwrap())
}

/// Parses one country's UN/LOCODE listing page into port records.
///
/// The upstream page is an undocumented HTML export, so parsing is
/// deliberately tolerant: a missing data table yields an empty list and
/// malformed rows are skipped. Only a missing/blank document is an error.
pub fn parse_directory(html: &str) -> Result<Vec<PortRecord>> {
    if html.trim().is_empty() {
        return Err(PortsError::EmptyInput);
    }

    let table = match find_data_table(html) {
        Some(t) => t,
        None => {
            tracing::warn!("No data table found in directory page");
            return Ok(Vec::new());
        }
    };

    let mut records = Vec::new();
    // First row is the column header.
    for row in row_re().captures_iter(table).skip(1) {
        let cells: Vec<String> = cell_re()
            .captures_iter(&row[1])
            .map(|c| normalize_cell(&c[1]))
            .collect();
        if let Some(record) = record_from_cells(&cells) {
            records.push(record);
        }
    }

    tracing::debug!("Parsed {} port records", records.len());
    Ok(records)
}

/// The data table is the bordered one with cellpadding="1"; the page also
/// carries unrelated layout tables.
fn find_data_table(html: &str) -> Option<&str> {
    for caps in table_re().captures_iter(html) {
        let attrs = caps.get(1)?.as_str().to_ascii_lowercase();
        if attrs.contains(r#"border="1""#) && attrs.contains(r#"cellpadding="1""#) {
            return Some(caps.get(2)?.as_str());
        }
    }
    None
}

/// Cell layout: 0 change marker, 1 country+location code, 2 name,
/// 3 name without diacritics, 4 subdivision, 5 function, 6 status,
/// 7 date, 8 IATA, 9 coordinates, 10 remarks (sometimes absent).
fn record_from_cells(cells: &[String]) -> Option<PortRecord> {
    if cells.len() < 10 {
        return None;
    }

    let locode = reconstruct_locode(&cells[1])?;

    Some(PortRecord {
        locode,
        name: cells[2].clone(),
        name_wo_diacritics: cells[3].clone(),
        subdivision: optional(&cells[4]),
        function: cells[5].clone(),
        status: cells[6].clone(),
        date: cells[7].clone(),
        iata: optional(&cells[8]),
        coordinates: optional(&cells[9]),
        remarks: cells.get(10).and_then(|c| optional(c)),
    })
}

/// The code cell reads like "US NYC": two-letter country prefix plus the
/// three-character location suffix with loose whitespace in between.
fn reconstruct_locode(cell: &str) -> Option<String> {
    if !cell.is_ascii() || cell.len() < 2 {
        return None;
    }
    let code = format!("{}{}", &cell[..2], cell[2..].trim());
    locode_re().is_match(&code).then_some(code)
}

fn normalize_cell(raw: &str) -> String {
    let stripped = tag_re().replace_all(raw, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn optional(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}
