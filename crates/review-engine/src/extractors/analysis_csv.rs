// Bulk import of lab results from a two-line delimited export
use crate::error::{Result, ReviewError};
use crate::patterns::CSV_FIELD_SEPARATOR;
use shared_types::{Analysis, Parameter};

/// Parses a header row plus one data row into parameter values
///
/// Cells are split on the separators the header row uses, any of comma,
/// semicolon or tab, so a semicolon export keeps decimal commas intact.
/// Headers are matched to parameters case-insensitively and unknown headers
/// are skipped. A header without a matching data cell yields an empty value;
/// a data row with more non-empty cells than the header is rejected.
pub fn parse_analysis_csv(text: &str) -> Result<Vec<(Parameter, String)>> {
    let mut lines = text
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| ReviewError::InvalidAnalysisCsv("file is empty".to_string()))?;
    let data = lines
        .next()
        .ok_or_else(|| ReviewError::InvalidAnalysisCsv("missing data row".to_string()))?;

    let separators = header_separators(header);
    let headers = split_cells(header, &separators);
    let cells = split_cells(data, &separators);

    // Trailing empty cells from a dangling separator are tolerated
    let extra = cells.iter().skip(headers.len()).any(|cell| !cell.is_empty());
    if extra {
        return Err(ReviewError::InvalidAnalysisCsv(format!(
            "data row has {} cells but the header has {} columns",
            cells.len(),
            headers.len()
        )));
    }

    let values: Vec<(Parameter, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            Parameter::from_header(name).map(|param| {
                let value = cells.get(idx).cloned().unwrap_or_default();
                (param, value)
            })
        })
        .collect();

    if values.is_empty() {
        return Err(ReviewError::InvalidAnalysisCsv(
            "no recognized parameter columns".to_string(),
        ));
    }

    tracing::debug!(
        "Parsed analysis CSV: {} of {} columns recognized",
        values.len(),
        headers.len()
    );
    Ok(values)
}

/// Returns a copy of `analysis` with the CSV values written over it
///
/// On error the caller keeps its current analysis untouched.
pub fn merge_analysis_csv(analysis: &Analysis, text: &str) -> Result<Analysis> {
    let values = parse_analysis_csv(text)?;
    let mut merged = analysis.clone();
    for (param, value) in values {
        merged.set_value(param, value);
    }
    Ok(merged)
}

/// Separator characters present in the header row
fn header_separators(header: &str) -> Vec<char> {
    let mut separators: Vec<char> = CSV_FIELD_SEPARATOR
        .find_iter(header)
        .filter_map(|m| m.as_str().chars().next())
        .collect();
    separators.sort_unstable();
    separators.dedup();
    separators
}

fn split_cells(line: &str, separators: &[char]) -> Vec<String> {
    line.split(separators)
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}
