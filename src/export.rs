use crate::errors::AppError;
use crate::matcher::MatchResult;
use std::io::Write;

pub const CSV_HEADERS: [&str; 5] = ["Title", "Company", "Location", "Score", "Apply Link"];

/// Suggested file name for downloads
pub const CSV_FILE_NAME: &str = "matched_jobs.csv";

/// Write results as CSV, in the given order.
pub fn write_csv<W: Write>(writer: W, results: &[MatchResult]) -> Result<(), AppError> {
    let mut csv_wrt = csv::Writer::from_writer(writer);
    csv_wrt.write_record(CSV_HEADERS)?;

    for result in results {
        let score = format_score(result.score);
        csv_wrt.write_record([
            result.title.as_str(),
            result.company.as_str(),
            result.location.as_str(),
            score.as_str(),
            result.apply_link.as_str(),
        ])?;
    }

    csv_wrt.flush()?;
    Ok(())
}

pub fn to_csv_bytes(results: &[MatchResult]) -> Result<Vec<u8>, AppError> {
    let mut buf = vec![];
    write_csv(&mut buf, results)?;
    Ok(buf)
}

fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Render results as a fixed-width text table for the terminal.
pub fn render_table(results: &[MatchResult]) -> String {
    let rows: Vec<[String; 5]> = results
        .iter()
        .map(|r| {
            [
                r.title.clone(),
                r.company.clone(),
                r.location.clone(),
                format_score(r.score),
                r.apply_link.clone(),
            ]
        })
        .collect();

    let mut widths = CSV_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 5]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<w$}", w = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(CSV_HEADERS)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
        ]));
    }

    lines.join("\n")
}
