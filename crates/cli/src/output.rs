//! Plain-text tables for command output.

use std::io::{self, Write};

use exhiibot_core::Pagination;

/// Column separator.
const GAP: &str = "  ";

/// Write `rows` under `headers`, padding every column to its widest cell.
pub fn table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    write_row(out, &widths, &header)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &widths, &rule)?;
    for row in rows {
        write_row(out, &widths, row)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let line = widths
        .iter()
        .zip(cells)
        .map(|(&width, cell)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(GAP);
    writeln!(out, "{}", line.trim_end())
}

/// Footer under a paginated table.
pub fn footer<W: Write>(out: &mut W, shown: usize, pagination: &Pagination) -> io::Result<()> {
    if shown == 0 {
        writeln!(out, "No results.")?;
    }
    writeln!(out, "{pagination}")
}

/// `label: value` line, aligned for detail views.
pub fn field<W: Write>(out: &mut W, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{label:<14}{value}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pads_columns() {
        let mut buf = Vec::new();
        table(
            &mut buf,
            &["ID", "Name"],
            &[
                vec!["u1".to_string(), "Ada".to_string()],
                vec!["u200".to_string(), "Bo".to_string()],
            ],
        )
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "ID    Name\n----  ----\nu1    Ada\nu200  Bo\n");
    }

    #[test]
    fn test_footer_notes_empty_page() {
        let mut buf = Vec::new();
        footer(&mut buf, 0, &Pagination::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("No results.\n"));
    }
}
