//! Summary of the fonts a run produced.

use std::collections::BTreeMap;

use unicode_width::UnicodeWidthStr;

use crate::{config::REPORT_HEADERS, pipeline::ResultRecord};

/// How the summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown pipe table, one row per reference family.
    #[default]
    Table,
    /// One `reference: input -> path` line per record.
    Plain,
}

/// Render `records` in the requested format.
///
/// `link_suffix` is appended to every output path in table links.
pub fn render(records: &[ResultRecord], format: ReportFormat, link_suffix: &str) -> String {
    match format {
        ReportFormat::Table => render_table(records, link_suffix),
        ReportFormat::Plain => render_plain(records),
    }
}

fn render_plain(records: &[ResultRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}: {} -> {}\n", r.reference_name, r.input_name, r.output_path.display()))
        .collect()
}

fn render_table(records: &[ResultRecord], link_suffix: &str) -> String {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in records {
        groups.entry(format!("**{}**", record.reference_name)).or_default().push(format!(
            "[{}]({}{link_suffix})",
            record.input_name,
            record.output_path.display()
        ));
    }

    let rows: Vec<[String; 2]> =
        groups.into_iter().map(|(header, links)| [header, links.join(", ")]).collect();
    let widths: [usize; 2] = [0, 1].map(|col| {
        rows.iter()
            .map(|row| row[col].width())
            .chain([REPORT_HEADERS[col].width()])
            .max()
            .unwrap_or(0)
    });

    let line = |cells: [&str; 2]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {cell}{} ", " ".repeat(width - cell.width())))
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut table = line(REPORT_HEADERS);
    let rule: Vec<String> = widths.iter().map(|w| format!(":{}", "-".repeat(w + 1))).collect();
    table.push_str(&format!("|{}|\n", rule.join("|")));
    for [header, links] in &rows {
        table.push_str(&line([header.as_str(), links.as_str()]));
    }
    table
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn record(reference: &str, input: &str, path: &str) -> ResultRecord {
        ResultRecord {
            reference_name: reference.to_string(),
            input_name: input.to_string(),
            output_path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_table_groups_by_reference() {
        let records = [
            record("Ubuntu Mono", "Symbola", "out/a.ttf"),
            record("DejaVu Sans Mono", "Symbola", "out/b.ttf"),
            record("Ubuntu Mono", "XITS", "out/c.ttf"),
        ];
        let table = render(&records, ReportFormat::Table, "?raw=true");
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Programming font "));
        assert!(lines[1].starts_with("|:---"));
        assert!(lines[2].starts_with("| **DejaVu Sans Mono** "));
        assert!(lines[3].contains("[Symbola](out/a.ttf?raw=true), [XITS](out/c.ttf?raw=true)"));
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_table_pads_wide_characters() {
        let records = [record("等幅", "Symbola", "a.ttf"), record("Mono", "Symbola", "b.ttf")];
        let table = render(&records, ReportFormat::Table, "");
        let widths: Vec<usize> = table.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_plain() {
        let records = [record("Ubuntu Mono", "Symbola", "out/a.ttf")];
        assert_eq!(render(&records, ReportFormat::Plain, ""), "Ubuntu Mono: Symbola -> out/a.ttf\n");
    }

    #[test]
    fn test_empty_table_has_headers() {
        let table = render(&[], ReportFormat::Table, "");
        assert_eq!(table.lines().count(), 2);
    }
}
