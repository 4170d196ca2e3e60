//! Report rendering

use clap::ValueEnum;

use crate::report::types::PackageReport;
use crate::version::checker::UpdateStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of report entries
    #[default]
    Json,
    /// Aligned columns for terminals
    Table,
}

pub fn render(reports: &[PackageReport], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(reports),
        OutputFormat::Table => Ok(render_table(reports)),
    }
}

/// Keep only entries with a newer stable release available
pub fn retain_outdated(reports: Vec<PackageReport>) -> Vec<PackageReport> {
    reports
        .into_iter()
        .filter(|r| r.status() == UpdateStatus::Outdated)
        .collect()
}

fn render_table(reports: &[PackageReport]) -> String {
    const HEADERS: [&str; 4] = ["Package", "Installed", "Newest", "Status"];

    let rows: Vec<[String; 4]> = reports
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.installed_version.clone(),
                r.newest_version.clone().unwrap_or_else(|| "-".to_string()),
                r.status().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let format_row = |cells: [&str; 4]| -> String {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut lines = vec![format_row(HEADERS)];
    lines.extend(rows.iter().map(|row| format_row(row.each_ref().map(String::as_str))));
    lines.join("\n")
}
