//! Terminal output for diagnostics and migration summaries

use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use routeshift_syntax::SyntaxError;
use routeshift_transform::TransformWarning;

use crate::migrate::{FileOutcome, MigrationReport};

/// Print a parse error with a snippet of the offending source
pub fn report_parse_error(text: &str, file: &Path, error: &SyntaxError) {
    let name = file.display().to_string();
    let span = error.span().unwrap_or_default().clamp(text.len());
    let start = char_offset(text, span.start);
    let end = char_offset(text, span.end).max(start);

    let printed = Report::build(ReportKind::Error, name.clone(), start)
        .with_message(format!("failed to parse {}", name))
        .with_label(
            Label::new((name.clone(), start..end))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(text)));

    if printed.is_err() {
        eprintln!("{}: {}", file.display(), error);
    }
}

/// ariadne counts characters, swc counts bytes
fn char_offset(text: &str, byte: usize) -> usize {
    text.char_indices().take_while(|(index, _)| *index < byte).count()
}

pub fn print_warnings(file: &Path, warnings: &[TransformWarning]) {
    for warning in warnings {
        eprintln!("  warning[{}] {}: {}", warning.code, file.display(), warning.message);
    }
}

/// One line per file followed by totals
pub fn print_summary(report: &MigrationReport, dry_run: bool) {
    for file in &report.files {
        let original = file.route.original_path.display();
        match &file.outcome {
            FileOutcome::Migrated { target, .. } => {
                let marker = if dry_run { "~" } else { "✓" };
                println!("{} {} → {}", marker, original, target.display());
            }
            FileOutcome::Skipped { reason } => println!("- {} ({})", original, reason),
            FileOutcome::Failed(error) => println!("✗ {} - {}", original, error),
        }
    }

    println!();
    println!(
        "{} migrated, {} skipped, {} failed{}",
        report.migrated(),
        report.skipped(),
        report.failed(),
        if dry_run { " (dry run, nothing written)" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offset_counts_characters() {
        let text = "é = 1;";
        assert_eq!(char_offset(text, 0), 0);
        assert_eq!(char_offset(text, 2), 1);
        assert_eq!(char_offset(text, text.len()), 6);
    }
}
