//! Console rendering. Nothing in here decides anything: callers pass in outcomes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use humansize::{format_size, DECIMAL};

use crate::copier::{file_name, CopyOutcome};
use crate::destination::DirectoryStatus;
use crate::extension::Extension;
use crate::report::{ExtensionStats, Summary};

const RULE_WIDTH: usize = 60;

fn rule(c: char) -> String {
    std::iter::repeat(c).take(RULE_WIDTH).collect()
}

pub fn banner() {
    println!("\n{}", rule('='));
    println!("  .LUA AND .MANIFEST FILE INSTALLER");
    println!("{}", rule('='));
    println!("\nCopies .lua and .manifest files from a source folder into");
    println!("destination folders, asking before replacing existing files.");
    println!("{}\n", rule('='));
}

pub fn step(number: usize, title: &str) {
    println!("\nSTEP {number}: {title}");
    println!("{}", rule('-'));
}

pub fn invalid_directory(input: &str) {
    println!("✗ Error: the directory '{input}' does not exist!");
    println!("Please try again.\n");
}

pub fn source_selected(path: &Path) {
    println!("✓ Source folder: {}\n", path.display());
}

pub fn prefilled_source_rejected(path: &Path) {
    println!("✗ '{}' is not a directory, asking instead.", path.display());
}

pub fn counts(counts: &BTreeMap<Extension, usize>, order: &[Extension]) {
    for extension in order {
        let n = counts.get(extension).copied().unwrap_or(0);
        println!("  📄 {extension} files found: {n}");
    }
    println!();
}

pub fn nothing_found(order: &[Extension]) {
    let names: Vec<_> = order.iter().map(|extension| extension.suffix()).collect();
    println!("⚠ No {} file found in the source folder!", names.join(" or "));
    println!("Exiting...");
}

pub fn empty_destination() {
    println!("✗ Please type a path.\n");
}

pub fn directory_status(path: &Path, status: &DirectoryStatus) {
    match status {
        DirectoryStatus::Existing => {}
        DirectoryStatus::Created => println!("✓ Directory '{}' created.", path.display()),
        DirectoryStatus::Declined => {}
        DirectoryStatus::CreationFailed(err) => {
            println!("✗ Error creating directory '{}': {err}", path.display())
        }
    }
    if !status.is_ready() {
        println!("Type another path or press Ctrl+C to cancel.\n");
    }
}

pub fn destination_selected(extension: &Extension, path: &Path) {
    println!("✓ Destination for {extension}: {}\n", path.display());
}

pub fn name_collisions(collisions: &[(String, Vec<PathBuf>)]) {
    println!("⚠ Some files share a name and will land on the same destination file:");
    for (name, paths) in collisions {
        println!("  {name}");
        for path in paths {
            println!("    - {}", path.display());
        }
    }
    println!();
}

pub fn file_outcome(destination: &Path, outcome: &CopyOutcome) {
    let name = file_name(destination);
    match outcome {
        CopyOutcome::Copied { bytes } => {
            println!("  ✓ '{name}' copied ({})", format_size(*bytes, DECIMAL))
        }
        CopyOutcome::Skipped => println!("  → '{name}' skipped."),
        CopyOutcome::Failed { reason } => println!("  ✗ Error copying '{name}': {reason}"),
    }
}

fn stats_lines(stats: &ExtensionStats) {
    println!(
        "  ✓ Copied: {} ({})",
        stats.copied,
        format_size(stats.bytes_copied, DECIMAL)
    );
    println!("  ⊘ Skipped: {}", stats.skipped);
    println!("  ✗ Errors: {}", stats.failed);
}

pub fn batch_subtotal(extension: &Extension, stats: &ExtensionStats) {
    println!(
        "\n--- {} copy summary ---",
        extension.suffix().to_uppercase()
    );
    stats_lines(stats);
    println!("  Processed: {}", stats.total());
}

pub fn summary(summary: &Summary) {
    for extension in &summary.extensions {
        println!("{} files:", extension.extension.to_uppercase());
        stats_lines(&extension.stats);
        println!();
    }
    println!("{}", rule('='));
    println!(
        "  Total: {} copied, {} skipped, {} errors",
        summary.total.copied, summary.total.skipped, summary.total.failed
    );
    println!("{}", rule('='));
    println!("\n✓ Installation finished!");
}

pub fn report_written(path: &Path) {
    println!("Report written to {}", path.display());
}

pub fn cancelled() {
    println!("\nOperation cancelled by the user.");
}

pub fn interrupted() {
    println!("\n\n✗ Operation cancelled by the user (Ctrl+C).");
    println!("Exiting...");
}

pub fn escaped() {
    println!("\n\n✗ Operation cancelled by the user (Esc).");
    println!("Exiting...");
}

pub fn unexpected_error(err: &anyhow::Error) {
    println!("\n\n✗ Unexpected error: {err:#}");
    println!("Please check and try again.");
}
