//! Text rendering of a run summary.

use std::path::Path;

use dedupest_core::RunSummary;

/// Print the human-readable report to stdout.
pub fn render_text(root: &Path, summary: &RunSummary) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" Block Dedup Estimate");
    println!("{}", "─".repeat(70));
    println!();

    println!(" Path:        {}", root.display());
    println!(
        " Block size:  {} bytes ({})",
        summary.block_size,
        format_size(summary.block_size)
    );
    println!();

    if summary.has_failures() {
        println!(
            " Files:       {} processed, {} failed",
            summary.total_files,
            summary.failed.len()
        );
    } else {
        println!(" Files:       {}", summary.total_files);
    }
    println!(
        " Data:        {} in {} blocks",
        format_size(summary.total_bytes),
        summary.total_blocks
    );
    println!(
        " Unique:      {} blocks ({:.1}%)",
        summary.unique_blocks,
        summary.unique_pct()
    );
    println!(
        " Duplicate:   {} blocks ({:.1}%)",
        summary.duplicate_blocks,
        summary.duplicate_pct()
    );
    println!(
        " Reclaimable: {} of duplicate block content",
        format_size(summary.reclaimable_bytes())
    );
    println!(
        " Overhead:    {} lost to block rounding",
        format_size(summary.total_overhead_bytes)
    );
    println!();
    println!(
        " Elapsed:     {:.2}s ({}/s)",
        summary.elapsed.as_secs_f64(),
        format_size(summary.throughput_bytes_per_sec() as u64)
    );

    if summary.has_failures() {
        println!();
        println!(" Failed files:");
        for failure in &summary.failed {
            println!("   {} ({})", failure.path.display(), failure.message);
        }
    }
    println!();
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
