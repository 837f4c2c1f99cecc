//! Shared output helpers for subcommands

use sp_db::ExecutionStats;

/// Print the stats line for one executed batch.
pub fn print_stats(stats: &ExecutionStats) {
    println!(
        "Executed {} statements, {} errors. {} rows affected ({:.3}s).",
        stats.count, stats.error_count, stats.affected_rows, stats.elapsed_seconds
    );
    if stats.error_count > 0 {
        println!("Because an error occurred, all executed statements were rolled back.");
    }
}
