use std::io::Write;

use anyhow::{Context, Result};

use crate::storage::{Leaderboard, LeaderboardEntry};

/// Print the persisted leaderboard as a plain table
pub fn print_leaderboard(leaderboard: &Leaderboard, out: &mut impl Write) -> Result<()> {
    let entries = leaderboard.load();
    write!(out, "{}", format_table(&entries)).context("Failed to write leaderboard")?;
    Ok(())
}

fn format_table(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No scores yet. Go play a game!\n".to_string();
    }

    let mut table = String::new();
    table.push_str(&format!("{:>4}  {:<16} {:>6}  {}\n", "Rank", "Name", "Score", "Date"));
    table.push_str(&format!("{}\n", "=".repeat(48)));

    for (rank, entry) in entries.iter().enumerate() {
        table.push_str(&format!(
            "{:>4}  {:<16} {:>6}  {}\n",
            rank + 1,
            entry.name,
            entry.score,
            entry.date.format("%Y-%m-%d %H:%M")
        ));
    }

    table
}
