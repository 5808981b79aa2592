//! Console formatting helpers for CLI commands

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// `count (pct%)`
pub fn format_count_rate(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print outcome tallies with the names of both sides
pub fn print_result(result: &TrainingResult, first: &str, second: &str) {
    print_kv("Games", &format_number(result.total_games));
    print_kv(
        &format!("{first} wins"),
        &format_count_rate(result.player_one_wins, result.player_one_win_rate),
    );
    print_kv(
        &format!("{second} wins"),
        &format_count_rate(result.player_two_wins, result.player_two_win_rate),
    );
    print_kv("Draws", &format_count_rate(result.draws, result.draw_rate));
}
