//! Display functions for command results

use super::formatters::{cell_label, clue_line, create_progress_bar};
use crate::analytics::AnalyticsSummary;
use crate::commands::{BenchmarkResult, GenerateResult};
use crate::core::{Crossword, Orientation};
use colored::Colorize;

/// Print the grid with colored cells
pub fn print_crossword(crossword: &Crossword, show_solution: bool) {
    let grid = crossword.grid();
    for r in 0..grid.rows() {
        let line: String = grid
            .row(r)
            .map(|cell| {
                let label = cell_label(cell, show_solution);
                if cell.is_blocked() {
                    label.on_black().to_string()
                } else {
                    label.black().on_white().bold().to_string()
                }
            })
            .collect();
        println!("   {line}");
    }
}

/// Print both clue lists
pub fn print_clues(crossword: &Crossword) {
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        println!("\n{}", orientation.label().bright_cyan().bold());
        for entry in crossword.clues(orientation) {
            println!("   {}", clue_line(&entry));
        }
    }
}

/// Print a generated crossword
pub fn print_generate_result(result: &GenerateResult, show_solution: bool) {
    let crossword = &result.crossword;

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "CROSSWORD:".bright_cyan().bold(),
        result.topic.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n📐 {}x{} grid, {} of {} answers placed, {} crossings ({:.0} ms)\n",
        crossword.grid().rows(),
        crossword.grid().cols(),
        crossword.placed_words().len(),
        result.words_supplied,
        crossword.crossings(),
        result.duration.as_secs_f64() * 1000.0
    );

    print_crossword(crossword, show_solution);
    print_clues(crossword);

    if show_solution {
        println!("\n{}", "Answers".bright_cyan().bold());
        for word in crossword.placed_words() {
            println!(
                "   {:>2} {:<6} {}",
                word.number,
                word.orientation.label(),
                word.word.green()
            );
        }
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Layouts built:    {}/{}", result.successes, result.layouts);
    println!(
        "   Success rate:     {}",
        format!("{:.1}%", result.success_rate()).bright_yellow().bold()
    );
    println!(
        "   Mean crossings:   {}",
        format!("{:.2}", result.mean_crossings).bright_yellow().bold()
    );
    println!(
        "   Fewest crossings: {}",
        format!("{}", result.min_crossings).yellow()
    );
    println!(
        "   Most crossings:   {}",
        format!("{}", result.max_crossings).green()
    );
    println!("   Mean placed:      {:.2}", result.mean_placed);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!(
        "   Per layout:       {:.1} ms",
        result.time_per_layout().as_secs_f64() * 1000.0
    );

    if result.successes == 0 {
        return;
    }

    println!("\n📈 {}", "Answers placed:".bright_cyan().bold());
    let mut counts: Vec<_> = result.placed_distribution.iter().collect();
    counts.sort_unstable();
    for (&placed, &count) in counts {
        let pct = count as f64 / result.successes as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {placed:2}: {} {count:4} ({pct:5.1}%)", bar.green());
    }
}

/// Print an analytics summary
pub fn print_summary(summary: &AnalyticsSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "ANALYTICS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Topics used:      {}", summary.total_topics);
    println!("   Distinct answers: {}", summary.total_words);
    println!("   Matches played:   {}", summary.total_matches);
    println!(
        "   Average time:     {}",
        format!("{}s", summary.average_seconds).bright_yellow()
    );
    println!(
        "   Average score:    {}",
        format!("{}", summary.average_score).bright_yellow()
    );

    print_ranking("Popular topics:", &summary.popular_topics);
    print_ranking("Most repeated answers:", &summary.repeated_words);
}

fn print_ranking(title: &str, entries: &[(String, usize)]) {
    if entries.is_empty() {
        return;
    }
    println!("\n🏆 {}", title.bright_cyan().bold());
    let top = entries.first().map_or(1, |(_, count)| *count) as f64;
    for (name, count) in entries {
        let bar = create_progress_bar(*count as f64, top, 20);
        println!("   {name:<16} {} {count}", bar.green());
    }
}
