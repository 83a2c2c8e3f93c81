// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! CLI output reporter with colored formatting

use crate::ast::TreeStats;
use crate::catalog::Part;
use crate::geometry::BoundingBox;
use colored::*;
use std::path::Path;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a part written to disk
    pub fn report_render(part: &str, path: &Path, stats: &TreeStats, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {} -> {}", "Rendered:".bold(), part.cyan(), path.display());
        println!("{}", "━".repeat(80).bright_black());
        Self::print_stats(stats);
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the structure of a parsed file
    pub fn report_stats(file: &str, stats: &TreeStats, bounds: Option<&BoundingBox>, segments: Option<u32>) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        if let Some(segments) = segments {
            println!("  {} {}", "$fn:".bright_black(), segments.to_string().cyan());
        }
        Self::print_stats(stats);
        match bounds {
            Some(bounds) => {
                let size = bounds.size();
                println!(
                    "  {} {} x {} x {}",
                    "Bounds:".bright_black(),
                    Self::format_length(size.x).cyan(),
                    Self::format_length(size.y).cyan(),
                    Self::format_length(size.z).cyan()
                );
            }
            None => println!("  {} {}", "Bounds:".bright_black(), "empty".yellow()),
        }
        if !stats.labels.is_empty() {
            println!("\n{}", "Labels:".bold());
            for (label, count) in &stats.labels {
                println!("  {} {}", format!("{}:", label).bright_black(), count);
            }
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// List the part catalog
    pub fn report_parts(parts: &[Part]) {
        println!("{}", "Parts:".bold());
        for part in parts {
            let marker = if part.uses_switch() { "*" } else { " " };
            println!(
                "  {:<22}{} {}",
                part.name().cyan(),
                marker.bright_black(),
                part.description()
            );
        }
        println!("\n{}", "* follows --switch".bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_stats(stats: &TreeStats) {
        println!("  {} {}", "Nodes:".bright_black(), stats.nodes.to_string().cyan());
        println!("  {} {}", "Depth:".bright_black(), stats.depth.to_string().cyan());
        println!(
            "  {} {} primitives, {} booleans, {} hulls, {} transforms",
            "Kinds:".bright_black(),
            stats.primitives,
            stats.booleans,
            stats.hulls,
            stats.transforms
        );
    }

    fn format_length(mm: f64) -> String {
        format!("{:.2}mm", mm)
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_format_length() {
        assert_eq!(Reporter::format_length(17.0), "17.00mm");
    }
}
