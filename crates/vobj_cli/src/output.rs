use colored::*;
use serde_json::json;

use crate::commands::check::CheckReport;

pub fn print_check_report(report: &CheckReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &CheckReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  CHECK REPORT: {}", report.record_type).bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "All records valid".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Invalid records found".red().bold()
        );
        println!("\n{}", "Errors:".red().bold());
        for (index, error) in &report.failures {
            println!("  record {}: {}", index, error.red());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Records checked: {}", report.checked);
    println!("  Valid:           {}", report.valid);
    println!("  Invalid:         {}", report.failures.len());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &CheckReport) {
    let output = json!({
        "record_type": report.record_type,
        "passed": report.passed(),
        "failures": report
            .failures
            .iter()
            .map(|(index, error)| json!({ "record": index, "error": error }))
            .collect::<Vec<_>>(),
        "summary": {
            "checked": report.checked,
            "valid": report.valid,
            "invalid": report.failures.len(),
        }
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(err) => print_error(&format!("Failed to render JSON report: {}", err)),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
