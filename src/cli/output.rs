use colored::Colorize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print the "... and N more" line under a truncated listing.
pub fn more(hidden: usize) {
    if hidden > 0 {
        println!("  {}", format!("... and {hidden} more").dimmed());
    }
}

/// Horizontal bar of `width * value / max` cells, at least one cell for non-zero values.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = (value * width).div_ceil(max).clamp(1, width);
    "█".repeat(cells)
}
