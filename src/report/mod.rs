//! Narrative report sections printed to the terminal.

pub mod executive;
pub mod exploration;

const RULE_WIDTH: usize = 80;

/// Heavy banner for top-level report parts.
pub(crate) fn banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Light rule for sections inside a part.
pub(crate) fn section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(RULE_WIDTH));
}
