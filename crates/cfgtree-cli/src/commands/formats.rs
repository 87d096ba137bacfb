//! List the type tags a tree can load

use cfgtree_core::TreeOptions;
use colored::Colorize;

use crate::error::Result;

/// Run the formats command
pub fn run_formats(options: &TreeOptions) -> Result<()> {
    let registry = options.registry()?;

    println!("{}", "Registered formats".bold());
    println!();
    for tag in registry.tags() {
        if let Some(loader) = registry.get(tag) {
            println!("  {:<8} {}", tag.green(), loader.name());
        }
    }
    println!();
    println!(
        "{} Files with any other extension load as empty.",
        "Note:".dimmed()
    );

    Ok(())
}
