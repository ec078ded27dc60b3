//! List command implementation
//!
//! Implements `ska-builder list`, printing the build order as parsed.

use anyhow::{Context, Result};

use crate::cli::output::is_json;
use crate::core::build_order::{BuildOrder, BuildOrderEntry};
use crate::core::settings::BuilderSettings;

/// Execute the list command
pub fn execute(settings: &BuilderSettings) -> Result<()> {
    let path = settings.layout().build_order_file();
    let order = BuildOrder::load(&path, settings.self_name())
        .with_context(|| format!("Failed to load build order from {}", path.display()))?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(order.entries())?);
        return Ok(());
    }

    for (index, entry) in order.iter().enumerate() {
        match entry {
            BuildOrderEntry::SelfPackage(name) => println!("{:>4}  {name} (self)", index + 1),
            BuildOrderEntry::External(name) => println!("{:>4}  {name}", index + 1),
        }
    }
    Ok(())
}
