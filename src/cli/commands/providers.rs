//! Providers command implementation.

use crate::core::registry::ProviderRegistry;
use crate::Result;
use colored::Colorize;

/// List the providers offered by `registry`.
pub fn list_providers(registry: &ProviderRegistry) -> Result<()> {
    println!(
        "{} {}",
        "🎬 Providers on the".bold().cyan(),
        format!("{} site", registry.site()).bold().cyan()
    );
    println!();

    println!(
        "{:<12} {:<17} {:<12} {:<36} {}",
        "ID".bold(),
        "Alias".bold(),
        "Policy".bold(),
        "Base URL".bold(),
        "Guide".bold()
    );
    println!("{}", "-".repeat(90));

    let default_id = registry.default_provider().id;
    for provider in registry.providers() {
        let policy = if provider.is_trusted() {
            "no csp".green()
        } else {
            "csp".yellow()
        };
        let id = if provider.id == default_id {
            format!("{}*", provider.id)
        } else {
            provider.id.to_string()
        };
        println!(
            "{:<12} {:<17} {:<12} {:<36} {}",
            id,
            provider.alias,
            policy,
            provider.base_url,
            if provider.guide_key.is_some() { "yes" } else { "-" }
        );
    }

    println!();
    println!("* default provider");
    println!("Sandbox: {}", registry.sandbox_flags());

    Ok(())
}
