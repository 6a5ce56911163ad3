//! Guide command implementation.

use crate::core::guide::{acknowledge_guide, should_show_guide, GUIDE_SUPPRESSION_MS};
use crate::core::registry::ProviderRegistry;
use crate::utils::store::KeyValueStore;
use crate::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;

/// Print whether each provider guide would be shown now.
pub fn status<S: KeyValueStore + ?Sized>(registry: &ProviderRegistry, store: &S) -> Result<()> {
    println!("{}", "📖 Provider guides".bold().cyan());
    println!();

    let now = Utc::now().timestamp_millis();
    for provider in registry.providers() {
        let Some(key) = provider.guide_key else {
            continue;
        };

        if should_show_guide(store, key, now) {
            println!("  {:<12} {}", provider.id, "will be shown".yellow());
        } else {
            let until = store
                .get(key)?
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(|ms| ms.checked_add(GUIDE_SUPPRESSION_MS))
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("  {:<12} {} {}", provider.id, "hidden until".green(), until);
        }
    }

    Ok(())
}

/// Acknowledge a provider guide.
pub fn acknowledge<S: KeyValueStore + ?Sized>(
    registry: &ProviderRegistry,
    store: &mut S,
    provider_id: &str,
) -> Result<()> {
    let provider = registry
        .lookup(provider_id)
        .ok_or_else(|| crate::Error::other(format!("Unknown provider: {}", provider_id)))?;
    let key = provider
        .guide_key
        .ok_or_else(|| crate::Error::other(format!("Provider {} has no guide", provider.id)))?;

    acknowledge_guide(store, key, Utc::now().timestamp_millis());
    println!("{} guide for {} hidden for 30 days", "✓".green(), provider.id);
    Ok(())
}
