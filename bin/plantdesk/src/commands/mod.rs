pub mod context;
pub mod resource;
pub mod stats;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use plantdesk_cache::EntityCache;
use plantdesk_client::{NoAuth, StaticToken, TokenSource};

use crate::config::ClientConfig;

/// Build the session cache from the current context.
pub fn build_cache(config_path: &Path) -> Result<EntityCache> {
    let config = ClientConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `plantdesk context set <name> --server <url>`."))?;

    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `plantdesk context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }

    let token_source: Arc<dyn TokenSource> = if ctx.token.is_empty() {
        Arc::new(NoAuth)
    } else {
        Arc::new(StaticToken::new(ctx.token.clone()))
    };

    tracing::debug!(context = %ctx.name, server = %ctx.server, "using context");
    Ok(EntityCache::with_token_source(ctx.server.clone(), token_source))
}
