use super::{print_json, Context};
use anyhow::{bail, Result};

pub async fn speakers(ctx: &Context) -> Result<()> {
    print_json(&ctx.registry.candidates().await)
}

pub async fn reset(ctx: &Context, session_id: Option<&str>, all: bool) -> Result<()> {
    match (session_id, all) {
        (Some(_), true) => bail!("give a session id or --all, not both"),
        (Some(id), false) => {
            ctx.orchestrator.reset(Some(id)).await?;
            print_json(&serde_json::json!({ "reset": id }))
        }
        (None, true) => {
            ctx.orchestrator.reset(None).await?;
            print_json(&serde_json::json!({ "reset": "all" }))
        }
        (None, false) => bail!("nothing to reset: give a session id or --all"),
    }
}
