use super::{print_json, Context};
use anyhow::{anyhow, Context as _, Result};
use quorum_core::session::TurnContent;
use quorum_core::transport::TransportKind;
use std::io::Read;
use std::str::FromStr;

pub async fn route(ctx: &Context, session_id: &str) -> Result<()> {
    print_json(&ctx.orchestrator.route_next_turn(session_id).await?)
}

/// Stages the pending turn's prompt and prints it verbatim so a host can
/// pipe it straight into a clipboard tool.
pub async fn prepare(ctx: &Context, session_id: &str, turn_id: &str) -> Result<()> {
    let prompt = ctx.orchestrator.prepare_turn(session_id, turn_id).await?;
    println!("{}", prompt);
    Ok(())
}

pub async fn submit(
    ctx: &Context,
    session_id: &str,
    turn_id: &str,
    transport: &str,
    content: Option<String>,
) -> Result<()> {
    let transport = TransportKind::from_str(transport)
        .map_err(|_| anyhow!("unknown transport '{}'", transport))?;

    let raw = match content {
        Some(raw) => raw,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading turn content from stdin")?;
            buffer
        }
    };
    let content: TurnContent =
        serde_json::from_str(&raw).context("turn content must be a JSON TurnContent object")?;

    let session = ctx
        .orchestrator
        .submit_turn(session_id, turn_id, content, transport)
        .await?;
    print_json(&session.summary())
}
