use super::{print_json, Context};
use anyhow::{anyhow, Result};
use quorum_core::session::Speaker;
use quorum_core::transport::TransportKind;
use std::str::FromStr;

fn parse_speaker(spec: &str) -> Result<Speaker> {
    let (name, transport) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("speaker must be NAME=TRANSPORT, got '{}'", spec))?;
    let transport = TransportKind::from_str(transport).map_err(|_| {
        anyhow!(
            "unknown transport '{}' (expected direct, clipboard, or manual)",
            transport
        )
    })?;
    Ok(Speaker::new(name, transport))
}

pub async fn start(
    ctx: &Context,
    topic: &str,
    speaker_specs: &[String],
    rounds: Option<u32>,
) -> Result<()> {
    let speakers = speaker_specs
        .iter()
        .map(|spec| parse_speaker(spec))
        .collect::<Result<Vec<_>>>()?;
    let rounds = rounds.or(ctx.config.default_round_limit);

    let session = ctx.orchestrator.start(topic, speakers, rounds).await?;
    print_json(&session)
}

pub async fn list(ctx: &Context, all: bool) -> Result<()> {
    print_json(&ctx.orchestrator.list(all).await?)
}

pub async fn status(ctx: &Context, session_id: &str) -> Result<()> {
    print_json(&ctx.orchestrator.get(session_id).await?)
}

pub async fn history(ctx: &Context, session_id: &str) -> Result<()> {
    print_json(&ctx.orchestrator.history(session_id).await?)
}
