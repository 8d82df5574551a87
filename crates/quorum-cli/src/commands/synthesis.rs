use super::{print_json, Context};
use anyhow::Result;

pub async fn synthesize(ctx: &Context, session_id: &str, finish: bool) -> Result<()> {
    print_json(&ctx.orchestrator.synthesize(session_id, finish).await?)
}

pub async fn archive(ctx: &Context) -> Result<()> {
    let records = ctx.archive.list_records().await?;
    let reports: Vec<_> = records.iter().map(|r| &r.report).collect();
    print_json(&reports)
}
