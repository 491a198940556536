//! Extreme weather events analysis: two queries, four charts.

use anyhow::{ensure, Result};

use crate::chart::extreme as chart;
use crate::query::load_queries;
use crate::store::load_or_fetch;

use super::AnalysisContext;

pub async fn extreme(ctx: &AnalysisContext<'_>) -> Result<()> {
    let queries = load_queries(
        &ctx.queries_dir.join("extreme_events_queries.sql"),
        ctx.data_set,
    )?;

    let tables = load_or_fetch(
        ctx.executor,
        &ctx.cache_dir.join("extreme_events"),
        ctx.label,
        &queries,
    )
    .await?;
    ensure!(
        tables.len() == 2,
        "expected 2 extreme events tables, got {}",
        tables.len()
    );

    let out_dir = ctx.out_dir.join("extreme_events");
    chart::event_trends(&tables[0], ctx.label, &out_dir)?;
    chart::event_trends_log_scale(&tables[0], ctx.label, &out_dir)?;
    chart::count_shift_facets(&tables[1], ctx.label, &out_dir)?;
    chart::intensity_shift_facets(&tables[1], ctx.label, &out_dir)?;

    Ok(())
}
