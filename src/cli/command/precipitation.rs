//! Precipitation analysis: four queries, four charts.

use anyhow::{ensure, Result};

use crate::chart::precipitation as chart;
use crate::query::load_queries;
use crate::store::load_or_fetch;

use super::AnalysisContext;

pub async fn precipitation(ctx: &AnalysisContext<'_>) -> Result<()> {
    let queries = load_queries(
        &ctx.queries_dir.join("precipitation_queries.sql"),
        ctx.data_set,
    )?;

    let tables = load_or_fetch(
        ctx.executor,
        &ctx.cache_dir.join("precipitation"),
        ctx.label,
        &queries,
    )
    .await?;
    ensure!(
        tables.len() == 4,
        "expected 4 precipitation tables, got {}",
        tables.len()
    );

    let out_dir = ctx.out_dir.join("precipitation");
    chart::recent_vs_historical(&tables[0], ctx.label, &out_dir)?;
    chart::seasonal_small_multiples(&tables[1], ctx.label, &out_dir)?;
    chart::yearly_average(&tables[2], ctx.label, &out_dir)?;
    chart::yearly_total(&tables[3], ctx.label, &out_dir)?;

    Ok(())
}
