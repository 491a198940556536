//! Temperature analysis: four queries, four charts plus a console summary.

use anyhow::{ensure, Result};

use crate::chart::temperature as chart;
use crate::query::load_queries;
use crate::store::load_or_fetch;

use super::AnalysisContext;

pub async fn temperature(ctx: &AnalysisContext<'_>) -> Result<()> {
    let queries = load_queries(
        &ctx.queries_dir.join("temperature_queries.sql"),
        ctx.data_set,
    )?;

    let tables = load_or_fetch(
        ctx.executor,
        &ctx.cache_dir.join("temperature"),
        ctx.label,
        &queries,
    )
    .await?;
    ensure!(
        tables.len() == 4,
        "expected 4 temperature tables, got {}",
        tables.len()
    );

    let out_dir = ctx.out_dir.join("temperature");
    chart::extremes_scatter(&tables[0], ctx.label, &out_dir)?;
    chart::seasonal_averages(&tables[1], ctx.label, &out_dir)?;
    chart::seasonal_small_multiples(&tables[1], ctx.label, &out_dir)?;
    chart::yearly_trend(&tables[2], ctx.label, &out_dir)?;

    // decade summary goes to the console rather than a figure
    println!("{}", tables[3]);

    Ok(())
}
