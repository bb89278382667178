use crate::app::run_strategy;
use crate::error::AppResult;

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: &RunPlan) -> AppResult<()> {
    for strategy in plan.strategies.iter().copied() {
        run_strategy(plan, strategy).await?;
    }
    Ok(())
}
