use tracing::error;

use crate::args::{ReportFormat, Strategy};
use crate::metrics::AggregateResult;
use crate::scheduler::RunOutcome;
use crate::sinks::render_result;

#[must_use]
pub(crate) fn summary_lines(
    strategy: Strategy,
    outcome: &RunOutcome,
    result: &AggregateResult,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Strategy: {}", strategy));
    lines.push(format!("Waves: {}", outcome.waves_executed()));
    for wave in &outcome.waves {
        lines.push(format!(
            "  Wave {}: dispatched {}, succeeded {}, failed {}, {}ms",
            wave.wave,
            wave.dispatched,
            wave.succeeded,
            wave.failed,
            wave.elapsed.as_millis()
        ));
    }
    lines.push(format!("Total Requests: {}", result.total_requests));
    lines.push(format!("Successful: {}", result.successful_requests));
    lines.push(format!("Failed: {}", result.failed_requests));
    if !outcome.unresolved.is_empty() {
        let tokens: Vec<String> = outcome
            .unresolved
            .iter()
            .map(ToString::to_string)
            .collect();
        lines.push(format!("Unresolved: {}", tokens.join(", ")));
    }
    lines.push(format!(
        "Avg Time per Request: {:.4}s",
        result.average_time_per_request
    ));
    lines.push(format!("Total Elapsed: {:.3}s", result.total_elapsed_time));
    lines.push(format!("CPU Usage: {:.2}%", result.cpu_usage_percent));
    lines.push(format!("Memory Delta: {:.2} MB", result.memory_usage_mb));
    lines
}

pub(crate) fn print_summary(strategy: Strategy, outcome: &RunOutcome, result: &AggregateResult) {
    println!();
    for line in summary_lines(strategy, outcome, result) {
        println!("{}", line);
    }
    match render_result(result, ReportFormat::Json) {
        Ok(json) => print!("{}", json),
        Err(err) => error!("Failed to render result: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{RequestToken, WaveReport};
    use std::time::Duration;

    #[test]
    fn summary_lists_waves_and_unresolved_tokens() -> Result<(), String> {
        let outcome = RunOutcome {
            total: 3,
            successful: 2,
            unresolved: vec![RequestToken::new(3)],
            waves: vec![
                WaveReport {
                    wave: 1,
                    dispatched: 3,
                    succeeded: 2,
                    failed: 1,
                    elapsed: Duration::from_millis(12),
                },
                WaveReport {
                    wave: 2,
                    dispatched: 1,
                    succeeded: 0,
                    failed: 1,
                    elapsed: Duration::from_millis(3),
                },
            ],
        };
        let result = AggregateResult {
            total_requests: 3,
            successful_requests: 2,
            failed_requests: 1,
            average_time_per_request: 0.005,
            cpu_usage_percent: 150.0,
            memory_usage_mb: -0.5,
            total_elapsed_time: 0.015,
        };

        let lines = summary_lines(Strategy::Threads, &outcome, &result);
        let expected = [
            "Strategy: threads",
            "Waves: 2",
            "  Wave 2: dispatched 1, succeeded 0, failed 1, 3ms",
            "Failed: 1",
            "Unresolved: #3",
            "CPU Usage: 150.00%",
            "Memory Delta: -0.50 MB",
        ];
        for line in expected {
            if !lines.iter().any(|candidate| candidate == line) {
                return Err(format!("Missing line '{}' in {:?}", line, lines));
            }
        }
        Ok(())
    }
}
