//! Offline driver: recorded messages on a simulated clock.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::{self, BufRead};

use scene::Scene;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub lines: usize,
    pub ingested: usize,
    /// Lines that did not decode.
    pub skipped: usize,
    /// Handler failures reported while dispatching ingested lines.
    pub failures: usize,
}

/// Ingest one message per line, advancing the clock `step_ms` after each.
/// Blank lines are ignored; undecodable lines are logged and skipped.
pub fn replay_lines<R: BufRead>(scene: &mut Scene, reader: R, step_ms: u64) -> Result<ReplayStats, io::Error> {
    let mut stats = ReplayStats::default();
    for line in reader.lines() {
        let line = line?;
        stats.lines += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match scene.ingest(trimmed) {
            Ok(report) => {
                stats.ingested += 1;
                stats.failures += report.failures;
            }
            Err(error) => {
                stats.skipped += 1;
                tracing::warn!(line = stats.lines, %error, "skipping undecodable line");
            }
        }
        scene.advance(step_ms);
        flush(scene);
    }
    Ok(stats)
}

/// Advance in `step_ms` frames until nothing animates or `budget_ms` runs
/// out. Returns whether the scene went idle.
pub fn settle(scene: &mut Scene, step_ms: u64, budget_ms: u64) -> bool {
    let step = step_ms.max(1);
    let mut spent = 0;
    while !scene.is_idle() {
        if spent >= budget_ms {
            return false;
        }
        scene.advance(step);
        spent += step;
        flush(scene);
    }
    true
}

fn flush(scene: &mut Scene) {
    for command in scene.drain_commands() {
        tracing::trace!(?command, "draw");
    }
    let polls = scene.drain_outbound();
    if !polls.is_empty() {
        tracing::debug!(count = polls.len(), "dropping outbound requests during replay");
    }
}
