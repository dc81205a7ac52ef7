use contracts::usecases::u501_import_catalog::ImportPhase;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Tracks the phase of one import run
#[derive(Clone)]
pub struct PhaseTracker {
    state: Arc<RwLock<PhaseState>>,
}

struct PhaseState {
    phase: ImportPhase,
    entered_at: Instant,
    started_at: Instant,
}

impl PhaseTracker {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            state: Arc::new(RwLock::new(PhaseState {
                phase: ImportPhase::Idle,
                entered_at: now,
                started_at: now,
            })),
        }
    }

    /// Last phase reached
    pub fn phase(&self) -> ImportPhase {
        self.state.read().map(|s| s.phase).unwrap_or(ImportPhase::Failed)
    }

    pub fn advance(&self, next: ImportPhase) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        tracing::debug!(
            "Import phase {} -> {} ({} ms in previous phase)",
            state.phase,
            next,
            state.entered_at.elapsed().as_millis()
        );
        state.phase = next;
        state.entered_at = Instant::now();
    }

    /// Moves to `Failed`. Only Decoding, Reconciling and Persisting may fail.
    pub fn fail(&self, reason: &dyn std::fmt::Display) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        debug_assert!(
            state.phase.can_fail(),
            "phase {} cannot fail",
            state.phase
        );
        tracing::error!("Import failed during {}: {}", state.phase, reason);
        state.phase = ImportPhase::Failed;
        state.entered_at = Instant::now();
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.state
            .read()
            .map(|s| s.started_at.elapsed().as_millis())
            .unwrap_or_default()
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_through_phases() {
        let tracker = PhaseTracker::new();
        assert_eq!(tracker.phase(), ImportPhase::Idle);

        tracker.advance(ImportPhase::Decoding);
        tracker.advance(ImportPhase::Reconciling);
        assert_eq!(tracker.phase(), ImportPhase::Reconciling);

        tracker.fail(&"store offline");
        assert_eq!(tracker.phase(), ImportPhase::Failed);
    }
}
