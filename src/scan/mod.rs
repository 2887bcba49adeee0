//! Barcode scan-and-verify workflow.
//!
//! The scanner moves `Idle -> Armed -> Capturing -> Resolving` and then back
//! to `Idle`, or to `Selecting` while the user picks among several candidates.
//! Rearming always takes an explicit user action.

mod format;
mod resolve;
mod workflow;

pub use format::*;
pub use resolve::NoMatch;
pub use workflow::*;

use std::time::{Duration, Instant};

/// Scanner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Scanner off
    Idle,
    /// Accepting reads
    Armed,
    /// A read passed the filters and is the current candidate code
    Capturing { code: String },
    /// The candidate code is being looked up
    Resolving { code: String },
    /// Waiting for the user to choose among candidates
    Selecting { candidates: usize },
}

/// Barcode reader front end: arming, debounce and format filtering.
#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScanState,
    debounce: Duration,
    last_read: Option<Instant>,
}

impl Scanner {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: ScanState::Idle,
            debounce,
            last_read: None,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ScanState::Armed
    }

    /// Arm/cancel control. Ignored while a lookup or a choice is in progress.
    pub fn toggle_arm(&mut self) -> &ScanState {
        self.state = match self.state {
            ScanState::Idle => ScanState::Armed,
            ScanState::Armed => ScanState::Idle,
            _ => return &self.state,
        };
        &self.state
    }

    /// Feed one raw read. Returns the accepted code, if any.
    ///
    /// Reads arriving within the debounce window of the last counted read are
    /// dropped, as are reads failing the format filter.
    pub fn on_read(&mut self, raw: &str, now: Instant) -> Option<String> {
        if self.state != ScanState::Armed {
            return None;
        }

        if let Some(last) = self.last_read {
            if now.saturating_duration_since(last) < self.debounce {
                tracing::debug!("Read ignored inside debounce window");
                return None;
            }
        }
        self.last_read = Some(now);

        let code = raw.trim();
        if !is_likely_code(code) {
            tracing::debug!("Discarding unlikely code {:?}", code);
            return None;
        }

        self.state = ScanState::Capturing {
            code: code.to_string(),
        };
        Some(code.to_string())
    }

    /// Move the captured code to lookup.
    pub fn begin_resolving(&mut self) {
        if let ScanState::Capturing { code } = &self.state {
            self.state = ScanState::Resolving { code: code.clone() };
        }
    }

    /// Record the lookup outcome.
    pub fn settle(&mut self, outcome: &ScanOutcome) {
        self.state = match outcome {
            ScanOutcome::NeedsSelection(candidates) => ScanState::Selecting {
                candidates: candidates.len(),
            },
            ScanOutcome::Verified(_) | ScanOutcome::NoMatch(_) => ScanState::Idle,
        };
    }

    /// Return to idle after an error, a finished choice or a cancel.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "7801234567890";

    fn armed() -> Scanner {
        let mut scanner = Scanner::new(Duration::from_millis(800));
        scanner.toggle_arm();
        scanner
    }

    #[test]
    fn test_reads_ignored_until_armed() {
        let mut scanner = Scanner::new(Duration::from_millis(800));
        assert_eq!(scanner.on_read(CODE, Instant::now()), None);
        assert_eq!(scanner.state(), &ScanState::Idle);
    }

    #[test]
    fn test_toggle_arm_cancels() {
        let mut scanner = armed();
        assert!(scanner.is_armed());
        assert_eq!(scanner.toggle_arm(), &ScanState::Idle);
    }

    #[test]
    fn test_accepted_read_moves_to_capturing_then_resolving() {
        let mut scanner = armed();
        assert_eq!(scanner.on_read(&format!(" {} ", CODE), Instant::now()), Some(CODE.to_string()));
        assert_eq!(scanner.state(), &ScanState::Capturing { code: CODE.to_string() });

        // Further reads are ignored while a code is in flight
        assert_eq!(scanner.on_read(CODE, Instant::now() + Duration::from_secs(5)), None);

        scanner.begin_resolving();
        assert_eq!(scanner.state(), &ScanState::Resolving { code: CODE.to_string() });
        assert_eq!(scanner.toggle_arm(), &ScanState::Resolving { code: CODE.to_string() });
    }

    #[test]
    fn test_invalid_format_is_discarded_and_stays_armed() {
        let mut scanner = armed();
        assert_eq!(scanner.on_read("ABC123", Instant::now()), None);
        assert_eq!(scanner.on_read("12345", Instant::now() + Duration::from_secs(1)), None);
        assert!(scanner.is_armed());
    }

    #[test]
    fn test_debounce_window() {
        let mut scanner = armed();
        let start = Instant::now();

        // A misread still opens the window
        assert_eq!(scanner.on_read("noise", start), None);
        assert_eq!(scanner.on_read(CODE, start + Duration::from_millis(300)), None);
        assert_eq!(
            scanner.on_read(CODE, start + Duration::from_millis(900)),
            Some(CODE.to_string())
        );
    }

    #[test]
    fn test_settle_returns_to_idle_or_selecting() {
        let mut scanner = armed();
        scanner.on_read(CODE, Instant::now());
        scanner.begin_resolving();
        scanner.settle(&ScanOutcome::NoMatch(NoMatch::NotFound { code: CODE.to_string() }));
        assert_eq!(scanner.state(), &ScanState::Idle);

        scanner.toggle_arm();
        scanner.on_read(CODE, Instant::now() + Duration::from_secs(2));
        scanner.begin_resolving();
        scanner.settle(&ScanOutcome::NeedsSelection(Vec::new()));
        assert_eq!(scanner.state(), &ScanState::Selecting { candidates: 0 });

        // Arming is blocked while choosing
        assert_eq!(scanner.toggle_arm(), &ScanState::Selecting { candidates: 0 });
        scanner.reset();
        assert_eq!(scanner.state(), &ScanState::Idle);
    }
}
