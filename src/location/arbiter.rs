//! Best-fix arbitration.
//!
//! Balances "prefer fresh" against "prefer accurate":
//!
//! 1. No incumbent → adopt.
//! 2. Candidate more than the stale window newer → adopt (the user has
//!    probably moved since the incumbent was taken).
//! 3. Candidate more than the stale window older → reject.
//! 4. Otherwise compare accuracy:
//!    - strictly more accurate → adopt;
//!    - newer-or-equal and not less accurate → adopt;
//!    - newer-or-equal, not *significantly* less accurate, and from the
//!      same provider → adopt (keeps GPS and network from flip-flopping
//!      on marginal differences);
//!    - anything else → reject.
//!
//! Rule 4b overlaps 4a except when accuracy is exactly equal.  Both are
//! kept so the equal-accuracy case reads the same as the others.

use log::debug;

use super::PositionFix;
use crate::config::SystemConfig;

/// Which arbitration rule decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// There was no incumbent.
    FirstFix,
    /// Candidate is newer than the incumbent by more than the stale window.
    SignificantlyNewer,
    /// Candidate is older than the incumbent by more than the stale window.
    SignificantlyOlder,
    /// Candidate reports a tighter error radius.
    MoreAccurate,
    /// Candidate is at least as recent and at least as accurate.
    NewerNotLessAccurate,
    /// Candidate is at least as recent, slightly less accurate, same provider.
    SameProviderContinuity,
    /// No rule favoured the candidate.
    Rejected,
}

impl Verdict {
    /// `true` if the candidate should replace the incumbent.
    pub fn adopts(self) -> bool {
        !matches!(self, Self::SignificantlyOlder | Self::Rejected)
    }
}

/// Keeps the single best current position.
pub struct FixArbiter {
    best: Option<PositionFix>,
    /// Time separation beyond which recency alone decides (ms).
    stale_after_ms: i64,
    /// Accuracy loss tolerated for same-provider continuity (m).
    significant_accuracy_loss_m: f32,
}

impl FixArbiter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            best: None,
            stale_after_ms: i64::from(config.stale_fix_ms),
            significant_accuracy_loss_m: config.significant_accuracy_loss_m,
        }
    }

    /// Offer a new fix.  Returns `true` if it became the best position.
    pub fn consider(&mut self, candidate: PositionFix) -> bool {
        let verdict = self.judge(&candidate);
        debug!(
            "arbiter: {:?} from {} (t={} acc={:.1}m)",
            verdict, candidate.provider, candidate.timestamp_ms, candidate.accuracy
        );
        if verdict.adopts() {
            self.best = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Decide whether `candidate` beats the current best, without adopting it.
    pub fn judge(&self, candidate: &PositionFix) -> Verdict {
        let Some(best) = self.best.as_ref() else {
            return Verdict::FirstFix;
        };

        let time_delta = candidate.timestamp_ms.saturating_sub(best.timestamp_ms);
        if time_delta > self.stale_after_ms {
            return Verdict::SignificantlyNewer;
        }
        if time_delta < -self.stale_after_ms {
            return Verdict::SignificantlyOlder;
        }

        let accuracy_delta = candidate.accuracy - best.accuracy;
        let newer_or_equal = time_delta >= 0;

        if accuracy_delta < 0.0 {
            Verdict::MoreAccurate
        } else if newer_or_equal && accuracy_delta <= 0.0 {
            Verdict::NewerNotLessAccurate
        } else if newer_or_equal
            && accuracy_delta <= self.significant_accuracy_loss_m
            && candidate.same_provider(best)
        {
            Verdict::SameProviderContinuity
        } else {
            Verdict::Rejected
        }
    }

    /// Replace the best position with the freshest of `last_known`,
    /// bypassing arbitration.  Ties on timestamp go to the later entry.
    ///
    /// Used when a session resumes and the location subsystem hands back
    /// its cached per-provider fixes.  Returns `false` (best untouched) if
    /// `last_known` is empty.
    pub fn seed(&mut self, last_known: impl IntoIterator<Item = PositionFix>) -> bool {
        let freshest = last_known.into_iter().fold(None, |acc: Option<PositionFix>, fix| {
            match acc {
                Some(cur) if cur.timestamp_ms > fix.timestamp_ms => Some(cur),
                _ => Some(fix),
            }
        });
        match freshest {
            Some(fix) => {
                debug!("arbiter: seeded from last-known {} fix", fix.provider);
                self.best = Some(fix);
                true
            }
            None => false,
        }
    }

    /// Current best position, if any fix has been adopted.
    pub fn best(&self) -> Option<&PositionFix> {
        self.best.as_ref()
    }

    /// Forget the current best position.
    pub fn clear(&mut self) {
        self.best = None;
    }
}
