// ABOUTME: Request status enum and the lifecycle transition table
// ABOUTME: Single source of truth for which transitions and UI actions are legal per status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a request document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Initial state, content still editable
    Draft,
    /// Confirmed by the user but not yet sent; gates like `Sent`
    Confirmed,
    /// Sent to the provider, awaiting processing
    Sent,
    /// Being worked on
    Processing,
    /// Delivered, read-only
    Completed,
    /// Abandoned by the user, read-only
    Cancelled,
}

impl RequestStatus {
    /// Returns true if moving from `self` to `to` is a legal lifecycle transition.
    ///
    /// Drives both UI gating and the store's mutation guard, so an illegal
    /// transition can never be applied no matter which path requests it.
    pub fn can_transition(self, to: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, to),
            (Draft, Confirmed)
                | (Draft, Sent)
                | (Draft, Cancelled)
                | (Confirmed, Sent)
                | (Confirmed, Processing)
                | (Confirmed, Cancelled)
                | (Sent, Processing)
                | (Sent, Cancelled)
                | (Processing, Completed)
        )
    }

    /// Terminal statuses expose no mutating actions
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    // Confirmed and Sent stay distinct for display but gate identically
    fn is_sent_like(self) -> bool {
        matches!(self, RequestStatus::Sent | RequestStatus::Confirmed)
    }

    /// Content edits are permitted only while the request is a draft
    pub fn can_edit(self) -> bool {
        self == RequestStatus::Draft
    }

    /// The send action is offered only from draft
    pub fn can_send(self) -> bool {
        self == RequestStatus::Draft
    }

    /// Cancel is offered from draft and from the sent-like statuses
    pub fn can_cancel(self) -> bool {
        self == RequestStatus::Draft || self.is_sent_like()
    }

    /// Repost (copy into a fresh draft) is offered once a request has left draft
    pub fn can_repost(self) -> bool {
        self.is_sent_like() || matches!(self, RequestStatus::Processing | RequestStatus::Completed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Draft => "draft",
            RequestStatus::Confirmed => "confirmed",
            RequestStatus::Sent => "sent",
            RequestStatus::Processing => "processing",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::RequestStatus::*;
    use super::*;

    const ALL: [RequestStatus; 6] = [Draft, Confirmed, Sent, Processing, Completed, Cancelled];

    #[test]
    fn test_transition_table_exact() {
        let legal = [
            (Draft, Confirmed),
            (Draft, Sent),
            (Draft, Cancelled),
            (Confirmed, Sent),
            (Confirmed, Processing),
            (Confirmed, Cancelled),
            (Sent, Processing),
            (Sent, Cancelled),
            (Processing, Completed),
        ];

        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition(to),
                    expected,
                    "transition {} -> {} should be {}",
                    from,
                    to,
                    if expected { "legal" } else { "illegal" }
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_transitions() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for to in ALL {
                assert!(!terminal.can_transition(to));
            }
            assert!(!terminal.can_edit());
            assert!(!terminal.can_send());
            assert!(!terminal.can_cancel());
        }
    }

    #[test]
    fn test_draft_only_editing_and_sending() {
        assert!(Draft.can_edit());
        assert!(Draft.can_send());
        for status in [Confirmed, Sent, Processing, Completed, Cancelled] {
            assert!(!status.can_edit(), "{} must not be editable", status);
            assert!(!status.can_send(), "{} must not offer send", status);
        }
    }

    #[test]
    fn test_confirmed_gates_like_sent() {
        assert_eq!(Confirmed.can_cancel(), Sent.can_cancel());
        assert_eq!(Confirmed.can_repost(), Sent.can_repost());
        assert_eq!(Confirmed.can_edit(), Sent.can_edit());
        // But they remain distinct values for display
        assert_ne!(Confirmed, Sent);
    }

    #[test]
    fn test_repost_availability() {
        for status in [Confirmed, Sent, Processing, Completed] {
            assert!(status.can_repost(), "{} should offer repost", status);
        }
        assert!(!Draft.can_repost());
        assert!(!Cancelled.can_repost());
    }

    #[test]
    fn test_serde_roundtrip_lowercase() {
        let json = serde_json::to_string(&Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let back: RequestStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Processing);
    }
}
