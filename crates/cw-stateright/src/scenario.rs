//! Named lifecycle traces worth replaying against the real controller.
//!
//! Each scenario is a sequence of model actions that the model accepts and
//! that ends in a state of interest. They cover the interleavings the
//! controller is most likely to get wrong.

use stateright::Model;

use crate::lifecycle::{LifecycleAction, LifecycleModel, LifecycleState};

/// A named trace of model actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub actions: Vec<LifecycleAction>,
}

impl Scenario {
    fn new(name: &'static str, actions: Vec<LifecycleAction>) -> Self {
        Self { name, actions }
    }

    /// Run the trace through the model, returning every visited state.
    ///
    /// Returns `None` if the model rejects an action or an invariant breaks.
    pub fn states(&self, model: &LifecycleModel) -> Option<Vec<LifecycleState>> {
        let mut states = vec![LifecycleState::new()];
        for &action in &self.actions {
            let current = states.last()?;
            let mut enabled = Vec::new();
            model.actions(current, &mut enabled);
            if !enabled.contains(&action) {
                return None;
            }
            let next = model.next_state(current, action)?;
            if !next.invariants_hold() {
                return None;
            }
            states.push(next);
        }
        Some(states)
    }
}

/// All built-in scenarios.
pub fn scenarios() -> Vec<Scenario> {
    use LifecycleAction::*;

    vec![
        Scenario::new(
            "submit-succeeds",
            vec![SetWord { blank: false }, Submit, Complete { request: 1, ok: true }],
        ),
        Scenario::new(
            "blank-word-ignored",
            vec![Submit, SetWord { blank: false }, SetWord { blank: true }, Submit],
        ),
        Scenario::new(
            "double-submit-while-loading",
            vec![
                SetWord { blank: false },
                Submit,
                Submit,
                Complete { request: 1, ok: true },
            ],
        ),
        Scenario::new(
            "failure-then-retry",
            vec![
                SetWord { blank: false },
                Submit,
                Complete { request: 1, ok: false },
                Submit,
                Complete { request: 2, ok: true },
            ],
        ),
        Scenario::new(
            "clear-then-stale-completion",
            vec![
                SetWord { blank: false },
                Submit,
                Clear,
                Complete { request: 1, ok: true },
            ],
        ),
        Scenario::new(
            "stale-completion-during-new-request",
            vec![
                SetWord { blank: false },
                Submit,
                Clear,
                SetWord { blank: false },
                Submit,
                Complete { request: 1, ok: false },
                Complete { request: 2, ok: true },
            ],
        ),
        Scenario::new(
            "copy-then-expire",
            vec![
                SetWord { blank: false },
                Submit,
                Complete { request: 1, ok: true },
                Copy,
                Expire,
            ],
        ),
        Scenario::new(
            "resubmit-drops-copy-marker",
            vec![
                SetWord { blank: false },
                Submit,
                Complete { request: 1, ok: true },
                Copy,
                Submit,
            ],
        ),
        Scenario::new(
            "clear-drops-copy-marker",
            vec![
                SetWord { blank: false },
                Submit,
                Complete { request: 1, ok: true },
                Copy,
                Clear,
            ],
        ),
    ]
}
