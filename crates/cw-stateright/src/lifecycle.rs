//! Stateright model of the request lifecycle.
//!
//! Mirrors `Controller::handle` with clue content abstracted away. Every
//! successful outcome is assumed to carry at least one clue so that copying
//! is always possible from `Success`.

use std::collections::BTreeSet;

use cw_core::{RequestId, RequestState};
use stateright::Model;

/// Visible request state. Outcomes remember which request produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Idle,
    Loading(RequestId),
    Success(RequestId),
    Failed(RequestId),
}

impl Mode {
    /// Whether the controller's state has the same shape.
    ///
    /// The controller does not keep the id of a finished request, so only
    /// `Loading` is compared by id.
    pub fn agrees_with(&self, state: &RequestState) -> bool {
        match (self, state) {
            (Mode::Idle, RequestState::Idle) => true,
            (Mode::Loading(id), RequestState::Loading { request }) => id == request,
            (Mode::Success(_), RequestState::Success(_)) => true,
            (Mode::Failed(_), RequestState::Failed(_)) => true,
            _ => false,
        }
    }
}

/// State of the lifecycle model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LifecycleState {
    pub mode: Mode,
    /// Whether the word field holds only whitespace
    pub word_blank: bool,
    /// Calls that were started and have not reported back yet
    pub in_flight: BTreeSet<RequestId>,
    /// Id the next accepted submit will use
    pub request_id_next: RequestId,
    /// Whether a clue is currently marked as copied
    pub copied: bool,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            word_blank: true,
            in_flight: BTreeSet::new(),
            request_id_next: 1,
            copied: false,
        }
    }

    /// Most recently accepted request, if any.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.request_id_next.checked_sub(1).filter(|&id| id > 0)
    }

    // ========== Invariants ==========

    /// A loading request has a call in flight.
    pub fn loading_has_call(&self) -> bool {
        match self.mode {
            Mode::Loading(id) => self.in_flight.contains(&id),
            _ => true,
        }
    }

    /// Only the latest request may be live or have its outcome shown.
    pub fn outcome_is_latest(&self) -> bool {
        match self.mode {
            Mode::Idle => true,
            Mode::Loading(id) | Mode::Success(id) | Mode::Failed(id) => {
                Some(id) == self.latest_request()
            }
        }
    }

    /// Every in-flight call was started by an accepted submit.
    pub fn in_flight_ids_issued(&self) -> bool {
        self.in_flight
            .iter()
            .all(|&id| id > 0 && id < self.request_id_next)
    }

    /// The copied marker only exists next to a successful result.
    pub fn copied_only_on_success(&self) -> bool {
        !self.copied || matches!(self.mode, Mode::Success(_))
    }

    pub fn invariants_hold(&self) -> bool {
        self.loading_has_call()
            && self.outcome_is_latest()
            && self.in_flight_ids_issued()
            && self.copied_only_on_success()
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Things that can happen to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    /// User edits the word
    SetWord { blank: bool },
    Submit,
    /// A started call reports back
    Complete { request: RequestId, ok: bool },
    Clear,
    /// User copies the first clue
    Copy,
    /// Copy indicator timer fires
    Expire,
}

/// Model for bounded model checking.
pub struct LifecycleModel {
    /// Submits accepted before the model stops offering `Submit`
    pub submits_max: u64,
}

impl LifecycleModel {
    pub fn new(submits_max: u64) -> Self {
        debug_assert!(submits_max > 0);
        Self { submits_max }
    }
}

impl Model for LifecycleModel {
    type State = LifecycleState;
    type Action = LifecycleAction;

    fn init_states(&self) -> Vec<Self::State> {
        vec![LifecycleState::new()]
    }

    fn actions(&self, state: &Self::State, actions: &mut Vec<Self::Action>) {
        actions.push(LifecycleAction::SetWord {
            blank: !state.word_blank,
        });

        if state.request_id_next <= self.submits_max {
            actions.push(LifecycleAction::Submit);
        }

        for &request in &state.in_flight {
            actions.push(LifecycleAction::Complete { request, ok: true });
            actions.push(LifecycleAction::Complete { request, ok: false });
        }

        actions.push(LifecycleAction::Clear);

        if matches!(state.mode, Mode::Success(_)) {
            actions.push(LifecycleAction::Copy);
        }
        if state.copied {
            actions.push(LifecycleAction::Expire);
        }
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Option<Self::State> {
        let mut next = state.clone();

        match action {
            LifecycleAction::SetWord { blank } => {
                next.word_blank = blank;
            }

            LifecycleAction::Submit => {
                if matches!(next.mode, Mode::Loading(_)) || next.word_blank {
                    return Some(next);
                }
                let request = next.request_id_next;
                next.request_id_next += 1;
                next.in_flight.insert(request);
                next.mode = Mode::Loading(request);
                next.copied = false;
            }

            LifecycleAction::Complete { request, ok } => {
                next.in_flight.remove(&request);
                if next.mode == Mode::Loading(request) {
                    next.mode = if ok {
                        Mode::Success(request)
                    } else {
                        Mode::Failed(request)
                    };
                }
            }

            LifecycleAction::Clear => {
                next.word_blank = true;
                next.mode = Mode::Idle;
                next.copied = false;
            }

            LifecycleAction::Copy => {
                if matches!(next.mode, Mode::Success(_)) {
                    next.copied = true;
                }
            }

            LifecycleAction::Expire => {
                next.copied = false;
            }
        }

        Some(next)
    }

    fn properties(&self) -> Vec<stateright::Property<Self>> {
        vec![
            stateright::Property::always("LoadingHasCall", |_model: &Self, state: &Self::State| {
                state.loading_has_call()
            }),
            stateright::Property::always("OutcomeIsLatest", |_model: &Self, state: &Self::State| {
                state.outcome_is_latest()
            }),
            stateright::Property::always("InFlightIdsIssued", |_model: &Self, state: &Self::State| {
                state.in_flight_ids_issued()
            }),
            stateright::Property::always(
                "CopiedOnlyOnSuccess",
                |_model: &Self, state: &Self::State| state.copied_only_on_success(),
            ),
            stateright::Property::sometimes(
                "StaleCallOutlivesClear",
                |_model: &Self, state: &Self::State| {
                    state.mode == Mode::Idle && !state.in_flight.is_empty()
                },
            ),
            stateright::Property::sometimes("ReachesSuccess", |_model: &Self, state: &Self::State| {
                matches!(state.mode, Mode::Success(_))
            }),
        ]
    }
}
