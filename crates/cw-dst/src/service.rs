//! Simulated generation service.
//!
//! Replays scripted replies first, then falls back to seeded behaviour:
//! a fault from the injector or a well-formed payload.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use cw_core::{ApiKey, GenerationRequest, GenerationService, TransportError};
use serde_json::json;

use crate::fault::{FaultInjector, ServiceFault};
use crate::random::DeterministicRng;

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimReply {
    /// Successful call carrying this text.
    Payload(String),
    Fault(ServiceFault),
}

impl SimReply {
    fn into_outcome(self) -> Result<Option<String>, TransportError> {
        match self {
            SimReply::Payload(text) => Ok(Some(text)),
            SimReply::Fault(fault) => fault_outcome(fault),
        }
    }
}

fn fault_outcome(fault: ServiceFault) -> Result<Option<String>, TransportError> {
    match fault.transport_message() {
        Some(message) => Err(TransportError::new(message)),
        None if fault == ServiceFault::EmptyPayload => Ok(None),
        None => Ok(Some("{\"clues\": [\"unterminated".to_string())),
    }
}

struct SimState {
    script: VecDeque<SimReply>,
    fault: FaultInjector,
    rng: DeterministicRng,
    last_request: Option<GenerationRequest>,
}

/// Deterministic stand-in for the hosted model.
pub struct SimService {
    state: Mutex<SimState>,
    calls_count: AtomicU64,
}

impl SimService {
    pub fn new(rng: DeterministicRng, fault: FaultInjector) -> Self {
        Self {
            state: Mutex::new(SimState {
                script: VecDeque::new(),
                fault,
                rng,
                last_request: None,
            }),
            calls_count: AtomicU64::new(0),
        }
    }

    /// Queue replies to return, in order, before seeded behaviour resumes.
    pub fn with_script(self, replies: impl IntoIterator<Item = SimReply>) -> Self {
        self.lock().script.extend(replies);
        self
    }

    /// Number of `generate` calls received.
    #[must_use]
    pub fn calls_count(&self) -> u64 {
        self.calls_count.load(Ordering::Acquire)
    }

    /// The most recent request received.
    #[must_use]
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.lock().last_request.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SimState {
    fn next_outcome(&mut self) -> Result<Option<String>, TransportError> {
        if let Some(reply) = self.script.pop_front() {
            return reply.into_outcome();
        }

        if let Some(fault) = self.fault.next_fault() {
            log::debug!("sim: injecting {:?}", fault);
            return fault_outcome(fault);
        }

        Ok(Some(self.random_payload()))
    }

    fn random_payload(&mut self) -> String {
        let clues_count = self.rng.gen_range(1..=10_usize);
        let synonyms_count = self.rng.gen_range(0..=3_usize);
        let antonyms_count = self.rng.gen_range(0..=3_usize);

        let clues: Vec<String> = (1..=clues_count).map(|i| format!("تلميح {}", i)).collect();
        let synonyms: Vec<String> = (1..=synonyms_count).map(|i| format!("مرادف {}", i)).collect();
        let antonyms: Vec<String> = (1..=antonyms_count).map(|i| format!("ضد {}", i)).collect();

        json!({ "clues": clues, "synonyms": synonyms, "antonyms": antonyms }).to_string()
    }
}

#[async_trait]
impl GenerationService for SimService {
    async fn generate(
        &self,
        _api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<Option<String>, TransportError> {
        self.calls_count.fetch_add(1, Ordering::AcqRel);

        let mut state = self.lock();
        state.last_request = Some(request.clone());
        state.next_outcome()
    }
}
