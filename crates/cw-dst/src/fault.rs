//! Deterministic fault injection for the generation service.
//!
//! Each fault reproduces what the hosted API actually sends back, so the
//! response handler sees the same marker text it would see in production.

use crate::random::DeterministicRng;

/// Failure modes of one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceFault {
    /// 400 with an `API_KEY_INVALID` reason.
    InvalidCredential,
    /// 429 with a `QUOTA_EXCEEDED` reason.
    QuotaExceeded,
    /// 400 "User location is not supported".
    RegionUnsupported,
    /// Connection level failure with no marker.
    Network,
    /// Successful call with no text.
    EmptyPayload,
    /// Successful call whose text is not JSON.
    MalformedPayload,
}

impl ServiceFault {
    pub const ALL: [ServiceFault; 6] = [
        ServiceFault::InvalidCredential,
        ServiceFault::QuotaExceeded,
        ServiceFault::RegionUnsupported,
        ServiceFault::Network,
        ServiceFault::EmptyPayload,
        ServiceFault::MalformedPayload,
    ];

    /// Transport error text as the HTTP client would report it.
    #[must_use]
    pub fn transport_message(self) -> Option<&'static str> {
        match self {
            ServiceFault::InvalidCredential => Some(
                r#"[400 Bad Request] {"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID","domain":"googleapis.com"}]}}"#,
            ),
            ServiceFault::QuotaExceeded => Some(
                r#"[429 Too Many Requests] {"error":{"code":429,"message":"Quota exceeded for quota metric 'Generate Content API requests per minute'.","status":"RESOURCE_EXHAUSTED","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"QUOTA_EXCEEDED"}]}}"#,
            ),
            ServiceFault::RegionUnsupported => Some(
                r#"[400 Bad Request] {"error":{"code":400,"message":"User location is not supported for the API use.","status":"FAILED_PRECONDITION"}}"#,
            ),
            ServiceFault::Network => Some("error sending request: connection reset by peer"),
            ServiceFault::EmptyPayload | ServiceFault::MalformedPayload => None,
        }
    }
}

/// Configuration for fault injection.
#[derive(Debug, Clone)]
pub struct FaultConfig {
    /// Probability that a call fails (0.0 to 1.0)
    pub failure_probability: f64,
    /// Faults to pick from, uniformly
    pub faults: Vec<ServiceFault>,
    /// Whether fault injection is enabled
    pub enabled: bool,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            failure_probability: 0.2,
            faults: ServiceFault::ALL.to_vec(),
            enabled: true,
        }
    }
}

impl FaultConfig {
    /// No faults - every call succeeds.
    #[must_use]
    pub fn none() -> Self {
        Self {
            failure_probability: 0.0,
            faults: Vec::new(),
            enabled: false,
        }
    }

    /// Every other call fails, on average.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            failure_probability: 0.5,
            ..Self::default()
        }
    }

    /// Always fail with exactly this fault.
    #[must_use]
    pub fn always(fault: ServiceFault) -> Self {
        Self {
            failure_probability: 1.0,
            faults: vec![fault],
            enabled: true,
        }
    }
}

/// Seeded fault injector. Same seed, same fault sequence.
pub struct FaultInjector {
    rng: DeterministicRng,
    config: FaultConfig,
    faults_injected_count: u64,
}

impl FaultInjector {
    pub fn new(rng: DeterministicRng, config: FaultConfig) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&config.failure_probability),
            "Failure probability must be in [0.0, 1.0]"
        );
        debug_assert!(
            !config.enabled || config.failure_probability == 0.0 || !config.faults.is_empty(),
            "An enabled injector needs at least one fault to pick"
        );

        Self {
            rng,
            config,
            faults_injected_count: 0,
        }
    }

    /// Decide the fault for the next call, if any.
    pub fn next_fault(&mut self) -> Option<ServiceFault> {
        if !self.config.enabled || self.config.faults.is_empty() {
            return None;
        }

        if !self.rng.gen_bool(self.config.failure_probability) {
            return None;
        }

        let fault = *self.rng.choose(&self.config.faults)?;
        self.faults_injected_count += 1;
        Some(fault)
    }

    #[must_use]
    pub fn faults_count(&self) -> u64 {
        self.faults_injected_count
    }
}
