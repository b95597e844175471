//! Comparison session model and API request/response types.
//!
//! A session is the unit of isolation between concurrent users: it owns the
//! two scenarios being compared, their global parameters, and the
//! lump-sum-vs-DCA flag. Sessions live only in server memory and disappear
//! when they expire or the process restarts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::cycle::{CycleResponse, StrategyCycle};
use crate::models::scenario::{ScenarioId, ScenarioParams};

/// In-memory state of one comparison session.
///
/// # Ownership
///
/// Sessions are addressed by an opaque bearer token; the store keys them by
/// the token's SHA-256 hash, so the session itself never holds the token.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier for this session
    pub id: Uuid,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session stops being usable
    pub expires_at: DateTime<Utc>,

    /// While true, scenario 2 is regenerated from scenario 1 as a DCA
    /// mirror and rejects direct edits
    pub compare_lump_sum_dca: bool,

    /// Global parameters for scenario 1
    pub scenario1_params: ScenarioParams,

    /// Global parameters for scenario 2
    pub scenario2_params: ScenarioParams,

    /// Strategy cycles of scenario 1
    pub scenario1_cycles: Vec<StrategyCycle>,

    /// Strategy cycles of scenario 2
    pub scenario2_cycles: Vec<StrategyCycle>,
}

impl Session {
    /// Create an empty session with default parameters and the given
    /// lifetime.
    pub fn new(ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + ttl,
            compare_lump_sum_dca: false,
            scenario1_params: ScenarioParams::default(),
            scenario2_params: ScenarioParams::default(),
            scenario1_cycles: Vec::new(),
            scenario2_cycles: Vec::new(),
        }
    }

    /// Whether the session has passed its expiry time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Cycles of the given scenario.
    pub fn cycles(&self, scenario: ScenarioId) -> &Vec<StrategyCycle> {
        match scenario {
            ScenarioId::One => &self.scenario1_cycles,
            ScenarioId::Two => &self.scenario2_cycles,
        }
    }

    /// Mutable cycles of the given scenario.
    pub fn cycles_mut(&mut self, scenario: ScenarioId) -> &mut Vec<StrategyCycle> {
        match scenario {
            ScenarioId::One => &mut self.scenario1_cycles,
            ScenarioId::Two => &mut self.scenario2_cycles,
        }
    }

    /// Global parameters of the given scenario.
    pub fn params(&self, scenario: ScenarioId) -> &ScenarioParams {
        match scenario {
            ScenarioId::One => &self.scenario1_params,
            ScenarioId::Two => &self.scenario2_params,
        }
    }
}

/// Response body for session creation.
///
/// # Security Note
///
/// The `session_token` is returned exactly once, here. Only its SHA-256
/// hash is stored server-side, so the token cannot be recovered later.
///
/// # JSON Example
///
/// ```json
/// {
///   "session_id": "550e8400-e29b-41d4-a716-446655440000",
///   "session_token": "3f1c…64 hex chars…9ab2",
///   "expires_at": "2026-08-07T11:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    /// Session unique identifier
    pub session_id: Uuid,

    /// Bearer token for all subsequent requests (shown only once)
    pub session_token: String,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

/// One scenario's state as returned to clients: its parameters plus its
/// cycles, each carrying its 0-based index.
#[derive(Debug, Serialize)]
pub struct ScenarioState {
    /// Global parameters of this scenario
    pub params: ScenarioParams,

    /// Cycles of this scenario, in execution order
    pub cycles: Vec<CycleResponse>,
}

/// Response body for `GET /api/v1/session`.
///
/// # JSON Example
///
/// ```json
/// {
///   "session_id": "550e8400-e29b-41d4-a716-446655440000",
///   "created_at": "2026-08-07T10:00:00Z",
///   "expires_at": "2026-08-07T11:00:00Z",
///   "compare_lump_sum_dca": false,
///   "scenario1": { "params": { … }, "cycles": [ … ] },
///   "scenario2": { "params": { … }, "cycles": [ … ] }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Session unique identifier
    pub session_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,

    /// Whether scenario 2 is currently a derived DCA mirror
    pub compare_lump_sum_dca: bool,

    /// Scenario 1 parameters and cycles
    pub scenario1: ScenarioState,

    /// Scenario 2 parameters and cycles
    pub scenario2: ScenarioState,
}

/// Convert a stored session into its API representation.
impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let to_state = |params: &ScenarioParams, cycles: &[StrategyCycle]| ScenarioState {
            params: params.clone(),
            cycles: cycles
                .iter()
                .enumerate()
                .map(CycleResponse::from)
                .collect(),
        };

        Self {
            session_id: session.id,
            created_at: session.created_at,
            expires_at: session.expires_at,
            compare_lump_sum_dca: session.compare_lump_sum_dca,
            scenario1: to_state(&session.scenario1_params, &session.scenario1_cycles),
            scenario2: to_state(&session.scenario2_params, &session.scenario2_cycles),
        }
    }
}
