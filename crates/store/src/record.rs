//! Result recording for a Raindrop run.
//!
//! `assessmentResult` is shared with other mini-games, so it is read, merged
//! and written back whole: only `p_M` is touched and only upward.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::types::{ASSESSMENT_RESULT_KEY, MATH_SCORE_FIELD, SCORE_KEY, TIME_KEY};
use crate::{KeyValueStore, StoreError};

/// What the ratchet merge did to `p_M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatchetOutcome {
    /// The stored value was lower and has been replaced.
    Raised { from: u64, to: u64 },
    /// The stored value was equal or higher and was left alone.
    Kept { stored: u64 },
    /// No usable value was stored; the field now holds the score.
    Defaulted { to: u64 },
}

/// Persist the running score.
pub fn record_score<S>(store: &mut S, score: u32) -> Result<RatchetOutcome, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.set(SCORE_KEY, &score.to_string())?;
    ratchet_math_score(store, score)
}

/// Persist the final score and survival time, then ratchet `p_M`.
pub fn record_final<S>(
    store: &mut S,
    score: u32,
    survival: &str,
) -> Result<RatchetOutcome, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.set(SCORE_KEY, &score.to_string())?;
    store.set(TIME_KEY, survival)?;
    ratchet_math_score(store, score)
}

/// Current `p_M`, or 0 when absent or unreadable.
pub fn read_math_score<S>(store: &S) -> u64
where
    S: KeyValueStore + ?Sized,
{
    match load_assessment(store) {
        Ok(blob) => blob
            .get(MATH_SCORE_FIELD)
            .and_then(parse_math_score)
            .unwrap_or(0),
        Err(e) => {
            warn!("Failed to read {ASSESSMENT_RESULT_KEY}: {e}");
            0
        }
    }
}

/// Compare-then-write: replace `p_M` only when `score` is strictly greater.
///
/// Every other field of the blob is written back unchanged. A failed read
/// writes nothing.
pub fn ratchet_math_score<S>(store: &mut S, score: u32) -> Result<RatchetOutcome, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let mut blob = load_assessment(store)?;
    let candidate = score as u64;

    let outcome = match blob.get(MATH_SCORE_FIELD).and_then(parse_math_score) {
        Some(stored) if candidate > stored => RatchetOutcome::Raised {
            from: stored,
            to: candidate,
        },
        Some(stored) => return Ok(RatchetOutcome::Kept { stored }),
        None => RatchetOutcome::Defaulted { to: candidate },
    };

    blob.insert(
        MATH_SCORE_FIELD.to_string(),
        Value::String(candidate.to_string()),
    );
    store.set(ASSESSMENT_RESULT_KEY, &Value::Object(blob).to_string())?;
    debug!(?outcome, "updated assessment math score");
    Ok(outcome)
}

/// Only unparseable or non-object contents count as absent; read errors
/// are returned.
fn load_assessment<S>(store: &S) -> Result<Map<String, Value>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(ASSESSMENT_RESULT_KEY)? else {
        return Ok(Map::new());
    };

    let blob = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!("{ASSESSMENT_RESULT_KEY} is not an object ({other}); treating as absent");
            Map::new()
        }
        Err(e) => {
            warn!("{ASSESSMENT_RESULT_KEY} is malformed ({e}); treating as absent");
            Map::new()
        }
    };
    Ok(blob)
}

/// Accepts decimal strings and JSON numbers; fractions are truncated.
fn parse_math_score(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_score))
        }
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(float_score)),
        _ => None,
    };
    if parsed.is_none() {
        warn!("{MATH_SCORE_FIELD} value {value} is not a score; treating as absent");
    }
    parsed
}

fn float_score(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64)
}
