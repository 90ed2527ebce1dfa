//! Decoding of the sensor endpoint's JSON payloads.
//!
//! Two payloads arrive from the server:
//!
//! - the latest reading, `GET /data`:
//!   `{"sensor_id", "ambient_temp", "object_temp", "sampling_interval", "timestamp", ...}`
//! - the breath rate, `GET /rate`: `{"breath_rate": number | null}`
//!
//! Both decode to a [`DashboardUpdate`]. Failed requests come back as
//! `{"error": "..."}` and decode to [`ProtocolError::Server`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding an endpoint payload.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    /// The server answered with an error body.
    #[error("server error: {0}")]
    Server(String),

    #[error("invalid `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Neither a reading nor a breath rate.
    #[error("unrecognised payload")]
    Unrecognised,
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// The latest reading of a sensor, as served by `GET /data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default)]
    pub sensor_id: Option<String>,
    pub ambient_temp: f64,
    pub object_temp: f64,
    /// Device sampling interval in milliseconds.
    #[serde(default)]
    pub sampling_interval: Option<f64>,
    /// ISO-8601 time the server received the reading.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl SensorReading {
    /// Samples per minute; 0 when the interval is missing or zero.
    pub fn sampling_rate(&self) -> f64 {
        match self.sampling_interval {
            Some(interval) if interval != 0.0 && interval.is_finite() => 60_000.0 / interval,
            _ => 0.0,
        }
    }
}

/// Breath rate carried by an update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BreathRate {
    /// The payload said nothing about the breath rate.
    #[default]
    Absent,
    /// The server could not estimate a rate yet.
    Unavailable,
    /// Breaths per minute.
    Value(f64),
}

/// Paired temperatures of one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    pub ambient: f64,
    pub object: f64,
}

/// Everything one payload asks the dashboard to show.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardUpdate {
    pub temperatures: Option<Temperatures>,
    pub sampling_rate: Option<f64>,
    pub breath_rate: BreathRate,
}

impl DashboardUpdate {
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            temperatures: Some(Temperatures {
                ambient: reading.ambient_temp,
                object: reading.object_temp,
            }),
            sampling_rate: Some(reading.sampling_rate()),
            breath_rate: BreathRate::Absent,
        }
    }

    pub fn breath_rate(rate: Option<f64>) -> Self {
        Self {
            breath_rate: rate.map_or(BreathRate::Unavailable, BreathRate::Value),
            ..Self::default()
        }
    }
}

/// Decode one payload from either endpoint.
///
/// A reading is recognised by the presence of both temperatures; a
/// breath-rate payload by the presence of `breath_rate`. The `breath_rate`
/// that `GET /data` also carries is ignored; rates are taken from
/// `GET /rate` only.
pub fn decode_payload(json: &str) -> ProtocolResult<DashboardUpdate> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(object) = &value else {
        return Err(ProtocolError::NotAnObject);
    };

    if let Some(message) = object.get("error") {
        let message = message
            .as_str()
            .map_or_else(|| message.to_string(), str::to_string);
        return Err(ProtocolError::Server(message));
    }

    if object.contains_key("ambient_temp") && object.contains_key("object_temp") {
        let reading = SensorReading::deserialize(&value)?;
        return Ok(DashboardUpdate::from_reading(&reading));
    }

    match object.get("breath_rate") {
        Some(Value::Null) => Ok(DashboardUpdate::breath_rate(None)),
        Some(rate) => rate
            .as_f64()
            .map(|rate| DashboardUpdate::breath_rate(Some(rate)))
            .ok_or_else(|| ProtocolError::InvalidField {
                field: "breath_rate",
                reason: format!("expected a number or null, got {rate}"),
            }),
        None => Err(ProtocolError::Unrecognised),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reading() {
        let update = decode_payload(
            r#"{"sensor_id":"Bob","ambient_temp":24.31,"object_temp":33.9,
                "sampling_interval":500,"timestamp":"2024-03-01T10:00:00","breath_rate":14.2}"#,
        )
        .unwrap();

        assert_eq!(
            update.temperatures,
            Some(Temperatures {
                ambient: 24.31,
                object: 33.9
            })
        );
        assert_eq!(update.sampling_rate, Some(120.0));
        assert_eq!(update.breath_rate, BreathRate::Absent);
    }

    #[test]
    fn test_missing_or_zero_interval_gives_zero_rate() {
        let update = decode_payload(r#"{"ambient_temp":24.0,"object_temp":33.0}"#).unwrap();
        assert_eq!(update.sampling_rate, Some(0.0));

        let update =
            decode_payload(r#"{"ambient_temp":24.0,"object_temp":33.0,"sampling_interval":0}"#)
                .unwrap();
        assert_eq!(update.sampling_rate, Some(0.0));
    }

    #[test]
    fn test_decode_breath_rate() {
        assert_eq!(
            decode_payload(r#"{"breath_rate":15.25}"#).unwrap().breath_rate,
            BreathRate::Value(15.25)
        );
        let unavailable = decode_payload(r#"{"breath_rate":null}"#).unwrap();
        assert_eq!(unavailable.breath_rate, BreathRate::Unavailable);
        assert_eq!(unavailable.temperatures, None);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_payload(r#"{"error":"Device not found or no data"}"#),
            Err(ProtocolError::Server(message)) if message == "Device not found or no data"
        ));
        assert!(matches!(decode_payload("[1,2]"), Err(ProtocolError::NotAnObject)));
        assert!(matches!(decode_payload("{"), Err(ProtocolError::Json(_))));
        assert!(matches!(
            decode_payload(r#"{"status":"success"}"#),
            Err(ProtocolError::Unrecognised)
        ));
        assert!(matches!(
            decode_payload(r#"{"breath_rate":"fast"}"#),
            Err(ProtocolError::InvalidField { field: "breath_rate", .. })
        ));
        assert!(matches!(
            decode_payload(r#"{"ambient_temp":"warm","object_temp":33.0}"#),
            Err(ProtocolError::Json(_))
        ));
    }
}
