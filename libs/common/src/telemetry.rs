//! Position/status samples emitted by drones.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Why an inbound sample was rejected.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl DecodeError {
    /// The offending field, when the JSON parsed but a value was out of range.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::Json(_) => None,
            DecodeError::Invalid { field, .. } => Some(*field),
        }
    }
}

/// A single telemetry report. Immutable once decoded; both the live fan-out
/// and the durable path share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    pub drone_id: String,
    /// Capture time as an RFC 3339 string. Relayed exactly as received.
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters.
    pub altitude: f64,
    /// Fraction in `0.0..=1.0`.
    pub battery_level: f64,
    pub status: String,
}

impl TelemetrySample {
    /// Decode and validate a JSON-encoded sample.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let sample: TelemetrySample = serde_json::from_slice(bytes)?;
        sample.validate()?;
        Ok(sample)
    }

    /// Serialize to the JSON payload sent to dashboards and the durable sink.
    pub fn encode(&self) -> String {
        // Plain struct of strings and finite floats; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.drone_id.trim().is_empty() {
            return Err(invalid("droneId", "must not be empty"));
        }
        if DateTime::parse_from_rfc3339(&self.timestamp).is_err() {
            return Err(invalid("timestamp", "must be an RFC 3339 date-time"));
        }
        check_range("latitude", self.latitude, -90.0, 90.0)?;
        check_range("longitude", self.longitude, -180.0, 180.0)?;
        if !self.altitude.is_finite() {
            return Err(invalid("altitude", "must be a finite number"));
        }
        check_range("batteryLevel", self.battery_level, 0.0, 1.0)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), DecodeError> {
    if !value.is_finite() {
        return Err(invalid(field, "must be a finite number"));
    }
    if value < min || value > max {
        return Err(invalid(field, "out of range"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: &'static str) -> DecodeError {
    DecodeError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> serde_json::Value {
        serde_json::json!({
            "droneId": "d1",
            "timestamp": "2024-05-01T12:00:00.250+00:00",
            "latitude": 34.052235,
            "longitude": -118.243683,
            "altitude": 100.0,
            "batteryLevel": 0.975,
            "status": "flying"
        })
    }

    #[test]
    fn decodes_camel_case_payload() {
        let sample = TelemetrySample::decode(raw().to_string().as_bytes()).unwrap();
        assert_eq!(sample.drone_id, "d1");
        assert_eq!(sample.status, "flying");
        assert_eq!(sample.battery_level, 0.975);
    }

    #[test]
    fn encode_keeps_wire_field_names_and_offset() {
        let sample = TelemetrySample::decode(raw().to_string().as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&sample.encode()).unwrap();
        assert_eq!(value["droneId"], "d1");
        assert_eq!(value["batteryLevel"], 0.975);
        assert!(value["timestamp"].as_str().unwrap().ends_with("+00:00"));
        assert_eq!(sample.encode(), sample.encode());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = TelemetrySample::decode(b"{\"droneId\": ").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.field().is_none());
    }

    #[test]
    fn rejects_bad_timestamp() {
        let mut value = raw();
        value["timestamp"] = "yesterday".into();
        let err = TelemetrySample::decode(value.to_string().as_bytes()).unwrap_err();
        assert_eq!(err.field(), Some("timestamp"));

        value["timestamp"] = serde_json::json!(1714564800);
        let err = TelemetrySample::decode(value.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn timestamp_is_relayed_verbatim() {
        for stamp in ["2024-05-01T12:00:00.1Z", "2024-05-01T14:00:00+02:00", "2024-05-01T12:00:00.123456789Z"] {
            let mut value = raw();
            value["timestamp"] = stamp.into();
            let sample = TelemetrySample::decode(value.to_string().as_bytes()).unwrap();
            let relayed: serde_json::Value = serde_json::from_str(&sample.encode()).unwrap();
            assert_eq!(relayed["timestamp"], stamp);
            assert_eq!(relayed, value);
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        for (field, bad) in [
            ("latitude", serde_json::json!(91.0)),
            ("longitude", serde_json::json!(-180.5)),
            ("batteryLevel", serde_json::json!(1.2)),
            ("droneId", serde_json::json!("  ")),
        ] {
            let mut value = raw();
            value[field] = bad;
            let err = TelemetrySample::decode(value.to_string().as_bytes()).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }
}
