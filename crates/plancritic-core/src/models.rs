//! Shared data types for the relay and the upload client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::defaults;
use crate::error::Error;

/// Four percentage scores parsed from the model's closing line.
///
/// Either all four are present or the whole record is absent; there is no
/// partially-filled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "RawScores")]
pub struct Scores {
    /// Building-code topics score.
    pub mabhas: u8,
    /// Overall score.
    pub overall: u8,
    /// Standards compliance score.
    pub standards: u8,
    /// Structural/architectural score.
    pub structural: u8,
}

impl Scores {
    /// Build a record, clamping every value into `0..=100`.
    pub fn clamped(mabhas: i64, overall: i64, standards: i64, structural: i64) -> Self {
        Self {
            mabhas: clamp_percent(mabhas),
            overall: clamp_percent(overall),
            standards: clamp_percent(standards),
            structural: clamp_percent(structural),
        }
    }

    /// Values in wire order.
    pub fn as_array(&self) -> [u8; 4] {
        [self.mabhas, self.overall, self.standards, self.structural]
    }
}

fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Unchecked wire form; every decoded record goes through [`Scores::clamped`].
#[derive(Deserialize)]
struct RawScores {
    mabhas: i64,
    overall: i64,
    standards: i64,
    structural: i64,
}

impl From<RawScores> for Scores {
    fn from(raw: RawScores) -> Self {
        Scores::clamped(raw.mabhas, raw.overall, raw.standards, raw.structural)
    }
}

/// Building orientation selected on the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    North,
    South,
    Unknown,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::South => "south",
            Orientation::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(Orientation::North),
            "south" => Ok(Orientation::South),
            "unknown" => Ok(Orientation::Unknown),
            other => Err(Error::InvalidInput(format!("Unknown orientation: {}", other))),
        }
    }
}

/// One submission as seen by the relay.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub city: String,
    /// Passed to the prompt verbatim.
    pub orientation: String,
}

impl AnalysisRequest {
    /// Build a request, substituting relay fallbacks for missing metadata.
    pub fn new(
        image_bytes: Vec<u8>,
        mime_type: impl Into<String>,
        city: Option<String>,
        orientation: Option<String>,
    ) -> Self {
        Self {
            image_bytes,
            mime_type: mime_type.into(),
            city: non_empty(city).unwrap_or_else(|| defaults::RELAY_CITY.to_string()),
            orientation: non_empty(orientation)
                .unwrap_or_else(|| defaults::RELAY_ORIENTATION.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parsed relay result: critique body plus optional scores.
///
/// Serialized as `{"text": ..., "scores": {...} | null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    pub text: String,
    pub scores: Option<Scores>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_clamped() {
        let scores = Scores::clamped(150, -3, 40, 100);
        assert_eq!(scores.as_array(), [100, 0, 40, 100]);
    }

    #[test]
    fn test_scores_deserialize_clamps() {
        let scores: Scores = serde_json::from_value(serde_json::json!(
            {"mabhas": 150, "overall": 75, "standards": -5, "structural": 60}
        ))
        .unwrap();
        assert_eq!(scores.as_array(), [100, 75, 0, 60]);
    }

    #[test]
    fn test_orientation_round_trip_str() {
        for o in [Orientation::North, Orientation::South, Orientation::Unknown] {
            assert_eq!(o.as_str().parse::<Orientation>().unwrap(), o);
        }
        assert_eq!(" South ".parse::<Orientation>().unwrap(), Orientation::South);
        assert!("east".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_orientation_default_is_north() {
        assert_eq!(Orientation::default(), Orientation::North);
    }

    #[test]
    fn test_analysis_request_fallbacks() {
        let req = AnalysisRequest::new(vec![1, 2], "image/png", None, Some(String::new()));
        assert_eq!(req.city, defaults::RELAY_CITY);
        assert_eq!(req.orientation, "unknown");

        let req = AnalysisRequest::new(
            vec![],
            "image/jpeg",
            Some("شیراز".to_string()),
            Some("south".to_string()),
        );
        assert_eq!(req.city, "شیراز");
        assert_eq!(req.orientation, "south");
    }

    #[test]
    fn test_analysis_response_null_scores_serialization() {
        let resp = AnalysisResponse {
            text: "body".to_string(),
            scores: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["text"], "body");
        assert!(json["scores"].is_null());
    }

    #[test]
    fn test_analysis_response_scores_serialization() {
        let resp = AnalysisResponse {
            text: String::new(),
            scores: Some(Scores::clamped(80, 75, 40, 60)),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["scores"]["mabhas"], 80);
        assert_eq!(json["scores"]["overall"], 75);
        assert_eq!(json["scores"]["standards"], 40);
        assert_eq!(json["scores"]["structural"], 60);
    }
}
