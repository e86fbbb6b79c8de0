use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// CPCB air-quality bands. Thresholds follow the national AQI scale
/// (0-50 Good, 51-100 Satisfactory, 101-200 Moderate, 201-300 Poor,
/// 301-400 Very Poor, 401+ Severe).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PollutionLevel {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Satisfactory")]
    Satisfactory,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    #[serde(rename = "Severe")]
    Severe,
}

impl PollutionLevel {
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => PollutionLevel::Good,
            51..=100 => PollutionLevel::Satisfactory,
            101..=200 => PollutionLevel::Moderate,
            201..=300 => PollutionLevel::Poor,
            301..=400 => PollutionLevel::VeryPoor,
            _ => PollutionLevel::Severe,
        }
    }

    /// Inclusive AQI range covered by this band. Severe is open-ended
    /// upward but the index itself is capped at 500.
    pub fn aqi_range(&self) -> (u16, u16) {
        match self {
            PollutionLevel::Good => (0, 50),
            PollutionLevel::Satisfactory => (51, 100),
            PollutionLevel::Moderate => (101, 200),
            PollutionLevel::Poor => (201, 300),
            PollutionLevel::VeryPoor => (301, 400),
            PollutionLevel::Severe => (401, 500),
        }
    }
}

impl fmt::Display for PollutionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollutionLevel::Good => write!(f, "Good"),
            PollutionLevel::Satisfactory => write!(f, "Satisfactory"),
            PollutionLevel::Moderate => write!(f, "Moderate"),
            PollutionLevel::Poor => write!(f, "Poor"),
            PollutionLevel::VeryPoor => write!(f, "Very Poor"),
            PollutionLevel::Severe => write!(f, "Severe"),
        }
    }
}

/// The five MCD administrative zones wards are grouped under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Zone {
    #[serde(rename = "North Delhi")]
    North,
    #[serde(rename = "South Delhi")]
    South,
    #[serde(rename = "East Delhi")]
    East,
    #[serde(rename = "West Delhi")]
    West,
    #[serde(rename = "Central Delhi")]
    Central,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::North,
        Zone::South,
        Zone::East,
        Zone::West,
        Zone::Central,
    ];

    /// Round-robin zone for an index; wraps for any input.
    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % Self::ALL.len()]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::North => write!(f, "North Delhi"),
            Zone::South => write!(f, "South Delhi"),
            Zone::East => write!(f, "East Delhi"),
            Zone::West => write!(f, "West Delhi"),
            Zone::Central => write!(f, "Central Delhi"),
        }
    }
}

/// Pollutant concentrations for a ward. PM and gaseous pollutants in
/// ug/m3, CO in mg/m3 per CPCB reporting convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollutantData {
    pub pm25: f32,
    pub pm10: f32,
    pub no2: f32,
    pub so2: f32,
    pub co: f32,
    pub o3: f32,
    pub nh3: f32,
}

/// One day of the 30-day band calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalDay {
    pub date: NaiveDate,
    pub aqi: u16,
    pub level: PollutionLevel,
}

/// Attribution of the index to an emission source category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceContribution {
    pub category: String,
    pub percentage: u8,
}

/// Measurement confidence attached to a ward reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
}

/// Full per-ward record served to the dashboard. Serialized camelCase
/// for the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardData {
    pub id: Uuid,
    pub name: String,
    /// Ward number, 1..=274.
    pub number: u16,
    pub zone: Zone,
    pub aqi: u16,
    pub level: PollutionLevel,
    pub metrics: PollutantData,
    /// 24 samples at 2-hour spacing; last sample equals `aqi`.
    pub trend24h: Vec<u16>,
    /// 30 calendar days ending yesterday.
    pub history30d: Vec<HistoricalDay>,
    /// Percentages sum to 100.
    pub sources: Vec<SourceContribution>,
    /// 1 = cleanest within the ward's zone.
    pub rank_zone: u16,
    /// 1 = cleanest of all wards.
    pub rank_overall: u16,
    /// Year-over-year AQI change, percent. Negative means improving.
    pub yoy_change: i8,
    pub confidence: Confidence,
    pub last_updated: DateTime<Utc>,
}

/// A registered citizen account. `password_hash` is a PHC-format argon2
/// string and must never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}

/// A citizen-submitted pollution report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub description: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}
