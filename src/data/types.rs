//! Core data types for the Courtside dataset
//!
//! - `Column`: The closed set of table columns, named by their CSV header
//! - `TeamRecord`: One row of the franchise table
//! - `RegionRecord`: One row of the table aggregated by county
//! - `CellValue`: A single table cell, text or number

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column of the franchise table
///
/// The canonical name of each column is its CSV header, which is also what
/// the dropdowns display and what the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Team,
    State,
    Fips,
    Founded,
    YearsExisted,
    Championships,
    Points,
    Mvps,
    FinalsMvps,
    AllNbaFirstTeam,
    LeadingScorer,
    PercentageOfPoints,
    Text,
}

impl Column {
    /// Every column, in table order
    pub const ALL: [Column; 13] = [
        Column::Team,
        Column::State,
        Column::Fips,
        Column::Founded,
        Column::YearsExisted,
        Column::Championships,
        Column::Points,
        Column::Mvps,
        Column::FinalsMvps,
        Column::AllNbaFirstTeam,
        Column::LeadingScorer,
        Column::PercentageOfPoints,
        Column::Text,
    ];

    /// CSV header for this column
    pub fn header(&self) -> &'static str {
        match self {
            Column::Team => "Team",
            Column::State => "State",
            Column::Fips => "fips",
            Column::Founded => "Founded",
            Column::YearsExisted => "Yrs Existed",
            Column::Championships => "Championships",
            Column::Points => "Points",
            Column::Mvps => "MVPs",
            Column::FinalsMvps => "Finals MVPs",
            Column::AllNbaFirstTeam => "All-NBA First Team Selections",
            Column::LeadingScorer => "Leading Scorer",
            Column::PercentageOfPoints => "Percentage of Points Scored",
            Column::Text => "text",
        }
    }

    /// Whether values in this column are numbers
    ///
    /// `fips` is numeric in the file but is an identifier, so it is not
    /// offered as a measure.
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            Column::Team | Column::State | Column::Fips | Column::Text
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Error returned when a string does not name a known column
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.header() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.header())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single cell of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Numeric view of the cell, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One franchise row of the dataset
///
/// Immutable once loaded. Field names serialize as the CSV headers so the
/// same struct reads the file and feeds the data endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(rename = "Team")]
    pub team: String,

    #[serde(rename = "State")]
    pub state: String,

    #[serde(rename = "fips", deserialize_with = "de_count")]
    pub fips: u32,

    #[serde(rename = "Founded", deserialize_with = "de_count")]
    pub founded: u32,

    #[serde(rename = "Yrs Existed", deserialize_with = "de_count")]
    pub years_existed: u64,

    #[serde(rename = "Championships", deserialize_with = "de_count")]
    pub championships: u64,

    #[serde(rename = "Points", deserialize_with = "de_count")]
    pub points: u64,

    #[serde(rename = "MVPs", deserialize_with = "de_count")]
    pub mvps: u64,

    #[serde(rename = "Finals MVPs", deserialize_with = "de_count")]
    pub finals_mvps: u64,

    #[serde(rename = "All-NBA First Team Selections", deserialize_with = "de_count")]
    pub all_nba_first_team: u64,

    #[serde(rename = "Leading Scorer", deserialize_with = "de_count")]
    pub leading_scorer: u64,

    #[serde(rename = "Percentage of Points Scored", deserialize_with = "de_percent")]
    pub percentage_of_points: f64,

    #[serde(rename = "text", default)]
    pub text: String,
}

impl TeamRecord {
    /// Zero padded county code, matching the boundary feature ids
    pub fn fips_code(&self) -> String {
        format_fips(self.fips)
    }

    /// Value of a column for this row
    pub fn value(&self, column: Column) -> CellValue {
        match column {
            Column::Team => CellValue::Text(self.team.clone()),
            Column::State => CellValue::Text(self.state.clone()),
            Column::Fips => CellValue::Number(self.fips as f64),
            Column::Founded => CellValue::Number(self.founded as f64),
            Column::YearsExisted => CellValue::Number(self.years_existed as f64),
            Column::Championships => CellValue::Number(self.championships as f64),
            Column::Points => CellValue::Number(self.points as f64),
            Column::Mvps => CellValue::Number(self.mvps as f64),
            Column::FinalsMvps => CellValue::Number(self.finals_mvps as f64),
            Column::AllNbaFirstTeam => CellValue::Number(self.all_nba_first_team as f64),
            Column::LeadingScorer => CellValue::Number(self.leading_scorer as f64),
            Column::PercentageOfPoints => CellValue::Number(self.percentage_of_points),
            Column::Text => CellValue::Text(self.text.clone()),
        }
    }

    /// Numeric value of a column, `None` for text columns
    pub fn number(&self, column: Column) -> Option<f64> {
        self.value(column).as_f64()
    }
}

/// One county row of the aggregated table
///
/// Team names are joined in input order; every numeric field is the exact
/// sum over the teams sharing the county.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    #[serde(rename = "fips")]
    pub fips: u32,

    #[serde(rename = "Team")]
    pub teams: String,

    #[serde(rename = "Championships")]
    pub championships: u64,

    #[serde(rename = "Points")]
    pub points: u64,

    #[serde(rename = "MVPs")]
    pub mvps: u64,

    #[serde(rename = "Finals MVPs")]
    pub finals_mvps: u64,

    #[serde(rename = "All-NBA First Team Selections")]
    pub all_nba_first_team: u64,

    #[serde(rename = "Leading Scorer")]
    pub leading_scorer: u64,

    #[serde(rename = "Yrs Existed")]
    pub years_existed: u64,
}

impl RegionRecord {
    /// Zero padded county code, matching the boundary feature ids
    pub fn fips_code(&self) -> String {
        format_fips(self.fips)
    }

    /// Summed value of a column, `None` when the column is not aggregated
    pub fn number(&self, column: Column) -> Option<f64> {
        let n = match column {
            Column::Championships => self.championships,
            Column::Points => self.points,
            Column::Mvps => self.mvps,
            Column::FinalsMvps => self.finals_mvps,
            Column::AllNbaFirstTeam => self.all_nba_first_team,
            Column::LeadingScorer => self.leading_scorer,
            Column::YearsExisted => self.years_existed,
            _ => return None,
        };
        Some(n as f64)
    }
}

fn format_fips(fips: u32) -> String {
    format!("{:05}", fips)
}

/// Parse a non-negative integer cell. Empty cells read as zero; values
/// written as floats (`12.0`) are accepted when they are whole numbers.
fn de_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return T::try_from(0).map_err(|_| serde::de::Error::custom("zero out of range"));
    }

    let n = match raw.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            let f: f64 = raw
                .replace(',', "")
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("expected a count, got '{}'", raw)))?;
            if f < 0.0 || f.fract() != 0.0 {
                return Err(serde::de::Error::custom(format!(
                    "expected a whole non-negative number, got '{}'",
                    raw
                )));
            }
            f as u64
        }
    };

    T::try_from(n).map_err(|_| serde::de::Error::custom(format!("value out of range: {}", n)))
}

/// Parse a percentage cell, with or without a trailing `%`
fn de_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim().trim_end_matches('%').trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse()
        .map_err(|_| serde::de::Error::custom(format!("expected a percentage, got '{}'", raw)))
}
