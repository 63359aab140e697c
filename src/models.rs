use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Date format used by the historical endpoint for timeline keys (`1/22/21`).
pub const API_DATE_FORMAT: &str = "%m/%d/%y";

/// One of the three tracked statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Confirmed cases (`cases` in the API payload).
    #[serde(rename = "cases", alias = "confirmed")]
    Confirmed,
    Recovered,
    Deaths,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Confirmed, Category::Recovered, Category::Deaths];

    /// Field name in the API payload, also the canonical CLI tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Confirmed => "cases",
            Category::Recovered => "recovered",
            Category::Deaths => "deaths",
        }
    }

    /// Human label for captions and selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Confirmed => "Confirmed cases",
            Category::Recovered => "Recovered",
            Category::Deaths => "Deaths",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cases" | "confirmed" => Ok(Category::Confirmed),
            "recovered" => Ok(Category::Recovered),
            "deaths" => Ok(Category::Deaths),
            other => Err(format!(
                "unknown category `{other}` (expected cases, recovered or deaths)"
            )),
        }
    }
}

/// Cumulative counts keyed by calendar day. `BTreeMap` keeps the days in
/// chronological order no matter how the payload ordered its keys.
pub type Timeline = BTreeMap<NaiveDate, i64>;

/// Historical cumulative series for all three categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSeries {
    #[serde(deserialize_with = "de_timeline")]
    pub cases: Timeline,
    #[serde(default, deserialize_with = "de_timeline")]
    pub recovered: Timeline,
    #[serde(default, deserialize_with = "de_timeline")]
    pub deaths: Timeline,
}

impl RawSeries {
    /// Timeline feeding the given category.
    pub fn timeline(&self, category: Category) -> &Timeline {
        match category {
            Category::Confirmed => &self.cases,
            Category::Recovered => &self.recovered,
            Category::Deaths => &self.deaths,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Serde helper: parse a `{"M/D/YY": count}` object into a date-ordered map.
/// Two keys naming the same day (`1/2/21` and `01/02/21`) are rejected.
fn de_timeline<'de, D>(deserializer: D) -> Result<Timeline, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, MapAccess, Visitor};
    struct TimelineVisitor;

    impl<'de> Visitor<'de> for TimelineVisitor {
        type Value = Timeline;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an object mapping M/D/YY dates to counts")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Timeline::new();
            while let Some((key, count)) = map.next_entry::<String, i64>()? {
                let date = NaiveDate::parse_from_str(key.trim(), API_DATE_FORMAT).map_err(|e| {
                    de::Error::custom(format!("invalid timeline date `{key}`: {e}"))
                })?;
                if out.insert(date, count).is_some() {
                    return Err(de::Error::custom(format!("duplicate timeline date `{key}`")));
                }
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(TimelineVisitor)
}

/// Response body of the historical endpoint. The global aggregate is the bare
/// timeline object; per-country responses nest it under `timeline` next to
/// `country`/`province` labels, which are not needed here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoricalResponse {
    Country { timeline: RawSeries },
    Global(RawSeries),
}

impl From<HistoricalResponse> for RawSeries {
    fn from(r: HistoricalResponse) -> Self {
        match r {
            HistoricalResponse::Country { timeline } => timeline,
            HistoricalResponse::Global(series) => series,
        }
    }
}

/// Change in the cumulative count between a day and the day before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaPoint {
    pub date: NaiveDate,
    pub value: i64,
}

/// Chronological day-over-day deltas; one shorter than its source timeline.
pub type DeltaSeries = Vec<DeltaPoint>;

/// What to ask the historical endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Country name or ISO code; `None` selects the global aggregate.
    pub country: Option<String>,
    /// Number of trailing days of history.
    pub last_days: u32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            country: None,
            last_days: 120,
        }
    }
}
