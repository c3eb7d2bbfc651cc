use super::domain::{Country, MetricKey, MetricSchema, MetricScore, Rating, Region};
use super::scoring::{calculate_overall_score, score_to_tier, scores_equal};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const BUNDLED_DATASET: &str = include_str!("../../data/countries.json");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read tracker dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tracker JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("metadata.lastUpdated '{0}' is not a YYYY-MM-DD date or RFC 3339 timestamp")]
    InvalidDate(String),
    #[error("country {country} has unknown metric key '{key}'")]
    UnknownMetric { country: String, key: String },
    #[error("country {country} is missing metric {metric}")]
    MissingMetric {
        country: String,
        metric: &'static str,
    },
    #[error("country {country} carries {metric}, which is not part of the {schema:?} schema")]
    ForeignMetric {
        country: String,
        metric: &'static str,
        schema: MetricSchema,
    },
    #[error("country {country} scores {score} on {metric}; scores must lie within 0-10")]
    ScoreOutOfRange {
        country: String,
        metric: &'static str,
        score: f64,
    },
    #[error("country id {0} appears more than once")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub version: String,
    pub last_updated: NaiveDate,
    pub total_countries: usize,
}

/// The immutable tracker dataset. Metric values are held on the 0–10 scale
/// whichever schema the source file used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerData {
    pub metadata: DatasetMetadata,
    pub schema: MetricSchema,
    pub countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    metadata: RawMetadata,
    countries: Vec<RawCountry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    version: String,
    last_updated: String,
    #[serde(default)]
    total_countries: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCountry {
    id: String,
    name: String,
    region: Region,
    #[serde(default)]
    flag: Option<String>,
    #[serde(default)]
    overall_score: Option<f64>,
    #[serde(default)]
    overall_rating: Option<Rating>,
    metrics: BTreeMap<String, RawMetric>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Scored {
        score: f64,
        #[serde(default)]
        summary: String,
    },
    Rated {
        rating: Rating,
        #[serde(default)]
        summary: String,
    },
}

impl RawMetric {
    fn into_score(self) -> MetricScore {
        match self {
            RawMetric::Scored { score, summary } => MetricScore { score, summary },
            RawMetric::Rated { rating, summary } => MetricScore {
                score: rating.score(),
                summary,
            },
        }
    }
}

impl TrackerData {
    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDataset) -> Result<Self, DatasetError> {
        let schema = detect_schema(&raw.countries);
        let mut seen = HashSet::new();
        let mut countries = Vec::with_capacity(raw.countries.len());

        for raw_country in raw.countries {
            if !seen.insert(raw_country.id.to_ascii_uppercase()) {
                return Err(DatasetError::DuplicateId(raw_country.id));
            }
            countries.push(ingest_country(raw_country, schema)?);
        }

        let last_updated = parse_date(&raw.metadata.last_updated)
            .ok_or_else(|| DatasetError::InvalidDate(raw.metadata.last_updated.clone()))?;

        if let Some(declared) = raw.metadata.total_countries {
            if declared != countries.len() {
                warn!(
                    declared,
                    actual = countries.len(),
                    "metadata.totalCountries does not match the country list"
                );
            }
        }

        info!(
            version = %raw.metadata.version,
            countries = countries.len(),
            ?schema,
            "loaded tracker dataset"
        );

        Ok(Self {
            metadata: DatasetMetadata {
                version: raw.metadata.version,
                last_updated,
                total_countries: countries.len(),
            },
            schema,
            countries,
        })
    }

    pub fn metric_keys(&self) -> &'static [MetricKey] {
        self.schema.keys()
    }

    pub fn country_by_id(&self, id: &str) -> Option<&Country> {
        let id = id.trim();
        self.countries
            .iter()
            .find(|country| country.id.eq_ignore_ascii_case(id))
    }

    pub fn countries_by_region(&self, region: Region) -> Vec<&Country> {
        self.countries
            .iter()
            .filter(|country| country.region == region)
            .collect()
    }

    /// Case-insensitive substring match on name or id. A blank query
    /// matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Country> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.countries
            .iter()
            .filter(|country| {
                country.name.to_lowercase().contains(&needle)
                    || country.id.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

pub fn flag_url(country: &Country) -> Option<String> {
    country
        .flag
        .as_deref()
        .map(|flag| format!("https://flagcdn.com/w80/{}.png", flag.to_ascii_lowercase()))
}

fn detect_schema(countries: &[RawCountry]) -> MetricSchema {
    countries
        .first()
        .and_then(|country| {
            country
                .metrics
                .keys()
                .find_map(|key| MetricKey::parse(key))
        })
        .map(MetricSchema::of_key)
        .unwrap_or(MetricSchema::Standard)
}

fn ingest_country(raw: RawCountry, schema: MetricSchema) -> Result<Country, DatasetError> {
    let mut metrics = BTreeMap::new();
    for (key, value) in raw.metrics {
        let metric = MetricKey::parse(&key).ok_or_else(|| DatasetError::UnknownMetric {
            country: raw.id.clone(),
            key: key.clone(),
        })?;
        if !schema.keys().contains(&metric) {
            return Err(DatasetError::ForeignMetric {
                country: raw.id.clone(),
                metric: metric.as_str(),
                schema,
            });
        }

        let score = value.into_score();
        if !(0.0..=10.0).contains(&score.score) {
            return Err(DatasetError::ScoreOutOfRange {
                country: raw.id.clone(),
                metric: metric.as_str(),
                score: score.score,
            });
        }
        metrics.insert(metric, score);
    }

    if let Some(missing) = schema.keys().iter().find(|key| !metrics.contains_key(*key)) {
        return Err(DatasetError::MissingMetric {
            country: raw.id,
            metric: missing.as_str(),
        });
    }

    let overall_score = calculate_overall_score(&metrics);
    if let Some(declared) = raw.overall_score {
        if !scores_equal(declared, overall_score) {
            warn!(
                country = %raw.id,
                declared,
                computed = overall_score,
                "declared overallScore differs from the metric average; using the average"
            );
        }
    }
    if let Some(rating) = raw.overall_rating {
        if rating.tier() != score_to_tier(overall_score) {
            warn!(
                country = %raw.id,
                declared = rating.label(),
                computed = overall_score,
                "declared overallRating differs from the metric average; using the average"
            );
        }
    }

    Ok(Country {
        id: raw.id,
        name: raw.name,
        region: raw.region,
        flag: raw.flag,
        overall_score,
        metrics,
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
