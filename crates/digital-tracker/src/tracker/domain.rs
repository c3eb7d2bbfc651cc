use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Asia-Pacific")]
    AsiaPacific,
    #[serde(rename = "Americas")]
    Americas,
    #[serde(rename = "Middle East & Africa")]
    MiddleEastAfrica,
}

impl Region {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Europe,
            Self::AsiaPacific,
            Self::Americas,
            Self::MiddleEastAfrica,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::AsiaPacific => "Asia-Pacific",
            Self::Americas => "Americas",
            Self::MiddleEastAfrica => "Middle East & Africa",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Europe => "europe",
            Self::AsiaPacific => "asia-pacific",
            Self::Americas => "americas",
            Self::MiddleEastAfrica => "middle-east-africa",
        }
    }

    /// Accepts either the display label or the URL slug, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ordered().into_iter().find(|region| {
            region.label().eq_ignore_ascii_case(trimmed) || region.slug().eq_ignore_ascii_case(trimmed)
        })
    }
}

/// Coarse bucket derived from a 0–10 score. Variants are declared lowest
/// first so the derived `Ord` follows the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Low,
    Moderate,
    Strong,
}

impl ScoreTier {
    /// Display order, best tier first.
    pub const fn ordered() -> [Self; 3] {
        [Self::Strong, Self::Moderate, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "High Performers",
            Self::Moderate => "Developing",
            Self::Low => "Emerging",
        }
    }

    pub const fn rating_label(self) -> &'static str {
        Rating::from_tier(self).label()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strong" | "high" | "high-performers" | "high performers" => Some(Self::Strong),
            "moderate" | "medium" | "developing" => Some(Self::Moderate),
            "low" | "emerging" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Categorical rating used by the legacy six-metric dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl Rating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Position of the rating on the 0–10 scale. Each value sits inside the
    /// matching tier, and `High` clears the excellence threshold.
    pub const fn score(self) -> f64 {
        match self {
            Self::Low => 2.0,
            Self::Medium => 5.0,
            Self::High => 8.0,
        }
    }

    pub const fn tier(self) -> ScoreTier {
        match self {
            Self::Low => ScoreTier::Low,
            Self::Medium => ScoreTier::Moderate,
            Self::High => ScoreTier::Strong,
        }
    }

    pub const fn from_tier(tier: ScoreTier) -> Self {
        match tier {
            ScoreTier::Low => Self::Low,
            ScoreTier::Moderate => Self::Medium,
            ScoreTier::Strong => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(rename = "Digital Government")]
    DigitalGovernment,
    #[serde(rename = "Legal & Financial")]
    LegalAndFinancial,
    #[serde(rename = "Lifestyle & Mobility")]
    LifestyleAndMobility,
}

impl Pillar {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::DigitalGovernment,
            Self::LegalAndFinancial,
            Self::LifestyleAndMobility,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DigitalGovernment => "Digital Government",
            Self::LegalAndFinancial => "Legal & Financial",
            Self::LifestyleAndMobility => "Lifestyle & Mobility",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::DigitalGovernment => "How effectively a country delivers digital public services, identity systems, and cross-agency interoperability.",
            Self::LegalAndFinancial => "Regulatory clarity for digital assets, stablecoin infrastructure, fiat-crypto ramps, and tokenized real-world assets.",
            Self::LifestyleAndMobility => "Cross-border payment access, openness to remote workers, and population-level crypto literacy.",
        }
    }

    pub fn metric_keys(self) -> Vec<MetricKey> {
        MetricSchema::Standard
            .keys()
            .iter()
            .copied()
            .filter(|key| key.pillar() == Some(self))
            .collect()
    }
}

/// Every metric the tracker knows about. The standard ten are declared
/// first, in display order, followed by the legacy six; the derived `Ord`
/// is the fixed metric-key ordering used for every deterministic tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    EGovServiceDepth,
    DigitalIdentityInfra,
    GovInteroperability,
    LegalClarityDigitalAssets,
    StablecoinAdoption,
    OnOffRampAccess,
    TokenizedRwaMaturity,
    CrossBorderPayments,
    DigitalNomadFriendliness,
    CryptoDigitalLiteracy,
    ContextContinuity,
    UserSovereignty,
    ServiceProgrammability,
    Interoperability,
    VerifiableInfrastructure,
    DigitalAssetMaturity,
}

impl MetricKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EGovServiceDepth => "eGovServiceDepth",
            Self::DigitalIdentityInfra => "digitalIdentityInfra",
            Self::GovInteroperability => "govInteroperability",
            Self::LegalClarityDigitalAssets => "legalClarityDigitalAssets",
            Self::StablecoinAdoption => "stablecoinAdoption",
            Self::OnOffRampAccess => "onOffRampAccess",
            Self::TokenizedRwaMaturity => "tokenizedRwaMaturity",
            Self::CrossBorderPayments => "crossBorderPayments",
            Self::DigitalNomadFriendliness => "digitalNomadFriendliness",
            Self::CryptoDigitalLiteracy => "cryptoDigitalLiteracy",
            Self::ContextContinuity => "contextContinuity",
            Self::UserSovereignty => "userSovereignty",
            Self::ServiceProgrammability => "serviceProgrammability",
            Self::Interoperability => "interoperability",
            Self::VerifiableInfrastructure => "verifiableInfrastructure",
            Self::DigitalAssetMaturity => "digitalAssetMaturity",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EGovServiceDepth => "eGovernment Service Depth",
            Self::DigitalIdentityInfra => "Digital Identity Infrastructure",
            Self::GovInteroperability => "Gov. Interoperability",
            Self::LegalClarityDigitalAssets => "Legal Clarity for Digital Assets",
            Self::StablecoinAdoption => "Stablecoin Presence & Adoption",
            Self::OnOffRampAccess => "On/Off-Ramp Accessibility",
            Self::TokenizedRwaMaturity => "Tokenized RWA Maturity",
            Self::CrossBorderPayments => "Cross-Border Payments",
            Self::DigitalNomadFriendliness => "Digital Nomad Friendliness",
            Self::CryptoDigitalLiteracy => "Crypto & Digital Literacy",
            Self::ContextContinuity => "Context Continuity",
            Self::UserSovereignty => "User Sovereignty",
            Self::ServiceProgrammability => "Service Programmability",
            Self::Interoperability => "Interoperability",
            Self::VerifiableInfrastructure => "Verifiable Infrastructure",
            Self::DigitalAssetMaturity => "Digital Asset Maturity",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::EGovServiceDepth => "e-Gov",
            Self::DigitalIdentityInfra => "Identity",
            Self::GovInteroperability => "Interop",
            Self::LegalClarityDigitalAssets => "Legal",
            Self::StablecoinAdoption => "Stablecoin",
            Self::OnOffRampAccess => "On/Off-Ramp",
            Self::TokenizedRwaMaturity => "RWA",
            Self::CrossBorderPayments => "Payments",
            Self::DigitalNomadFriendliness => "Nomad",
            Self::CryptoDigitalLiteracy => "Literacy",
            Self::ContextContinuity => "Continuity",
            Self::UserSovereignty => "Sovereignty",
            Self::ServiceProgrammability => "Programmability",
            Self::Interoperability => "Interop",
            Self::VerifiableInfrastructure => "Verifiable",
            Self::DigitalAssetMaturity => "Assets",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::EGovServiceDepth => "How digitized and accessible are core public services?",
            Self::DigitalIdentityInfra => "Can citizens use a single digital ID across government and private services?",
            Self::GovInteroperability => "Can government systems exchange data seamlessly?",
            Self::LegalClarityDigitalAssets => "Is there a clear regulatory framework for digital assets and blockchain?",
            Self::StablecoinAdoption => "How prevalent are stablecoins in the local economy?",
            Self::OnOffRampAccess => "How easy is it to convert between fiat and crypto?",
            Self::TokenizedRwaMaturity => "How advanced is the country in tokenizing real-world assets?",
            Self::CrossBorderPayments => "How easy is it to send and receive money internationally?",
            Self::DigitalNomadFriendliness => "Does the country offer visa programs and infrastructure for remote workers?",
            Self::CryptoDigitalLiteracy => "How familiar is the population with digital assets and blockchain?",
            Self::ContextContinuity => "Do services carry context across agencies without re-entry?",
            Self::UserSovereignty => "Do citizens control and audit the use of their own data?",
            Self::ServiceProgrammability => "Are public services exposed through programmable interfaces?",
            Self::Interoperability => "Can public and private systems exchange data on open standards?",
            Self::VerifiableInfrastructure => "Are credentials and registries cryptographically verifiable?",
            Self::DigitalAssetMaturity => "How mature is the legal and market framework for digital assets?",
        }
    }

    pub const fn pillar(self) -> Option<Pillar> {
        match self {
            Self::EGovServiceDepth | Self::DigitalIdentityInfra | Self::GovInteroperability => {
                Some(Pillar::DigitalGovernment)
            }
            Self::LegalClarityDigitalAssets
            | Self::StablecoinAdoption
            | Self::OnOffRampAccess
            | Self::TokenizedRwaMaturity => Some(Pillar::LegalAndFinancial),
            Self::CrossBorderPayments
            | Self::DigitalNomadFriendliness
            | Self::CryptoDigitalLiteracy => Some(Pillar::LifestyleAndMobility),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        MetricSchema::Standard
            .keys()
            .iter()
            .chain(MetricSchema::Legacy.keys())
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
    }
}

/// The two dataset generations. Every country in a dataset carries exactly
/// the keys of one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSchema {
    Standard,
    Legacy,
}

const STANDARD_KEYS: [MetricKey; 10] = [
    MetricKey::EGovServiceDepth,
    MetricKey::DigitalIdentityInfra,
    MetricKey::GovInteroperability,
    MetricKey::LegalClarityDigitalAssets,
    MetricKey::StablecoinAdoption,
    MetricKey::OnOffRampAccess,
    MetricKey::TokenizedRwaMaturity,
    MetricKey::CrossBorderPayments,
    MetricKey::DigitalNomadFriendliness,
    MetricKey::CryptoDigitalLiteracy,
];

const LEGACY_KEYS: [MetricKey; 6] = [
    MetricKey::ContextContinuity,
    MetricKey::UserSovereignty,
    MetricKey::ServiceProgrammability,
    MetricKey::Interoperability,
    MetricKey::VerifiableInfrastructure,
    MetricKey::DigitalAssetMaturity,
];

impl MetricSchema {
    pub const fn keys(self) -> &'static [MetricKey] {
        match self {
            Self::Standard => &STANDARD_KEYS,
            Self::Legacy => &LEGACY_KEYS,
        }
    }

    pub fn of_key(key: MetricKey) -> Self {
        if STANDARD_KEYS.contains(&key) {
            Self::Standard
        } else {
            Self::Legacy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub score: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub name: String,
    pub region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    pub overall_score: f64,
    pub metrics: BTreeMap<MetricKey, MetricScore>,
}

impl Country {
    /// Score for `key`, or `0.0` when the record does not carry it.
    pub fn metric_score(&self, key: MetricKey) -> f64 {
        self.metrics.get(&key).map(|metric| metric.score).unwrap_or(0.0)
    }

    pub fn metric_tier(&self, key: MetricKey) -> ScoreTier {
        super::scoring::score_to_tier(self.metric_score(key))
    }

    pub fn overall_tier(&self) -> ScoreTier {
        super::scoring::score_to_tier(self.overall_score)
    }

    pub fn metric_keys(&self) -> impl Iterator<Item = MetricKey> + '_ {
        self.metrics.keys().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCountry {
    #[serde(flatten)]
    pub country: Country,
    pub rank: usize,
}

impl AsRef<Country> for Country {
    fn as_ref(&self) -> &Country {
        self
    }
}

impl AsRef<Country> for RankedCountry {
    fn as_ref(&self) -> &Country {
        &self.country
    }
}

impl std::ops::Deref for RankedCountry {
    type Target = Country;

    fn deref(&self) -> &Self::Target {
        &self.country
    }
}

/// Metric keys of a country set, in the fixed ordering. Datasets are
/// single-schema, so the first record is representative.
pub fn metric_keys_of(countries: &[Country]) -> Vec<MetricKey> {
    countries
        .first()
        .map(|country| country.metric_keys().collect())
        .unwrap_or_default()
}
