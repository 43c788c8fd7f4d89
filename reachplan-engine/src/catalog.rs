//! Taxonomy lookups consumed by the engine: channel universe, streaming
//! platforms, audiences, markets and competitor brands.
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Source of taxonomy lists; callers plug in their own lookup service.
pub trait TaxonomySource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every channel a plan or competitor may use.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel list cannot be loaded.
    fn channels(&self) -> Result<Vec<String>, Self::Error>;

    /// Competitor brands tracked in a market.
    ///
    /// # Errors
    ///
    /// Returns an error if the competitor list cannot be loaded.
    fn competitors(&self, market: &str) -> Result<Vec<String>, Self::Error>;
}

/// In-memory taxonomy, defaulting to UK broadcast lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticTaxonomy {
    #[serde(default = "StaticTaxonomy::default_channels")]
    pub channels: Vec<String>,
    #[serde(default = "StaticTaxonomy::default_streaming_platforms")]
    pub streaming_platforms: Vec<String>,
    #[serde(default = "StaticTaxonomy::default_audiences")]
    pub audiences: Vec<String>,
    #[serde(default = "StaticTaxonomy::default_markets")]
    pub markets: Vec<String>,
    #[serde(default = "StaticTaxonomy::default_competitors")]
    pub competitors: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

impl StaticTaxonomy {
    fn default_channels() -> Vec<String> {
        owned(&[
            "BBC One",
            "BBC Two",
            "ITV",
            "Channel 4",
            "Channel 5",
            "Sky One",
            "Sky Atlantic",
            "E4",
            "ITV2",
            "Dave",
            "More4",
            "Sky Sports",
        ])
    }

    fn default_streaming_platforms() -> Vec<String> {
        owned(&[
            "Netflix",
            "Disney+",
            "Prime Video",
            "ITVX",
            "Channel 4 Streaming",
            "BBC iPlayer",
            "NOW",
        ])
    }

    fn default_audiences() -> Vec<String> {
        owned(&[
            "Adults 16-64",
            "Adults 16-34",
            "Housewives with Children",
            "ABC1 Adults",
            "Men 25-54",
        ])
    }

    fn default_markets() -> Vec<String> {
        owned(&["United Kingdom", "Ireland"])
    }

    fn default_competitors() -> Vec<String> {
        owned(&["Tesco", "Sainsbury's", "Asda", "Aldi", "Lidl"])
    }

    /// Parse a taxonomy document; missing lists fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for StaticTaxonomy {
    fn default() -> Self {
        Self {
            channels: Self::default_channels(),
            streaming_platforms: Self::default_streaming_platforms(),
            audiences: Self::default_audiences(),
            markets: Self::default_markets(),
            competitors: Self::default_competitors(),
        }
    }
}

impl TaxonomySource for StaticTaxonomy {
    type Error = Infallible;

    fn channels(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.channels.clone())
    }

    fn competitors(&self, _market: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self.competitors.clone())
    }
}
