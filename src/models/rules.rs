use serde::{Deserialize, Serialize};

/// Tunable thresholds and weights for matching and scoring.
///
/// The defaults reproduce the reference behavior of the admin page. They are
/// empirically chosen rather than calibrated against labeled OCR samples, so
/// deployments may override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRules {
    /// Minimum per-word similarity for a fuzzy word to count as found.
    pub fuzzy_word_threshold: u32,
    /// Minimum average confidence for a fuzzy-matched field to count as matched.
    pub field_confidence_threshold: u32,
    /// Minimum token-hit percentage for the address field to count as matched.
    pub address_token_threshold: u32,
    /// Weight of the identity category in the overall score.
    pub identity_weight: f64,
    /// Weight of the address category in the overall score.
    pub address_weight: f64,
    /// Overall score needed (with both gates) for a `verified` status.
    pub verified_threshold: u32,
    /// Overall score needed (with either gate) for a `partial` status.
    pub partial_threshold: u32,
    /// Accept a field when a majority of its words were found, even if the
    /// average confidence sits below `field_confidence_threshold`. Preserved
    /// from the reference behavior; switch off if the leniency proves too
    /// permissive.
    pub majority_rule_enabled: bool,
    /// Words shorter than this are excluded from fuzzy scoring.
    pub min_fuzzy_word_len: usize,
    /// Address tokens shorter than this are excluded from token matching.
    pub min_address_token_len: usize,
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules {
            fuzzy_word_threshold: 70,
            field_confidence_threshold: 50,
            address_token_threshold: 40,
            identity_weight: 0.6,
            address_weight: 0.4,
            verified_threshold: 70,
            partial_threshold: 50,
            majority_rule_enabled: true,
            min_fuzzy_word_len: 3,
            min_address_token_len: 2,
        }
    }
}
