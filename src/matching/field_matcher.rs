use crate::matching::normalizer::normalize;
use crate::matching::similarity::similarity;
use crate::models::{keys, MatchRules};
use log::debug;

/// Result of matching a single field value against extracted text.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matched: bool,
    pub confidence: u32,
    pub evidence: Vec<String>,
}

impl MatchOutcome {
    fn miss() -> Self {
        MatchOutcome {
            matched: false,
            confidence: 0,
            evidence: Vec::new(),
        }
    }
}

pub struct FieldMatcher;

impl FieldMatcher {
    /// Match one field value against the extracted text, trying strategies in
    /// order of reliability: exact substring, then address token-set matching
    /// (for the address field), then per-word fuzzy matching.
    pub fn match_field(
        extracted_text: &str,
        field_value: &str,
        field_key: &str,
        rules: &MatchRules,
    ) -> MatchOutcome {
        let text = normalize(extracted_text);
        let value = normalize(field_value);

        // Absent fields are never "found"
        if value.is_empty() {
            return MatchOutcome::miss();
        }

        if text.contains(&value) {
            debug!("field '{}' matched exactly", field_key);
            return MatchOutcome {
                matched: true,
                confidence: 100,
                evidence: vec!["exact match".to_string()],
            };
        }

        // Addresses are long and OCR commonly drops or reorders tokens, so
        // the address field is judged by how many of its components appear
        // anywhere in the text. This path is terminal for the address key.
        if field_key == keys::ADDRESS {
            return Self::match_address_tokens(&text, &value, rules);
        }

        Self::match_words_fuzzy(&text, &value, field_key, rules)
    }

    fn match_address_tokens(text: &str, value: &str, rules: &MatchRules) -> MatchOutcome {
        let tokens: Vec<&str> = value
            .split(' ')
            .filter(|t| t.len() >= rules.min_address_token_len)
            .collect();
        if tokens.is_empty() {
            return MatchOutcome::miss();
        }

        let found: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|t| text.contains(t))
            .collect();
        let confidence = (found.len() as f64 / tokens.len() as f64 * 100.0).round() as u32;

        MatchOutcome {
            matched: confidence >= rules.address_token_threshold,
            confidence,
            evidence: found.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn match_words_fuzzy(
        text: &str,
        value: &str,
        field_key: &str,
        rules: &MatchRules,
    ) -> MatchOutcome {
        // Short words ("de", "jr") are excluded: they are too common in both
        // names and OCR noise to carry signal.
        let words: Vec<&str> = value
            .split(' ')
            .filter(|w| w.len() >= rules.min_fuzzy_word_len)
            .collect();
        if words.is_empty() {
            return MatchOutcome::miss();
        }

        let text_words: Vec<&str> = text
            .split(' ')
            .filter(|w| w.len() >= rules.min_fuzzy_word_len)
            .collect();

        let mut scores: Vec<u32> = Vec::with_capacity(words.len());
        let mut evidence = Vec::new();
        for word in &words {
            if text.contains(word) {
                scores.push(100);
                evidence.push((*word).to_string());
                continue;
            }

            // Best fuzzy candidate among the text's words
            let best = text_words
                .iter()
                .map(|tw| similarity(word, tw))
                .max()
                .unwrap_or(0);
            if best >= rules.fuzzy_word_threshold {
                scores.push(best);
                evidence.push(format!("{}~{}", word, best));
            } else {
                scores.push(0);
            }
        }

        let total = words.len();
        let found = scores.iter().filter(|s| **s > 0).count();
        let confidence =
            (scores.iter().sum::<u32>() as f64 / total as f64).round().min(100.0) as u32;

        // A field counts as matched by average confidence, or by a majority of
        // its words being found despite OCR noise depressing the average.
        let mut matched = confidence >= rules.field_confidence_threshold;
        if rules.majority_rule_enabled && !matched {
            matched = found >= (total + 1) / 2;
        }
        debug!(
            "field '{}' fuzzy match: {}/{} words, confidence {}",
            field_key, found, total, confidence
        );

        MatchOutcome {
            matched,
            confidence,
            evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> MatchRules {
        MatchRules::default()
    }

    #[test]
    fn test_exact_match_confidence_100() {
        let outcome = FieldMatcher::match_field(
            "JUAN DELA CRUZ 123 RIZAL ST",
            "Juan Dela Cruz",
            keys::FULL_NAME,
            &rules(),
        );
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 100);
        assert_eq!(outcome.evidence, vec!["exact match".to_string()]);
    }

    #[test]
    fn test_exact_match_ignores_case_and_punctuation() {
        let outcome = FieldMatcher::match_field(
            "name: JUAN DELA CRUZ.",
            "juan dela cruz",
            keys::FULL_NAME,
            &rules(),
        );
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 100);
    }

    #[test]
    fn test_hyphenated_value_falls_back_to_fuzzy() {
        // the hyphen fuses "dela cruz" into "delacruz", so exact containment
        // fails; "juan" is still found verbatim
        let outcome = FieldMatcher::match_field(
            "name: juan dela cruz.",
            "JUAN DELA-CRUZ",
            keys::FULL_NAME,
            &rules(),
        );
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 50);
        assert_eq!(outcome.evidence, vec!["juan"]);
    }

    #[test]
    fn test_empty_value_never_matches() {
        let outcome = FieldMatcher::match_field("any text at all", "", keys::GENDER, &rules());
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0);

        let outcome = FieldMatcher::match_field("any text at all", "  .,! ", keys::GENDER, &rules());
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0);
    }

    #[test]
    fn test_address_token_matching() {
        // 3 of 4 tokens present: 75% clears the 40% threshold
        let outcome = FieldMatcher::match_field(
            "123 RIZAL ST QUEZON CITY",
            "123 Rizal St, Culiat",
            keys::ADDRESS,
            &rules(),
        );
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 75);
        assert_eq!(outcome.evidence, vec!["123", "rizal", "st"]);
    }

    #[test]
    fn test_address_below_threshold() {
        // 1 of 4 tokens: 25% misses the 40% threshold
        let outcome = FieldMatcher::match_field(
            "456 OTHER AVE CULIAT",
            "123 Rizal St, Culiat",
            keys::ADDRESS,
            &rules(),
        );
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 25);
    }

    #[test]
    fn test_fuzzy_word_matching_absorbs_ocr_errors() {
        // "r1zal" is one edit from "rizal" (80% similarity, above 70)
        let outcome = FieldMatcher::match_field(
            "1Z3 R1ZAL 5T",
            "123 Rizal St",
            "addressPart1",
            &rules(),
        );
        // words considered: "123", "rizal"; "123" vs "1z3" is 67, below 70
        assert_eq!(outcome.confidence, 40);
        // majority rule: 1 of 2 words found
        assert!(outcome.matched);
    }

    #[test]
    fn test_majority_rule_toggle() {
        let mut strict = rules();
        strict.majority_rule_enabled = false;
        let outcome = FieldMatcher::match_field(
            "1Z3 R1ZAL 5T",
            "123 Rizal St",
            "addressPart1",
            &strict,
        );
        // Same 40% confidence, but no majority leniency
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 40);
    }

    #[test]
    fn test_no_match_on_unrelated_text() {
        let outcome = FieldMatcher::match_field(
            "MARIA SANTOS 456 OTHER AVE",
            "Juan Dela Cruz",
            keys::FULL_NAME,
            &rules(),
        );
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0);
    }

    #[test]
    fn test_short_value_with_no_scorable_words() {
        // "jr" is below the minimum fuzzy word length
        let outcome = FieldMatcher::match_field("JUAN DELA CRUZ JR", "jr", keys::MIDDLE_NAME, &rules());
        assert!(outcome.matched); // exact substring wins first
        let outcome = FieldMatcher::match_field("JUAN DELA CRUZ", "jr", keys::MIDDLE_NAME, &rules());
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0);
    }

    #[test]
    fn test_empty_text() {
        let outcome =
            FieldMatcher::match_field("", "Juan Dela Cruz", keys::FULL_NAME, &rules());
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0);
    }
}
