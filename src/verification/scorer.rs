use crate::matching::{normalize, FieldMatcher, MatchOutcome};
use crate::models::{
    keys, FieldCategory, FieldMatchResult, FieldSpec, ImageAnalysis, ImageExtraction, MatchRules,
    VerificationReport, VerificationStatus,
};
use crate::utils::VerifyError;
use log::debug;

pub struct VerificationScorer;

impl VerificationScorer {
    /// Aggregate per-field match results into category scores, gate booleans,
    /// an overall weighted score, and a status classification.
    ///
    /// Missing or empty field values are excluded from scoring, never treated
    /// as errors; an entirely empty `combined_text` yields a `failed` report.
    /// Only a malformed spec (empty key) raises, since that indicates a
    /// defect in the integration layer rather than data noise.
    pub fn score(
        fields: &[FieldSpec],
        combined_text: &str,
        per_image: &[ImageExtraction],
        rules: &MatchRules,
    ) -> Result<VerificationReport, VerifyError> {
        for spec in fields {
            if spec.key.trim().is_empty() {
                return Err(VerifyError::InvalidFieldSpec(format!(
                    "field '{}' has an empty key",
                    spec.label
                )));
            }
        }

        // Step 1: match every field that has a value
        let mut results = Vec::new();
        for spec in fields {
            if normalize(&spec.value).is_empty() {
                continue;
            }
            let outcome =
                FieldMatcher::match_field(combined_text, &spec.value, &spec.key, rules);
            results.push(Self::to_result(spec, outcome));
        }

        // Steps 2-4: category scores
        let identity_score = Self::category_mean(&results, FieldCategory::Identity);
        let address_score = Self::category_mean(&results, FieldCategory::Address);

        // Steps 5-6: critical-requirement gates
        let name_verified = Self::key_matched(&results, keys::FULL_NAME)
            || (Self::key_matched(&results, keys::FIRST_NAME)
                && Self::key_matched(&results, keys::LAST_NAME));
        let matched_address_fields = results
            .iter()
            .filter(|r| r.category == FieldCategory::Address && r.matched)
            .count();
        let address_verified =
            Self::key_matched(&results, keys::ADDRESS) || matched_address_fields >= 2;

        // Step 7: identity weighs more than address, since a name mismatch is
        // the stronger fraud signal
        let overall_score = (identity_score as f64 * rules.identity_weight
            + address_score as f64 * rules.address_weight)
            .round() as u32;

        // Step 8: status ladder, first match wins
        let status = if name_verified && address_verified && overall_score >= rules.verified_threshold
        {
            VerificationStatus::Verified
        } else if (name_verified || address_verified) && overall_score >= rules.partial_threshold {
            VerificationStatus::Partial
        } else {
            VerificationStatus::Failed
        };

        // Step 9: per-image evidence breakdown
        let image_analysis = Self::analyze_images(fields, per_image, rules);

        let avg_ocr_confidence = if per_image.is_empty() {
            0
        } else {
            let sum: u32 = per_image.iter().map(|img| img.ocr_confidence).sum();
            (sum as f64 / per_image.len() as f64).round() as u32
        };
        let processed_images = per_image.iter().filter(|img| !img.failed).count();

        debug!(
            "scored verification: status={} overall={} identity={} address={}",
            status, overall_score, identity_score, address_score
        );

        Ok(VerificationReport {
            fields: results,
            identity_score,
            address_score,
            overall_score,
            name_verified,
            address_verified,
            status,
            image_analysis,
            avg_ocr_confidence,
            total_images: per_image.len(),
            processed_images,
        })
    }

    fn to_result(spec: &FieldSpec, outcome: MatchOutcome) -> FieldMatchResult {
        FieldMatchResult {
            label: spec.label.clone(),
            value: spec.value.clone(),
            key: spec.key.clone(),
            required: spec.required,
            category: spec.category,
            matched: outcome.matched,
            confidence: outcome.confidence,
            evidence: outcome.evidence,
        }
    }

    fn category_mean(results: &[FieldMatchResult], category: FieldCategory) -> u32 {
        let confidences: Vec<u32> = results
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.confidence)
            .collect();
        if confidences.is_empty() {
            return 0;
        }
        (confidences.iter().sum::<u32>() as f64 / confidences.len() as f64).round() as u32
    }

    fn key_matched(results: &[FieldMatchResult], key: &str) -> bool {
        results.iter().any(|r| r.key == key && r.matched)
    }

    /// Re-run the matcher per image for a name pseudo-field and an address
    /// pseudo-field, so a reviewer can see which physical document actually
    /// carried the identifying information.
    fn analyze_images(
        fields: &[FieldSpec],
        per_image: &[ImageExtraction],
        rules: &MatchRules,
    ) -> Vec<ImageAnalysis> {
        let name_value = Self::field_value(fields, keys::FULL_NAME).unwrap_or_else(|| {
            let first = Self::field_value(fields, keys::FIRST_NAME).unwrap_or_default();
            let last = Self::field_value(fields, keys::LAST_NAME).unwrap_or_default();
            format!("{} {}", first, last).trim().to_string()
        });
        let address_value = Self::field_value(fields, keys::ADDRESS).unwrap_or_default();

        per_image
            .iter()
            .map(|img| {
                let has_name = !name_value.is_empty()
                    && FieldMatcher::match_field(&img.text, &name_value, keys::FULL_NAME, rules)
                        .matched;
                let has_address = !address_value.is_empty()
                    && FieldMatcher::match_field(&img.text, &address_value, keys::ADDRESS, rules)
                        .matched;
                ImageAnalysis {
                    label: img.label.clone(),
                    has_name,
                    has_address,
                    ocr_confidence: img.ocr_confidence,
                    failed: img.failed,
                }
            })
            .collect()
    }

    fn field_value(fields: &[FieldSpec], key: &str) -> Option<String> {
        fields
            .iter()
            .find(|f| f.key == key && !f.value.trim().is_empty())
            .map(|f| f.value.clone())
    }
}
