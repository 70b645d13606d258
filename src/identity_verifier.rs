use crate::models::{
    keys, DocumentImage, FieldCategory, FieldSpec, MatchRules, ResidentProfile, VerificationReport,
};
use crate::processing::{OcrAggregator, OcrConfig, OcrEngine};
use crate::utils::VerifyError;
use crate::verification::VerificationScorer;
use log::info;

/// Orchestrates a full verification run: builds field specs from the
/// resident's profile, runs OCR over every uploaded image, and scores the
/// extracted text against the profile.
pub struct IdentityVerifier {
    engine: Box<dyn OcrEngine>,
    ocr_config: OcrConfig,
    rules: MatchRules,
}

impl IdentityVerifier {
    pub fn new(engine: Box<dyn OcrEngine>) -> Self {
        IdentityVerifier {
            engine,
            ocr_config: OcrConfig::default(),
            rules: MatchRules::default(),
        }
    }

    pub fn with_ocr_config(mut self, ocr_config: OcrConfig) -> Self {
        self.ocr_config = ocr_config;
        self
    }

    pub fn with_rules(mut self, rules: MatchRules) -> Self {
        self.rules = rules;
        self
    }

    /// Verify the uploaded identification images against the profile.
    ///
    /// Always produces a complete report: per-image OCR failures and missing
    /// profile fields degrade the scores rather than raising. Zero images
    /// yields a `failed` report with zero counts.
    pub fn verify(
        &self,
        images: &[DocumentImage],
        profile: &ResidentProfile,
    ) -> Result<VerificationReport, VerifyError> {
        self.verify_with_progress(images, profile, None)
    }

    /// Same as `verify`, reporting completed-percent after each image.
    pub fn verify_with_progress(
        &self,
        images: &[DocumentImage],
        profile: &ResidentProfile,
        on_progress: Option<&mut dyn FnMut(u32)>,
    ) -> Result<VerificationReport, VerifyError> {
        let fields = Self::build_field_specs(profile);

        // Step 1: OCR every image, tolerating per-image failures
        let outcome = OcrAggregator::run(self.engine.as_ref(), images, &self.ocr_config, on_progress);

        // Step 2: match and score against the combined text
        let report = VerificationScorer::score(
            &fields,
            &outcome.combined_text,
            &outcome.per_image,
            &self.rules,
        )?;
        info!("verification complete: {}", report.summary());
        Ok(report)
    }

    /// Flatten the profile into the field list the matcher consumes. Empty
    /// or absent profile values still produce specs; the scorer excludes
    /// them from scoring.
    pub fn build_field_specs(profile: &ResidentProfile) -> Vec<FieldSpec> {
        let mut fields = Vec::new();

        let full_name = [
            profile.first_name.as_str(),
            profile.middle_name.as_deref().unwrap_or(""),
            profile.last_name.as_str(),
        ]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

        fields.push(FieldSpec::new(
            "Full Name",
            &full_name,
            keys::FULL_NAME,
            true,
            FieldCategory::Identity,
        ));
        fields.push(FieldSpec::new(
            "First Name",
            &profile.first_name,
            keys::FIRST_NAME,
            false,
            FieldCategory::Identity,
        ));
        fields.push(FieldSpec::new(
            "Last Name",
            &profile.last_name,
            keys::LAST_NAME,
            false,
            FieldCategory::Identity,
        ));
        if let Some(middle) = &profile.middle_name {
            fields.push(FieldSpec::new(
                "Middle Name",
                middle,
                keys::MIDDLE_NAME,
                false,
                FieldCategory::Identity,
            ));
        }

        fields.push(FieldSpec::new(
            "Full Address",
            &profile.address_parts.join(", "),
            keys::ADDRESS,
            true,
            FieldCategory::Address,
        ));
        for (index, part) in profile.address_parts.iter().enumerate() {
            fields.push(FieldSpec::new(
                &format!("Address Component {}", index + 1),
                part,
                &format!("addressPart{}", index + 1),
                false,
                FieldCategory::Address,
            ));
        }

        if let Some(date_of_birth) = profile.date_of_birth {
            fields.push(FieldSpec::new(
                "Date of Birth",
                &date_of_birth.format("%d %B %Y").to_string(),
                keys::DATE_OF_BIRTH,
                false,
                FieldCategory::Personal,
            ));
        }
        if let Some(gender) = &profile.gender {
            fields.push(FieldSpec::new(
                "Gender",
                gender,
                keys::GENDER,
                false,
                FieldCategory::Personal,
            ));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageSource, VerificationStatus};
    use crate::processing::FixtureOcr;

    fn profile() -> ResidentProfile {
        ResidentProfile {
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            middle_name: None,
            address_parts: vec!["123 Rizal St".to_string(), "Culiat".to_string()],
            date_of_birth: None,
            gender: None,
        }
    }

    fn image(key: &str, label: &str) -> DocumentImage {
        DocumentImage {
            source: ImageSource::Url(key.to_string()),
            label: label.to_string(),
            document_type: "national_id".to_string(),
        }
    }

    #[test]
    fn test_field_specs_cover_profile() {
        let profile = ResidentProfile {
            middle_name: Some("Santos".to_string()),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 1, 5),
            gender: Some("Male".to_string()),
            ..profile()
        };
        let fields = IdentityVerifier::build_field_specs(&profile);

        let full_name = fields.iter().find(|f| f.key == keys::FULL_NAME).unwrap();
        assert_eq!(full_name.value, "Juan Santos Dela Cruz");
        assert!(full_name.required);

        let address = fields.iter().find(|f| f.key == keys::ADDRESS).unwrap();
        assert_eq!(address.value, "123 Rizal St, Culiat");

        let dob = fields.iter().find(|f| f.key == keys::DATE_OF_BIRTH).unwrap();
        assert_eq!(dob.value, "05 January 1990");

        let parts = fields.iter().filter(|f| f.key.starts_with("addressPart")).count();
        assert_eq!(parts, 2);
    }

    #[test]
    fn test_clean_document_verifies() {
        let mut engine = FixtureOcr::new();
        engine.insert(
            "fixture://front",
            "JUAN DELA CRUZ 123 RIZAL ST CULIAT QUEZON CITY",
            92,
        );
        let verifier = IdentityVerifier::new(Box::new(engine));

        let report = verifier
            .verify(&[image("fixture://front", "DOCUMENT 1 - NATIONAL ID (FRONT)")], &profile())
            .unwrap();

        assert!(report.name_verified);
        assert!(report.address_verified);
        assert_eq!(report.status, VerificationStatus::Verified);
        assert!(report.overall_score >= 70);
        assert_eq!(report.avg_ocr_confidence, 92);
        assert_eq!(report.processed_images, 1);
    }

    #[test]
    fn test_wrong_person_fails() {
        let mut engine = FixtureOcr::new();
        engine.insert("fixture://front", "MARIA SANTOS 456 OTHER AVE", 85);
        let verifier = IdentityVerifier::new(Box::new(engine));

        let report = verifier
            .verify(&[image("fixture://front", "DOCUMENT 1 - UMID (FRONT)")], &profile())
            .unwrap();

        assert!(!report.name_verified);
        assert!(!report.address_verified);
        assert_eq!(report.status, VerificationStatus::Failed);
        assert!(report.overall_score < 10);
    }

    #[test]
    fn test_garbled_address_is_partial() {
        // name reads cleanly, address suffers digit/letter confusion
        let mut engine = FixtureOcr::new();
        engine.insert("fixture://front", "JUAN DELA CRUZ 1Z3 R1ZAL 5T", 88);
        let verifier = IdentityVerifier::new(Box::new(engine));

        let report = verifier
            .verify(&[image("fixture://front", "DOCUMENT 1 - UMID (FRONT)")], &profile())
            .unwrap();

        assert!(report.name_verified);
        assert!(!report.address_verified);
        assert!(report.overall_score >= 50 && report.overall_score < 70);
        assert_eq!(report.status, VerificationStatus::Partial);
    }

    #[test]
    fn test_zero_images() {
        let verifier = IdentityVerifier::new(Box::new(FixtureOcr::new()));
        let report = verifier.verify(&[], &profile()).unwrap();

        assert_eq!(report.total_images, 0);
        assert_eq!(report.processed_images, 0);
        assert_eq!(report.status, VerificationStatus::Failed);
        assert_eq!(report.overall_score, 0);
    }

    #[test]
    fn test_failed_image_drags_down_confidence() {
        let mut engine = FixtureOcr::new();
        engine.insert(
            "fixture://front",
            "JUAN DELA CRUZ 123 RIZAL ST CULIAT",
            90,
        );
        // no fixture for the back: that image fails
        let verifier = IdentityVerifier::new(Box::new(engine));

        let report = verifier
            .verify(
                &[
                    image("fixture://front", "DOCUMENT 1 (FRONT)"),
                    image("fixture://back", "DOCUMENT 1 (BACK)"),
                ],
                &profile(),
            )
            .unwrap();

        assert_eq!(report.total_images, 2);
        assert_eq!(report.processed_images, 1);
        assert_eq!(report.avg_ocr_confidence, 45);
        // the surviving image still carries the full evidence
        assert_eq!(report.status, VerificationStatus::Verified);
    }

    #[test]
    fn test_progress_reported_per_image() {
        let mut engine = FixtureOcr::new();
        engine.insert("fixture://1", "JUAN", 90);
        engine.insert("fixture://2", "DELA CRUZ", 90);
        let verifier = IdentityVerifier::new(Box::new(engine));

        let mut seen = Vec::new();
        let mut record = |pct: u32| seen.push(pct);
        verifier
            .verify_with_progress(
                &[image("fixture://1", "ONE"), image("fixture://2", "TWO")],
                &profile(),
                Some(&mut record),
            )
            .unwrap();
        assert_eq!(seen, vec![50, 100]);
    }
}
