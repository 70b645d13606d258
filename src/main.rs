// Identity document verification demo
// Replays a saved verification case (resident profile + per-document OCR
// fixtures) through the matching engine and prints the report an admin
// reviewer would see.

use clap::Parser;
use patunay::models::{DocumentImage, ImageSource, ResidentProfile, VerificationReport};
use patunay::processing::FixtureOcr;
use patunay::IdentityVerifier;
use serde::Deserialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "patunay",
    about = "Verify identification documents against a resident profile"
)]
struct Cli {
    /// JSON case file: resident profile plus per-document extracted text
    case_file: PathBuf,
    /// Print per-image progress while documents are processed
    #[arg(long)]
    progress: bool,
    /// Emit the raw report as JSON instead of the formatted summary
    #[arg(long)]
    json: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseFile {
    profile: ResidentProfile,
    documents: Vec<CaseDocument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseDocument {
    label: String,
    #[serde(default)]
    document_type: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    confidence: u32,
    /// Marks a document whose OCR call should fail outright.
    #[serde(default)]
    failed: bool,
}

fn print_detailed_report(report: &VerificationReport, profile: &ResidentProfile) {
    println!("\n===============================================");
    println!("      ID VERIFICATION DETAILED REPORT");
    println!("===============================================\n");

    println!("RESIDENT PROFILE:");
    println!("  First Name: {}", profile.first_name);
    println!("  Last Name: {}", profile.last_name);
    println!("  Middle Name: {:?}", profile.middle_name);
    println!("  Address: {}", profile.address_parts.join(", "));
    println!("  Date of Birth: {:?}", profile.date_of_birth);
    println!("  Gender: {:?}", profile.gender);

    println!("\nFIELD MATCHES:");
    for field in &report.fields {
        println!(
            "  {} [{}]: {} (confidence {})",
            field.label,
            field.key,
            if field.matched { "FOUND" } else { "NOT FOUND" },
            field.confidence
        );
        if !field.evidence.is_empty() {
            println!("      evidence: {}", field.evidence.join(", "));
        }
    }

    println!("\nIMAGE ANALYSIS:");
    for image in &report.image_analysis {
        println!(
            "  {}: name={} address={} ocr_confidence={}{}",
            image.label,
            if image.has_name { "YES" } else { "no" },
            if image.has_address { "YES" } else { "no" },
            image.ocr_confidence,
            if image.failed { " (FAILED)" } else { "" }
        );
    }

    println!("\nSCORES:");
    println!("  Identity Score: {}", report.identity_score);
    println!("  Address Score: {}", report.address_score);
    println!("  Overall Score: {}", report.overall_score);
    println!("  Avg OCR Confidence: {}", report.avg_ocr_confidence);
    println!(
        "  Images Processed: {}/{}",
        report.processed_images, report.total_images
    );
    println!(
        "  Name Verified: {}",
        if report.name_verified { "YES" } else { "NO" }
    );
    println!(
        "  Address Verified: {}",
        if report.address_verified { "YES" } else { "NO" }
    );

    println!(
        "\nVerification result: {}",
        report.status.to_string().to_uppercase()
    );
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&cli.case_file)?;
    let case: CaseFile = serde_json::from_str(&raw)?;

    // Each document becomes a fixture keyed by a synthetic URI; documents
    // marked failed get no fixture, so the engine reports them unreachable.
    let mut engine = FixtureOcr::new();
    let mut images = Vec::new();
    for (index, doc) in case.documents.iter().enumerate() {
        let key = format!("fixture://{}", index);
        if !doc.failed {
            engine.insert(&key, &doc.text, doc.confidence);
        }
        images.push(DocumentImage {
            source: ImageSource::Url(key),
            label: doc.label.clone(),
            document_type: doc.document_type.clone(),
        });
    }

    let verifier = IdentityVerifier::new(Box::new(engine));
    let report = if cli.progress {
        let mut show = |pct: u32| println!("Processing... {}%", pct);
        verifier.verify_with_progress(&images, &case.profile, Some(&mut show))?
    } else {
        verifier.verify(&images, &case.profile)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_detailed_report(&report, &case.profile);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error verifying documents: {}", err);
        process::exit(1);
    }
}
