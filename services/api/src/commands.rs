use crate::infra::{read_json, InMemoryProfileRepository};
use clap::Args;
use course_advisor::config::AppConfig;
use course_advisor::error::AppError;
use course_advisor::workflows::assessment::{
    write_roster_csv, AssessmentService, AssessmentSnapshot, RecommendationEngine,
    RecommendationOutcome, StudentProfileRecord,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// JSON assessment snapshot (`part1_selected`, `part2_answers`, optional `academic_profile`); `-` reads stdin
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the raw engine output as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// JSON array of stored student profile records
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Case-insensitive name or email filter
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Destination CSV file (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let snapshot: AssessmentSnapshot = read_json(&args.input)?;
    let outcome = RecommendationEngine::new().recommend(&snapshot);

    if args.json {
        let stdout = io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &outcome)?;
        println!();
    } else {
        render_outcome(&outcome, snapshot.academic_profile.is_some());
    }

    Ok(())
}

pub(crate) fn run_roster_export(args: RosterArgs) -> Result<(), AppError> {
    let RosterArgs {
        input,
        query,
        output,
    } = args;

    let config = AppConfig::load()?;
    let records: Vec<StudentProfileRecord> = read_json(&input)?;
    let repository = Arc::new(InMemoryProfileRepository::seeded(records));
    let service = AssessmentService::new(repository, config.advising);

    let roster = service.roster(query.as_deref())?;
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(&path)?);
            write_roster_csv(&roster, writer)?;
            eprintln!("Wrote {} roster rows to {}", roster.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_roster_csv(&roster, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn render_outcome(outcome: &RecommendationOutcome, with_profile: bool) {
    println!("Course recommendation");
    if !with_profile {
        println!("(no academic profile supplied; quiz scores only)");
    }

    println!("Category scores:");
    for (category, score) in outcome.category_scores.iter() {
        println!("  - {category}: {score:.2}");
    }

    println!("Top categories:");
    for item in &outcome.recommended_top3 {
        println!("  {}. {} ({:.2})", item.rank, item.category, item.score);
    }

    println!("Recommended programs:");
    for degree in &outcome.recommended_degrees {
        println!(
            "  {}. {} - {} [{}]",
            degree.rank, degree.code, degree.name, degree.category
        );
    }
}
