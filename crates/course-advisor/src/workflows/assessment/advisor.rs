//! Advisor review layer sitting on top of the engine output, plus dashboard summaries.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{DegreeRecommendation, RankedCategory, StudentId};
use super::repository::StudentProfileRecord;

/// Review state of a student's recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl AdvisorStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AdvisorStatus::Pending => "pending",
            AdvisorStatus::Approved => "approved",
            AdvisorStatus::Rejected => "rejected",
        }
    }
}

/// Identifier of the advisor who signed off on a review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdvisorId(pub String);

/// Advisor-curated program entry; free-form, not tied to the engine catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorDegree {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}

/// Payload an advisor submits when reviewing a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub advisor_status: AdvisorStatus,
    #[serde(default)]
    pub advisor_comment: Option<String>,
    #[serde(default)]
    pub advisor_recommended_degrees: Vec<AdvisorDegree>,
}

/// Persisted override record. The engine never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorReview {
    pub status: AdvisorStatus,
    pub comment: Option<String>,
    pub recommended_degrees: Vec<AdvisorDegree>,
    pub reviewed_by: AdvisorId,
    pub reviewed_at: DateTime<Utc>,
}

impl AdvisorReview {
    pub fn from_request(
        request: ReviewRequest,
        reviewed_by: AdvisorId,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            status: request.advisor_status,
            comment: request.advisor_comment,
            recommended_degrees: request.advisor_recommended_degrees,
            reviewed_by,
            reviewed_at,
        }
    }
}

/// Dashboard counters. Students without a review count as pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorStats {
    pub total_students: usize,
    pub pending: usize,
    pub approved: usize,
}

impl AdvisorStats {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a StudentProfileRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut stats, record| {
                stats.total_students += 1;
                match record.advisor_status() {
                    AdvisorStatus::Pending => stats.pending += 1,
                    AdvisorStatus::Approved => stats.approved += 1,
                    AdvisorStatus::Rejected => {}
                }
                stats
            })
    }
}

/// One row of the advisor roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub gwa: Option<f64>,
    pub strand: Option<String>,
    pub advisor_status: AdvisorStatus,
    pub recommended_degrees: Vec<DegreeRecommendation>,
    pub advisor_recommended_degrees: Vec<AdvisorDegree>,
    pub assessment_score_preview: Option<f64>,
}

impl RosterEntry {
    pub fn from_record(record: &StudentProfileRecord) -> Self {
        let assessment = record.assessment.as_ref();
        Self {
            student_id: record.student_id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            gwa: record
                .academic
                .as_ref()
                .and_then(|academic| academic.general_average()),
            strand: record
                .academic
                .as_ref()
                .and_then(|academic| academic.strand.clone()),
            advisor_status: record.advisor_status(),
            recommended_degrees: assessment
                .map(|saved| saved.recommended_degrees.clone())
                .unwrap_or_default(),
            advisor_recommended_degrees: record
                .advisor_review
                .as_ref()
                .map(|review| review.recommended_degrees.clone())
                .unwrap_or_default(),
            assessment_score_preview: assessment
                .and_then(|saved| assessment_score_preview(&saved.recommended_top3)),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Filter by case-insensitive name/email substring, order by name ignoring case, cap at `limit`.
pub fn build_roster<'a>(
    records: impl IntoIterator<Item = &'a StudentProfileRecord>,
    query: Option<&str>,
    limit: usize,
) -> Vec<RosterEntry> {
    let needle = query
        .map(|query| query.trim().to_lowercase())
        .filter(|query| !query.is_empty());

    let mut entries: Vec<RosterEntry> = records
        .into_iter()
        .map(RosterEntry::from_record)
        .filter(|entry| needle.as_deref().map_or(true, |needle| entry.matches(needle)))
        .collect();
    entries.sort_by_cached_key(|entry| (entry.name.to_lowercase(), entry.name.clone()));
    entries.truncate(limit);
    entries
}

/// Rough percentage for the dashboard: top category score out of ten, clamped and rounded to
/// one decimal.
pub fn assessment_score_preview(top3: &[RankedCategory]) -> Option<f64> {
    let top = top3.first()?;
    let pct = (top.score / 10.0 * 100.0).clamp(0.0, 100.0);
    Some((pct * 10.0).round() / 10.0)
}

#[derive(Debug, Serialize)]
struct RosterCsvRow<'a> {
    student_id: u64,
    name: &'a str,
    email: &'a str,
    strand: &'a str,
    gwa: Option<f64>,
    advisor_status: &'static str,
    recommended_degrees: String,
    advisor_recommended_degrees: String,
    assessment_score_preview: Option<f64>,
}

/// Export the roster as CSV for offline advising sessions.
pub fn write_roster_csv<W: io::Write>(entries: &[RosterEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);

    for entry in entries {
        csv.serialize(RosterCsvRow {
            student_id: entry.student_id.0,
            name: &entry.name,
            email: &entry.email,
            strand: entry.strand.as_deref().unwrap_or_default(),
            gwa: entry.gwa,
            advisor_status: entry.advisor_status.label(),
            recommended_degrees: entry
                .recommended_degrees
                .iter()
                .map(|degree| degree.code.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            advisor_recommended_degrees: entry
                .advisor_recommended_degrees
                .iter()
                .map(|degree| degree.code.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            assessment_score_preview: entry.assessment_score_preview,
        })?;
    }

    csv.flush()?;
    Ok(())
}
