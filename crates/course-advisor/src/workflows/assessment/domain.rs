use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Academic track used internally for scoring. Declaration order doubles as the ranking tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Accountancy")]
    Accountancy,
    #[serde(rename = "Arts & Sciences")]
    ArtsAndSciences,
    #[serde(rename = "Business Administration")]
    BusinessAdministration,
    #[serde(rename = "Computer Studies")]
    ComputerStudies,
    #[serde(rename = "Criminal Justice Education")]
    CriminalJusticeEducation,
    #[serde(rename = "Engineering & Technology")]
    EngineeringAndTechnology,
    #[serde(rename = "Nursing")]
    Nursing,
    #[serde(rename = "Teacher Education")]
    TeacherEducation,
}

impl Category {
    pub const COUNT: usize = 8;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Accountancy,
        Category::ArtsAndSciences,
        Category::BusinessAdministration,
        Category::ComputerStudies,
        Category::CriminalJusticeEducation,
        Category::EngineeringAndTechnology,
        Category::Nursing,
        Category::TeacherEducation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Accountancy => "Accountancy",
            Category::ArtsAndSciences => "Arts & Sciences",
            Category::BusinessAdministration => "Business Administration",
            Category::ComputerStudies => "Computer Studies",
            Category::CriminalJusticeEducation => "Criminal Justice Education",
            Category::EngineeringAndTechnology => "Engineering & Technology",
            Category::Nursing => "Nursing",
            Category::TeacherEducation => "Teacher Education",
        }
    }

    /// Exact label lookup. Names outside the scored tracks (e.g. "Law") resolve to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == label)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Philippine senior-high-school strand, used as a soft prior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strand {
    Stem,
    Abm,
    Humss,
    Tvl,
}

impl Strand {
    /// Case-insensitive, whitespace-tolerant parse; anything else is no strand at all.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "STEM" => Some(Strand::Stem),
            "ABM" => Some(Strand::Abm),
            "HUMSS" => Some(Strand::Humss),
            "TVL" => Some(Strand::Tvl),
            _ => None,
        }
    }
}

/// Loosely typed numeric input. Numbers and numeric strings are usable; everything else is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Numeric {
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(value) => *value,
            Numeric::Text(raw) => raw.trim().parse::<f64>().ok()?,
            Numeric::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Integer view used for 1-5 ratings; fractional parts are truncated.
    pub fn integer(&self) -> Option<i64> {
        self.value().map(|value| value.trunc() as i64)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

/// Shared coercion for optional numeric fields.
pub fn numeric_value(field: Option<&Numeric>) -> Option<f64> {
    field.and_then(Numeric::value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrade {
    /// Blank when absent; blank rows carry no signal.
    #[serde(default, deserialize_with = "deserialize_text_or_blank")]
    pub subject: String,
    #[serde(default)]
    pub grade: Option<Numeric>,
}

/// Optional academic signals blended into the quiz scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicProfile {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub strand: Option<String>,
    #[serde(default)]
    pub general_average: Option<Numeric>,
    #[serde(default, deserialize_with = "deserialize_grade_rows")]
    pub subject_grades: Vec<SubjectGrade>,
    /// Program name to 1-5 interest rating.
    #[serde(default, deserialize_with = "null_as_default")]
    pub program_interest_ratings: BTreeMap<String, Numeric>,
}

impl AcademicProfile {
    pub fn general_average(&self) -> Option<f64> {
        numeric_value(self.general_average.as_ref())
    }

    pub fn strand(&self) -> Option<Strand> {
        self.strand.as_deref().and_then(Strand::parse)
    }
}

/// Everything the engine needs for one computation.
///
/// Deserialization never fails on the optional parts: nulls, unknown question ids, non-numeric
/// statements and malformed profiles all read as "no signal".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    #[serde(default, deserialize_with = "deserialize_statements")]
    pub part1_selected: BTreeSet<u8>,
    #[serde(default, deserialize_with = "deserialize_answers")]
    pub part2_answers: BTreeMap<u8, String>,
    #[serde(default, deserialize_with = "deserialize_profile")]
    pub academic_profile: Option<AcademicProfile>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through, numbers are rendered as text, anything else is absent.
fn loose_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn deserialize_loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(loose_text))
}

fn deserialize_text_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_loose_text(deserializer)?.unwrap_or_default())
}

fn deserialize_grade_rows<'de, D>(deserializer: D) -> Result<Vec<SubjectGrade>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect())
}

fn question_id(raw: &str) -> Option<u8> {
    raw.trim().parse().ok()
}

fn deserialize_statements<'de, D>(deserializer: D) -> Result<BTreeSet<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Number(number) => number.as_u64().and_then(|id| u8::try_from(id).ok()),
            Value::String(text) => question_id(&text),
            _ => None,
        })
        .collect())
}

fn deserialize_answers<'de, D>(deserializer: D) -> Result<BTreeMap<u8, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let answers =
        Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(answers
        .into_iter()
        .filter_map(|(question, answer)| Some((question_id(&question)?, loose_text(answer)?)))
        .collect())
}

fn deserialize_profile<'de, D>(deserializer: D) -> Result<Option<AcademicProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(Value::is_object)
        .and_then(|profile| serde_json::from_value(profile).ok()))
}

/// Complete per-category score table, iterated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores([f64; Category::COUNT]);

impl CategoryScores {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    /// Returns a copy with `delta` added to `category`.
    #[must_use]
    pub fn with_added(mut self, category: Category, delta: f64) -> Self {
        self.0[category.index()] += delta;
        self
    }

    pub fn add(&mut self, category: Category, delta: f64) {
        self.0[category.index()] += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn len(&self) -> usize {
        Category::COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for CategoryScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.label(), &score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = CategoryScores;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category label to score")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = CategoryScores::zeroed();
                while let Some((label, score)) = access.next_entry::<String, f64>()? {
                    if let Some(category) = Category::from_label(&label) {
                        scores.0[category.index()] = score;
                    }
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// One slot of the category ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCategory {
    pub rank: usize,
    pub category: Category,
    pub score: f64,
}

/// Concrete program derived from a ranked category; carries the category score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeRecommendation {
    pub rank: usize,
    pub category: Category,
    pub code: String,
    pub name: String,
    pub score: f64,
}

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings_only() {
        assert_eq!(Numeric::Number(87.5).value(), Some(87.5));
        assert_eq!(Numeric::Text(" 90 ".to_string()).value(), Some(90.0));
        assert_eq!(Numeric::Text("ninety".to_string()).value(), None);
        assert_eq!(Numeric::Other(json!(true)).value(), None);
        assert_eq!(Numeric::Text("4.9".to_string()).integer(), Some(4));
    }

    #[test]
    fn numeric_deserializes_from_loose_json() {
        let parsed: Vec<Numeric> =
            serde_json::from_value(json!([88, "91.5", null, {"grade": 1}])).expect("parses");
        let values: Vec<Option<f64>> = parsed.iter().map(Numeric::value).collect();
        assert_eq!(values, vec![Some(88.0), Some(91.5), None, None]);
    }

    #[test]
    fn strand_parse_is_case_insensitive() {
        assert_eq!(Strand::parse(" stem "), Some(Strand::Stem));
        assert_eq!(Strand::parse("Humss"), Some(Strand::Humss));
        assert_eq!(Strand::parse("GAS"), None);
    }

    #[test]
    fn category_scores_serialize_every_category_by_label() {
        let scores = CategoryScores::zeroed().with_added(Category::Nursing, 1.5);
        let value = serde_json::to_value(scores).expect("serializes");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), Category::COUNT);
        assert_eq!(object["Nursing"], json!(1.5));
        assert_eq!(object["Arts & Sciences"], json!(0.0));

        let restored: CategoryScores = serde_json::from_value(value).expect("deserializes");
        assert_eq!(restored, scores);
    }

    #[test]
    fn snapshot_treats_null_and_malformed_optionals_as_absent() {
        let snapshot: AssessmentSnapshot = serde_json::from_value(json!({
            "part1_selected": [4, "12", null, 300, "x"],
            "part2_answers": { "4": "c", "bonus": "A", " 7 ": "b", "2": null, "6": 2 },
            "academic_profile": {
                "strand": 5,
                "general_average": null,
                "subject_grades": null,
                "program_interest_ratings": null
            }
        }))
        .expect("lenient snapshot");

        assert_eq!(
            snapshot.part1_selected.iter().copied().collect::<Vec<_>>(),
            vec![4, 12]
        );
        assert_eq!(snapshot.part2_answers.len(), 3);
        assert_eq!(snapshot.part2_answers[&7], "b");
        assert_eq!(snapshot.part2_answers[&6], "2");

        let profile = snapshot.academic_profile.expect("profile kept");
        assert_eq!(profile.strand.as_deref(), Some("5"));
        assert_eq!(profile.strand(), None);
        assert!(profile.subject_grades.is_empty());
        assert!(profile.program_interest_ratings.is_empty());
    }

    #[test]
    fn grade_rows_without_subject_or_shape_are_tolerated() {
        let profile: AcademicProfile = serde_json::from_value(json!({
            "subject_grades": [
                { "grade": 90 },
                { "subject": null, "grade": "88" },
                "Mathematics: 95",
                { "subject": "Physics", "grade": 91 }
            ]
        }))
        .expect("lenient profile");

        let subjects: Vec<&str> = profile
            .subject_grades
            .iter()
            .map(|row| row.subject.as_str())
            .collect();
        assert_eq!(subjects, vec!["", "", "Physics"]);
    }

    #[test]
    fn non_object_profile_reads_as_missing() {
        for profile in [json!(null), json!("STEM"), json!([1, 2])] {
            let snapshot: AssessmentSnapshot = serde_json::from_value(json!({
                "part1_selected": [1],
                "part2_answers": null,
                "academic_profile": profile
            }))
            .expect("lenient snapshot");
            assert!(snapshot.academic_profile.is_none());
            assert!(snapshot.part2_answers.is_empty());
        }
    }

    #[test]
    fn unknown_labels_do_not_resolve() {
        assert_eq!(Category::from_label("Law"), None);
        assert_eq!(
            Category::from_label("Computer Studies"),
            Some(Category::ComputerStudies)
        );
    }
}
