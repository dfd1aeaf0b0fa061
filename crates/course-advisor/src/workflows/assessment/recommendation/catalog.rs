//! Fixed business tables backing the recommendation engine.

use super::super::domain::{Category, Strand};

/// Points per checked self-assessment statement.
pub(crate) const STATEMENT_POINTS: f64 = 1.0;
/// Points per correct knowledge-quiz answer.
pub(crate) const QUIZ_POINTS: f64 = 2.0;

/// Relative influence of the academic signals.
pub(crate) struct Weights;

impl Weights {
    pub(crate) const PROGRAM_INTEREST_RATING: f64 = 2.5;
    pub(crate) const STRAND_BOOST: f64 = 2.0;
    pub(crate) const GRADE_BOOST: f64 = 0.75;
}

/// Subject grade at or above which math/science counts as strong.
pub(crate) const STRONG_SUBJECT_GRADE: f64 = 85.0;
/// General average at or above which the grade boost applies.
pub(crate) const STRONG_GENERAL_AVERAGE: f64 = 88.0;
pub(crate) const GRADE_BOOST_CATEGORIES: [Category; 2] = [
    Category::EngineeringAndTechnology,
    Category::ComputerStudies,
];

pub(crate) const GWA_PENALTY: f64 = 3.0;
pub(crate) const SUBJECT_PENALTY: f64 = 1.5;

/// Number of ranked categories and concrete programs surfaced to students.
pub const RECOMMENDATION_SLOTS: usize = 3;

/// Self-assessment statements (1..=15) claimed by each category. Statement 12 is shared.
pub(crate) const STATEMENTS: [(Category, [u8; 2]); Category::COUNT] = [
    (Category::Accountancy, [1, 9]),
    (Category::ArtsAndSciences, [2, 10]),
    (Category::BusinessAdministration, [3, 11]),
    (Category::ComputerStudies, [4, 12]),
    (Category::CriminalJusticeEducation, [5, 13]),
    (Category::EngineeringAndTechnology, [6, 12]),
    (Category::Nursing, [7, 14]),
    (Category::TeacherEducation, [8, 15]),
];

pub(crate) struct QuizQuestion {
    pub id: u8,
    pub correct: &'static str,
    pub category: Category,
}

pub(crate) const QUIZ_KEY: [QuizQuestion; 8] = [
    QuizQuestion { id: 1, correct: "B", category: Category::Accountancy },
    QuizQuestion { id: 2, correct: "C", category: Category::ArtsAndSciences },
    QuizQuestion { id: 3, correct: "B", category: Category::BusinessAdministration },
    QuizQuestion { id: 4, correct: "C", category: Category::ComputerStudies },
    QuizQuestion { id: 5, correct: "B", category: Category::CriminalJusticeEducation },
    QuizQuestion { id: 6, correct: "B", category: Category::EngineeringAndTechnology },
    QuizQuestion { id: 7, correct: "B", category: Category::Nursing },
    QuizQuestion { id: 8, correct: "B", category: Category::TeacherEducation },
];

/// Strand affinities keyed by track label. "Law" is listed by the advising office but is not a
/// scored track, so it never resolves.
pub(crate) fn strand_boosts(strand: Strand) -> &'static [(&'static str, f64)] {
    match strand {
        Strand::Stem => &[
            ("Engineering & Technology", 2.0),
            ("Computer Studies", 2.0),
            ("Nursing", 0.75),
            ("Arts & Sciences", 0.75),
        ],
        Strand::Abm => &[
            ("Accountancy", 2.0),
            ("Business Administration", 2.0),
            ("Law", 0.75),
        ],
        Strand::Humss => &[
            ("Arts & Sciences", 2.0),
            ("Teacher Education", 1.25),
            ("Law", 1.25),
        ],
        Strand::Tvl => &[
            ("Engineering & Technology", 1.5),
            ("Computer Studies", 1.5),
            ("Business Administration", 0.75),
        ],
    }
}

/// Lower-cased program names accepted on the interest-rating form, with their track label.
const PROGRAM_ALIASES: [(&str, &str); 11] = [
    ("arts and sciences", "Arts & Sciences"),
    ("teachers education", "Teacher Education"),
    ("teacher education", "Teacher Education"),
    ("engineering and technology", "Engineering & Technology"),
    ("engineering & technology", "Engineering & Technology"),
    ("criminal justice education", "Criminal Justice Education"),
    ("business administration", "Business Administration"),
    ("computer studies", "Computer Studies"),
    ("accountancy", "Accountancy"),
    ("nursing", "Nursing"),
    ("law", "Law"),
];

/// Maps a rated program name onto a scored category, ignoring case and surrounding whitespace.
pub(crate) fn category_for_program(program: &str) -> Option<Category> {
    let normalized = program.trim().to_lowercase();
    PROGRAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .and_then(|(_, label)| Category::from_label(label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeProgram {
    pub code: &'static str,
    pub name: &'static str,
}

const fn program(code: &'static str, name: &'static str) -> DegreeProgram {
    DegreeProgram { code, name }
}

const COMPUTER_STUDIES: &[DegreeProgram] = &[
    program("BSIT", "Bachelor of Science in Information Technology"),
    program("BSCS", "Bachelor of Science in Computer Science"),
];
const ENGINEERING_AND_TECHNOLOGY: &[DegreeProgram] = &[
    program("BSCE", "Bachelor of Science in Civil Engineering"),
    program("BSEE", "Bachelor of Science in Electrical Engineering"),
    program("BSME", "Bachelor of Science in Mechanical Engineering"),
];
const ACCOUNTANCY: &[DegreeProgram] = &[
    program("BSA", "Bachelor of Science in Accountancy"),
    program("BSMA", "Bachelor of Science in Management Accounting"),
];
const BUSINESS_ADMINISTRATION: &[DegreeProgram] = &[program(
    "BSBA",
    "Bachelor of Science in Business Administration",
)];
const ARTS_AND_SCIENCES: &[DegreeProgram] = &[
    program("BSPSY", "Bachelor of Science in Psychology"),
    program("BAComm", "Bachelor of Arts in Communication"),
];
const CRIMINAL_JUSTICE_EDUCATION: &[DegreeProgram] =
    &[program("BSCrim", "Bachelor of Science in Criminology")];
const NURSING: &[DegreeProgram] = &[program("BSN", "Bachelor of Science in Nursing")];
const TEACHER_EDUCATION: &[DegreeProgram] = &[
    program("BEEd", "Bachelor of Elementary Education"),
    program("BSEd", "Bachelor of Secondary Education"),
];

/// Concrete programs per category, in display order.
pub fn degree_programs(category: Category) -> &'static [DegreeProgram] {
    match category {
        Category::ComputerStudies => COMPUTER_STUDIES,
        Category::EngineeringAndTechnology => ENGINEERING_AND_TECHNOLOGY,
        Category::Accountancy => ACCOUNTANCY,
        Category::BusinessAdministration => BUSINESS_ADMINISTRATION,
        Category::ArtsAndSciences => ARTS_AND_SCIENCES,
        Category::CriminalJusticeEducation => CRIMINAL_JUSTICE_EDUCATION,
        Category::Nursing => NURSING,
        Category::TeacherEducation => TEACHER_EDUCATION,
    }
}

/// Eligibility expectations for a category; unmet expectations lower its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ThresholdRule {
    pub category: Category,
    pub min_gwa: Option<f64>,
    pub needs_math: bool,
    pub needs_science: bool,
}

pub(crate) const THRESHOLDS: [ThresholdRule; 4] = [
    ThresholdRule {
        category: Category::Nursing,
        min_gwa: Some(85.0),
        needs_math: false,
        needs_science: true,
    },
    ThresholdRule {
        category: Category::EngineeringAndTechnology,
        min_gwa: Some(83.0),
        needs_math: true,
        needs_science: false,
    },
    ThresholdRule {
        category: Category::ComputerStudies,
        min_gwa: Some(80.0),
        needs_math: true,
        needs_science: false,
    },
    ThresholdRule {
        category: Category::Accountancy,
        min_gwa: Some(82.0),
        needs_math: true,
        needs_science: false,
    },
];
