use super::super::domain::{numeric_value, SubjectGrade};
use super::catalog::STRONG_SUBJECT_GRADE;

const SCIENCE_MARKERS: [&str; 4] = ["science", "physics", "chem", "bio"];

/// Whether the student's subject grades show strong math and/or science performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectStrength {
    pub math: bool,
    pub science: bool,
}

impl SubjectStrength {
    /// Rows with a blank subject or a non-numeric grade are skipped.
    pub fn from_grades(grades: &[SubjectGrade]) -> Self {
        let mut strength = Self::default();

        for row in grades {
            let subject = row.subject.trim().to_lowercase();
            let Some(grade) = numeric_value(row.grade.as_ref()) else {
                continue;
            };
            if subject.is_empty() || grade < STRONG_SUBJECT_GRADE {
                continue;
            }

            // "mathematics" and "general math" both contain "math".
            if subject.contains("math") {
                strength.math = true;
            }
            if SCIENCE_MARKERS.iter().any(|marker| subject.contains(marker)) {
                strength.science = true;
            }
        }

        strength
    }

    pub fn math_or_science(self) -> bool {
        self.math || self.science
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::Numeric;

    fn row(subject: &str, grade: Option<Numeric>) -> SubjectGrade {
        SubjectGrade {
            subject: subject.to_string(),
            grade,
        }
    }

    #[test]
    fn detects_math_and_science_at_threshold() {
        let strength = SubjectStrength::from_grades(&[
            row(" General Mathematics ", Some(Numeric::Number(85.0))),
            row("Earth and Life Science", Some(Numeric::Text("90".to_string()))),
        ]);
        assert!(strength.math);
        assert!(strength.science);
    }

    #[test]
    fn ignores_low_grades_and_unusable_rows() {
        let strength = SubjectStrength::from_grades(&[
            row("Math", Some(Numeric::Number(84.9))),
            row("Chemistry", Some(Numeric::Text("A+".to_string()))),
            row("   ", Some(Numeric::Number(99.0))),
            row("Biology", None),
            row("English", Some(Numeric::Number(95.0))),
        ]);
        assert_eq!(strength, SubjectStrength::default());
        assert!(!strength.math_or_science());
    }

    #[test]
    fn physics_counts_as_science_only() {
        let strength = SubjectStrength::from_grades(&[row("PHYSICS", Some(Numeric::Number(88.0)))]);
        assert!(!strength.math);
        assert!(strength.science);
    }
}
