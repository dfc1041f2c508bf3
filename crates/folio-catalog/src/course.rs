//! Course-name inference from catalog file names.

use folio_core::text::title_case;

/// Guess the course a catalog belongs to from its file stem.
///
/// `"Algebra_1_Topics"` → `"Algebra 1"`, `"grade-6 list"` → `"Grade 6"`.
/// Stems that match no known course are title-cased with `_` read as a space.
#[must_use]
pub fn infer_course_name(stem: &str) -> String {
    let lower = stem.to_lowercase();

    if lower.contains("algebra") && stem.contains('1') {
        return String::from("Algebra 1");
    }
    if lower.contains("algebra") && stem.contains('2') {
        return String::from("Algebra 2");
    }
    if lower.contains("geometry") {
        return String::from("Geometry");
    }
    if lower.contains("calculus") {
        return String::from("Calculus");
    }
    if let Some(grade) = grade_number(&lower) {
        return format!("Grade {grade}");
    }

    title_case(&stem.replace('_', " "))
}

/// Digits following the first `grade`, allowing ` `, `_` or `-` in between.
fn grade_number(lower: &str) -> Option<&str> {
    let start = lower.find("grade")? + "grade".len();
    let rest = lower[start..].trim_start_matches([' ', '\t', '_', '-']);
    let end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
