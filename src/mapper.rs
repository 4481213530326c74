use std::collections::HashSet;

use crate::ids::{derive_course_id, derive_professor_id};
use crate::models::{Course, GradeStats, Professor, RawGradeRecord};

const DEFAULT_TERM_YEAR: &str = "2023";
const DEFAULT_AVG_RATING: f64 = 4.0;
const DEFAULT_AVG_DIFFICULTY: f64 = 3.0;
const DEFAULT_COURSE_UNITS: u32 = 3;

/// Parse a grade-count text field. Anything that is not a non-negative
/// integer (empty, garbage, negative) degrades to 0. Total over
/// arbitrary input, never errors. The parse is strict: decimal or
/// suffixed numerics like "4.5" or "12abc" also degrade to 0 instead of
/// being prefix-parsed to 4 or 12.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Best-effort term label from a section string: if it carries no "20"
/// substring it is assumed to lack a year and gets the default appended.
/// Known imprecision; kept for parity with the upstream data.
pub fn normalize_term(section: &str) -> String {
    if section.contains("20") {
        section.to_string()
    } else {
        format!("{section} {DEFAULT_TERM_YEAR}")
    }
}

/// Map raw rows to canonical grade statistics. Order-preserving and
/// 1:1, one output per input, no dedup, no drops. Malformed rows
/// degrade to zero counts rather than erroring.
pub fn map_grade_stats(records: &[RawGradeRecord]) -> Vec<GradeStats> {
    records
        .iter()
        .map(|record| GradeStats {
            id: format!("g_{}", record.id),
            professor_id: derive_professor_id(&record.instructor),
            course_id: derive_course_id(&record.department, &record.course),
            term: normalize_term(&record.section),
            a_count: parse_count(&record.a),
            b_count: parse_count(&record.b),
            c_count: parse_count(&record.c),
            d_count: parse_count(&record.d),
            f_count: parse_count(&record.f),
            w_count: parse_count(&record.w),
            p_count: parse_count(&record.p),
            np_count: parse_count(&record.np),
            ix_count: parse_count(&record.ix),
            rd_count: parse_count(&record.rd),
            ew_count: parse_count(&record.ew),
        })
        .collect()
}

/// Project professors out of raw rows, one per distinct instructor name
/// in first-seen order. Rating and difficulty have no upstream signal,
/// so they carry fixed defaults; review count is the number of raw rows
/// naming the instructor.
pub fn map_professors(records: &[RawGradeRecord]) -> Vec<Professor> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut professors = Vec::new();

    for record in records {
        if !seen.insert(record.instructor.as_str()) {
            continue;
        }
        let review_count = records
            .iter()
            .filter(|r| r.instructor == record.instructor)
            .count();
        professors.push(Professor {
            id: derive_professor_id(&record.instructor),
            name: record.instructor.clone(),
            department: record.department.clone(),
            avg_rating: Some(DEFAULT_AVG_RATING),
            avg_difficulty: Some(DEFAULT_AVG_DIFFICULTY),
            review_count: Some(review_count),
        });
    }

    professors
}

/// Project courses out of raw rows, one per distinct (department,
/// number) pair in first-seen order. The upstream source carries no
/// course titles or units, so both are synthesized.
pub fn map_courses(records: &[RawGradeRecord]) -> Vec<Course> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut courses = Vec::new();

    for record in records {
        let key = (record.department.clone(), record.course.clone());
        if !seen.insert(key) {
            continue;
        }
        courses.push(Course {
            id: derive_course_id(&record.department, &record.course),
            code: record.department.clone(),
            number: record.course.clone(),
            title: format!("{} {}", record.department, record.course),
            units: DEFAULT_COURSE_UNITS,
            department: record.department.clone(),
        });
    }

    courses
}
