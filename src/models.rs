use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw grade-distribution row as exported by the upstream source.
/// Every count field arrives as text; `total` is untrusted and never
/// read by the mapper, which recomputes enrollment from the counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGradeRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub department: String,
    pub course: String,
    pub section: String,
    pub instructor: String,
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
    pub f: String,
    pub w: String,
    pub p: String,
    pub np: String,
    pub ix: String,
    pub rd: String,
    pub ew: String,
    pub total: String,
}

/// Professor projection synthesized from raw rows. Recomputed on every
/// mapping pass, never persisted by this crate.
#[derive(Debug, Clone, Serialize)]
pub struct Professor {
    pub id: String,
    pub name: String,
    pub department: String,
    pub avg_rating: Option<f64>,
    pub avg_difficulty: Option<f64>,
    pub review_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub number: String,
    pub title: String,
    pub units: u32,
    pub department: String,
}

/// Per-course rollup used by the report: section count, enrollment
/// across all categories, and the mean of the section GPAs.
#[derive(Debug, Clone)]
pub struct CourseSummary {
    pub course_id: String,
    pub title: String,
    pub sections: usize,
    pub enrollment: u64,
    pub avg_gpa: f64,
}

/// Canonical grade-statistics record, 1:1 with a raw row. The professor
/// and course ids are weak references; nothing checks that a matching
/// entity was materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeStats {
    pub id: String,
    pub professor_id: String,
    pub course_id: String,
    pub term: String,
    pub a_count: u32,
    pub b_count: u32,
    pub c_count: u32,
    pub d_count: u32,
    pub f_count: u32,
    pub w_count: u32,
    pub p_count: u32,
    pub np_count: u32,
    pub ix_count: u32,
    pub rd_count: u32,
    pub ew_count: u32,
}
