use anyhow::Context;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;

use crate::db;
use crate::models::RawGradeRecord;

/// Where a loaded dataset actually came from. The web app this pipeline
/// serves silently swapped in mock data when its backend misbehaved;
/// here the degradation is explicit and reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Primary,
    Fallback,
}

impl RecordSource {
    pub fn label(&self) -> &'static str {
        match self {
            RecordSource::Primary => "primary store",
            RecordSource::Fallback => "built-in dataset",
        }
    }
}

/// Load raw records from the primary store, falling back to the
/// built-in dataset when the store is unreachable, errors, or has no
/// matching rows. The same filters apply to both sources.
pub async fn load_raw_records(
    database_url: Option<&str>,
    department: Option<&str>,
    instructor: Option<&str>,
) -> (Vec<RawGradeRecord>, RecordSource) {
    if let Some(url) = database_url {
        match fetch_primary(url, department, instructor).await {
            Ok(records) if !records.is_empty() => return (records, RecordSource::Primary),
            Ok(_) => {
                eprintln!("warning: primary store returned no rows, using built-in dataset");
            }
            Err(err) => {
                eprintln!("warning: primary store unavailable ({err:#}), using built-in dataset");
            }
        }
    }

    (
        filter_records(builtin_records(), department, instructor),
        RecordSource::Fallback,
    )
}

async fn fetch_primary(
    database_url: &str,
    department: Option<&str>,
    instructor: Option<&str>,
) -> anyhow::Result<Vec<RawGradeRecord>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")?;
    db::fetch_raw_records(&pool, department, instructor).await
}

fn filter_records(
    records: Vec<RawGradeRecord>,
    department: Option<&str>,
    instructor: Option<&str>,
) -> Vec<RawGradeRecord> {
    records
        .into_iter()
        .filter(|record| {
            if let Some(value) = department {
                record.department == value
            } else if let Some(value) = instructor {
                record.instructor == value
            } else {
                true
            }
        })
        .collect()
}

/// Static default dataset, also used by `seed`. Counts are text on
/// purpose: these rows take the same path through the mapper as rows
/// from the primary store.
pub fn builtin_records() -> Vec<RawGradeRecord> {
    let rows: Vec<(i64, &str, &str, &str, &str, [&str; 11], &str)> = vec![
        (
            1,
            "CS",
            "101",
            "Fall 2023",
            "Jennifer Smith",
            ["45", "32", "18", "6", "3", "7", "0", "0", "1", "0", "2"],
            "114",
        ),
        (
            2,
            "CS",
            "101",
            "Spring 2023",
            "Jennifer Smith",
            ["38", "35", "22", "8", "4", "9", "0", "0", "0", "1", "3"],
            "120",
        ),
        (
            3,
            "MATH",
            "220",
            "Fall 2023",
            "Robert Johnson",
            ["22", "30", "28", "12", "9", "14", "0", "0", "2", "0", "4"],
            "121",
        ),
        (
            4,
            "MATH",
            "220",
            "001",
            "Robert Johnson",
            ["19", "27", "31", "15", "11", "12", "0", "0", "1", "1", "3"],
            "120",
        ),
        (
            5,
            "BUS",
            "310",
            "Fall 2023",
            "Michael Davis",
            ["40", "38", "15", "4", "2", "5", "3", "1", "0", "0", "1"],
            "109",
        ),
        (
            6,
            "ENG",
            "105",
            "002",
            "Amanda Williams",
            ["52", "28", "10", "3", "1", "4", "6", "2", "0", "0", "1"],
            "107",
        ),
        (
            7,
            "PSY",
            "201",
            "Fall 2023",
            "David Lee",
            ["28", "34", "24", "9", "6", "10", "0", "0", "1", "2", "2"],
            "116",
        ),
        (
            8,
            "PSY",
            "201",
            "003",
            "David Lee",
            ["25", "31", "27", "11", "8", "11", "0", "0", "0", "1", "4"],
            "118",
        ),
    ];

    rows.into_iter()
        .map(
            |(id, department, course, section, instructor, counts, total)| {
                let [a, b, c, d, f, w, p, np, ix, rd, ew] = counts;
                RawGradeRecord {
                    id,
                    created_at: Utc::now(),
                    department: department.to_string(),
                    course: course.to_string(),
                    section: section.to_string(),
                    instructor: instructor.to_string(),
                    a: a.to_string(),
                    b: b.to_string(),
                    c: c.to_string(),
                    d: d.to_string(),
                    f: f.to_string(),
                    w: w.to_string(),
                    p: p.to_string(),
                    np: np.to_string(),
                    ix: ix.to_string(),
                    rd: rd.to_string(),
                    ew: ew.to_string(),
                    total: total.to_string(),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dataset_has_unique_ids() {
        let records = builtin_records();
        let mut ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn department_filter_matches_exactly() {
        let filtered = filter_records(builtin_records(), Some("MATH"), None);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|r| r.department == "MATH"));
    }

    #[test]
    fn instructor_filter_applies_when_no_department_given() {
        let filtered = filter_records(builtin_records(), None, Some("David Lee"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn no_filters_returns_everything() {
        let all = builtin_records();
        let filtered = filter_records(builtin_records(), None, None);
        assert_eq!(filtered.len(), all.len());
    }
}
