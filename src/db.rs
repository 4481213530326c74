use anyhow::Context;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::RawGradeRecord;
use crate::source;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("CREATE SCHEMA IF NOT EXISTS grade_distro")
        .execute(pool)
        .await
        .context("failed to create schema")?;

    // Count columns stay TEXT on purpose: the upstream export is
    // loosely typed and the mapper owns the parse-or-zero policy.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS grade_distro.raw_records (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            department TEXT NOT NULL,
            course TEXT NOT NULL,
            section TEXT NOT NULL,
            instructor TEXT NOT NULL,
            a TEXT NOT NULL DEFAULT '',
            b TEXT NOT NULL DEFAULT '',
            c TEXT NOT NULL DEFAULT '',
            d TEXT NOT NULL DEFAULT '',
            f TEXT NOT NULL DEFAULT '',
            w TEXT NOT NULL DEFAULT '',
            p TEXT NOT NULL DEFAULT '',
            np TEXT NOT NULL DEFAULT '',
            ix TEXT NOT NULL DEFAULT '',
            rd TEXT NOT NULL DEFAULT '',
            ew TEXT NOT NULL DEFAULT '',
            total TEXT NOT NULL DEFAULT '',
            source_key TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create raw_records table")?;

    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    for record in source::builtin_records() {
        sqlx::query(
            r#"
            INSERT INTO grade_distro.raw_records
            (department, course, section, instructor,
             a, b, c, d, f, w, p, np, ix, rd, ew, total, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(&record.department)
        .bind(&record.course)
        .bind(&record.section)
        .bind(&record.instructor)
        .bind(&record.a)
        .bind(&record.b)
        .bind(&record.c)
        .bind(&record.d)
        .bind(&record.f)
        .bind(&record.w)
        .bind(&record.p)
        .bind(&record.np)
        .bind(&record.ix)
        .bind(&record.rd)
        .bind(&record.ew)
        .bind(&record.total)
        .bind(format!("seed-{:03}", record.id))
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn fetch_raw_records(
    pool: &PgPool,
    department: Option<&str>,
    instructor: Option<&str>,
) -> anyhow::Result<Vec<RawGradeRecord>> {
    let mut query = String::from(
        "SELECT id, created_at, department, course, section, instructor, \
         a, b, c, d, f, w, p, np, ix, rd, ew, total \
         FROM grade_distro.raw_records",
    );

    if department.is_some() {
        query.push_str(" WHERE department = $1");
    } else if instructor.is_some() {
        query.push_str(" WHERE instructor = $1");
    }

    query.push_str(" ORDER BY id");

    let mut rows = sqlx::query(&query);

    if let Some(value) = department {
        rows = rows.bind(value);
    } else if let Some(value) = instructor {
        rows = rows.bind(value);
    }

    let fetched = rows.fetch_all(pool).await?;
    let mut records = Vec::new();

    for row in fetched {
        records.push(RawGradeRecord {
            id: row.get("id"),
            created_at: row.get("created_at"),
            department: row.get("department"),
            course: row.get("course"),
            section: row.get("section"),
            instructor: row.get("instructor"),
            a: row.get("a"),
            b: row.get("b"),
            c: row.get("c"),
            d: row.get("d"),
            f: row.get("f"),
            w: row.get("w"),
            p: row.get("p"),
            np: row.get("np"),
            ix: row.get("ix"),
            rd: row.get("rd"),
            ew: row.get("ew"),
            total: row.get("total"),
        });
    }

    Ok(records)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        #[serde(rename = "Department")]
        department: String,
        #[serde(rename = "Course")]
        course: String,
        #[serde(rename = "Section")]
        section: String,
        #[serde(rename = "Instructor")]
        instructor: String,
        #[serde(rename = "A", default)]
        a: String,
        #[serde(rename = "B", default)]
        b: String,
        #[serde(rename = "C", default)]
        c: String,
        #[serde(rename = "D", default)]
        d: String,
        #[serde(rename = "F", default)]
        f: String,
        #[serde(rename = "W", default)]
        w: String,
        #[serde(rename = "P", default)]
        p: String,
        #[serde(rename = "NP", default)]
        np: String,
        #[serde(rename = "IX", default)]
        ix: String,
        #[serde(rename = "RD", default)]
        rd: String,
        #[serde(rename = "EW", default)]
        ew: String,
        #[serde(rename = "Total", default)]
        total: String,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO grade_distro.raw_records
            (department, course, section, instructor,
             a, b, c, d, f, w, p, np, ix, rd, ew, total, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(&row.department)
        .bind(&row.course)
        .bind(&row.section)
        .bind(&row.instructor)
        .bind(&row.a)
        .bind(&row.b)
        .bind(&row.c)
        .bind(&row.d)
        .bind(&row.f)
        .bind(&row.w)
        .bind(&row.p)
        .bind(&row.np)
        .bind(&row.ix)
        .bind(&row.rd)
        .bind(&row.ew)
        .bind(&row.total)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
