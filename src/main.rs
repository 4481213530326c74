use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod db;
mod ids;
mod mapper;
mod metrics;
mod models;
mod report;
mod source;

#[derive(Parser)]
#[command(name = "grade-distro")]
#[command(about = "Grade distribution normalization pipeline for the course review portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load the built-in grade distribution dataset
    Seed,
    /// Import raw grade records from a CSV export
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Map raw records to canonical grade statistics and print them
    #[command(group(
        ArgGroup::new("scope")
            .args(["department", "instructor"])
            .multiple(false)
    ))]
    Map {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Export canonical professors, courses and grade stats as JSON
    #[command(group(
        ArgGroup::new("scope")
            .args(["department", "instructor"])
            .multiple(false)
    ))]
    Export {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long, default_value = "grade-stats.json")]
        out: PathBuf,
    },
    /// Generate a markdown report
    #[command(group(
        ArgGroup::new("scope")
            .args(["department", "instructor"])
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(serde::Serialize)]
struct ExportBundle {
    professors: Vec<models::Professor>,
    courses: Vec<models::Course>,
    grade_stats: Vec<models::GradeStats>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL").ok();

    match cli.command {
        Commands::InitDb => {
            let pool = connect(database_url.as_deref()).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect(database_url.as_deref()).await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect(database_url.as_deref()).await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} raw records from {}.", csv.display());
        }
        Commands::Map {
            department,
            instructor,
            limit,
        } => {
            let (records, origin) = source::load_raw_records(
                database_url.as_deref(),
                department.as_deref(),
                instructor.as_deref(),
            )
            .await;
            let stats = mapper::map_grade_stats(&records);

            if stats.is_empty() {
                println!("No grade records in scope.");
                return Ok(());
            }

            println!("{} sections from the {}:", stats.len(), origin.label());
            for entry in stats.iter().take(limit) {
                println!(
                    "- {} ({} / {}), {}: GPA {:.2}, {} students",
                    entry.id,
                    entry.course_id,
                    entry.professor_id,
                    entry.term,
                    metrics::gpa(entry),
                    metrics::total_enrollment(entry)
                );
            }
        }
        Commands::Export {
            department,
            instructor,
            out,
        } => {
            let (records, origin) = source::load_raw_records(
                database_url.as_deref(),
                department.as_deref(),
                instructor.as_deref(),
            )
            .await;
            let bundle = ExportBundle {
                professors: mapper::map_professors(&records),
                courses: mapper::map_courses(&records),
                grade_stats: mapper::map_grade_stats(&records),
            };
            let json = serde_json::to_string_pretty(&bundle)?;
            std::fs::write(&out, json)?;
            println!(
                "Exported {} grade stats from the {} to {}.",
                bundle.grade_stats.len(),
                origin.label(),
                out.display()
            );
        }
        Commands::Report {
            department,
            instructor,
            out,
        } => {
            let scope = department.as_deref().or(instructor.as_deref());
            let (records, origin) = source::load_raw_records(
                database_url.as_deref(),
                department.as_deref(),
                instructor.as_deref(),
            )
            .await;
            let report = report::build_report(scope, origin, &records);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

async fn connect(database_url: Option<&str>) -> anyhow::Result<sqlx::PgPool> {
    let url = database_url.context("DATABASE_URL must be set for this command")?;
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url)
        .await
        .context("failed to connect to Postgres")
}
