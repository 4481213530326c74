use std::collections::HashMap;
use std::fmt::Write;

use crate::mapper;
use crate::metrics;
use crate::models::{CourseSummary, GradeStats, RawGradeRecord};
use crate::source::RecordSource;

pub fn summarize_by_course(
    stats: &[GradeStats],
    titles: &HashMap<String, String>,
) -> Vec<CourseSummary> {
    let mut map: HashMap<String, (usize, u64, f64)> = HashMap::new();

    for entry in stats {
        let slot = map.entry(entry.course_id.clone()).or_insert((0, 0, 0.0));
        slot.0 += 1;
        slot.1 += metrics::total_enrollment(entry);
        slot.2 += metrics::gpa(entry);
    }

    let mut summaries: Vec<CourseSummary> = map
        .into_iter()
        .map(|(course_id, (sections, enrollment, gpa_sum))| CourseSummary {
            title: titles
                .get(&course_id)
                .cloned()
                .unwrap_or_else(|| course_id.clone()),
            course_id,
            sections,
            enrollment,
            avg_gpa: gpa_sum / sections as f64,
        })
        .collect();

    summaries.sort_by(|a, b| b.enrollment.cmp(&a.enrollment));
    summaries
}

pub fn build_report(
    scope: Option<&str>,
    origin: RecordSource,
    records: &[RawGradeRecord],
) -> String {
    let stats = mapper::map_grade_stats(records);
    let professors = mapper::map_professors(records);
    let courses = mapper::map_courses(records);

    let titles: HashMap<String, String> = courses
        .iter()
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect();
    let professor_names: HashMap<String, String> = professors
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect();

    let summaries = summarize_by_course(&stats, &titles);

    let mut output = String::new();
    let scope_label = scope.unwrap_or("all departments");

    let _ = writeln!(output, "# Grade Distribution Report");
    let _ = writeln!(
        output,
        "Generated for {} from the {} ({} sections)",
        scope_label,
        origin.label(),
        stats.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Courses");

    if summaries.is_empty() {
        let _ = writeln!(output, "No grade records in scope.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} sections, {} students, avg GPA {:.2}",
                summary.title, summary.sections, summary.enrollment, summary.avg_gpa
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Professors");

    if professors.is_empty() {
        let _ = writeln!(output, "No professors in scope.");
    } else {
        for professor in professors.iter() {
            let _ = writeln!(
                output,
                "- {} ({}) across {} sections",
                professor.name,
                professor.department,
                professor.review_count.unwrap_or(0)
            );
        }
    }

    let mut hardest = stats.clone();
    hardest.sort_by(|a, b| {
        metrics::gpa(a)
            .partial_cmp(&metrics::gpa(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let _ = writeln!(output);
    let _ = writeln!(output, "## Lowest GPA Sections");

    if hardest.is_empty() {
        let _ = writeln!(output, "No grade records in scope.");
    } else {
        for entry in hardest.iter().take(5) {
            let course = titles
                .get(&entry.course_id)
                .map(String::as_str)
                .unwrap_or(entry.course_id.as_str());
            let instructor = professor_names
                .get(&entry.professor_id)
                .map(String::as_str)
                .unwrap_or("unknown");
            let _ = writeln!(
                output,
                "- {} ({}), {}: GPA {:.2} across {} students",
                course,
                instructor,
                entry.term,
                metrics::gpa(entry),
                metrics::total_enrollment(entry)
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source;

    #[test]
    fn summaries_aggregate_sections_per_course() {
        let records = source::builtin_records();
        let stats = mapper::map_grade_stats(&records);
        let titles = mapper::map_courses(&records)
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        let summaries = summarize_by_course(&stats, &titles);
        let cs = summaries
            .iter()
            .find(|s| s.course_id == "c_cs_101")
            .expect("cs 101 summary");
        assert_eq!(cs.sections, 2);
        assert_eq!(cs.title, "CS 101");
        assert!(cs.avg_gpa > 0.0 && cs.avg_gpa <= 4.0);
    }

    #[test]
    fn report_names_scope_and_source() {
        let records = source::builtin_records();
        let report = build_report(Some("MATH"), RecordSource::Fallback, &records);
        assert!(report.contains("# Grade Distribution Report"));
        assert!(report.contains("Generated for MATH from the built-in dataset"));
        assert!(report.contains("## Lowest GPA Sections"));
    }

    #[test]
    fn empty_scope_renders_placeholders_instead_of_panicking() {
        let report = build_report(None, RecordSource::Fallback, &[]);
        assert!(report.contains("No grade records in scope."));
        assert!(report.contains("all departments"));
    }
}
