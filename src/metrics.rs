use crate::models::GradeStats;

/// Letter-grade GPA: weighted average over A/B/C/D/F only (4/3/2/1/0).
/// W/P/NP/IX/RD/EW are non-letter outcomes and stay out of both sides
/// of the division. Returns 0.0 when no letter grades were recorded.
/// Rounded half-away-from-zero to two decimals.
pub fn gpa(stats: &GradeStats) -> f64 {
    // Sums are widened to u64: five u32 counts (and the 4x point
    // weight) can exceed u32::MAX, and this function must never panic.
    let letter_total = u64::from(stats.a_count)
        + u64::from(stats.b_count)
        + u64::from(stats.c_count)
        + u64::from(stats.d_count)
        + u64::from(stats.f_count);
    if letter_total == 0 {
        return 0.0;
    }

    let points = u64::from(stats.a_count) * 4
        + u64::from(stats.b_count) * 3
        + u64::from(stats.c_count) * 2
        + u64::from(stats.d_count);
    let average = points as f64 / letter_total as f64;
    (average * 100.0).round() / 100.0
}

/// Total enrollment across all eleven grade categories. Deliberately a
/// larger denominator than GPA's letter-grade subset; the two metrics
/// never share a computation path.
pub fn total_enrollment(stats: &GradeStats) -> u64 {
    u64::from(stats.a_count)
        + u64::from(stats.b_count)
        + u64::from(stats.c_count)
        + u64::from(stats.d_count)
        + u64::from(stats.f_count)
        + u64::from(stats.w_count)
        + u64::from(stats.p_count)
        + u64::from(stats.np_count)
        + u64::from(stats.ix_count)
        + u64::from(stats.rd_count)
        + u64::from(stats.ew_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_counts(counts: [u32; 11]) -> GradeStats {
        let [a, b, c, d, f, w, p, np, ix, rd, ew] = counts;
        GradeStats {
            id: "g_1".to_string(),
            professor_id: "p_jane_doe".to_string(),
            course_id: "c_math_101".to_string(),
            term: "Fall 2023".to_string(),
            a_count: a,
            b_count: b,
            c_count: c,
            d_count: d,
            f_count: f,
            w_count: w,
            p_count: p,
            np_count: np,
            ix_count: ix,
            rd_count: rd,
            ew_count: ew,
        }
    }

    #[test]
    fn all_a_section_earns_four_point_zero() {
        let stats = stats_with_counts([10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gpa(&stats), 4.0);
    }

    #[test]
    fn empty_section_yields_zero_not_nan() {
        let stats = stats_with_counts([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gpa(&stats), 0.0);
    }

    #[test]
    fn split_a_b_section_earns_three_point_five() {
        let stats = stats_with_counts([5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gpa(&stats), 3.5);
    }

    #[test]
    fn f_counts_drag_the_denominator_without_adding_points() {
        let stats = stats_with_counts([4, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gpa(&stats), 2.0);
    }

    #[test]
    fn withdrawals_and_pass_fail_never_touch_gpa() {
        let letter_only = stats_with_counts([3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let with_extras = stats_with_counts([3, 3, 0, 0, 0, 9, 9, 9, 9, 9, 9]);
        assert_eq!(gpa(&letter_only), gpa(&with_extras));
    }

    #[test]
    fn gpa_rounds_to_two_decimals() {
        // 4+4+4+3+3+2 = 20 points over 6 students = 3.333...
        let stats = stats_with_counts([3, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gpa(&stats), 3.33);
    }

    #[test]
    fn extreme_counts_do_not_overflow_the_metrics() {
        let stats = stats_with_counts([u32::MAX, u32::MAX, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gpa(&stats), 3.5);

        let full = stats_with_counts([u32::MAX; 11]);
        assert_eq!(total_enrollment(&full), 11 * u64::from(u32::MAX));
    }

    #[test]
    fn enrollment_sums_all_eleven_categories() {
        let stats = stats_with_counts([1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(total_enrollment(&stats), 11);
    }

    #[test]
    fn enrollment_counts_non_letter_outcomes_gpa_ignores() {
        let stats = stats_with_counts([0, 0, 0, 0, 0, 5, 2, 1, 0, 0, 3]);
        assert_eq!(total_enrollment(&stats), 11);
        assert_eq!(gpa(&stats), 0.0);
    }
}
