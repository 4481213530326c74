/// Derive a stable professor id from a free-text instructor name.
/// Lowercased, whitespace runs collapsed to a single underscore. Two
/// distinct instructors whose names normalize identically will collide;
/// the upstream source carries no reconciliation key to do better.
pub fn derive_professor_id(instructor: &str) -> String {
    let normalized = instructor
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    format!("p_{normalized}")
}

/// Derive a stable course id from department and course number. The
/// number is kept as-is; only the department is lowercased.
pub fn derive_course_id(department: &str, course_number: &str) -> String {
    format!("c_{}_{}", department.to_lowercase(), course_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn professor_id_is_case_and_whitespace_insensitive() {
        assert_eq!(derive_professor_id("Jane Doe"), "p_jane_doe");
        assert_eq!(
            derive_professor_id("Jane Doe"),
            derive_professor_id("jane   doe")
        );
        assert_eq!(
            derive_professor_id("  JANE\tDOE  "),
            derive_professor_id("jane doe")
        );
    }

    #[test]
    fn professor_id_is_idempotent_over_repeated_calls() {
        let first = derive_professor_id("Robert Johnson");
        let second = derive_professor_id("Robert Johnson");
        assert_eq!(first, second);
    }

    #[test]
    fn course_id_lowercases_department_only() {
        assert_eq!(derive_course_id("MATH", "101"), "c_math_101");
        assert_eq!(derive_course_id("cs", "101A"), "c_cs_101A");
    }

    #[test]
    fn course_id_is_stable_across_calls() {
        assert_eq!(
            derive_course_id("MATH", "101"),
            derive_course_id("MATH", "101")
        );
    }

    #[test]
    fn empty_inputs_still_produce_ids() {
        assert_eq!(derive_professor_id(""), "p_");
        assert_eq!(derive_course_id("", ""), "c__");
    }
}
