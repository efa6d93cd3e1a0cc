use super::DropdownCandidate;

/// Narrow `candidates` for display.
///
/// Category equality is applied first, then a case-insensitive substring
/// match of `query` against the candidate name. Source order is preserved and
/// the result never holds more than `cap` entries, however many matched.
pub fn filter_candidates<'a>(
    candidates: &'a [DropdownCandidate],
    query: &str,
    category: Option<&str>,
    cap: usize,
) -> Vec<&'a DropdownCandidate> {
    let needle = query.to_lowercase();

    candidates
        .iter()
        .filter(|candidate| match category {
            Some(category) => candidate.category.as_deref() == Some(category),
            None => true,
        })
        .filter(|candidate| needle.is_empty() || candidate.name.to_lowercase().contains(&needle))
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(found: &[&DropdownCandidate]) -> Vec<String> {
        found.iter().map(|candidate| candidate.name.clone()).collect()
    }

    fn catalog() -> Vec<DropdownCandidate> {
        vec![
            DropdownCandidate::new("React").with_category("frontend"),
            DropdownCandidate::new("Redux").with_category("frontend"),
            DropdownCandidate::new("Vue").with_category("frontend"),
            DropdownCandidate::new("PostgreSQL").with_category("database"),
            DropdownCandidate::new("Redis").with_category("database"),
        ]
    }

    #[test]
    fn test_substring_match_preserves_order() {
        let candidates = vec![
            DropdownCandidate::new("React"),
            DropdownCandidate::new("Redux"),
            DropdownCandidate::new("Vue"),
        ];
        let found = filter_candidates(&candidates, "re", None, 20);
        assert_eq!(names(&found), vec!["React", "Redux"]);
    }

    #[test]
    fn test_match_is_case_insensitive_anywhere_in_name() {
        let candidates = catalog();
        let found = filter_candidates(&candidates, "SQL", None, 20);
        assert_eq!(names(&found), vec!["PostgreSQL"]);

        let found = filter_candidates(&candidates, "e", None, 20);
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn test_category_filter_applies_first() {
        let candidates = catalog();
        let found = filter_candidates(&candidates, "re", Some("database"), 20);
        assert_eq!(names(&found), vec!["PostgreSQL", "Redis"]);

        let found = filter_candidates(&candidates, "", Some("frontend"), 20);
        assert_eq!(names(&found), vec!["React", "Redux", "Vue"]);

        let found = filter_candidates(&candidates, "", Some("devops"), 20);
        assert!(found.is_empty());
    }

    #[test]
    fn test_result_is_capped() {
        let candidates: Vec<_> = (0..200)
            .map(|i| DropdownCandidate::new(format!("Skill {i}")))
            .collect();

        for cap in [1, 4, 20] {
            let found = filter_candidates(&candidates, "skill", None, cap);
            assert_eq!(found.len(), cap);
            assert!(found
                .iter()
                .all(|candidate| candidate.name.to_lowercase().contains("skill")));
        }

        // The cap is a prefix of the full match list.
        let found = filter_candidates(&candidates, "1", None, 4);
        assert_eq!(names(&found), vec!["Skill 1", "Skill 10", "Skill 11", "Skill 12"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let candidates = catalog();
        let first = names(&filter_candidates(&candidates, "re", None, 20));
        let second = names(&filter_candidates(&candidates, "re", None, 20));
        assert_eq!(first, second);
    }
}
