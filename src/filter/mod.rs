// src/filter/mod.rs
use crate::render::RenderedRow;

/// Current term selection and search text. Derived from user input, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub term: String,
    pub text: String,
}

impl FilterState {
    pub fn new(term: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            text: text.into(),
        }
    }

    /// Keep every row whose term equals the selected one and whose visible
    /// fields contain the search text, both ignoring case. Blank inputs
    /// do not filter.
    pub fn apply<'a>(&self, rows: &'a [RenderedRow]) -> Vec<&'a RenderedRow> {
        let term = self.term.trim().to_lowercase();
        let text = self.text.trim().to_lowercase();

        rows.iter()
            .filter(|row| term.is_empty() || row.record.term.trim().to_lowercase() == term)
            .filter(|row| text.is_empty() || row.haystack().contains(&text))
            .collect()
    }
}

/// Filter `rows` by term, then by text; relative order is preserved.
pub fn filter<'a>(rows: &'a [RenderedRow], term: &str, text: &str) -> Vec<&'a RenderedRow> {
    FilterState::new(term, text).apply(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RawTable;
    use crate::render::{render, RenderedTable};

    fn rendered() -> RenderedTable {
        let t = RawTable::from_csv(
            "Course,Term,Section,Instructor,Location\n\
             MATH 101,Fall 2025,001,Lee,Math Building\n\
             ENGL 1,Fall 2025,002,Ray,Online\n\
             MATH 227,Spring 2026,003,Kim,Math Building\n\
             HIST 11,FALL 2025,004,Mathers,Online\n",
        );
        render(&t.headers, &t.rows, &[], "")
    }

    fn courses(rows: &[&RenderedRow]) -> Vec<String> {
        rows.iter().map(|r| r.record.course.clone()).collect()
    }

    #[test]
    fn test_blank_filters_return_everything_in_order() {
        let t = rendered();
        let out = filter(&t.rows, "", "");
        assert_eq!(out.len(), t.rows.len());
        assert!(out.iter().zip(&t.rows).all(|(a, b)| *a == b));
        assert_eq!(filter(&t.rows, "  ", " ").len(), 4);
    }

    #[test]
    fn test_term_filter_ignores_case() {
        let t = rendered();
        let out = filter(&t.rows, "fall 2025", "");
        assert_eq!(courses(&out), vec!["MATH 101", "ENGL 1", "HIST 11"]);
    }

    #[test]
    fn test_text_filter_matches_any_visible_field() {
        let t = rendered();
        assert_eq!(courses(&filter(&t.rows, "", "ONLINE")), vec!["ENGL 1", "HIST 11"]);
        assert_eq!(courses(&filter(&t.rows, "", "kim")), vec!["MATH 227"]);
        assert!(filter(&t.rows, "", "physics").is_empty());
    }

    #[test]
    fn test_filters_compose_conjunctively() {
        let t = rendered();
        let out = filter(&t.rows, "Fall 2025", "math");
        assert_eq!(courses(&out), vec!["MATH 101", "HIST 11"]);
        assert!(out
            .iter()
            .all(|r| r.record.term.eq_ignore_ascii_case("Fall 2025")
                && r.haystack().contains("math")));

        // A text match never re-admits a row the term filter removed.
        assert!(filter(&t.rows, "Spring 2026", "online").is_empty());
    }

    #[test]
    fn test_filter_state_matches_free_function() {
        let t = rendered();
        let state = FilterState::new("Spring 2026", "227");
        assert_eq!(state.apply(&t.rows), filter(&t.rows, "Spring 2026", "227"));
    }
}
