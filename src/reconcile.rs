//! Pure matching logic behind the targeted-upsert and delete verbs.
//!
//! Every adapter funnels its `set_records`/`delete_records` target selection
//! through these functions so that the contract semantics (ID wins, name/type
//! fallback, ambiguous-many is an error) are decided in exactly one place.

use crate::types::Record;

/// Outcome of matching one desired record against the zone's live records.
///
/// Carries indices into the live slice rather than references so callers can
/// keep mutating their own copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MatchOutcome {
    /// No live record matched.
    Zero,
    /// Exactly one live record matched, at this index.
    One(usize),
    /// More than one live record matched; the operation must fail rather
    /// than pick one arbitrarily.
    Many(usize),
}

/// Compares record names, treating `""` and `"@"` as the same apex name.
/// Comparison is ASCII case-insensitive per DNS convention.
pub(crate) fn names_equal(a: &str, b: &str) -> bool {
    let norm = |n: &str| -> String {
        if n.is_empty() || n == "@" {
            "@".to_string()
        } else {
            n.trim_end_matches('.').to_ascii_lowercase()
        }
    };
    norm(a) == norm(b)
}

/// Finds the live record with the given provider-assigned ID.
pub(crate) fn find_by_id(live: &[Record], id: &str) -> Option<usize> {
    live.iter().position(|r| r.id == id)
}

/// Selects the live record a `set_records` input will update.
///
/// When the input carries an ID, only that ID is consulted; [`MatchOutcome::Zero`]
/// then means "no such record" (an error for set, never a silent create).
/// Without an ID the natural key `(name, type)` is used: zero matches means
/// create, one means update, many is ambiguous.
pub(crate) fn find_set_target(live: &[Record], input: &Record) -> MatchOutcome {
    if input.has_id() {
        return match find_by_id(live, &input.id) {
            Some(i) => MatchOutcome::One(i),
            None => MatchOutcome::Zero,
        };
    }
    let matched: Vec<usize> = live
        .iter()
        .enumerate()
        .filter(|(_, r)| r.record_type == input.record_type && names_equal(&r.name, &input.name))
        .map(|(i, _)| i)
        .collect();
    match matched.len() {
        0 => MatchOutcome::Zero,
        1 => MatchOutcome::One(matched[0]),
        n => MatchOutcome::Many(n),
    }
}

/// Selects the live record a `delete_records` input targets.
///
/// An input ID wins outright. Otherwise the natural key `(name, type)`
/// selects candidates and a non-empty value narrows them further, so callers
/// can delete one value out of a multi-value name. Zero matches is not an
/// error for delete (the record is already gone); many is ambiguous.
pub(crate) fn find_delete_target(live: &[Record], input: &Record) -> MatchOutcome {
    if input.has_id() {
        return match find_by_id(live, &input.id) {
            Some(i) => MatchOutcome::One(i),
            None => MatchOutcome::Zero,
        };
    }
    let matched: Vec<usize> = live
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.record_type == input.record_type
                && names_equal(&r.name, &input.name)
                && (input.value.is_empty() || r.value == input.value)
        })
        .map(|(i, _)| i)
        .collect();
    match matched.len() {
        0 => MatchOutcome::Zero,
        1 => MatchOutcome::One(matched[0]),
        n => MatchOutcome::Many(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    fn live_zone() -> Vec<Record> {
        let mut a1 = Record::new(RecordType::A, "www", "198.51.100.1");
        a1.id = "r1".to_string();
        let mut a2 = Record::new(RecordType::A, "www", "198.51.100.2");
        a2.id = "r2".to_string();
        let mut txt = Record::new(RecordType::Txt, "test1", "hello");
        txt.id = "r3".to_string();
        let mut apex = Record::new(RecordType::A, "@", "203.0.113.9");
        apex.id = "r4".to_string();
        vec![a1, a2, txt, apex]
    }

    #[test]
    fn names_equal_apex_forms() {
        assert!(names_equal("", "@"));
        assert!(names_equal("@", "@"));
        assert!(names_equal("www", "WWW"));
        assert!(names_equal("www.", "www"));
        assert!(!names_equal("www", "mail"));
        assert!(!names_equal("", "www"));
    }

    #[test]
    fn set_target_by_id_wins_over_name() {
        let live = live_zone();
        // Name/type would match r3 but the ID points at r1.
        let mut input = Record::new(RecordType::Txt, "test1", "changed");
        input.id = "r1".to_string();
        assert_eq!(find_set_target(&live, &input), MatchOutcome::One(0));
    }

    #[test]
    fn set_target_unknown_id_is_zero_not_fallback() {
        let live = live_zone();
        let mut input = Record::new(RecordType::Txt, "test1", "changed");
        input.id = "no-such-id".to_string();
        assert_eq!(find_set_target(&live, &input), MatchOutcome::Zero);
    }

    #[test]
    fn set_target_by_name_type_single() {
        let live = live_zone();
        let input = Record::new(RecordType::Txt, "test1", "changed");
        assert_eq!(find_set_target(&live, &input), MatchOutcome::One(2));
    }

    #[test]
    fn set_target_no_match_means_create() {
        let live = live_zone();
        let input = Record::new(RecordType::Cname, "alias", "www.example.com.");
        assert_eq!(find_set_target(&live, &input), MatchOutcome::Zero);
    }

    #[test]
    fn set_target_many_is_ambiguous() {
        let live = live_zone();
        let input = Record::new(RecordType::A, "www", "198.51.100.3");
        assert_eq!(find_set_target(&live, &input), MatchOutcome::Many(2));
    }

    #[test]
    fn set_target_apex_matches_both_spellings() {
        let live = live_zone();
        let input = Record::new(RecordType::A, "", "203.0.113.10");
        assert_eq!(find_set_target(&live, &input), MatchOutcome::One(3));
    }

    #[test]
    fn delete_target_by_id() {
        let live = live_zone();
        let mut input = Record::new(RecordType::A, "", "");
        input.id = "r2".to_string();
        assert_eq!(find_delete_target(&live, &input), MatchOutcome::One(1));
    }

    #[test]
    fn delete_target_value_narrows_multi_value_name() {
        let live = live_zone();
        let input = Record::new(RecordType::A, "www", "198.51.100.2");
        assert_eq!(find_delete_target(&live, &input), MatchOutcome::One(1));
    }

    #[test]
    fn delete_target_without_value_is_ambiguous_on_multi_value() {
        let live = live_zone();
        let input = Record::new(RecordType::A, "www", "");
        assert_eq!(find_delete_target(&live, &input), MatchOutcome::Many(2));
    }

    #[test]
    fn delete_target_missing_is_zero() {
        let live = live_zone();
        let input = Record::new(RecordType::Txt, "gone", "x");
        assert_eq!(find_delete_target(&live, &input), MatchOutcome::Zero);

        let mut by_id = Record::new(RecordType::Txt, "", "");
        by_id.id = "no-such-id".to_string();
        assert_eq!(find_delete_target(&live, &by_id), MatchOutcome::Zero);
    }
}
