//! Patch policy: how each suggestion kind lands on a resolved target.
//!
//! Record fields: `modify` and `add` set the field, `remove` clears it to
//! the empty string; the field itself is never deleted. String lists:
//! `modify` sets the element at the key, `add` appends and ignores the key,
//! `remove` splices the element out. Whole entries of a section list are
//! not valid targets.

use super::path::{Cursor, Segment, Slot};
use super::ApplyError;
use crate::models::suggestion::SuggestionType;

pub fn apply_patch(
    parent: Cursor<'_>,
    key: &Segment,
    op: SuggestionType,
    value: &str,
    path: &str,
) -> Result<(), ApplyError> {
    match (parent, key) {
        (Cursor::Record(node), Segment::Field(name)) => match node.slot(name) {
            Some(Slot::Text(slot)) => {
                match op {
                    SuggestionType::Modify | SuggestionType::Add => *slot = value.to_string(),
                    SuggestionType::Remove => slot.clear(),
                }
                Ok(())
            }
            Some(Slot::List(_)) | Some(Slot::Section(_)) | Some(Slot::Nested(_)) => Err(
                unsupported(path, op, &format!("'{}' is not a text field", name)),
            ),
            Some(Slot::ReadOnly) => Err(unsupported(
                path,
                op,
                &format!("field '{}' is read-only", name),
            )),
            None => Err(unsupported(path, op, &format!("no such field '{}'", name))),
        },
        (Cursor::Record(_), Segment::Index(index)) => Err(unsupported(
            path,
            op,
            &format!("integer key {} into a record", index),
        )),
        (Cursor::Strings(items), key) => patch_string_list(items, key, op, value, path),
        (Cursor::Entries(rows), _) => Err(unsupported(
            path,
            op,
            &format!("cannot target a whole {} entry", rows.name()),
        )),
    }
}

fn patch_string_list(
    items: &mut Vec<String>,
    key: &Segment,
    op: SuggestionType,
    value: &str,
    path: &str,
) -> Result<(), ApplyError> {
    match op {
        // `add` always appends; the key is ignored even when out of range.
        SuggestionType::Add => {
            items.push(value.to_string());
            Ok(())
        }
        SuggestionType::Modify => {
            let index = require_index(key, op, path)?;
            let len = items.len();
            match items.get_mut(index) {
                Some(slot) => {
                    *slot = value.to_string();
                    Ok(())
                }
                None => Err(index_err(path, index, len)),
            }
        }
        SuggestionType::Remove => {
            let index = require_index(key, op, path)?;
            if index < items.len() {
                items.remove(index);
                Ok(())
            } else {
                Err(index_err(path, index, items.len()))
            }
        }
    }
}

fn require_index(key: &Segment, op: SuggestionType, path: &str) -> Result<usize, ApplyError> {
    match key {
        Segment::Index(index) => Ok(*index),
        Segment::Field(name) => Err(unsupported(
            path,
            op,
            &format!("'{}' is not an index into a string list", name),
        )),
    }
}

fn unsupported(path: &str, op: SuggestionType, detail: &str) -> ApplyError {
    ApplyError::UnsupportedOperation {
        path: path.to_string(),
        op,
        detail: detail.to_string(),
    }
}

fn index_err(path: &str, index: usize, len: usize) -> ApplyError {
    ApplyError::Index {
        path: path.to_string(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::super::path::{resolve, TargetPath};
    use super::*;
    use crate::models::cv::{ExperienceItem, ParsedCV};

    fn make_cv() -> ParsedCV {
        let mut cv = ParsedCV {
            summary: "Old summary".to_string(),
            skills: vec!["Go".to_string(), "Rust".to_string(), "C++".to_string()],
            ..Default::default()
        };
        cv.experience.push(ExperienceItem {
            id: "exp-1".to_string(),
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            highlights: vec!["Built the pipeline".to_string()],
            ..Default::default()
        });
        cv
    }

    fn run(cv: &mut ParsedCV, target: &str, op: SuggestionType, value: &str) -> Result<(), ApplyError> {
        let path = TargetPath::parse(target)?;
        let parent = resolve(cv, &path)?;
        apply_patch(parent, path.last(), op, value, path.raw())
    }

    #[test]
    fn test_modify_sets_record_field() {
        let mut cv = make_cv();
        run(&mut cv, "summary", SuggestionType::Modify, "New summary").unwrap();
        assert_eq!(cv.summary, "New summary");
    }

    #[test]
    fn test_add_on_record_field_behaves_like_modify() {
        let mut cv = make_cv();
        run(&mut cv, "contact.email", SuggestionType::Add, "ada@example.com").unwrap();
        assert_eq!(cv.contact.email, "ada@example.com");
    }

    #[test]
    fn test_remove_clears_record_field_without_deleting_it() {
        let mut cv = make_cv();
        run(&mut cv, "summary", SuggestionType::Remove, "").unwrap();
        assert_eq!(cv.summary, "");
        let json = serde_json::to_string(&cv).unwrap();
        assert!(json.contains("\"summary\":\"\""));
    }

    #[test]
    fn test_modify_sets_list_element() {
        let mut cv = make_cv();
        run(&mut cv, "skills.1", SuggestionType::Modify, "Rust (advanced)").unwrap();
        assert_eq!(cv.skills, vec!["Go", "Rust (advanced)", "C++"]);
    }

    #[test]
    fn test_add_appends_ignoring_index() {
        let mut cv = make_cv();
        run(&mut cv, "skills.0", SuggestionType::Add, "TypeScript").unwrap();
        assert_eq!(cv.skills, vec!["Go", "Rust", "C++", "TypeScript"]);

        run(&mut cv, "skills.99", SuggestionType::Add, "Haskell").unwrap();
        assert_eq!(cv.skills.last().map(String::as_str), Some("Haskell"));
    }

    #[test]
    fn test_remove_splices_list_element() {
        let mut cv = make_cv();
        run(&mut cv, "skills.1", SuggestionType::Remove, "").unwrap();
        assert_eq!(cv.skills, vec!["Go", "C++"]);
    }

    #[test]
    fn test_modify_out_of_range_is_index_error() {
        let mut cv = make_cv();
        let err = run(&mut cv, "skills.7", SuggestionType::Modify, "Zig").unwrap_err();
        match err {
            ApplyError::Index { index, len, .. } => {
                assert_eq!(index, 7);
                assert_eq!(len, 3);
            }
            other => panic!("expected an index error, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_out_of_range_is_index_error() {
        let mut cv = make_cv();
        let err = run(&mut cv, "experience.0.highlights.3", SuggestionType::Remove, "")
            .unwrap_err();
        assert!(matches!(err, ApplyError::Index { .. }));
    }

    #[test]
    fn test_whole_entry_is_not_a_valid_target() {
        let mut cv = make_cv();
        for op in [
            SuggestionType::Modify,
            SuggestionType::Add,
            SuggestionType::Remove,
        ] {
            let err = run(&mut cv, "experience.0", op, "anything").unwrap_err();
            assert!(matches!(err, ApplyError::UnsupportedOperation { .. }));
        }
    }

    #[test]
    fn test_whole_list_field_is_not_a_valid_target() {
        let mut cv = make_cv();
        let err = run(&mut cv, "skills", SuggestionType::Modify, "Rust").unwrap_err();
        assert!(matches!(err, ApplyError::UnsupportedOperation { .. }));
        assert_eq!(cv.skills.len(), 3);
    }

    #[test]
    fn test_read_only_fields_are_rejected() {
        let mut cv = make_cv();
        let err = run(&mut cv, "experience.0.id", SuggestionType::Modify, "exp-9").unwrap_err();
        assert!(matches!(err, ApplyError::UnsupportedOperation { .. }));
        assert_eq!(cv.experience[0].id, "exp-1");

        let err = run(&mut cv, "experience.0.current", SuggestionType::Modify, "true").unwrap_err();
        assert!(matches!(err, ApplyError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_unknown_final_field_is_rejected() {
        let mut cv = make_cv();
        let err = run(&mut cv, "experience.0.salary", SuggestionType::Modify, "1M").unwrap_err();
        assert!(matches!(err, ApplyError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_add_on_string_list_with_name_key_appends() {
        let mut cv = make_cv();
        run(&mut cv, "skills.new", SuggestionType::Add, "Kubernetes").unwrap();
        assert_eq!(cv.skills.last().map(String::as_str), Some("Kubernetes"));
    }

    #[test]
    fn test_modify_on_string_list_requires_index() {
        let mut cv = make_cv();
        let err = run(&mut cv, "skills.first", SuggestionType::Modify, "Go").unwrap_err();
        assert!(matches!(err, ApplyError::UnsupportedOperation { .. }));
    }
}
