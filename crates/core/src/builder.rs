//! Day → Group → Student folder hierarchy.

use crate::resolver::RoleMapping;
use crate::tree::{DirectoryTree, ROOT_DIR_NAME};
use indexmap::{IndexMap, IndexSet};
use photoshoot_sheet::{CellValue, Sheet};
use std::borrow::Cow;
use tracing::debug;

/// Fixed folder created inside every group for group shots.
pub const GROUP_DIR_NAME: &str = "Group";
/// Fixed folder created inside every group for the selected group shots.
pub const GROUP_FINAL_DIR_NAME: &str = "Group Final";

/// Characters that cannot appear in a folder name on common filesystems.
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

type Students = IndexSet<String>;
type Groups = IndexMap<String, Students>;

/// Build the folder tree for a schedule.
///
/// Days, groups within a day, and students within a group appear in the
/// order they are first seen in the table. A row missing its Day is ignored;
/// one missing its Group still creates its Day folder; one missing its
/// Student still creates its Day and Group folders. Every group folder gets
/// [`GROUP_DIR_NAME`] and [`GROUP_FINAL_DIR_NAME`] after its students.
///
/// Values are grouped by their display text (so `1` and `1.0` are the same
/// day) and each folder name is passed through [`sanitize_segment`].
pub fn build_tree(sheet: &Sheet, mapping: &RoleMapping) -> DirectoryTree {
    let mut days: IndexMap<String, Groups> = IndexMap::new();

    for row in sheet.rows() {
        let Some(day) = role_value(row, mapping.day.index) else {
            continue;
        };
        let groups = days.entry(day).or_default();

        let Some(group) = role_value(row, mapping.group.index) else {
            continue;
        };
        let students = groups.entry(group).or_default();

        if let Some(student) = role_value(row, mapping.student.index) {
            students.insert(student);
        }
    }

    let mut tree = DirectoryTree::new(ROOT_DIR_NAME);
    for (day, groups) in &days {
        let day = sanitize_segment(day);
        tree.insert(&[&day]);

        for (group, students) in groups {
            let group = sanitize_segment(group);
            tree.insert(&[&day, &group]);

            for student in students {
                tree.insert(&[&day, &group, &sanitize_segment(student)]);
            }

            tree.insert(&[&day, &group, &Cow::Borrowed(GROUP_DIR_NAME)]);
            tree.insert(&[&day, &group, &Cow::Borrowed(GROUP_FINAL_DIR_NAME)]);
        }
    }

    debug!(
        rows = sheet.row_count(),
        days = days.len(),
        groups = days.values().map(IndexMap::len).sum::<usize>(),
        directories = tree.len(),
        "built folder tree"
    );

    tree
}

/// Display text of the role cell, or `None` when the cell is missing.
fn role_value(row: &[CellValue], index: usize) -> Option<String> {
    match row.get(index) {
        None | Some(CellValue::Null) => None,
        Some(value) => Some(value.to_string()),
    }
}

/// Make a cell's text safe to use as a single folder name.
///
/// `/ \ : * ? " < > |` and control characters become `_`, and a name made
/// only of dots (`.`, `..`) has every dot replaced with `_`. Anything else
/// is kept, including surrounding whitespace.
pub fn sanitize_segment(value: &str) -> Cow<'_, str> {
    let unsafe_char = |c: char| c.is_control() || RESERVED_CHARS.contains(&c);

    if !value.is_empty() && value.chars().all(|c| c == '.') {
        return Cow::Owned("_".repeat(value.len()));
    }
    if value.contains(unsafe_char) {
        return Cow::Owned(value.replace(unsafe_char, "_"));
    }
    Cow::Borrowed(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve_columns, ResolutionMode};

    fn tree_for(sheet: &Sheet) -> Vec<String> {
        let mapping = resolve_columns(sheet.column_names(), ResolutionMode::Compatible).unwrap();
        build_tree(sheet, &mapping)
            .paths()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_schedule_scenario() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("Day"), "Group".into(), "Student".into()],
            vec![CellValue::Int(1), "A".into(), "Alice".into()],
            vec![CellValue::Int(1), "A".into(), "Bob".into()],
            vec![CellValue::Int(2), "B".into(), "Carol".into()],
        ])
        .unwrap();

        assert_eq!(
            tree_for(&sheet),
            [
                "PHOTOSHOOT/1",
                "PHOTOSHOOT/1/A",
                "PHOTOSHOOT/1/A/Alice",
                "PHOTOSHOOT/1/A/Bob",
                "PHOTOSHOOT/1/A/Group",
                "PHOTOSHOOT/1/A/Group Final",
                "PHOTOSHOOT/2",
                "PHOTOSHOOT/2/B",
                "PHOTOSHOOT/2/B/Carol",
                "PHOTOSHOOT/2/B/Group",
                "PHOTOSHOOT/2/B/Group Final",
            ]
        );
    }

    #[test]
    fn test_first_occurrence_order_across_interleaved_rows() {
        let sheet = Sheet::from_data(vec![
            vec!["Day", "Group", "Name"],
            vec!["Tue", "X", "Zoe"],
            vec!["Mon", "Y", "Amy"],
            vec!["Tue", "W", "Ian"],
            vec!["Tue", "X", "Bea"],
        ])
        .unwrap();

        assert_eq!(
            tree_for(&sheet),
            [
                "PHOTOSHOOT/Tue",
                "PHOTOSHOOT/Tue/X",
                "PHOTOSHOOT/Tue/X/Zoe",
                "PHOTOSHOOT/Tue/X/Bea",
                "PHOTOSHOOT/Tue/X/Group",
                "PHOTOSHOOT/Tue/X/Group Final",
                "PHOTOSHOOT/Tue/W",
                "PHOTOSHOOT/Tue/W/Ian",
                "PHOTOSHOOT/Tue/W/Group",
                "PHOTOSHOOT/Tue/W/Group Final",
                "PHOTOSHOOT/Mon",
                "PHOTOSHOOT/Mon/Y",
                "PHOTOSHOOT/Mon/Y/Amy",
                "PHOTOSHOOT/Mon/Y/Group",
                "PHOTOSHOOT/Mon/Y/Group Final",
            ]
        );
    }

    #[test]
    fn test_missing_values_at_each_level() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("Day"), "Group".into(), "Student".into()],
            vec![CellValue::Null, "A".into(), "Ghost".into()],
            vec![CellValue::Int(1), CellValue::Null, "Nobody".into()],
            vec![CellValue::Int(2), "B".into(), CellValue::Null],
        ])
        .unwrap();

        assert_eq!(
            tree_for(&sheet),
            [
                "PHOTOSHOOT/1",
                "PHOTOSHOOT/2",
                "PHOTOSHOOT/2/B",
                "PHOTOSHOOT/2/B/Group",
                "PHOTOSHOOT/2/B/Group Final",
            ]
        );
    }

    #[test]
    fn test_duplicate_students_collapse() {
        let sheet = Sheet::from_data(vec![
            vec!["Day", "Group", "Student"],
            vec!["1", "A", "Alice"],
            vec!["1", "A", "Alice"],
            vec!["1", "A", "alice"],
        ])
        .unwrap();

        let paths = tree_for(&sheet);
        assert_eq!(paths.iter().filter(|p| p.ends_with("/Alice")).count(), 1);
        assert!(paths.contains(&"PHOTOSHOOT/1/A/alice".to_string()));
    }

    #[test]
    fn test_numeric_values_share_a_folder() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("Day"), "Group".into(), "Student".into()],
            vec![CellValue::Int(1), "A".into(), "Alice".into()],
            vec![CellValue::Float(1.0), "A".into(), "Bob".into()],
        ])
        .unwrap();

        let paths = tree_for(&sheet);
        assert_eq!(paths.iter().filter(|p| p.as_str() == "PHOTOSHOOT/1").count(), 1);
        assert!(paths.contains(&"PHOTOSHOOT/1/A/Bob".to_string()));
    }

    #[test]
    fn test_unsafe_values_are_sanitized() {
        let sheet = Sheet::from_data(vec![
            vec!["Day", "Group", "Student"],
            vec!["1/2", "..", "A:B"],
        ])
        .unwrap();

        assert_eq!(
            tree_for(&sheet),
            [
                "PHOTOSHOOT/1_2",
                "PHOTOSHOOT/1_2/__",
                "PHOTOSHOOT/1_2/__/A_B",
                "PHOTOSHOOT/1_2/__/Group",
                "PHOTOSHOOT/1_2/__/Group Final",
            ]
        );
    }

    #[test]
    fn test_sanitize_segment() {
        assert_eq!(sanitize_segment("Alice"), "Alice");
        assert!(matches!(sanitize_segment("Alice"), Cow::Borrowed(_)));
        assert_eq!(sanitize_segment("a\\b|c?"), "a_b_c_");
        assert_eq!(sanitize_segment("tab\there"), "tab_here");
        assert_eq!(sanitize_segment("."), "_");
        assert_eq!(sanitize_segment("J. Doe"), "J. Doe");
        assert_eq!(sanitize_segment(" padded "), " padded ");
    }

    #[test]
    fn test_empty_table_builds_empty_tree() {
        let sheet = Sheet::from_data(vec![vec!["Day", "Group", "Student"]]).unwrap();
        assert!(tree_for(&sheet).is_empty());
    }
}
