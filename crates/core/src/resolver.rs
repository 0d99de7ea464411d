//! Column role inference.
//!
//! Schedules arrive with unpredictable headers ("Day", " DAYS ", "Student Name",
//! "Group #"), so roles are found by case-insensitive keyword containment on
//! trimmed labels rather than by exact name.

use crate::error::{ShootError, ShootResult};
use std::fmt;
use tracing::debug;

/// Semantic role a column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Day,
    Group,
    Student,
}

impl Role {
    /// All roles, in hierarchy order.
    pub const ALL: [Role; 3] = [Role::Day, Role::Group, Role::Student];

    /// Lowercase keywords; a label containing any of them matches the role.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Role::Day => &["day"],
            Role::Group => &["group"],
            Role::Student => &["student", "name"],
        }
    }

    fn matches(self, normalized_label: &str) -> bool {
        self.keywords()
            .iter()
            .any(|keyword| normalized_label.contains(keyword))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Day => f.write_str("day"),
            Role::Group => f.write_str("group"),
            Role::Student => f.write_str("student"),
        }
    }
}

/// How collisions between roles are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Each role takes the last matching column; one column may serve several roles.
    #[default]
    Compatible,
    /// As `Compatible`, but a column bound to more than one role is an error.
    Strict,
}

/// A column picked for a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Position in the table.
    pub index: usize,
    /// Trimmed label.
    pub label: String,
}

/// Binding of every role to one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMapping {
    pub day: ColumnRef,
    pub group: ColumnRef,
    pub student: ColumnRef,
}

/// Map column labels to the Day, Group and Student roles.
///
/// Labels are trimmed and lowercased, then scanned once left to right. Each
/// role is tested independently against every column and keeps the *last*
/// column that matched, so `["Group", "Day", "Group2"]` binds Group to
/// `Group2`.
///
/// # Errors
///
/// `MissingColumns` if any role matched nothing, listing the trimmed labels.
/// In [`ResolutionMode::Strict`], `AmbiguousColumns` if one column won
/// several roles.
pub fn resolve_columns<S: AsRef<str>>(
    columns: &[S],
    mode: ResolutionMode,
) -> ShootResult<RoleMapping> {
    let labels: Vec<String> = columns.iter().map(|c| c.as_ref().trim().to_string()).collect();

    let mut day = None;
    let mut group = None;
    let mut student = None;

    for (index, label) in labels.iter().enumerate() {
        let normalized = label.to_lowercase();
        if Role::Day.matches(&normalized) {
            day = Some(index);
        }
        if Role::Group.matches(&normalized) {
            group = Some(index);
        }
        if Role::Student.matches(&normalized) {
            student = Some(index);
        }
    }

    let (Some(day), Some(group), Some(student)) = (day, group, student) else {
        let missing = [(Role::Day, day), (Role::Group, group), (Role::Student, student)]
            .into_iter()
            .filter(|(_, index)| index.is_none())
            .map(|(role, _)| role)
            .collect();
        return Err(ShootError::MissingColumns {
            missing,
            found: labels,
        });
    };

    if mode == ResolutionMode::Strict {
        for index in [day, group, student] {
            let roles: Vec<Role> = [(Role::Day, day), (Role::Group, group), (Role::Student, student)]
                .into_iter()
                .filter(|(_, bound)| *bound == index)
                .map(|(role, _)| role)
                .collect();
            if roles.len() > 1 {
                return Err(ShootError::AmbiguousColumns {
                    column: labels[index].clone(),
                    roles,
                    found: labels,
                });
            }
        }
    }

    let column = |index: usize| ColumnRef {
        index,
        label: labels[index].clone(),
    };
    let mapping = RoleMapping {
        day: column(day),
        group: column(group),
        student: column(student),
    };

    debug!(
        day = %mapping.day.label,
        group = %mapping.group.label,
        student = %mapping.student.label,
        "resolved column roles"
    );

    Ok(mapping)
}
