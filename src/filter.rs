//! View filters and the visibility predicate.
//!
//! This module defines the four list views and the single rule deciding which
//! tasks each of them shows. Removed tasks only ever appear in the trash.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Which part of the task list is on screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    /// Every task that is not in the trash.
    #[default]
    All,
    /// Completed tasks.
    Checked,
    /// Tasks still to do.
    Unchecked,
    /// The trash.
    Removed,
}

impl Filter {
    /// Selector order.
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Checked, Filter::Unchecked, Filter::Removed];

    /// Human-readable label for the filter tabs.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All tasks",
            Filter::Checked => "Completed",
            Filter::Unchecked => "Current",
            Filter::Removed => "Trash",
        }
    }

    /// Position of this filter in [`Filter::ALL`].
    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Checked => 1,
            Filter::Unchecked => 2,
            Filter::Removed => 3,
        }
    }

    /// Filter at `index` in selector order, if any.
    pub fn from_index(index: usize) -> Option<Filter> {
        Filter::ALL.get(index).copied()
    }

    /// Next filter in selector order, wrapping around.
    pub fn next(self) -> Filter {
        Filter::ALL[(self.index() + 1) % Filter::ALL.len()]
    }

    /// Previous filter in selector order, wrapping around.
    pub fn prev(self) -> Filter {
        Filter::ALL[(self.index() + Filter::ALL.len() - 1) % Filter::ALL.len()]
    }

    /// Whether the new-task input is offered in this view.
    pub fn accepts_new_tasks(self) -> bool {
        matches!(self, Filter::All | Filter::Unchecked)
    }

    /// Whether `task` belongs in this view.
    pub fn keeps(self, task: &Task) -> bool {
        is_visible(task, self)
    }
}

/// Visibility rule shared by every list view.
pub fn is_visible(task: &Task, filter: Filter) -> bool {
    match filter {
        Filter::All => !task.removed,
        Filter::Checked => task.checked && !task.removed,
        Filter::Unchecked => !task.checked && !task.removed,
        Filter::Removed => task.removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    fn task(checked: bool, removed: bool) -> Task {
        let mut t = Task::new(TaskId::new(1), "t");
        t.checked = checked;
        t.removed = removed;
        t
    }

    #[test]
    fn test_visibility_table() {
        // (checked, removed) -> [All, Checked, Unchecked, Removed]
        let cases = [
            ((false, false), [true, false, true, false]),
            ((true, false), [true, true, false, false]),
            ((false, true), [false, false, false, true]),
            ((true, true), [false, false, false, true]),
        ];
        for ((checked, removed), expected) in cases {
            let t = task(checked, removed);
            for (filter, want) in Filter::ALL.iter().zip(expected) {
                assert_eq!(
                    is_visible(&t, *filter),
                    want,
                    "checked={checked} removed={removed} filter={filter:?}"
                );
            }
        }
    }

    #[test]
    fn test_cycling_wraps_both_ways() {
        assert_eq!(Filter::All.next(), Filter::Checked);
        assert_eq!(Filter::Removed.next(), Filter::All);
        assert_eq!(Filter::All.prev(), Filter::Removed);
        for f in Filter::ALL {
            assert_eq!(f.next().prev(), f);
            assert_eq!(Filter::from_index(f.index()), Some(f));
        }
        assert_eq!(Filter::from_index(4), None);
    }

    #[test]
    fn test_new_tasks_only_in_all_and_unchecked() {
        assert!(Filter::All.accepts_new_tasks());
        assert!(Filter::Unchecked.accepts_new_tasks());
        assert!(!Filter::Checked.accepts_new_tasks());
        assert!(!Filter::Removed.accepts_new_tasks());
    }

    #[test]
    fn test_default_and_serde_names() {
        assert_eq!(Filter::default(), Filter::All);
        assert_eq!(serde_json::to_string(&Filter::Unchecked).unwrap(), "\"unchecked\"");
        let parsed: Filter = serde_json::from_str("\"removed\"").unwrap();
        assert_eq!(parsed, Filter::Removed);
    }
}
