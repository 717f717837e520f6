//! In-memory task store.
//!
//! `TaskStore` owns the ordered task collection (newest first) and the current
//! view filter. Every operation is total: unknown ids and empty input are
//! silently ignored. The collection is kept behind an `Arc` and updated
//! copy-on-write, so a snapshot obtained with [`TaskStore::snapshot`] always
//! reflects one complete state.

use std::sync::Arc;

use tracing::debug;

use crate::filter::Filter;
use crate::task::{Task, TaskId};

/// Number of tasks visible under each filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub checked: usize,
    pub unchecked: usize,
    pub removed: usize,
}

impl FilterCounts {
    /// Count for a single filter.
    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Checked => self.checked,
            Filter::Unchecked => self.unchecked,
            Filter::Removed => self.removed,
        }
    }
}

/// Owner of the task list and the current filter.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Arc<Vec<Task>>,
    filter: Filter,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}

impl TaskStore {
    /// Empty store showing [`Filter::All`].
    pub fn new() -> Self {
        TaskStore {
            tasks: Arc::new(Vec::new()),
            filter: Filter::All,
            next_id: 1,
        }
    }

    /// Empty store showing `filter`.
    pub fn with_filter(filter: Filter) -> Self {
        TaskStore {
            filter,
            ..TaskStore::new()
        }
    }

    /// Generate the next task id. Ids are never handed out twice.
    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Prepend a new task. Empty text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        if text.is_empty() {
            return None;
        }
        let id = self.allocate_id();
        Arc::make_mut(&mut self.tasks).insert(0, Task::new(id, text));
        debug!(%id, "task added");
        Some(id)
    }

    /// Replace the text of a task. Empty text is allowed.
    pub fn edit(&mut self, id: TaskId, text: &str) {
        self.update(id, |task| task.text = text.to_string());
    }

    /// Mark a task as completed or not.
    pub fn set_checked(&mut self, id: TaskId, checked: bool) {
        if self.update(id, |task| task.checked = checked) {
            debug!(%id, checked, "task checked state changed");
        }
    }

    /// Move a task into (`true`) or out of (`false`) the trash.
    pub fn set_removed(&mut self, id: TaskId, removed: bool) {
        if self.update(id, |task| task.removed = removed) {
            debug!(%id, removed, "task removed state changed");
        }
    }

    /// Permanently drop every task in the trash and return how many went.
    pub fn purge_removed(&mut self) -> usize {
        if !self.has_removed() {
            return 0;
        }
        let before = self.tasks.len();
        Arc::make_mut(&mut self.tasks).retain(|task| !task.removed);
        let purged = before - self.tasks.len();
        debug!(purged, "trash emptied");
        purged
    }

    /// Switch the current view.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Current view.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Tasks shown by the current view, newest first.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.visible_for(self.filter)
    }

    /// Tasks shown by `filter`, newest first.
    pub fn visible_for(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.keeps(task)).collect()
    }

    /// Look up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Every task, including the trash, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Shared handle to the current collection.
    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether the trash holds anything.
    pub fn has_removed(&self) -> bool {
        self.tasks.iter().any(|task| task.removed)
    }

    /// Per-filter totals in one pass.
    pub fn counts(&self) -> FilterCounts {
        self.tasks.iter().fold(FilterCounts::default(), |mut counts, task| {
            if task.removed {
                counts.removed += 1;
            } else {
                counts.all += 1;
                if task.checked {
                    counts.checked += 1;
                } else {
                    counts.unchecked += 1;
                }
            }
            counts
        })
    }

    /// Apply `f` to the task with `id`. Returns false when no such task exists,
    /// in which case the collection is left untouched.
    fn update(&mut self, id: TaskId, f: impl FnOnce(&mut Task)) -> bool {
        let Some(idx) = self.tasks.iter().position(|task| task.id == id) else {
            return false;
        };
        match Arc::make_mut(&mut self.tasks).get_mut(idx) {
            Some(task) => {
                f(task);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.text.clone()).collect()
    }

    fn all_texts(store: &TaskStore) -> Vec<String> {
        store.tasks().iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_add_prepends_active_task() {
        let mut store = TaskStore::new();
        store.add("old");
        let id = store.add("x").unwrap();

        let visible = store.visible_for(Filter::All);
        assert_eq!(texts(&visible), ["x", "old"]);
        let matching: Vec<_> = visible.iter().filter(|t| t.text == "x").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, id);
        assert!(!matching[0].checked);
        assert!(!matching[0].removed);
    }

    #[test]
    fn test_add_empty_is_noop() {
        let mut store = TaskStore::new();
        store.add("a");
        assert_eq!(store.add(""), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_accepts_whitespace() {
        let mut store = TaskStore::new();
        assert!(store.add("  ").is_some());
        assert_eq!(store.tasks()[0].text, "  ");
    }

    #[test]
    fn test_edit_is_idempotent_and_keeps_position() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        store.add("b");

        store.edit(a, "A");
        let once = store.tasks().to_vec();
        store.edit(a, "A");
        assert_eq!(store.tasks(), once.as_slice());
        assert_eq!(all_texts(&store), ["b", "A"]);
    }

    #[test]
    fn test_edit_allows_empty_text() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        store.edit(a, "");
        assert_eq!(store.get(a).map(|t| t.text.as_str()), Some(""));
    }

    #[test]
    fn test_checked_moves_between_views() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        store.set_checked(a, true);

        assert!(store.visible_for(Filter::Unchecked).is_empty());
        assert_eq!(texts(&store.visible_for(Filter::Checked)), ["a"]);
        assert_eq!(texts(&store.visible_for(Filter::All)), ["a"]);

        store.set_checked(a, false);
        assert!(store.visible_for(Filter::Checked).is_empty());
        assert_eq!(texts(&store.visible_for(Filter::Unchecked)), ["a"]);
    }

    #[test]
    fn test_removed_dominates_every_view_but_trash() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.set_checked(b, true);
        store.set_removed(a, true);
        store.set_removed(b, true);

        for filter in [Filter::All, Filter::Checked, Filter::Unchecked] {
            assert!(store.visible_for(filter).is_empty(), "{filter:?}");
        }
        assert_eq!(texts(&store.visible_for(Filter::Removed)), ["b", "a"]);
    }

    #[test]
    fn test_restore_brings_task_back() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        store.set_removed(a, true);
        store.set_removed(a, false);
        assert_eq!(texts(&store.visible_for(Filter::All)), ["a"]);
        assert!(!store.has_removed());
    }

    #[test]
    fn test_purge_is_selective_and_irreversible() {
        let mut store = TaskStore::new();
        let c = store.add("C").unwrap();
        let b = store.add("B").unwrap();
        store.add("A");
        store.set_removed(b, true);
        store.set_removed(c, true);

        assert_eq!(store.purge_removed(), 2);
        assert_eq!(all_texts(&store), ["A"]);

        let before = store.tasks().to_vec();
        store.set_removed(b, false);
        assert_eq!(store.tasks(), before.as_slice());
        assert!(store.get(b).is_none());
    }

    #[test]
    fn test_purge_keeps_order_of_survivors() {
        let mut store = TaskStore::new();
        store.add("1");
        let two = store.add("2").unwrap();
        store.add("3");
        store.set_removed(two, true);
        store.purge_removed();
        assert_eq!(all_texts(&store), ["3", "1"]);
    }

    #[test]
    fn test_purge_with_empty_trash_is_noop() {
        let mut store = TaskStore::new();
        store.add("a");
        let snap = store.snapshot();
        assert_eq!(store.purge_removed(), 0);
        assert!(Arc::ptr_eq(&snap, &store.snapshot()));
    }

    #[test]
    fn test_unknown_id_noops() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        store.add("b");
        let before = store.tasks().to_vec();
        let ghost = TaskId::new(999);

        store.set_checked(ghost, true);
        store.set_removed(ghost, true);
        store.edit(ghost, "boo");

        assert_eq!(store.tasks(), before.as_slice());
        assert!(store.get(a).is_some());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        store.set_removed(a, true);
        store.purge_removed();
        let b = store.add("b").unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_mutation() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        let snap = store.snapshot();

        store.set_checked(a, true);
        store.add("b");

        assert_eq!(snap.len(), 1);
        assert!(!snap[0].checked);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_filter_state_and_counts() {
        let mut store = TaskStore::with_filter(Filter::Unchecked);
        assert_eq!(store.filter(), Filter::Unchecked);
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.add("c");
        store.set_checked(a, true);
        store.set_removed(b, true);

        let counts = store.counts();
        assert_eq!(counts, FilterCounts { all: 2, checked: 1, unchecked: 1, removed: 1 });
        for filter in Filter::ALL {
            assert_eq!(counts.get(filter), store.visible_for(filter).len());
        }

        assert_eq!(texts(&store.visible_tasks()), ["c"]);
        store.set_filter(Filter::Removed);
        assert_eq!(texts(&store.visible_tasks()), ["b"]);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut store = TaskStore::new();
        let milk = store.add("buy milk").unwrap();
        let dog = store.add("walk dog").unwrap();
        assert_eq!(all_texts(&store), ["walk dog", "buy milk"]);

        store.set_checked(milk, true);
        store.set_filter(Filter::Unchecked);
        assert_eq!(texts(&store.visible_tasks()), ["walk dog"]);
        store.set_filter(Filter::Checked);
        assert_eq!(texts(&store.visible_tasks()), ["buy milk"]);

        store.set_removed(dog, true);
        store.set_filter(Filter::All);
        assert_eq!(texts(&store.visible_tasks()), ["buy milk"]);

        store.purge_removed();
        store.set_filter(Filter::Removed);
        assert!(store.visible_tasks().is_empty());
    }
}
