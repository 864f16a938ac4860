use crate::model::task::{Status, Task};

/// Picks the next task to act on: the earliest due date among tasks that are
/// not completed, ties broken by the more urgent priority level. Remaining
/// ties fall back to iteration order, which the store keeps deterministic.
///
/// This is the authoritative rule; the insertion-time priority score plays
/// no part in it.
pub fn next_task<'a, I>(tasks: I) -> Option<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.status != Status::Completed)
        .min_by_key(|task| (task.due_at, task.priority))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, TaskId};
    use crate::store::TaskStore;
    use crate::time::ZONE;
    use chrono::{DateTime, TimeZone};
    use chrono_tz::Tz;

    fn at(mo: u32, d: u32, h: u32) -> DateTime<Tz> {
        ZONE.with_ymd_and_hms(2025, mo, d, h, 0, 0).unwrap()
    }

    fn task(id: &str, priority: Priority, due_at: DateTime<Tz>) -> Task {
        Task::new(
            id.parse().unwrap(),
            format!("task {}", id),
            priority,
            String::new(),
            due_at,
        )
    }

    fn store_of(tasks: Vec<Task>) -> TaskStore {
        let now = at(1, 1, 0);
        let mut store = TaskStore::new();
        for task in tasks {
            store.add(task, now).unwrap();
        }
        store
    }

    fn id(raw: &str) -> TaskId {
        raw.parse().unwrap()
    }

    #[test]
    fn test_earliest_due_wins_regardless_of_priority() {
        let store = store_of(vec![
            task("T001", Priority::Medium, at(1, 1, 10)),
            task("T002", Priority::High, at(1, 2, 10)),
        ]);
        assert_eq!(next_task(store.iter()).unwrap().id, id("T001"));
    }

    #[test]
    fn test_equal_due_broken_by_priority_level() {
        let store = store_of(vec![
            task("T001", Priority::Medium, at(1, 1, 10)),
            task("T002", Priority::High, at(1, 1, 10)),
        ]);
        assert_eq!(next_task(store.iter()).unwrap().id, id("T002"));
    }

    #[test]
    fn test_completed_tasks_are_ineligible() {
        let mut store = store_of(vec![
            task("T001", Priority::High, at(1, 1, 10)),
            task("T002", Priority::Low, at(1, 3, 10)),
        ]);
        store
            .update_status(&id("T001"), Status::Completed)
            .unwrap();
        assert_eq!(next_task(store.iter()).unwrap().id, id("T002"));
    }

    #[test]
    fn test_unknown_status_stays_eligible() {
        let mut store = store_of(vec![task("T001", Priority::High, at(1, 1, 10))]);
        store
            .update_status(&id("T001"), Status::from("blocked on review"))
            .unwrap();
        assert_eq!(next_task(store.iter()).unwrap().id, id("T001"));
    }

    #[test]
    fn test_empty_store_recommends_nothing() {
        let store = TaskStore::new();
        assert!(next_task(store.iter()).is_none());
    }

    #[test]
    fn test_all_completed_recommends_nothing() {
        let mut store = store_of(vec![
            task("T001", Priority::High, at(1, 1, 10)),
            task("T002", Priority::Low, at(1, 2, 10)),
        ]);
        store.update_status(&id("T001"), Status::Completed).unwrap();
        store.update_status(&id("T002"), Status::Completed).unwrap();
        assert!(next_task(store.iter()).is_none());
    }

    #[test]
    fn test_full_tie_falls_back_to_insertion_order() {
        let store = store_of(vec![
            task("T005", Priority::High, at(1, 1, 10)),
            task("T002", Priority::High, at(1, 1, 10)),
        ]);
        assert_eq!(next_task(store.iter()).unwrap().id, id("T005"));
    }
}
