//! Aggregation of a flat todo list into per-day groups.

use crate::model::{DateOrder, Todo, TodoGroup};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Bucket todos by calendar due date and order the buckets.
///
/// Within a group, todos keep the relative order they arrived in (the
/// store's ordering); only the sequence of groups follows `order`. Pure
/// function, no side effects.
#[must_use]
pub fn group_by_due_date(todos: Vec<Todo>, order: DateOrder) -> Vec<TodoGroup> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Todo>> = BTreeMap::new();
    for todo in todos {
        buckets.entry(todo.due_date).or_default().push(todo);
    }

    let mut groups: Vec<TodoGroup> =
        buckets.into_iter().map(|(date, todos)| TodoGroup { date, todos }).collect();

    if order == DateOrder::Desc {
        groups.reverse();
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn todo(id: i64, task: &str, due_date: &str) -> Todo {
        Todo {
            id,
            task: task.to_string(),
            priority: 0,
            due_date: NaiveDate::parse_from_str(due_date, "%Y-%m-%d").unwrap(),
            completed: false,
        }
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        assert!(group_by_due_date(Vec::new(), DateOrder::Desc).is_empty());
    }

    #[test]
    fn test_single_todo_single_group() {
        let groups = group_by_due_date(vec![todo(1, "buy milk", "2024-06-01")], DateOrder::Desc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(groups[0].todos.len(), 1);
        assert_eq!(groups[0].todos[0].task, "buy milk");
    }

    #[test]
    fn test_two_days_two_groups_desc() {
        let todos = vec![todo(1, "a", "2024-06-01"), todo(2, "b", "2024-06-02")];
        let groups = group_by_due_date(todos, DateOrder::Desc);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(groups[1].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_two_days_two_groups_asc() {
        let todos = vec![todo(1, "a", "2024-06-02"), todo(2, "b", "2024-06-01")];
        let groups = group_by_due_date(todos, DateOrder::Asc);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(groups[1].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn test_within_group_order_is_preserved() {
        let todos = vec![
            todo(3, "first in store order", "2024-06-01"),
            todo(1, "second", "2024-06-01"),
            todo(2, "third", "2024-06-01"),
        ];
        let groups = group_by_due_date(todos, DateOrder::Asc);
        assert_eq!(groups.len(), 1);
        let ids: Vec<i64> = groups[0].todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    fn arb_todo() -> impl Strategy<Value = Todo> {
        // Dates across a few months so collisions and distinct days both occur
        (1i64..10_000, "[a-z]{1,12}", 0i64..10, 0u32..120, any::<bool>()).prop_map(
            |(id, task, priority, day_offset, completed)| Todo {
                id,
                task,
                priority,
                due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(u64::from(day_offset)),
                completed,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_grouping_partitions_input(todos in proptest::collection::vec(arb_todo(), 0..50)) {
            let groups = group_by_due_date(todos.clone(), DateOrder::Desc);

            // Every todo lands in exactly one group, keyed by its due date
            let total: usize = groups.iter().map(|g| g.todos.len()).sum();
            prop_assert_eq!(total, todos.len());
            for group in &groups {
                for todo in &group.todos {
                    prop_assert_eq!(todo.due_date, group.date);
                }
            }

            // No duplication or loss: the multiset of ids is unchanged
            let mut input_ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
            let mut output_ids: Vec<i64> =
                groups.iter().flat_map(|g| g.todos.iter().map(|t| t.id)).collect();
            input_ids.sort_unstable();
            output_ids.sort_unstable();
            prop_assert_eq!(input_ids, output_ids);
        }

        #[test]
        fn prop_groups_are_distinct_and_ordered(todos in proptest::collection::vec(arb_todo(), 0..50)) {
            let groups = group_by_due_date(todos, DateOrder::Desc);
            for pair in groups.windows(2) {
                prop_assert!(pair[0].date > pair[1].date);
            }
        }
    }
}
