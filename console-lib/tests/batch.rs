//! Integration tests for the sequential batch executor.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use console_lib::batch::{BatchExecutor, BatchHooks, BatchJob, BatchState};
use console_lib::grid::Column;
use console_lib::model::User;
use console_lib::notify::{Notification, Severity};
use console_lib::{BatchError, BatchOutcome, Grid};

/// Records every hook call in order.
#[derive(Default)]
struct RecordingHooks {
    events: Vec<String>,
    notifications: Vec<Notification>,
}

#[async_trait]
impl BatchHooks for RecordingHooks {
    fn clear_selection(&mut self) {
        self.events.push("clear".into());
    }

    async fn reload(&mut self) {
        self.events.push("reload".into());
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push("notify".into());
        self.notifications.push(notification);
    }
}

#[tokio::test]
async fn test_failure_is_isolated() {
    let executor = BatchExecutor::new();
    let mut hooks = RecordingHooks::default();
    let attempted = Rc::new(RefCell::new(Vec::new()));

    let seen = Rc::clone(&attempted);
    let outcome = executor
        .run(
            BatchJob::new("Delete users", vec![1, 2, 3, 4]),
            move |id: u64| {
                let seen = Rc::clone(&seen);
                async move {
                    seen.borrow_mut().push(id);
                    if id == 3 {
                        Err("boom".to_string())
                    } else {
                        Ok(())
                    }
                }
            },
            &mut hooks,
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        BatchOutcome {
            success_count: 3,
            fail_count: 1
        }
    );
    assert_eq!(*attempted.borrow(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_clean_batch_reloads_once_after_all_items() {
    let executor = BatchExecutor::new();
    let mut hooks = RecordingHooks::default();
    let log = Rc::new(RefCell::new(Vec::new()));

    let items = Rc::clone(&log);
    let outcome = executor
        .run(
            BatchJob::new("Remind users", vec![5, 6, 7]),
            move |id: u64| {
                let items = Rc::clone(&items);
                async move {
                    items.borrow_mut().push(format!("item {id}"));
                    Ok::<(), String>(())
                }
            },
            &mut hooks,
        )
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 3);
    assert_eq!(outcome.fail_count, 0);
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(hooks.events, vec!["clear", "reload", "notify"]);
    assert_eq!(hooks.notifications[0].severity, Severity::Success);
}

#[tokio::test]
async fn test_partial_failure_warns_with_counts() {
    let executor = BatchExecutor::new();
    let mut hooks = RecordingHooks::default();

    let outcome = executor
        .run(
            BatchJob::new("Delete users", vec![10, 11, 12]),
            |id: u64| async move {
                if id == 11 {
                    Err("not found")
                } else {
                    Ok(())
                }
            },
            &mut hooks,
        )
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.fail_count, 1);
    assert_eq!(hooks.events.iter().filter(|e| *e == "reload").count(), 1);

    let notification = &hooks.notifications[0];
    assert_eq!(notification.severity, Severity::Warning);
    assert!(notification.message.contains('2'));
    assert!(notification.message.contains('1'));
}

#[tokio::test]
async fn test_empty_job_still_completes() {
    let executor = BatchExecutor::new();
    let mut hooks = RecordingHooks::default();
    let outcome = executor
        .run(
            BatchJob::<u64>::new("Delete users", vec![]),
            |_id| async { Ok::<(), String>(()) },
            &mut hooks,
        )
        .await
        .unwrap();
    assert_eq!(outcome.total(), 0);
    assert_eq!(hooks.events, vec!["clear", "reload", "notify"]);
}

#[tokio::test]
async fn test_second_batch_is_rejected_while_running() {
    let executor = BatchExecutor::new();
    let mut hooks = RecordingHooks::default();
    let inner = executor.clone();

    let outcome = executor
        .run(
            BatchJob::new("Outer", vec![1]),
            move |_id: u64| {
                let inner = inner.clone();
                async move {
                    assert_eq!(inner.state(), BatchState::Running);
                    let mut nested_hooks = RecordingHooks::default();
                    let nested = inner
                        .run(
                            BatchJob::new("Inner", vec![2]),
                            |_id: u64| async { Ok::<(), String>(()) },
                            &mut nested_hooks,
                        )
                        .await;
                    assert_eq!(nested, Err(BatchError::Busy));
                    assert!(nested_hooks.events.is_empty());
                    Ok::<(), String>(())
                }
            },
            &mut hooks,
        )
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 1);
    assert_eq!(executor.state(), BatchState::Idle);
}

/// Hooks wired to a real grid, the way a screen uses them.
struct GridHooks<'a> {
    grid: &'a mut Grid<User>,
    fresh: Vec<User>,
    reloads: usize,
}

#[async_trait]
impl<'a> BatchHooks for GridHooks<'a> {
    fn clear_selection(&mut self) {
        self.grid.clear_selection();
    }

    async fn reload(&mut self) {
        self.reloads += 1;
        self.grid.set_rows(self.fresh.clone());
    }

    fn notify(&mut self, _notification: Notification) {}
}

#[tokio::test]
async fn test_batch_over_grid_selection() {
    let users: Vec<User> = (1..=5)
        .map(|id| User::new(id, format!("U{id}"), "Test", format!("u{id}@example.com")))
        .collect();
    let mut grid = Grid::new(vec![Column::new("name", "Name").sortable()]).with_rows(users.clone());
    grid.toggle(&2);
    grid.toggle(&4);

    let job = BatchJob::new("Delete users", grid.selected_ids());
    let survivors: Vec<User> = users.into_iter().filter(|u| u.id != 2 && u.id != 4).collect();
    let mut hooks = GridHooks {
        grid: &mut grid,
        fresh: survivors,
        reloads: 0,
    };

    let outcome = BatchExecutor::new()
        .run(job, |_id: u64| async { Ok::<(), String>(()) }, &mut hooks)
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert_eq!(hooks.reloads, 1);
    assert!(grid.selected_ids().is_empty());
    assert_eq!(grid.rows().len(), 3);
}

/// Writes hook calls into a log the operation writes to as well.
struct SharedLogHooks {
    log: Arc<Mutex<Vec<String>>>,
}

impl SharedLogHooks {
    fn push(&self, event: impl Into<String>) {
        self.log.lock().unwrap().push(event.into());
    }
}

#[async_trait]
impl BatchHooks for SharedLogHooks {
    fn clear_selection(&mut self) {
        self.push("clear");
    }

    async fn reload(&mut self) {
        self.push("reload");
        tokio::task::yield_now().await;
    }

    fn notify(&mut self, notification: Notification) {
        self.push(format!("notify {:?}", notification.severity));
    }
}

#[tokio::test]
async fn test_items_never_overlap_and_hooks_run_last() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut hooks = SharedLogHooks { log: Arc::clone(&log) };

    let items = Arc::clone(&log);
    let outcome = BatchExecutor::new()
        .run(
            BatchJob::new("Delete users", vec![1u64, 2, 3]),
            move |id: u64| {
                let items = Arc::clone(&items);
                async move {
                    items.lock().unwrap().push(format!("start {id}"));
                    tokio::task::yield_now().await;
                    items.lock().unwrap().push(format!("end {id}"));
                    if id == 2 { Err("boom") } else { Ok(()) }
                }
            },
            &mut hooks,
        )
        .await
        .unwrap();

    assert_eq!(outcome.fail_count, 1);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "start 1", "end 1", "start 2", "end 2", "start 3", "end 3", "clear", "reload",
            "notify Warning",
        ]
    );
}
