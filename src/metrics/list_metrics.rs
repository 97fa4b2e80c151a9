//! List metrics tracking using OpenTelemetry.

use opentelemetry::metrics::{Counter, Gauge, Meter};

/// Metrics collector for list operations.
///
/// Cloning is cheap; clones record into the same instruments, so one
/// collector can be shared by several lists.
#[derive(Clone)]
pub struct ListMetrics {
    append_calls: Counter<u64>,
    items_appended: Counter<u64>,
    notifications: Counter<u64>,
    observer_failures: Counter<u64>,
    active_observers: Gauge<i64>,
}

impl ListMetrics {
    /// Create a new metrics collector with the provided meter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use notifying_list::metrics::ListMetrics;
    /// use opentelemetry::global;
    ///
    /// let metrics = ListMetrics::new(global::meter("notifying-list"));
    /// ```
    pub fn new(meter: Meter) -> Self {
        let append_calls = meter
            .u64_counter("notifying_list.append.calls")
            .with_description("Number of append calls, single or batch")
            .build();

        let items_appended = meter
            .u64_counter("notifying_list.append.items")
            .with_description("Total number of items appended")
            .build();

        let notifications = meter
            .u64_counter("notifying_list.notifications")
            .with_description("Number of observer invocations that completed")
            .build();

        let observer_failures = meter
            .u64_counter("notifying_list.observer.failures")
            .with_description("Number of notification rounds aborted by an observer error")
            .build();

        let active_observers = meter
            .i64_gauge("notifying_list.observers.active")
            .with_description("Number of registered observers")
            .build();

        Self {
            append_calls,
            items_appended,
            notifications,
            observer_failures,
            active_observers,
        }
    }

    /// Record one append call that added `count` items.
    pub fn record_append(&self, count: usize) {
        self.append_calls.add(1, &[]);
        self.items_appended.add(count as u64, &[]);
    }

    /// Record a completed notification round that reached `observers` observers.
    pub fn record_notification(&self, observers: usize) {
        self.notifications.add(observers as u64, &[]);
    }

    /// Record a notification round cut short by an observer error.
    pub fn record_observer_failure(&self) {
        self.observer_failures.add(1, &[]);
    }

    /// Update the number of registered observers.
    pub fn update_observer_count(&self, count: usize) {
        self.active_observers.record(count as i64, &[]);
    }
}

impl std::fmt::Debug for ListMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListMetrics").finish_non_exhaustive()
    }
}
