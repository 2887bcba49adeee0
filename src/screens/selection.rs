//! Multi-select list with a bulk action.
//!
//! Shared by every screen that offers several candidates at once. The action
//! runs over the checked items one at a time, in list order.

use std::future::Future;

use crate::errors::AppError;

/// Failures listed in a report summary before the rest are collapsed.
pub const MAX_LISTED_FAILURES: usize = 5;

/// A list of items with a check mark each.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    items: Vec<T>,
    checked: Vec<bool>,
}

impl<T> Selection<T> {
    pub fn new(items: Vec<T>) -> Self {
        let checked = vec![false; items.len()];
        Self { items, checked }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn select_all(&mut self) {
        self.checked.iter_mut().for_each(|c| *c = true);
    }

    pub fn clear(&mut self) {
        self.checked.iter_mut().for_each(|c| *c = false);
    }

    pub fn selected(&self) -> Vec<&T> {
        self.items
            .iter()
            .zip(&self.checked)
            .filter_map(|(item, checked)| checked.then_some(item))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    /// Apply a typed choice: `all`, or 1-based numbers separated by commas or spaces.
    ///
    /// Replaces the current choice. Blank input clears it and returns 0.
    pub fn apply_input(&mut self, input: &str) -> Result<usize, AppError> {
        let input = input.trim();
        if input.is_empty() {
            self.clear();
            return Ok(0);
        }

        if input.eq_ignore_ascii_case("all") || input == "*" {
            self.select_all();
            return Ok(self.len());
        }

        let mut picked = vec![false; self.len()];
        for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let number: usize = token
                .parse()
                .map_err(|_| AppError::Validation(format!("Not an item number: {}", token)))?;
            if number == 0 || number > self.len() {
                return Err(AppError::Validation(format!(
                    "Choose numbers between 1 and {}",
                    self.len()
                )));
            }
            picked[number - 1] = true;
        }

        self.checked = picked;
        Ok(self.selected_count())
    }
}

impl<T: Clone> Selection<T> {
    /// Run `action` over every checked item sequentially and collect the outcome.
    ///
    /// An `Unauthorized` failure ends the run at once and is returned as the
    /// error; the remaining items are not attempted.
    pub async fn run_bulk<L, F, Fut>(
        &self,
        label: L,
        mut action: F,
    ) -> Result<BulkReport, AppError>
    where
        L: Fn(&T) -> String,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let mut report = BulkReport::default();

        for item in self.selected() {
            report.total += 1;
            let name = label(item);
            match action(item.clone()).await {
                Ok(()) => report.succeeded.push(name),
                Err(e @ AppError::Unauthorized(_)) => {
                    tracing::warn!(
                        "Bulk action stopped at {} after {} of {} items: {}",
                        name,
                        report.total,
                        self.selected_count(),
                        e
                    );
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Bulk action failed for {}: {}", name, e);
                    report.failed.push(BulkFailure {
                        label: name,
                        message: e.message(),
                    });
                }
            }
        }

        Ok(report)
    }
}

/// One failed item in a bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    pub label: String,
    pub message: String,
}

/// Aggregated outcome of a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub total: usize,
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl BulkReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Human summary; lists at most `MAX_LISTED_FAILURES` failures.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} succeeded, {} failed (of {})",
            self.succeeded.len(),
            self.failed.len(),
            self.total
        );

        for failure in self.failed.iter().take(MAX_LISTED_FAILURES) {
            text.push_str(&format!("\n- {}: {}", failure.label, failure.message));
        }

        if self.failed.len() > MAX_LISTED_FAILURES {
            text.push_str(&format!(
                "\n...and {} more",
                self.failed.len() - MAX_LISTED_FAILURES
            ));
        }

        text
    }
}
