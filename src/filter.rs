//! Filter and Sort
//!
//! Pure derivation of the displayed task list from the full collection and
//! three independent selections: month, day and completion.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::{MonthKey, Task};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompletionFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl CompletionFilter {
    pub const ALL: [CompletionFilter; 3] = [
        CompletionFilter::All,
        CompletionFilter::Completed,
        CompletionFilter::Incomplete,
    ];

    /// Value used in the `<select>`
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionFilter::All => "all",
            CompletionFilter::Completed => "completed",
            CompletionFilter::Incomplete => "incomplete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompletionFilter::All => "All",
            CompletionFilter::Completed => "Completed",
            CompletionFilter::Incomplete => "Incomplete",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Completed => task.completed,
            CompletionFilter::Incomplete => !task.completed,
        }
    }
}

impl fmt::Display for CompletionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CompletionFilter::All),
            "completed" => Ok(CompletionFilter::Completed),
            "incomplete" => Ok(CompletionFilter::Incomplete),
            other => Err(format!("Unknown completion filter: {}", other)),
        }
    }
}

/// Current filter selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    month: Option<MonthKey>,
    day: Option<NaiveDate>,
    completion: CompletionFilter,
}

impl TaskFilters {
    pub fn month(&self) -> Option<MonthKey> {
        self.month
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    pub fn completion(&self) -> CompletionFilter {
        self.completion
    }

    /// Selecting (or clearing) a month always clears the day
    pub fn select_month(&mut self, month: Option<MonthKey>) {
        self.month = month;
        self.day = None;
    }

    /// Returns false when the day was ignored: no month is selected, or the
    /// day lies outside it.
    pub fn select_day(&mut self, day: Option<NaiveDate>) -> bool {
        match (self.month, day) {
            (_, None) => {
                self.day = None;
                true
            }
            (Some(month), Some(day)) if month.contains(day) => {
                self.day = Some(day);
                true
            }
            _ => false,
        }
    }

    pub fn day_enabled(&self) -> bool {
        self.month.is_some()
    }

    pub fn set_completion(&mut self, completion: CompletionFilter) {
        self.completion = completion;
    }

    pub fn is_active(&self) -> bool {
        self.month.is_some() || self.completion != CompletionFilter::All
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(month) = self.month {
            if !task.date.is_some_and(|d| month.contains(d)) {
                return false;
            }
            if let Some(day) = self.day {
                if task.date != Some(day) {
                    return false;
                }
            }
        }
        self.completion.matches(task)
    }

    /// Sorted by priority, then filtered
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        sort_by_priority(tasks)
            .into_iter()
            .filter(|task| self.matches(task))
            .collect()
    }
}

/// Ascending priority; ties keep their original relative order
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.priority);
    sorted
}

/// Distinct months across all dated tasks, oldest first
pub fn month_options(tasks: &[Task]) -> Vec<MonthKey> {
    tasks
        .iter()
        .filter_map(Task::month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOption {
    pub date: NaiveDate,
    /// Day of month, zero-padded
    pub label: String,
}

/// Distinct dates within `month`, in calendar order
pub fn day_options(tasks: &[Task], month: MonthKey) -> Vec<DayOption> {
    tasks
        .iter()
        .filter_map(|task| task.date)
        .filter(|date| month.contains(*date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|date| DayOption {
            date,
            label: date.format("%d").to_string(),
        })
        .collect()
}

/// Which completion options have at least one match in the full collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionAvailability {
    pub completed: bool,
    pub incomplete: bool,
}

impl CompletionAvailability {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            completed: tasks.iter().any(|t| t.completed),
            incomplete: tasks.iter().any(|t| !t.completed),
        }
    }

    pub fn allows(&self, filter: CompletionFilter) -> bool {
        match filter {
            CompletionFilter::All => true,
            CompletionFilter::Completed => self.completed,
            CompletionFilter::Incomplete => self.incomplete,
        }
    }
}
