//! Month grid over the task list.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Sunday-first weeks.
const DAYS_PER_WEEK: usize = 7;

/// A displayed month. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// `false` for the leading and trailing days of adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub task_count: usize,
}

impl CalendarMonth {
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    /// First day of the month. Falls back to January for an out-of-range
    /// month so a hand-edited value cannot panic the grid.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        let next = self.next().first_day();
        (next - first).num_days() as u32
    }

    /// "March 2024".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Whole weeks covering the month, Sunday first.
    pub fn grid(&self, tasks: &[Task], today: NaiveDate, selected: Option<NaiveDate>) -> Vec<CalendarCell> {
        let first = self.first_day();
        let leading = first.weekday().num_days_from_sunday() as i64;
        let start = first - Duration::days(leading);
        let shown = leading as usize + self.days_in_month() as usize;
        let cells = shown.div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

        (0..cells as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                CalendarCell {
                    date,
                    in_month: date.month() == first.month() && date.year() == first.year(),
                    is_today: date == today,
                    is_selected: selected == Some(date),
                    task_count: tasks.iter().filter(|t| t.date == date).count(),
                }
            })
            .collect()
    }
}

/// Tasks scheduled on `day`, in list order.
pub fn tasks_on(tasks: &[Task], day: NaiveDate) -> Vec<Task> {
    tasks.iter().filter(|t| t.date == day).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_on(day: NaiveDate) -> Task {
        Task {
            id: day.to_string(),
            title: "t".into(),
            category: "work".into(),
            priority: Priority::Low,
            date: day,
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn navigation_wraps_years() {
        let dec = CalendarMonth { year: 2023, month: 12 };
        assert_eq!(dec.next(), CalendarMonth { year: 2024, month: 1 });
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(CalendarMonth { year: 2024, month: 1 }.prev(), dec);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(CalendarMonth { year: 2024, month: 2 }.days_in_month(), 29);
        assert_eq!(CalendarMonth { year: 2023, month: 2 }.days_in_month(), 28);
        assert_eq!(CalendarMonth { year: 2024, month: 12 }.days_in_month(), 31);
    }

    #[test]
    fn grid_starts_on_sunday_and_fills_weeks() {
        // March 2024 starts on a Friday.
        let march = CalendarMonth { year: 2024, month: 3 };
        let grid = march.grid(&[], date(2024, 3, 15), None);
        assert_eq!(grid.len() % 7, 0);
        assert_eq!(grid[0].date, date(2024, 2, 25));
        assert!(!grid[0].in_month);
        assert_eq!(grid[5].date, date(2024, 3, 1));
        assert!(grid[5].in_month);
        assert_eq!(grid.iter().filter(|c| c.in_month).count(), 31);
        assert_eq!(grid.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn grid_counts_tasks_and_marks_selection() {
        let tasks = vec![
            task_on(date(2024, 3, 4)),
            task_on(date(2024, 3, 4)),
            task_on(date(2024, 4, 1)),
        ];
        let grid = CalendarMonth { year: 2024, month: 3 }.grid(&tasks, date(2024, 3, 1), Some(date(2024, 3, 4)));
        let cell = grid.iter().find(|c| c.date == date(2024, 3, 4)).unwrap();
        assert_eq!(cell.task_count, 2);
        assert!(cell.is_selected);
        assert_eq!(tasks_on(&tasks, date(2024, 4, 1)).len(), 1);
    }

    #[test]
    fn label() {
        assert_eq!(CalendarMonth { year: 2024, month: 3 }.label(), "March 2024");
    }
}
