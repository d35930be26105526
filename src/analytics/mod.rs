/// Analytics aggregation engine
///
/// Turns the raw per-day record collections into the weekly report: scalar
/// stats, ranked textual insights, per-habit streak counters and two chart
/// series. The engine is a pure read-side transform: it receives "today" and
/// the record snapshot as explicit inputs, holds no state, performs no I/O
/// and never fails - empty inputs simply produce a zeroed report.

mod charts;
mod insights;
mod stats;
mod window;

pub use window::ReportingWindow;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FocusSession, Habit, HabitLog, MoodEntry};

/// Six scalar statistics over the reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub total_habits_completed: u32,
    pub total_focus_minutes: u32,
    /// Mean mood level, one decimal, 0 with no mood entries
    pub average_mood: f64,
    /// Mean energy level, one decimal, 0 with no mood entries
    pub average_energy: f64,
    /// Mean sleep hours, one decimal, 0 with no mood entries
    pub average_sleep: f64,
    /// Completions / (habits x 7) as a percentage; unclamped, 0 with no habits
    pub habit_completion_rate: f64,
}

/// Direction attached to an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// A single derived, human-readable observation with a computed magnitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightItem {
    #[serde(rename = "type")]
    pub insight_type: String,
    pub title: String,
    pub description: String,
    pub value: String,
    pub trend: Trend,
}

/// One point of the sparse mood/energy chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood: u8,
    pub energy: u8,
}

/// One point of the dense focus chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub date: NaiveDate,
    pub minutes: u32,
}

/// The assembled weekly analytics report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub weekly_stats: WeeklyStats,
    pub insights: Vec<InsightItem>,
    pub habit_streaks: BTreeMap<String, u32>,
    pub mood_chart_data: Vec<MoodPoint>,
    pub focus_chart_data: Vec<FocusPoint>,
}

/// Build the weekly report from a record snapshot
///
/// The window covers `today - 7` through `today` inclusive (8 dates). The
/// collections may contain out-of-window records; they are filtered here.
/// Calling this twice on the same snapshot yields identical output.
pub fn generate_report(
    today: NaiveDate,
    habits: &[Habit],
    logs: &[HabitLog],
    moods: &[MoodEntry],
    sessions: &[FocusSession],
) -> AnalyticsReport {
    let window = ReportingWindow::ending_at(today);

    let logs = window.filter(logs, |l| l.date);
    let moods = window.filter(moods, |m| m.date);
    let sessions = window.filter(sessions, |s| s.date);

    AnalyticsReport {
        weekly_stats: stats::weekly_stats(habits, &logs, &moods, &sessions),
        insights: insights::generate_insights(habits, &logs, &moods, &sessions),
        habit_streaks: charts::habit_streaks(habits, &logs),
        mood_chart_data: charts::mood_chart(&moods),
        focus_chart_data: charts::focus_chart(&window, &sessions),
    }
}
