/// Per-habit streak counters and the two chart series
///
/// The mood series is sparse (one point per entry actually present); the
/// focus series is dense (one point per window date, zeros included).

use std::collections::BTreeMap;

use crate::analytics::window::ReportingWindow;
use crate::analytics::{FocusPoint, MoodPoint};
use crate::domain::{FocusSession, Habit, HabitLog, MoodEntry};

/// Count completed in-window logs per habit, keyed by habit name
///
/// Every habit gets an entry, zero counts included. This is the same counter
/// the habit_streak insight uses - a plain count, not a consecutive-day run.
pub fn habit_streaks(habits: &[Habit], logs: &[&HabitLog]) -> BTreeMap<String, u32> {
    habits
        .iter()
        .map(|habit| {
            let count = logs
                .iter()
                .filter(|l| l.habit_id == habit.id && l.completed)
                .count() as u32;
            (habit.name.clone(), count)
        })
        .collect()
}

/// Sparse mood/energy series, one point per in-window entry, date ascending
pub fn mood_chart(moods: &[&MoodEntry]) -> Vec<MoodPoint> {
    let mut sorted: Vec<&MoodEntry> = moods.to_vec();
    sorted.sort_by_key(|m| m.date);

    sorted
        .into_iter()
        .map(|m| MoodPoint {
            date: m.date,
            mood: m.mood_level,
            energy: m.energy_level,
        })
        .collect()
}

/// Dense focus series, one point per window date (always 8 points)
pub fn focus_chart(window: &ReportingWindow, sessions: &[&FocusSession]) -> Vec<FocusPoint> {
    window
        .dates()
        .into_iter()
        .map(|date| FocusPoint {
            date,
            minutes: sessions
                .iter()
                .filter(|s| s.date == date)
                .map(|s| s.duration_minutes)
                .sum(),
        })
        .collect()
}
