/// Weekly scalar statistics over the in-window record collections
///
/// All averages fall back to 0 when their denominator would be zero; the
/// report never surfaces NaN or an error for missing data.

use crate::analytics::WeeklyStats;
use crate::domain::{FocusSession, Habit, HabitLog, MoodEntry};

/// Round to one decimal place, half away from zero
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce the filtered records to the six weekly statistics
///
/// `habits` is the full habit list (targets for the completion-rate
/// denominator); the other collections are already window-filtered.
pub fn weekly_stats(
    habits: &[Habit],
    logs: &[&HabitLog],
    moods: &[&MoodEntry],
    sessions: &[&FocusSession],
) -> WeeklyStats {
    let total_habits_completed = logs.iter().filter(|l| l.completed).count() as u32;

    // Completed or not, every session's minutes count toward the total
    let total_focus_minutes: u32 = sessions.iter().map(|s| s.duration_minutes).sum();

    let (average_mood, average_energy, average_sleep) = if moods.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let n = moods.len() as f64;
        (
            moods.iter().map(|m| m.mood_level as f64).sum::<f64>() / n,
            moods.iter().map(|m| m.energy_level as f64).sum::<f64>() / n,
            moods.iter().map(|m| m.sleep_hours).sum::<f64>() / n,
        )
    };

    // Fixed 7-day normalization, independent of the 8-day window length.
    // Not clamped: logging more than habits x 7 completions exceeds 100%.
    let expected_completions = habits.len() as f64 * 7.0;
    let habit_completion_rate = if expected_completions > 0.0 {
        total_habits_completed as f64 / expected_completions * 100.0
    } else {
        0.0
    };

    WeeklyStats {
        total_habits_completed,
        total_focus_minutes,
        average_mood: round1(average_mood),
        average_energy: round1(average_energy),
        average_sleep: round1(average_sleep),
        habit_completion_rate: round1(habit_completion_rate),
    }
}
