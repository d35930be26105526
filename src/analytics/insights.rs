/// Heuristic insight rules over the in-window records
///
/// Four independent rules, each emitting at most one insight. The emission
/// order is fixed: sleep_focus, habit_streak, mood_trend, focus_productivity.
/// These are deliberately simple, explainable heuristics - no significance
/// testing, no forecasting.

use crate::analytics::stats::round1;
use crate::analytics::{InsightItem, Trend};
use crate::domain::{FocusSession, Habit, HabitLog, MoodEntry};

/// Sleep bucket boundary: under 6 hours counts as a short night
const SHORT_SLEEP_HOURS: f64 = 6.0;
/// Mood-trend rule fires when the recent average reaches this level
const GOOD_MOOD_THRESHOLD: f64 = 4.0;

/// Run all insight rules in order and collect the emitted items
pub fn generate_insights(
    habits: &[Habit],
    logs: &[&HabitLog],
    moods: &[&MoodEntry],
    sessions: &[&FocusSession],
) -> Vec<InsightItem> {
    let mut insights = Vec::new();

    if let Some(insight) = sleep_focus(moods, sessions) {
        insights.push(insight);
    }
    if let Some(insight) = habit_streak(habits, logs) {
        insights.push(insight);
    }
    if let Some(insight) = mood_trend(moods) {
        insights.push(insight);
    }
    if let Some(insight) = focus_productivity(sessions) {
        insights.push(insight);
    }

    insights
}

/// Bucketed sleep/focus correlation
///
/// For each mood entry, collect the focus minutes recorded on the same date
/// (entries with no same-date focus data are skipped) and bucket them by
/// short vs. sufficient sleep. Only the "less sleep, less focus" direction is
/// surfaced: when the short-sleep average is at or above the other bucket's,
/// nothing is emitted even though both buckets exist.
fn sleep_focus(moods: &[&MoodEntry], sessions: &[&FocusSession]) -> Option<InsightItem> {
    let mut low_minutes: Vec<u32> = Vec::new();
    let mut high_minutes: Vec<u32> = Vec::new();

    for mood in moods {
        let day_focus = sessions
            .iter()
            .filter(|s| s.date == mood.date)
            .map(|s| s.duration_minutes);

        let bucket = if mood.sleep_hours < SHORT_SLEEP_HOURS {
            &mut low_minutes
        } else {
            &mut high_minutes
        };
        bucket.extend(day_focus);
    }

    if low_minutes.is_empty() || high_minutes.is_empty() {
        return None;
    }

    let avg_low = mean(&low_minutes);
    let avg_high = mean(&high_minutes);

    if avg_low >= avg_high {
        return None;
    }

    let diff_pct = if avg_high > 0.0 {
        (avg_high - avg_low).abs() / avg_high * 100.0
    } else {
        0.0
    };
    let diff_pct = diff_pct.round() as u32;

    Some(InsightItem {
        insight_type: "sleep_focus".to_string(),
        title: "Sleep Affects Focus".to_string(),
        description: format!(
            "On days you sleep < 6 hours, your focus drops by {}%",
            diff_pct
        ),
        value: format!("{}%", diff_pct),
        trend: Trend::Down,
    })
}

/// Best habit streak
///
/// "Streak" here is the count of completed in-window logs per habit, not a
/// consecutive-day run. The habit with the strictly largest count wins (first
/// habit in input order on ties); nothing is emitted when every count is zero.
fn habit_streak(habits: &[Habit], logs: &[&HabitLog]) -> Option<InsightItem> {
    let mut best: Option<(&str, u32)> = None;

    for habit in habits {
        let count = logs
            .iter()
            .filter(|l| l.habit_id == habit.id && l.completed)
            .count() as u32;

        if count > best.map_or(0, |(_, c)| c) {
            best = Some((habit.name.as_str(), count));
        }
    }

    best.map(|(name, count)| InsightItem {
        insight_type: "habit_streak".to_string(),
        title: "Habit Streak".to_string(),
        description: format!("You're on a {}-day streak with {}!", count, name),
        value: format!("{} days", count),
        trend: Trend::Up,
    })
}

/// Recent mood trend
///
/// Needs at least two in-window entries. Averages the mood level of the
/// chronologically last three entries and only fires on a good stretch.
fn mood_trend(moods: &[&MoodEntry]) -> Option<InsightItem> {
    if moods.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&MoodEntry> = moods.to_vec();
    sorted.sort_by_key(|m| m.date);
    let recent = &sorted[sorted.len().saturating_sub(3)..];

    let avg_recent =
        recent.iter().map(|m| m.mood_level as f64).sum::<f64>() / recent.len() as f64;

    if avg_recent < GOOD_MOOD_THRESHOLD {
        return None;
    }

    let avg_recent = round1(avg_recent);

    Some(InsightItem {
        insight_type: "mood_trend".to_string(),
        title: "Great Mood Trend".to_string(),
        description: format!(
            "Your mood has been excellent lately (avg {:.1}/5)",
            avg_recent
        ),
        value: format!("{:.1}/5", avg_recent),
        trend: Trend::Up,
    })
}

/// Average daily focus time
///
/// Fires whenever any focus minutes were recorded. Uses the same fixed
/// 7-day denominator as the weekly stats.
fn focus_productivity(sessions: &[&FocusSession]) -> Option<InsightItem> {
    let total_focus_minutes: u32 = sessions.iter().map(|s| s.duration_minutes).sum();

    if total_focus_minutes == 0 {
        return None;
    }

    let avg_daily_focus = (total_focus_minutes as f64 / 7.0).round() as u32;

    Some(InsightItem {
        insight_type: "focus_productivity".to_string(),
        title: "Focus Time".to_string(),
        description: format!(
            "You averaged {} minutes of focus per day",
            avg_daily_focus
        ),
        value: format!("{} min", avg_daily_focus),
        trend: Trend::Neutral,
    })
}

fn mean(values: &[u32]) -> f64 {
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_fixtures::*;

    #[test]
    fn test_no_records_no_insights() {
        assert!(generate_insights(&[], &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_sleep_focus_drop_emitted() {
        // sleep [5,5,8,8] with same-date focus [10,10,50,50]
        let moods = vec![
            mood_entry(day(0), 3, 3, 5.0),
            mood_entry(day(1), 3, 3, 5.0),
            mood_entry(day(2), 4, 4, 8.0),
            mood_entry(day(3), 4, 4, 8.0),
        ];
        let sessions = vec![
            focus_session("a", 10, day(0), true),
            focus_session("b", 10, day(1), true),
            focus_session("c", 50, day(2), true),
            focus_session("d", 50, day(3), true),
        ];
        let mood_refs: Vec<&_> = moods.iter().collect();
        let session_refs: Vec<&_> = sessions.iter().collect();

        // avg_low = 10, avg_high = 50, diff = 80%
        let insight = sleep_focus(&mood_refs, &session_refs).unwrap();
        assert_eq!(insight.insight_type, "sleep_focus");
        assert_eq!(insight.value, "80%");
        assert_eq!(insight.trend, Trend::Down);
    }

    #[test]
    fn test_sleep_focus_equal_averages_not_emitted() {
        let moods = vec![
            mood_entry(day(0), 3, 3, 5.0),
            mood_entry(day(1), 4, 4, 8.0),
        ];
        let sessions = vec![
            focus_session("a", 30, day(0), true),
            focus_session("b", 30, day(1), true),
        ];
        let mood_refs: Vec<&_> = moods.iter().collect();
        let session_refs: Vec<&_> = sessions.iter().collect();

        assert!(sleep_focus(&mood_refs, &session_refs).is_none());
    }

    #[test]
    fn test_sleep_focus_inverse_correlation_not_emitted() {
        // Short sleep with MORE focus: both buckets populated, no insight
        let moods = vec![
            mood_entry(day(0), 3, 3, 5.0),
            mood_entry(day(1), 4, 4, 8.0),
        ];
        let sessions = vec![
            focus_session("a", 60, day(0), true),
            focus_session("b", 20, day(1), true),
        ];
        let mood_refs: Vec<&_> = moods.iter().collect();
        let session_refs: Vec<&_> = sessions.iter().collect();

        assert!(sleep_focus(&mood_refs, &session_refs).is_none());
    }

    #[test]
    fn test_sleep_focus_requires_both_buckets() {
        let moods = vec![
            mood_entry(day(0), 3, 3, 8.0),
            mood_entry(day(1), 4, 4, 7.0),
        ];
        let sessions = vec![
            focus_session("a", 30, day(0), true),
            focus_session("b", 40, day(1), true),
        ];
        let mood_refs: Vec<&_> = moods.iter().collect();
        let session_refs: Vec<&_> = sessions.iter().collect();

        assert!(sleep_focus(&mood_refs, &session_refs).is_none());
    }

    #[test]
    fn test_sleep_focus_skips_moods_without_same_date_focus() {
        // The short-sleep entry has no focus data, so its bucket stays empty
        let moods = vec![
            mood_entry(day(0), 3, 3, 5.0),
            mood_entry(day(1), 4, 4, 8.0),
        ];
        let sessions = vec![focus_session("a", 30, day(1), true)];
        let mood_refs: Vec<&_> = moods.iter().collect();
        let session_refs: Vec<&_> = sessions.iter().collect();

        assert!(sleep_focus(&mood_refs, &session_refs).is_none());
    }

    #[test]
    fn test_habit_streak_reports_best_habit() {
        let habits = vec![habit("Meditate"), habit("Stretch")];
        let logs = vec![
            habit_log(&habits[0], day(0), true),
            habit_log(&habits[0], day(2), true),
            habit_log(&habits[0], day(5), true),
            habit_log(&habits[1], day(1), true),
            habit_log(&habits[1], day(3), false), // not completed, ignored
        ];
        let refs: Vec<&_> = logs.iter().collect();

        let insight = habit_streak(&habits, &refs).unwrap();
        assert_eq!(insight.value, "3 days");
        assert!(insight.description.contains("Meditate"));
        assert_eq!(insight.trend, Trend::Up);
    }

    #[test]
    fn test_habit_streak_first_habit_wins_ties() {
        let habits = vec![habit("First"), habit("Second")];
        let logs = vec![
            habit_log(&habits[0], day(0), true),
            habit_log(&habits[1], day(1), true),
        ];
        let refs: Vec<&_> = logs.iter().collect();

        let insight = habit_streak(&habits, &refs).unwrap();
        assert!(insight.description.contains("First"));
    }

    #[test]
    fn test_habit_streak_silent_with_no_completions() {
        let habits = vec![habit("Meditate")];
        let logs = vec![habit_log(&habits[0], day(0), false)];
        let refs: Vec<&_> = logs.iter().collect();

        assert!(habit_streak(&habits, &refs).is_none());
    }

    #[test]
    fn test_mood_trend_uses_last_three_entries() {
        // Old bad days, recent good ones: only the last 3 count
        let moods = vec![
            mood_entry(day(0), 1, 2, 7.0),
            mood_entry(day(1), 1, 2, 7.0),
            mood_entry(day(4), 4, 4, 7.0),
            mood_entry(day(5), 4, 4, 7.0),
            mood_entry(day(6), 5, 5, 7.0),
        ];
        let refs: Vec<&_> = moods.iter().collect();

        let insight = mood_trend(&refs).unwrap();
        assert_eq!(insight.value, "4.3/5"); // 13/3
        assert_eq!(insight.trend, Trend::Up);
    }

    #[test]
    fn test_mood_trend_requires_two_entries() {
        let moods = vec![mood_entry(day(0), 5, 5, 7.0)];
        let refs: Vec<&_> = moods.iter().collect();

        assert!(mood_trend(&refs).is_none());
    }

    #[test]
    fn test_mood_trend_below_threshold_not_emitted() {
        let moods = vec![
            mood_entry(day(0), 3, 3, 7.0),
            mood_entry(day(1), 4, 4, 7.0),
        ];
        let refs: Vec<&_> = moods.iter().collect();

        // mean 3.5 < 4
        assert!(mood_trend(&refs).is_none());
    }

    #[test]
    fn test_focus_productivity_rounds_daily_average() {
        let sessions = vec![
            focus_session("a", 30, day(0), true),
            focus_session("b", 45, day(1), true),
            focus_session("c", 0, day(2), false),
        ];
        let refs: Vec<&_> = sessions.iter().collect();

        // 75 / 7 = 10.71... -> 11
        let insight = focus_productivity(&refs).unwrap();
        assert_eq!(insight.value, "11 min");
        assert_eq!(insight.trend, Trend::Neutral);
    }

    #[test]
    fn test_focus_productivity_silent_with_zero_minutes() {
        let sessions = vec![focus_session("a", 0, day(0), false)];
        let refs: Vec<&_> = sessions.iter().collect();

        assert!(focus_productivity(&refs).is_none());
    }

    #[test]
    fn test_insight_order_is_fixed() {
        let habits = vec![habit("Meditate")];
        let logs = vec![habit_log(&habits[0], day(0), true)];
        let moods = vec![
            mood_entry(day(0), 3, 3, 5.0),
            mood_entry(day(1), 5, 5, 8.0),
            mood_entry(day(2), 5, 5, 8.0),
        ];
        let sessions = vec![
            focus_session("a", 10, day(0), true),
            focus_session("b", 50, day(1), true),
        ];
        let log_refs: Vec<&_> = logs.iter().collect();
        let mood_refs: Vec<&_> = moods.iter().collect();
        let session_refs: Vec<&_> = sessions.iter().collect();

        let insights = generate_insights(&habits, &log_refs, &mood_refs, &session_refs);
        let types: Vec<&str> = insights.iter().map(|i| i.insight_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["sleep_focus", "habit_streak", "mood_trend", "focus_productivity"]
        );
    }
}
