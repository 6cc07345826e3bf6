//! Short motivational text shown on the dashboard.

pub const FALLBACK: &str = "Keep running!";

const STARTER: [&str; 3] = [
    "Every journey starts with a single step. Lace up today!",
    "The best run is the one you actually go out for.",
    "Start small, start today.",
];

const BUILDING: [&str; 3] = [
    "Nice momentum! Don't break the chain.",
    "Consistency beats intensity. See you out there!",
    "Another day, another run. You've got this.",
];

const ON_FIRE: [&str; 3] = [
    "A full week and counting. You're unstoppable!",
    "Your streak is proof that discipline works.",
    "Legs of steel, mind of iron. Keep going!",
];

const DONE_TODAY: [&str; 2] = [
    "Run logged for today. Rest well, you earned it!",
    "Today's done. Tomorrow's streak starts with tonight's sleep.",
];

/// Pick a message for the current state. `seed` rotates within a bucket
/// (the CLI passes the day of year so the message changes daily).
pub fn message_for(
    streak: u32,
    today_completed: bool,
    total_runs: usize,
    seed: u32,
) -> &'static str {
    let bucket: &[&'static str] = if total_runs == 0 {
        &STARTER
    } else if streak >= 7 {
        &ON_FIRE
    } else if today_completed {
        &DONE_TODAY
    } else {
        &BUILDING
    };

    bucket
        .get(seed as usize % bucket.len())
        .copied()
        .unwrap_or(FALLBACK)
}
