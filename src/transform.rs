use crate::models::{DisplayEntry, DisplaySet, MAX_SETS, WorkoutEntry};

/// Expands each stored entry into one display row per set.
///
/// Per-set values are taken positionally from the comma-separated columns; a
/// set without a matching token shows an empty value.
pub fn split_sets(entries: &[WorkoutEntry]) -> Vec<DisplayEntry> {
    entries.iter().map(split_entry).collect()
}

pub fn split_entry(entry: &WorkoutEntry) -> DisplayEntry {
    let reps = tokens(entry.reps.as_deref());
    let weight = tokens(entry.weight.as_deref());
    let duration = tokens(entry.duration.as_deref());

    // Rows written before the cap existed may carry any count.
    let count = usize::try_from(entry.sets.min(MAX_SETS)).unwrap_or(0);
    let set_rows = (0..count)
        .map(|index| {
            let set_number = index + 1;
            DisplaySet {
                set_row_id: format!("{}-{}", entry.id, set_number),
                original_id: entry.id,
                date: entry.date,
                category: entry.category.clone(),
                exercise: entry.exercise.clone(),
                muscle_focus: entry.muscle_focus.clone(),
                set_number,
                reps: token_at(&reps, index),
                weight: token_at(&weight, index),
                duration: token_at(&duration, index),
                notes: entry.notes.clone(),
                last: set_number == count,
            }
        })
        .collect();

    DisplayEntry {
        id: entry.id,
        date: entry.date,
        category: entry.category.clone(),
        exercise: entry.exercise.clone(),
        muscle_focus: entry.muscle_focus.clone(),
        sets_count: entry.sets,
        set_rows,
        notes: entry.notes.clone(),
    }
}

fn tokens(raw: Option<&str>) -> Vec<&str> {
    match raw {
        Some(text) if !text.is_empty() => text.split(',').map(str::trim).collect(),
        _ => Vec::new(),
    }
}

fn token_at(tokens: &[&str], index: usize) -> String {
    tokens.get(index).map(|token| token.to_string()).unwrap_or_default()
}
