use crate::models::{DisplayEntry, DisplaySet};
use chrono::NaiveDate;
use maud::{html, Markup};

pub fn render_index(date: Option<NaiveDate>, entries: &[DisplayEntry]) -> String {
    let (date_value, date_label) = match date {
        Some(date) => (date.to_string(), date.format("%A, %B %-d, %Y").to_string()),
        None => (String::new(), "Pick a date to see its workouts".to_string()),
    };

    let body = match date {
        None => String::new(),
        Some(_) if entries.is_empty() => EMPTY_DAY.to_string(),
        Some(_) => html! {
            @for entry in entries {
                (render_entry(entry))
            }
        }
        .into_string(),
    };

    INDEX_HTML
        .replace("{{DATE}}", &date_value)
        .replace("{{DATE_LABEL}}", &html! { (date_label) }.into_string())
        .replace("{{ENTRIES}}", &body)
}

fn render_entry(entry: &DisplayEntry) -> Markup {
    let muscle_focus = entry.muscle_focus.as_deref().unwrap_or_default();
    let notes = entry.notes.as_deref().unwrap_or_default();
    let date = entry.date.to_string();

    html! {
        form.entry-form method="post" action="/update-workout" {
            input type="hidden" name="originalId" value=(entry.id);
            input type="hidden" name="date" value=(date);
            input type="hidden" name="sets" value=(entry.sets_count);
            input type="hidden" name="reps" value=(joined(&entry.set_rows, |set| &set.reps));
            input type="hidden" name="weight" value=(joined(&entry.set_rows, |set| &set.weight));
            input type="hidden" name="duration" value=(joined(&entry.set_rows, |set| &set.duration));
            div.movement-block
                data-id=(entry.id)
                data-date=(date)
                data-category=(entry.category)
                data-movement=(entry.exercise)
                data-muscle-focus=(muscle_focus)
            {
                div.block-head {
                    h3 {
                        (entry.exercise)
                        @if !muscle_focus.is_empty() {
                            " "
                            span.focus { "(" (muscle_focus) ")" }
                        }
                    }
                    span.tag { (entry.category) }
                }
                div.edit-fields {
                    select name="category" data-role="category" disabled {}
                    select name="exercise" data-role="exercise" disabled {}
                    select name="muscle_focus" data-role="muscle_focus" disabled {}
                }
                table.view-table {
                    thead {
                        tr { th { "Set" } th { "Reps" } th { "Weight (lbs)" } th { "Time (sec)" } }
                    }
                    tbody {
                        @for set in &entry.set_rows {
                            (render_set(set))
                        }
                        tr.notes-row {
                            td colspan="4" {
                                span.view-cell {
                                    @if !notes.is_empty() {
                                        strong { "Notes:" }
                                        " "
                                        (notes)
                                    }
                                }
                                textarea.edit-cell name="notes" rows="2" placeholder="Notes" { (notes) }
                            }
                        }
                    }
                }
                div.edit-buttons {
                    button.btn-secondary.add-set type="button" { "Add set" }
                    button.btn-secondary.remove-set type="button" { "Remove set" }
                    button.btn-primary type="submit" { "Save" }
                    button.btn-danger.delete-entry type="button" { "Delete" }
                }
            }
        }
    }
}

/// Re-joins one per-set column into the stored comma-separated form.
fn joined(rows: &[DisplaySet], pick: fn(&DisplaySet) -> &String) -> String {
    rows.iter().map(|set| pick(set).as_str()).collect::<Vec<_>>().join(",")
}

fn render_set(set: &DisplaySet) -> Markup {
    html! {
        tr.set-row data-set-row-id=(set.set_row_id) data-last=(set.last) {
            td.set-cell { "Set " span.set-number { (set.set_number) } }
            (set_cell("reps", &set.reps))
            (set_cell("weight", &set.weight))
            (set_cell("duration", &set.duration))
        }
    }
}

fn set_cell(field: &str, value: &str) -> Markup {
    html! {
        td {
            span.view-cell { (value) }
            input.edit-cell data-field=(field) value=(value);
        }
    }
}

const EMPTY_DAY: &str = r#"<p class="empty">No workouts logged for this date yet.</p>"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Workout Log</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: end;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
    }

    .toolbar,
    .filters,
    .notice-actions,
    .edit-buttons {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    input,
    select,
    textarea {
      font: inherit;
      padding: 8px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
    }

    .btn-secondary {
      background: var(--accent-2);
      color: white;
    }

    .btn-danger {
      background: #c63b2b;
      color: white;
    }

    .panel {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .panel h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .add-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 10px;
    }

    .movement-block {
      background: white;
      border-radius: 20px;
      padding: 18px;
      margin-bottom: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .movement-block.highlight-filtered {
      border: 2px solid var(--accent);
    }

    .block-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .block-head h3 {
      margin: 0 0 10px;
    }

    .focus {
      color: #8b857d;
      font-weight: 400;
    }

    .tag {
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      padding: 4px 12px;
      font-size: 0.85rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .edit-cell,
    .edit-fields,
    .edit-buttons {
      display: none;
    }

    .edit-mode .edit-cell {
      display: block;
      width: 100%;
    }

    .edit-mode .edit-fields,
    .edit-mode .edit-buttons {
      display: flex;
      gap: 10px;
      margin: 10px 0;
    }

    .edit-mode .view-cell {
      display: none;
    }

    .notice {
      background: rgba(255, 107, 74, 0.08);
      border-radius: 16px;
      padding: 16px;
      margin-bottom: 16px;
    }

    .date-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin: 12px 0;
    }

    .date-header a {
      color: var(--accent-2);
      font-weight: 600;
    }

    .empty,
    .loading {
      color: #6f6a65;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Workout Log</h1>
        <p class="subtitle" id="dateLabel">{{DATE_LABEL}}</p>
      </div>
      <form class="toolbar" method="get" action="/">
        <input type="date" name="date" value="{{DATE}}" />
        <button type="submit" class="btn-secondary">Show day</button>
        <button type="button" class="btn-secondary" id="toggleEditBtn">Edit</button>
      </form>
    </header>

    <section class="filters">
      <strong id="filterLabel">Filter</strong>
      <select data-filter-type="category" data-placeholder="Category"></select>
      <select data-filter-type="movement" data-placeholder="Movement"></select>
      <select data-filter-type="muscle-focus" data-placeholder="Muscle focus"></select>
      <button type="button" class="btn-secondary" id="clearFilterBtn" hidden>Clear filter</button>
    </section>

    <section class="panel">
      <h2>Log a workout</h2>
      <form id="addWorkoutForm" method="post" action="/add-workout" class="add-grid">
        <input type="date" name="date" value="{{DATE}}" required />
        <select name="category" data-role="category" required></select>
        <select name="exercise" data-role="exercise" required></select>
        <select name="muscle_focus" data-role="muscle_focus"></select>
        <input type="number" name="sets" min="1" value="3" required />
        <input type="text" name="reps" placeholder="Reps (e.g. 8,8,6)" required />
        <input type="text" name="weight" placeholder="Weight (e.g. 135,135,145)" />
        <input type="text" name="duration" placeholder="Seconds (e.g. 30,30,30)" />
        <input type="text" name="notes" placeholder="Notes" />
        <button type="submit" class="btn-primary">Add workout</button>
      </form>
    </section>

    <section id="workoutsContainer">{{ENTRIES}}
    </section>

    <form id="deleteForm" method="post" action="/delete-workout" hidden>
      <input type="hidden" name="originalId" />
      <input type="hidden" name="date" />
    </form>
  </main>

  <script>
    (() => {
      const STORAGE_KEY = 'workoutData';
      const DEFAULT_TAXONOMY = {
        Back: { movements: { 'Lat Pullover': ['Lower Back', 'Lats'], 'Single Arm Rows': ['Mid Back', 'Lats'], 'Pull Up': ['Lats', 'Upper Back'] } },
        Chest: { movements: { 'Bench Press': ['Mid Chest', 'Upper Chest'], 'Chest Fly': ['Mid Chest'] } },
        Legs: { movements: { Squat: ['Quads', 'Glutes'], 'Romanian Deadlift': ['Hamstrings', 'Glutes'] } },
        Shoulders: { movements: { 'Overhead Press': ['Front Delts', 'Side Delts'], 'Lateral Raise': ['Side Delts'] } },
        Arms: { movements: { Curl: ['Biceps'], 'Tricep Pushdown': ['Triceps'] } }
      };

      const container = document.getElementById('workoutsContainer');
      const filterSelects = Array.from(document.querySelectorAll('[data-filter-type]'));
      const filterLabel = document.getElementById('filterLabel');
      const clearFilterBtn = document.getElementById('clearFilterBtn');
      const toggleEditBtn = document.getElementById('toggleEditBtn');
      const deleteForm = document.getElementById('deleteForm');

      let currentFilter = { type: null, value: null };
      let editMode = false;

      const esc = (value) =>
        String(value ?? '').replace(/[&<>"']/g, (ch) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[ch]);

      const unique = (items) => Array.from(new Set(items.filter(Boolean))).sort();

      const mergeTaxonomy = (data, category, movement, focus) => {
        if (!category) {
          return;
        }
        data[category] = data[category] || { movements: {} };
        data[category].movements = data[category].movements || {};
        if (!movement) {
          return;
        }
        const foci = data[category].movements[movement] || [];
        if (focus && !foci.includes(focus)) {
          foci.push(focus);
        }
        data[category].movements[movement] = foci;
      };

      const loadTaxonomy = () => {
        let data = null;
        try {
          data = JSON.parse(localStorage.getItem(STORAGE_KEY) || 'null');
        } catch (err) {
          data = null;
        }
        if (!data || typeof data !== 'object') {
          data = JSON.parse(JSON.stringify(DEFAULT_TAXONOMY));
        }
        document.querySelectorAll('.movement-block').forEach((block) => {
          mergeTaxonomy(data, block.dataset.category, block.dataset.movement, block.dataset.muscleFocus);
        });
        localStorage.setItem(STORAGE_KEY, JSON.stringify(data));
        return data;
      };

      const taxonomy = loadTaxonomy();
      const categories = () => Object.keys(taxonomy).sort();
      const movementsFor = (category) => Object.keys((taxonomy[category] || {}).movements || {}).sort();
      const fociFor = (category, movement) => (((taxonomy[category] || {}).movements || {})[movement] || []).slice();
      const allMovements = () => unique(categories().flatMap(movementsFor));
      const allFoci = () =>
        unique(categories().flatMap((category) => movementsFor(category).flatMap((movement) => fociFor(category, movement))));

      const fillSelect = (select, placeholder, options, selected, lockPlaceholder = true) => {
        select.innerHTML = '';
        const first = document.createElement('option');
        first.value = '';
        first.textContent = placeholder;
        first.disabled = lockPlaceholder;
        first.selected = !selected;
        select.appendChild(first);
        options.forEach((value) => {
          const option = document.createElement('option');
          option.value = value;
          option.textContent = value;
          option.selected = value === selected;
          select.appendChild(option);
        });
      };

      // Category drives movement, movement drives muscle focus.
      const bindCascade = (root, current) => {
        const categorySelect = root.querySelector('[data-role="category"]');
        const exerciseSelect = root.querySelector('[data-role="exercise"]');
        const focusSelect = root.querySelector('[data-role="muscle_focus"]');
        if (!categorySelect || !exerciseSelect || !focusSelect) {
          return null;
        }

        const refreshMovements = (selected) => {
          const options = movementsFor(categorySelect.value);
          fillSelect(exerciseSelect, 'Select movement', options, selected);
          exerciseSelect.disabled = options.length === 0;
        };
        const refreshFoci = (selected) => {
          const options = fociFor(categorySelect.value, exerciseSelect.value);
          fillSelect(focusSelect, 'Select muscle focus', options, selected);
          focusSelect.disabled = options.length === 0;
        };
        const enable = () => {
          fillSelect(categorySelect, 'Select category', categories(), current.category);
          categorySelect.disabled = false;
          refreshMovements(current.movement);
          refreshFoci(current.focus);
        };
        const disable = () => {
          [categorySelect, exerciseSelect, focusSelect].forEach((select) => {
            select.disabled = true;
          });
        };

        categorySelect.addEventListener('change', () => {
          refreshMovements(null);
          refreshFoci(null);
        });
        exerciseSelect.addEventListener('change', () => refreshFoci(null));
        return { enable, disable };
      };

      const cascades = new Map();
      document.querySelectorAll('form.entry-form .movement-block').forEach((block) => {
        const cascade = bindCascade(block, {
          category: block.dataset.category,
          movement: block.dataset.movement,
          focus: block.dataset.muscleFocus
        });
        if (cascade) {
          cascades.set(block, cascade);
        }
      });

      const addCascade = bindCascade(document.getElementById('addWorkoutForm'), {});
      if (addCascade) {
        addCascade.enable();
      }

      const setEditMode = (on) => {
        editMode = on;
        container.classList.toggle('edit-mode', on);
        toggleEditBtn.textContent = on ? 'Done' : 'Edit';
        cascades.forEach((cascade) => (on ? cascade.enable() : cascade.disable()));
      };
      toggleEditBtn.addEventListener('click', () => setEditMode(!editMode));

      const setRows = (block) => Array.from(block.querySelectorAll('.set-row'));

      const markLast = (block) => {
        const rows = setRows(block);
        rows.forEach((row, index) => {
          row.dataset.last = String(index === rows.length - 1);
          row.querySelector('.set-number').textContent = index + 1;
        });
      };

      document.querySelectorAll('form.entry-form').forEach((form) => {
        const block = form.querySelector('.movement-block');

        form.querySelector('.add-set').addEventListener('click', () => {
          const last = block.querySelector('.set-row[data-last="true"]');
          if (!last) {
            return;
          }
          const row = last.cloneNode(true);
          row.querySelectorAll('.edit-cell').forEach((input) => {
            input.value = '';
          });
          row.querySelectorAll('.view-cell').forEach((cell) => {
            cell.textContent = '';
          });
          last.after(row);
          markLast(block);
        });

        form.querySelector('.remove-set').addEventListener('click', () => {
          const rows = setRows(block);
          if (rows.length > 1) {
            rows[rows.length - 1].remove();
            markLast(block);
          }
        });

        form.querySelector('.delete-entry').addEventListener('click', () => {
          if (!window.confirm('Delete this workout?')) {
            return;
          }
          deleteForm.elements.originalId.value = block.dataset.id;
          deleteForm.elements.date.value = block.dataset.date;
          deleteForm.submit();
        });

        form.addEventListener('submit', () => {
          const rows = setRows(block);
          const collect = (field) =>
            rows.map((row) => row.querySelector(`[data-field="${field}"]`).value.trim()).join(',');
          form.elements.sets.value = rows.length;
          form.elements.reps.value = collect('reps');
          form.elements.weight.value = collect('weight');
          form.elements.duration.value = collect('duration');
        });
      });

      const blockValue = (block, type) =>
        ({ category: block.dataset.category, movement: block.dataset.movement, 'muscle-focus': block.dataset.muscleFocus })[type];

      const entryValue = (entry, type) =>
        ({ category: entry.category, movement: entry.exercise, 'muscle-focus': entry.muscle_focus })[type];

      const formatDate = (value) =>
        new Date(`${value}T00:00:00`).toLocaleDateString('en-US', {
          weekday: 'long',
          year: 'numeric',
          month: 'long',
          day: 'numeric'
        });

      const entryHtml = (entry) => {
        const rows = entry.setRows
          .map(
            (set) => `
              <tr class="set-row" data-set-row-id="${esc(set.setRowId)}" data-last="${set.last}">
                <td class="set-cell">Set ${set.setNumber}</td>
                <td>${esc(set.reps)}</td>
                <td>${esc(set.weight)}</td>
                <td>${esc(set.duration)}</td>
              </tr>`
          )
          .join('');
        const notes = entry.notes
          ? `<tr><td colspan="4"><strong>Notes:</strong> ${esc(entry.notes)}</td></tr>`
          : '';
        const focus = entry.muscle_focus ? ` <span class="focus">(${esc(entry.muscle_focus)})</span>` : '';
        return `
          <div class="movement-block" data-id="${entry.id}" data-category="${esc(entry.category)}"
               data-movement="${esc(entry.exercise)}" data-muscle-focus="${esc(entry.muscle_focus)}">
            <div class="block-head">
              <h3>${esc(entry.exercise)}${focus}</h3>
              <span class="tag">${esc(entry.category)}</span>
            </div>
            <table class="view-table">
              <thead><tr><th>Set</th><th>Reps</th><th>Weight (lbs)</th><th>Time (sec)</th></tr></thead>
              <tbody>${rows}${notes}</tbody>
            </table>
          </div>`;
      };

      const renderFilteredView = (data, value) => {
        container.dataset.view = 'filtered';
        container.innerHTML = `
          <div class="date-header">
            <h2>Filtered by: ${esc(value)}</h2>
            <button type="button" class="btn-secondary" data-action="clear">Clear filter</button>
          </div>`;
        container.querySelector('[data-action="clear"]').addEventListener('click', clearFilter);

        const groups = (data && data.workoutsByDate) || [];
        if (groups.length === 0) {
          container.insertAdjacentHTML('beforeend', `<p class="empty">No workouts found matching "${esc(value)}".</p>`);
          return;
        }

        groups
          .slice()
          .sort((a, b) => (a.date < b.date ? 1 : a.date > b.date ? -1 : 0))
          .forEach((group) => {
            const section = document.createElement('div');
            section.className = 'date-section';
            section.innerHTML = `
              <div class="date-header">
                <h3>${esc(formatDate(group.date))}</h3>
                <a href="/?date=${encodeURIComponent(group.date)}">View full day</a>
              </div>
              ${group.allWorkouts.map(entryHtml).join('')}`;
            section.querySelectorAll('.movement-block').forEach((block) => {
              block.classList.toggle('highlight-filtered', blockValue(block, currentFilter.type) === currentFilter.value);
            });
            container.appendChild(section);
          });
      };

      const fetchAllFiltered = async (type, value) => {
        container.innerHTML = '<p class="loading">Loading filtered workouts...</p>';
        const params = new URLSearchParams({ type, value });
        try {
          const res = await fetch(`/api/workouts/filter?${params.toString()}`);
          if (!res.ok) {
            const body = await res.json().catch(() => ({}));
            throw new Error(body.error || 'Request failed');
          }
          renderFilteredView(await res.json(), value);
        } catch (err) {
          container.dataset.view = 'filtered';
          container.innerHTML = `
            <div class="notice">
              <p>Could not load workouts matching "${esc(value)}": ${esc(err.message)}</p>
              <button type="button" class="btn-secondary" data-action="clear">Clear filter</button>
            </div>`;
          container.querySelector('[data-action="clear"]').addEventListener('click', clearFilter);
        }
      };

      const filterCurrentPage = (type, value) => {
        let visible = 0;
        container.querySelectorAll('.movement-block').forEach((block) => {
          const show = blockValue(block, type) === value;
          (block.closest('form') || block).style.display = show ? '' : 'none';
          block.classList.toggle('highlight-filtered', show);
          if (show) {
            visible += 1;
          }
        });

        const previous = document.getElementById('noFilterMatchMessage');
        if (previous) {
          previous.remove();
        }
        if (visible > 0) {
          return;
        }

        const notice = document.createElement('div');
        notice.id = 'noFilterMatchMessage';
        notice.className = 'notice';
        notice.innerHTML = `
          <p>No workouts found for "${esc(value)}" on this date.</p>
          <p>Would you like to see all matching workouts across all dates?</p>
          <div class="notice-actions">
            <button type="button" class="btn-primary" data-action="show-all">Show all matching</button>
            <button type="button" class="btn-secondary" data-action="clear">Clear filter</button>
          </div>`;
        container.prepend(notice);
        notice
          .querySelector('[data-action="show-all"]')
          .addEventListener('click', () => fetchAllFiltered(currentFilter.type, currentFilter.value));
        notice.querySelector('[data-action="clear"]').addEventListener('click', clearFilter);
      };

      const applyFilter = (type, value) => {
        currentFilter = { type, value };
        filterLabel.textContent = `Filter: ${value}`;
        clearFilterBtn.hidden = false;
        if (container.querySelectorAll('.movement-block').length > 0) {
          filterCurrentPage(type, value);
        } else {
          fetchAllFiltered(type, value);
        }
      };

      function clearFilter(event) {
        if (event) {
          event.preventDefault();
        }
        const wasFilteredView = container.dataset.view === 'filtered';
        currentFilter = { type: null, value: null };
        filterLabel.textContent = 'Filter';
        clearFilterBtn.hidden = true;
        filterSelects.forEach((select) => {
          select.selectedIndex = 0;
        });

        const notice = document.getElementById('noFilterMatchMessage');
        if (notice) {
          notice.remove();
        }
        if (wasFilteredView) {
          window.location.reload();
          return;
        }
        container.querySelectorAll('.movement-block').forEach((block) => {
          (block.closest('form') || block).style.display = '';
          block.classList.remove('highlight-filtered');
        });
      }

      const populateFilterMenus = () => {
        const menus = { category: categories(), movement: allMovements(), 'muscle-focus': allFoci() };
        filterSelects.forEach((select) => {
          fillSelect(select, select.dataset.placeholder, menus[select.dataset.filterType] || [], null, false);
        });
      };

      filterSelects.forEach((select) => {
        select.addEventListener('change', () => {
          if (!select.value) {
            clearFilter();
            return;
          }
          filterSelects.forEach((other) => {
            if (other !== select) {
              other.selectedIndex = 0;
            }
          });
          applyFilter(select.dataset.filterType, select.value);
        });
      });
      clearFilterBtn.addEventListener('click', clearFilter);

      populateFilterMenus();
    })();
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutEntry;
    use crate::transform::split_sets;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn page_without_date_has_no_entries() {
        let html = render_index(None, &[]);
        assert!(html.contains("Pick a date to see its workouts"));
        assert!(!html.contains("name=\"originalId\" value="));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn empty_day_says_so() {
        let html = render_index(Some(day()), &[]);
        assert!(html.contains("No workouts logged for this date yet."));
        assert!(html.contains(r#"value="2025-03-10""#));
        assert!(html.contains("Monday, March 10, 2025"));
    }

    #[test]
    fn entries_render_one_row_per_set_with_escaped_text() {
        let entries = split_sets(&[WorkoutEntry {
            id: 5,
            date: day(),
            category: "Back".into(),
            exercise: "Rows <heavy>".into(),
            muscle_focus: Some("Mid Back".into()),
            sets: 2,
            reps: Some("8,6".into()),
            weight: Some("145".into()),
            duration: None,
            notes: Some("\"grip\" & go".into()),
        }]);

        let html = render_index(Some(day()), &entries);
        assert!(html.contains(r#"data-movement="Rows &lt;heavy&gt;""#));
        assert!(html.contains(r#"data-set-row-id="5-1" data-last="false""#));
        assert!(html.contains(r#"data-set-row-id="5-2" data-last="true""#));
        assert!(html.contains(r#"name="reps" value="8,6""#));
        assert!(html.contains(r#"name="weight" value="145,""#));
        assert!(html.contains("&quot;grip&quot; &amp; go"));
        assert!(!html.contains("<heavy>"));
    }

    #[test]
    fn entry_form_carries_ids_and_joined_columns() {
        let entries = split_sets(&[WorkoutEntry {
            id: 8,
            date: day(),
            category: "Chest".into(),
            exercise: "Bench Press".into(),
            muscle_focus: None,
            sets: 3,
            reps: Some("8,6,4".into()),
            weight: Some("135,155,175".into()),
            duration: None,
            notes: Some("<script>alert(1)</script>".into()),
        }]);

        let html = render_index(Some(day()), &entries);
        assert!(html.contains(r#"name="originalId" value="8""#));
        assert!(html.contains(r#"name="duration" value=",,""#));
        assert!(html.contains(r#"data-muscle-focus="""#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }
}
