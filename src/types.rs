use std::fmt;

use serde::Deserialize;

/// A cell value as the recent-workouts endpoint emits it: either a string or a number.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // whole floats print without the ".0", negative zero as "0"
            CellValue::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v == 0.0 => f.write_str("0"),
                Some(v) if n.is_f64() => write!(f, "{}", v),
                _ => write!(f, "{}", n),
            },
        }
    }
}

/// One row of `/api/api_recent_workouts.sql`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WorkoutEntry {
    #[serde(rename = "Date", default)]
    pub date: Option<CellValue>,
    #[serde(rename = "Exercise", default)]
    pub exercise: Option<CellValue>,
    #[serde(rename = "Sets", default)]
    pub sets: Option<CellValue>,
}

impl WorkoutEntry {
    pub fn cells(&self) -> [String; 3] {
        [&self.date, &self.exercise, &self.sets]
            .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
    }
}

/// Display strings for one table row: Date, Exercise, Sets.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutRow {
    pub date: String,
    pub exercise: String,
    pub sets: String,
}

impl From<&WorkoutEntry> for WorkoutRow {
    fn from(entry: &WorkoutEntry) -> Self {
        let [date, exercise, sets] = entry.cells();
        Self { date, exercise, sets }
    }
}

/// What the recent-workouts container shows.
#[derive(Clone, Debug, PartialEq)]
pub enum RecentView {
    Empty,
    Table(Vec<WorkoutRow>),
}

impl RecentView {
    pub fn from_entries(entries: &[WorkoutEntry]) -> Self {
        if entries.is_empty() {
            RecentView::Empty
        } else {
            RecentView::Table(entries.iter().map(WorkoutRow::from).collect())
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            RecentView::Empty => 0,
            RecentView::Table(rows) => rows.len(),
        }
    }
}

/// Value of a single submitted form field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        file: web_sys::File,
    },
}

/// Form fields captured at submission time, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormPayload {
    fields: Vec<(String, FieldValue)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), FieldValue::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: web_sys::File) {
        let file_name = file.name();
        self.fields.push((name.into(), FieldValue::File { file_name, file }));
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    #[cfg(test)]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FieldValue::Text(s) if n == name => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_decode_strings_and_numbers() {
        let json = r#"[
            {"Date": "2024-05-01", "Exercise": "Squat", "Sets": 5},
            {"Date": "2024-05-02", "Exercise": "Bench", "Sets": "3x8"}
        ]"#;
        let entries: Vec<WorkoutEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].cells(), ["2024-05-01", "Squat", "5"]);
        assert_eq!(entries[1].cells(), ["2024-05-02", "Bench", "3x8"]);
    }

    #[test]
    fn test_float_cells_print_like_the_page_did() {
        let json = r#"[{"Date": "2024-05-01", "Exercise": 2.5, "Sets": 5.0},
                       {"Date": -0.0, "Exercise": "Row", "Sets": -3}]"#;
        let entries: Vec<WorkoutEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].cells(), ["2024-05-01", "2.5", "5"]);
        assert_eq!(entries[1].cells(), ["0", "Row", "-3"]);
    }

    #[test]
    fn test_missing_and_null_cells_render_empty() {
        let json = r#"[{"Date": null, "Exercise": "Deadlift"}]"#;
        let entries: Vec<WorkoutEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].cells(), ["", "Deadlift", ""]);
    }

    #[test]
    fn test_view_from_empty_array() {
        assert_eq!(RecentView::from_entries(&[]), RecentView::Empty);
        assert_eq!(RecentView::Empty.row_count(), 0);
    }

    #[test]
    fn test_view_keeps_server_order() {
        let json = r#"[
            {"Date": "2024-05-03", "Exercise": "Row", "Sets": 4},
            {"Date": "2024-05-01", "Exercise": "Press", "Sets": 3},
            {"Date": "2024-05-02", "Exercise": "Curl", "Sets": 2}
        ]"#;
        let entries: Vec<WorkoutEntry> = serde_json::from_str(json).unwrap();
        let view = RecentView::from_entries(&entries);
        assert_eq!(view.row_count(), 3);
        let RecentView::Table(rows) = &view else {
            panic!("expected a table");
        };
        let exercises: Vec<_> = rows.iter().map(|r| r.exercise.as_str()).collect();
        assert_eq!(exercises, ["Row", "Press", "Curl"]);
        assert_eq!(rows[0].sets, "4");

        // same input, same view
        assert_eq!(view, RecentView::from_entries(&entries));
    }

    #[test]
    fn test_markup_like_text_is_kept_verbatim() {
        let json = r#"[{"Date": "2024-05-01", "Exercise": "<b>Squat</b>", "Sets": 1}]"#;
        let entries: Vec<WorkoutEntry> = serde_json::from_str(json).unwrap();
        let RecentView::Table(rows) = RecentView::from_entries(&entries) else {
            panic!("expected a table");
        };
        assert_eq!(rows[0].exercise, "<b>Squat</b>");
    }

    #[test]
    fn test_payload_keeps_duplicate_names_in_order() {
        let mut payload = FormPayload::new();
        payload.push_text("exercise", "Squat");
        payload.push_text("reps_1", "5");
        payload.push_text("reps_1", "3");
        assert_eq!(payload.len(), 3);
        assert_eq!(payload.text("reps_1"), Some("5"));
        let names: Vec<_> = payload.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["exercise", "reps_1", "reps_1"]);
    }
}
