//! Application state for the Keepsake TUI.

use keepsake_core::{MemoryForm, MemoryRecord, VALID_YEARS};
use log::{debug, info};
use std::path::PathBuf;

/// Screen currently shown, the TUI equivalent of the original page dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Landing screen with navigation.
    Home,
    /// Memory submission form.
    Submit,
    /// Memory wall.
    Wall,
}

/// Fields of the submission form, in display and focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Year,
    Department,
    Title,
    Description,
    Category,
    Emoji,
    Image,
}

impl FormField {
    /// All fields in focus order.
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Year,
        FormField::Department,
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Emoji,
        FormField::Image,
    ];

    /// Label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Year => "Year",
            FormField::Department => "Department",
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Emoji => "Emoji",
            FormField::Image => "Image path",
        }
    }

    /// Next field in focus order, stopping at the last.
    fn next(self) -> FormField {
        let index = FormField::ALL.iter().position(|field| *field == self);
        let index = index.unwrap_or(0);
        FormField::ALL[(index + 1).min(FormField::ALL.len() - 1)]
    }

    /// Previous field in focus order, stopping at the first.
    fn prev(self) -> FormField {
        let index = FormField::ALL.iter().position(|field| *field == self);
        let index = index.unwrap_or(0);
        FormField::ALL[index.saturating_sub(1)]
    }

    /// Whether this is the last field in focus order.
    pub fn is_last(self) -> bool {
        self == FormField::ALL[FormField::ALL.len() - 1]
    }
}

/// Editable state of the submission form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Author name input.
    pub name: String,
    /// Selected index into `VALID_YEARS`, `None` when nothing is chosen.
    pub year: Option<usize>,
    /// Department input.
    pub department: String,
    /// Title input.
    pub title: String,
    /// Description input.
    pub description: String,
    /// Category input.
    pub category: String,
    /// Emoji input.
    pub emoji: String,
    /// Image path input.
    pub image: String,
    /// Focused field.
    pub focus: Option<FormField>,
}

impl FormState {
    /// Fresh form focused on the first field.
    pub fn new() -> Self {
        Self {
            focus: Some(FormField::ALL[0]),
            ..Self::default()
        }
    }

    /// Clear every field for the next submission.
    pub fn reset(&mut self) {
        debug!("resetting submission form");
        *self = Self::new();
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.unwrap_or(FormField::ALL[0]).next());
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focus = Some(self.focus.unwrap_or(FormField::ALL[0]).prev());
    }

    /// Cycle the year selection; cycling left from the first entry clears it.
    pub fn cycle_year(&mut self, forward: bool) {
        self.year = match (self.year, forward) {
            (None, true) => Some(0),
            (None, false) => Some(VALID_YEARS.len() - 1),
            (Some(index), true) if index + 1 < VALID_YEARS.len() => Some(index + 1),
            (Some(_), true) => None,
            (Some(0), false) => None,
            (Some(index), false) => Some(index - 1),
        };
    }

    /// Displayed value of the selected year.
    pub fn year_value(&self) -> &'static str {
        self.year.map(|index| VALID_YEARS[index]).unwrap_or("")
    }

    /// Displayed value of a field.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Year => self.year_value(),
            FormField::Department => &self.department,
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::Emoji => &self.emoji,
            FormField::Image => &self.image,
        }
    }

    /// Append a character to the focused text field. Year is selection-only.
    pub fn push_char(&mut self, ch: char) {
        let Some(field) = self.focus else { return };
        match field {
            FormField::Name => self.name.push(ch),
            FormField::Year => {}
            FormField::Department => self.department.push(ch),
            FormField::Title => self.title.push(ch),
            FormField::Description => self.description.push(ch),
            FormField::Category => self.category.push(ch),
            FormField::Emoji => self.emoji.push(ch),
            FormField::Image => self.image.push(ch),
        }
    }

    /// Delete the last character of the focused text field.
    pub fn backspace(&mut self) {
        let Some(field) = self.focus else { return };
        match field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Year => self.year = None,
            FormField::Department => {
                self.department.pop();
            }
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Category => {
                self.category.pop();
            }
            FormField::Emoji => {
                self.emoji.pop();
            }
            FormField::Image => {
                self.image.pop();
            }
        }
    }

    /// Gather the submitted values for validation and record construction.
    pub fn to_form(&self) -> MemoryForm {
        let image_path = {
            let trimmed = self.image.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            }
        };
        MemoryForm {
            name: self.name.clone(),
            year: self.year_value().to_string(),
            department: self.department.trim().to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.trim().to_string(),
            emoji: self.emoji.clone(),
            image_path,
        }
    }
}

/// One rendered card on the wall. Expansion state lives here only; it is
/// never persisted and resets on every reload.
#[derive(Debug, Clone)]
pub struct Card {
    /// The record this card displays.
    pub record: MemoryRecord,
    /// Whether the details panel is shown.
    pub expanded: bool,
}

/// The memory wall: an explicit in-memory working set owned by the renderer.
#[derive(Debug, Default)]
pub struct Wall {
    /// Cards in display order, newest first.
    pub cards: Vec<Card>,
    /// Index of the selected card.
    pub selected: usize,
}

impl Wall {
    /// Empty wall.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set. Sorts newest first; storage order is not
    /// touched. All expansion state resets.
    pub fn load(&mut self, mut records: Vec<MemoryRecord>) {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!("wall loaded (count={})", records.len());
        self.cards = records
            .into_iter()
            .map(|record| Card {
                record,
                expanded: false,
            })
            .collect();
        self.selected = 0;
    }

    /// Whether the wall has no cards to show.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Move the selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    /// Flip the selected card between collapsed and expanded.
    pub fn toggle_selected(&mut self) {
        if let Some(card) = self.cards.get_mut(self.selected) {
            card.expanded = !card.expanded;
            debug!(
                "card toggled (id={}, expanded={})",
                card.record.id, card.expanded
            );
        }
    }
}

/// Blocking dialog shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Validation failed; the joined messages block submission.
    ValidationErrors(Vec<String>),
    /// Image load or store write failed; nothing was saved.
    SubmitError(String),
    /// The memory was saved.
    Saved,
    /// Yes/no offer to navigate to the wall.
    ConfirmWall,
}

/// Top-level application state.
pub struct App {
    /// Active screen.
    pub page: Page,
    /// Submission form state.
    pub form: FormState,
    /// Wall working set and card state.
    pub wall: Wall,
    /// Currently shown dialog, if any. A visible dialog captures all input.
    pub dialog: Option<Dialog>,
    /// Whether a submission is in flight. The form refuses a second submit
    /// until the outcome arrives.
    pub submitting: bool,
    /// Status line text.
    pub status: String,
    /// Slot path shown in the header.
    pub slot_path: String,
}

impl App {
    /// Create application state starting on the given page.
    pub fn new(page: Page, slot_path: String) -> Self {
        Self {
            page,
            form: FormState::new(),
            wall: Wall::new(),
            dialog: None,
            submitting: false,
            status: "idle".to_string(),
            slot_path,
        }
    }

    /// Switch the active screen.
    pub fn goto(&mut self, page: Page) {
        info!("switching page (page={page:?})");
        self.page = page;
    }

    /// Update the status line.
    pub fn push_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Dialog, FormField, FormState, Page, Wall};
    use chrono::{Local, TimeZone};
    use keepsake_core::codec::build_record;
    use keepsake_core::{MemoryForm, MemoryRecord, VALID_YEARS};
    use pretty_assertions::assert_eq;

    fn record(title: &str, second: u32) -> MemoryRecord {
        let form = MemoryForm {
            name: "Sam".to_string(),
            year: "Junior".to_string(),
            department: "CS".to_string(),
            title: title.to_string(),
            description: "Survived on no sleep".to_string(),
            category: "Pain".to_string(),
            emoji: String::new(),
            image_path: None,
        };
        let now = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap();
        build_record(&form, None, now)
    }

    #[test]
    fn wall_sorts_newest_first_regardless_of_insertion_order() {
        let mut wall = Wall::new();
        wall.load(vec![record("old", 0), record("newest", 2), record("mid", 1)]);
        let titles: Vec<&str> = wall
            .cards
            .iter()
            .map(|card| card.record.title.as_str())
            .collect();
        assert_eq!(titles, vec!["newest", "mid", "old"]);
    }

    #[test]
    fn toggle_is_reversible_and_local_to_one_card() {
        let mut wall = Wall::new();
        wall.load(vec![record("a", 0), record("b", 1)]);
        wall.toggle_selected();
        assert!(wall.cards[0].expanded);
        assert!(!wall.cards[1].expanded);
        wall.toggle_selected();
        assert!(!wall.cards[0].expanded);
    }

    #[test]
    fn reload_resets_expansion_state() {
        let mut wall = Wall::new();
        wall.load(vec![record("a", 0)]);
        wall.toggle_selected();
        assert!(wall.cards[0].expanded);
        wall.load(vec![record("a", 0)]);
        assert!(!wall.cards[0].expanded);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut wall = Wall::new();
        wall.load(vec![record("a", 0), record("b", 1)]);
        wall.select_prev();
        assert_eq!(wall.selected, 0);
        wall.select_next();
        wall.select_next();
        assert_eq!(wall.selected, 1);
    }

    #[test]
    fn year_cycles_through_the_closed_set_and_clears() {
        let mut form = FormState::new();
        assert_eq!(form.year_value(), "");
        form.cycle_year(true);
        assert_eq!(form.year_value(), VALID_YEARS[0]);
        for _ in 1..VALID_YEARS.len() {
            form.cycle_year(true);
        }
        assert_eq!(form.year_value(), VALID_YEARS[VALID_YEARS.len() - 1]);
        form.cycle_year(true);
        assert_eq!(form.year_value(), "");
        form.cycle_year(false);
        assert_eq!(form.year_value(), VALID_YEARS[VALID_YEARS.len() - 1]);
    }

    #[test]
    fn focus_moves_through_fields_and_stops_at_the_edges() {
        let mut form = FormState::new();
        assert_eq!(form.focus, Some(FormField::Name));
        form.focus_prev();
        assert_eq!(form.focus, Some(FormField::Name));
        for _ in 0..FormField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.focus, Some(FormField::Image));
        assert!(form.focus.unwrap().is_last());
    }

    #[test]
    fn to_form_gathers_typed_values() {
        let mut form = FormState::new();
        for ch in "Sam".chars() {
            form.push_char(ch);
        }
        form.focus = Some(FormField::Image);
        for ch in "  /tmp/photo.png  ".chars() {
            form.push_char(ch);
        }
        form.cycle_year(true);
        let gathered = form.to_form();
        assert_eq!(gathered.name, "Sam");
        assert_eq!(gathered.year, VALID_YEARS[0]);
        assert_eq!(
            gathered.image_path.as_deref(),
            Some(std::path::Path::new("/tmp/photo.png"))
        );
    }

    #[test]
    fn empty_image_input_means_no_image() {
        let form = FormState::new();
        assert_eq!(form.to_form().image_path, None);
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = FormState::new();
        form.push_char('x');
        form.cycle_year(true);
        form.reset();
        assert_eq!(form.name, "");
        assert_eq!(form.year, None);
        assert_eq!(form.focus, Some(FormField::Name));
    }

    #[test]
    fn app_starts_idle_on_the_requested_page() {
        let app = App::new(Page::Wall, "memories.json".to_string());
        assert_eq!(app.page, Page::Wall);
        assert_eq!(app.dialog, None);
        assert!(!app.submitting);
        assert_eq!(app.status, "idle");
    }

    #[test]
    fn dialogs_compare_by_content() {
        let a = Dialog::ValidationErrors(vec!["Year is required".to_string()]);
        let b = Dialog::ValidationErrors(vec!["Year is required".to_string()]);
        assert_eq!(a, b);
    }
}
