//! Appointment calendar: a month/year cursor, the availability table,
//! and the date/time selection state machine. Rendering is a stateless
//! projection (`month_grid`) over the state, so the grid logic is
//! testable without a DOM.

use crate::error::BookingError;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// date -> ordered time labels. Shared immutable reference data;
/// booking never consumes a slot (double-booking is possible by
/// design of the demo data, see DESIGN.md).
pub type AvailabilityTable = BTreeMap<NaiveDate, Vec<String>>;

/// The fixed demo availability.
pub fn demo_availability() -> AvailabilityTable {
    let slots = |y, m, d, times: &[&str]| {
        (
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            times.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
        )
    };
    BTreeMap::from([
        slots(2025, 10, 29, &["9:00 AM", "10:00 AM", "11:00 AM", "2:00 PM", "3:00 PM"]),
        slots(2025, 10, 30, &["10:00 AM", "11:00 AM", "1:00 PM", "4:00 PM"]),
        slots(2025, 11, 5, &["9:30 AM", "10:30 AM", "2:30 PM"]),
    ])
}

/// What the visitor has picked so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Date(NaiveDate),
    Slot(NaiveDate, String),
}

/// One cell of the rendered month grid. Filler cells carry the tail of
/// the previous month and are never selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub label: u32,
    pub date: Option<NaiveDate>,
    pub filler: bool,
    pub today: bool,
    pub selectable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    month: u32, // 0-based, January = 0
    year: i32,
    selection: Selection,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: today.month0(),
            year: today.year(),
            selection: Selection::None,
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match &self.selection {
            Selection::None => None,
            Selection::Date(date) | Selection::Slot(date, _) => Some(*date),
        }
    }

    pub fn selected_time(&self) -> Option<&str> {
        match &self.selection {
            Selection::Slot(_, time) => Some(time),
            _ => None,
        }
    }

    /// "October 2025" style heading.
    pub fn month_year_label(&self) -> String {
        self.first_of_month().format("%B %Y").to_string()
    }

    /// Month navigation keeps any existing selection.
    pub fn prev_month(&mut self) {
        if self.month == 0 {
            self.month = 11;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 11 {
            self.month = 0;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    /// Picking a date clears any previously selected time.
    pub fn select_date(
        &mut self,
        date: NaiveDate,
        availability: &AvailabilityTable,
    ) -> Result<(), BookingError> {
        if !availability.contains_key(&date) {
            return Err(BookingError::DateUnavailable);
        }
        self.selection = Selection::Date(date);
        Ok(())
    }

    pub fn select_time(
        &mut self,
        time: &str,
        availability: &AvailabilityTable,
    ) -> Result<(), BookingError> {
        let date = self
            .selected_date()
            .ok_or(BookingError::IncompleteSelection)?;
        let offered = availability
            .get(&date)
            .ok_or(BookingError::DateUnavailable)?;
        if !offered.iter().any(|t| t == time) {
            return Err(BookingError::TimeUnavailable);
        }
        self.selection = Selection::Slot(date, time.to_string());
        Ok(())
    }

    /// Hands back the chosen slot, or an error the UI shows as a
    /// prompt. State is untouched either way.
    pub fn book(&self) -> Result<(NaiveDate, String), BookingError> {
        match &self.selection {
            Selection::Slot(date, time) => Ok((*date, time.clone())),
            _ => Err(BookingError::IncompleteSelection),
        }
    }

    /// Grid cells for the visible month: leading filler cells from the
    /// previous month, then one cell per day tagged today/selectable/
    /// selected.
    pub fn month_grid(&self, today: NaiveDate, availability: &AvailabilityTable) -> Vec<DayCell> {
        let first = self.first_of_month();
        let leading = first.weekday().num_days_from_sunday();
        let prev_last = first.pred_opt().map(|d| d.day()).unwrap_or(0);
        let selected = self.selected_date();

        let mut cells = Vec::with_capacity(42);
        for offset in (1..=leading).rev() {
            cells.push(DayCell {
                label: prev_last - offset + 1,
                date: None,
                filler: true,
                today: false,
                selectable: false,
                selected: false,
            });
        }
        for day in 1..=self.days_in_month() {
            // month is always 0..=11, so the date exists
            let date = NaiveDate::from_ymd_opt(self.year, self.month + 1, day).unwrap();
            cells.push(DayCell {
                label: day,
                date: Some(date),
                filler: false,
                today: date == today,
                selectable: availability.contains_key(&date),
                selected: selected == Some(date),
            });
        }
        cells
    }

    fn first_of_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap()
    }

    fn days_in_month(&self) -> u32 {
        let next_first = if self.month == 11 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 2, 1)
        };
        next_first
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn october() -> CalendarState {
        CalendarState::new(date(2025, 10, 1))
    }

    #[test]
    fn select_date_then_time_then_book() {
        let availability = demo_availability();
        let mut cal = october();
        cal.select_date(date(2025, 10, 29), &availability).unwrap();
        assert_eq!(cal.selected_time(), None);
        cal.select_time("2:00 PM", &availability).unwrap();
        assert_eq!(
            cal.book().unwrap(),
            (date(2025, 10, 29), "2:00 PM".to_string())
        );
    }

    #[test]
    fn book_without_a_time_is_rejected_and_state_survives() {
        let availability = demo_availability();
        let mut cal = october();
        cal.select_date(date(2025, 10, 30), &availability).unwrap();
        assert_eq!(cal.book(), Err(BookingError::IncompleteSelection));
        assert_eq!(cal.selected_date(), Some(date(2025, 10, 30)));
    }

    #[test]
    fn book_with_nothing_selected_is_rejected() {
        assert_eq!(october().book(), Err(BookingError::IncompleteSelection));
    }

    #[test]
    fn unavailable_dates_and_times_are_rejected() {
        let availability = demo_availability();
        let mut cal = october();
        assert_eq!(
            cal.select_date(date(2025, 10, 28), &availability),
            Err(BookingError::DateUnavailable)
        );
        cal.select_date(date(2025, 10, 30), &availability).unwrap();
        assert_eq!(
            cal.select_time("2:00 PM", &availability),
            Err(BookingError::TimeUnavailable)
        );
    }

    #[test]
    fn selecting_a_new_date_clears_the_time() {
        let availability = demo_availability();
        let mut cal = october();
        cal.select_date(date(2025, 10, 29), &availability).unwrap();
        cal.select_time("9:00 AM", &availability).unwrap();
        cal.select_date(date(2025, 10, 30), &availability).unwrap();
        assert_eq!(cal.selected_time(), None);
        assert_eq!(cal.book(), Err(BookingError::IncompleteSelection));
    }

    #[test]
    fn month_rollover_in_both_directions() {
        let mut cal = CalendarState::new(date(2025, 12, 15));
        cal.next_month();
        assert_eq!((cal.year(), cal.month()), (2026, 0));
        cal.prev_month();
        assert_eq!((cal.year(), cal.month()), (2025, 11));
    }

    #[test]
    fn navigation_keeps_the_selection() {
        let availability = demo_availability();
        let mut cal = october();
        cal.select_date(date(2025, 10, 29), &availability).unwrap();
        cal.next_month();
        cal.next_month();
        assert_eq!(cal.selected_date(), Some(date(2025, 10, 29)));
    }

    #[test]
    fn october_2025_grid_has_three_fillers_from_september() {
        // October 1st 2025 is a Wednesday; September has 30 days.
        let availability = demo_availability();
        let cal = october();
        let grid = cal.month_grid(date(2025, 10, 1), &availability);
        let fillers: Vec<u32> = grid.iter().filter(|c| c.filler).map(|c| c.label).collect();
        assert_eq!(fillers, vec![28, 29, 30]);
        assert_eq!(grid.len(), 3 + 31);
    }

    #[test]
    fn grid_tags_today_selectable_and_selected() {
        let availability = demo_availability();
        let mut cal = october();
        cal.select_date(date(2025, 10, 29), &availability).unwrap();
        let grid = cal.month_grid(date(2025, 10, 30), &availability);

        let cell = |day: u32| grid.iter().find(|c| !c.filler && c.label == day).unwrap();
        assert!(cell(29).selectable && cell(29).selected && !cell(29).today);
        assert!(cell(30).selectable && cell(30).today && !cell(30).selected);
        assert!(!cell(28).selectable && !cell(28).selected);
    }

    #[test]
    fn month_label() {
        assert_eq!(october().month_year_label(), "October 2025");
    }

    #[test]
    fn leap_february_has_29_cells_of_days() {
        let cal = CalendarState::new(date(2024, 2, 10));
        let grid = cal.month_grid(date(2024, 2, 10), &demo_availability());
        let days = grid.iter().filter(|c| !c.filler).count();
        assert_eq!(days, 29);
    }
}
