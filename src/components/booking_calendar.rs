use crate::calendar::{AvailabilityTable, CalendarState};
use chrono::{NaiveDate, Utc};
use leptos::*;

/// Calendar plus time-slot picker. All transition rules live in
/// [`CalendarState`]; this component only projects the state into the
/// grid and feeds clicks back into it.
#[component]
pub fn BookingCalendar(
    state: RwSignal<CalendarState>,
    availability: StoredValue<AvailabilityTable>,
    on_book: Callback<(NaiveDate, String)>,
) -> impl IntoView {
    let book = move |_| {
        match state.with_untracked(|s| s.book()) {
            Ok(slot) => on_book.call(slot),
            Err(err) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&err.to_string());
                }
            }
        }
    };

    view! {
        <div class="appointment-section">
            <h3>{ "1. Select a Date" }</h3>
            <div class="calendar-container">
                <div class="calendar-header">
                    <button id="prev-month" on:click=move |_| state.update(|s| s.prev_month())>{ "<" }</button>
                    <h4 id="month-year">{ move || state.with(|s| s.month_year_label()) }</h4>
                    <button id="next-month" on:click=move |_| state.update(|s| s.next_month())>{ ">" }</button>
                </div>
                <div class="weekdays">
                    <div>{ "Sun" }</div><div>{ "Mon" }</div><div>{ "Tue" }</div>
                    <div>{ "Wed" }</div><div>{ "Thu" }</div><div>{ "Fri" }</div>
                    <div>{ "Sat" }</div>
                </div>
                <div class="calendar-dates">
                    {move || {
                        let today = Utc::now().date_naive();
                        let cells = availability
                            .with_value(|table| state.with(|s| s.month_grid(today, table)));
                        cells.into_iter().map(|cell| {
                            let date = cell.date;
                            let selectable = cell.selectable;
                            view! {
                                <div
                                    class="day"
                                    class:inactive={cell.filler || !cell.selectable}
                                    class:selectable={cell.selectable}
                                    class:today={cell.today}
                                    class:selected={cell.selected}
                                    on:click=move |_| {
                                        if let (true, Some(date)) = (selectable, date) {
                                            availability.with_value(|table| {
                                                state.update(|s| {
                                                    let _ = s.select_date(date, table);
                                                });
                                            });
                                        }
                                    }
                                >{ cell.label }</div>
                            }
                        }).collect_view()
                    }}
                </div>
            </div>
        </div>

        <div class="appointment-section">
            <h3>{ "2. Select a Time" }</h3>
            <div class="time-slots" id="time-slots-container">
                {move || match state.with(|s| s.selected_date()) {
                    None => view! {
                        <p id="time-selection-info">{ "Please select a date first." }</p>
                    }.into_view(),
                    Some(date) => {
                        let offered = availability
                            .with_value(|table| table.get(&date).cloned())
                            .unwrap_or_default();
                        if offered.is_empty() {
                            view! {
                                <p id="time-selection-info">{ "No available time slots for this date." }</p>
                            }.into_view()
                        } else {
                            offered.into_iter().map(|slot| {
                                let label = slot.clone();
                                let pick = slot.clone();
                                view! {
                                    <div
                                        class="time-slot"
                                        class:selected=move || {
                                            state.with(|s| s.selected_time() == Some(slot.as_str()))
                                        }
                                        on:click=move |_| {
                                            availability.with_value(|table| {
                                                state.update(|s| {
                                                    let _ = s.select_time(&pick, table);
                                                });
                                            });
                                        }
                                    >{ label }</div>
                                }
                            }).collect_view()
                        }
                    }
                }}
            </div>
        </div>

        <button id="book-appointment-btn" on:click=book>{ "Book Appointment" }</button>
    }
}
