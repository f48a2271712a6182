use crate::booking::{BookingFlow, FlowStage};
use crate::calendar::{demo_availability, CalendarState};
use crate::components::booking_calendar::BookingCalendar;
use crate::components::payment_form::PaymentForm;
use chrono::{NaiveDate, Utc};
use leptos::*;

/// Appointment page: date and time selection, then the deposit step.
/// The payment form only appears once a slot has been booked.
#[component]
pub fn AppointmentPage() -> impl IntoView {
    let state = create_rw_signal(CalendarState::new(Utc::now().date_naive()));
    let availability = store_value(demo_availability());
    let flow = create_rw_signal(BookingFlow::new());

    let on_book = Callback::new(move |(date, time): (NaiveDate, String)| {
        flow.update(|f| f.begin_payment(date, time));
    });

    view! {
        <main class="container-finale">
            <BookingCalendar state=state availability=availability on_book=on_book/>
            <Show when=move || flow.with(|f| !matches!(f.stage(), FlowStage::SelectingSlot))>
                <PaymentForm flow=flow/>
            </Show>
        </main>
    }
}
