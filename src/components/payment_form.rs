use crate::booking::{BookingFlow, CardDetails, DemoGateway, DepositForm, FlowStage};
use crate::models::catalog::{deposit_for, DEPOSIT_OPTIONS};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// Deposit step revealed once a slot is booked. Validates locally,
/// hands the card to the payment collaborator, and shows either the
/// confirmation or the collaborator's error with the form left
/// editable for another try.
#[component]
pub fn PaymentForm(flow: RwSignal<BookingFlow>) -> impl IntoView {
    let (service_id, set_service_id) = create_signal(DEPOSIT_OPTIONS[0].id.to_string());
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (card_number, set_card_number) = create_signal(String::new());
    let (expiry, set_expiry) = create_signal(String::new());
    let (cvc, set_cvc) = create_signal(String::new());

    let deposit = move || {
        deposit_for(&service_id.get())
            .map(|option| option.deposit)
            .unwrap_or(0)
    };

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if flow.with_untracked(|f| f.is_processing()) {
            return;
        }
        let form = DepositForm {
            service_id: service_id.get_untracked(),
            name: name.get_untracked(),
            email: email.get_untracked(),
            card: CardDetails {
                number: card_number.get_untracked(),
                expiry: expiry.get_untracked(),
                cvc: cvc.get_untracked(),
            },
        };
        // run the submission on a copy so the signal can show the
        // processing state while the gateway call is in flight, then
        // replace it with the settled flow
        let mut settled = flow.get_untracked();
        flow.update(|f| f.start_processing());
        spawn_local(async move {
            let _ = settled.submit_deposit(&DemoGateway::new(), &form).await;
            flow.set(settled);
        });
    };

    view! {
        <div class="appointment-section">
            <h3>{ "3. Pay Your Deposit" }</h3>
            {move || match flow.with(|f| f.stage().clone()) {
                FlowStage::Confirmed(confirmation) => view! {
                    <div class="success-message">
                        <p>{ format!("Payment successful! Your deposit for {} has been processed.", confirmation.service) }</p>
                        <p>{ format!("Amount: ${}", confirmation.deposit) }</p>
                        <p>{ format!("Appointment: {} at {}", confirmation.date.format("%Y-%m-%d"), confirmation.time) }</p>
                    </div>
                }.into_view(),
                _ => view! {
                    <form on:submit=handle_submit>
                        <select on:change=move |e| set_service_id.set(event_target_value(&e))>
                            {DEPOSIT_OPTIONS.iter().map(|option| view! {
                                <option value={option.id}>
                                    { format!("{} - Deposit: ${}", option.name, option.deposit) }
                                </option>
                            }).collect_view()}
                        </select>

                        <input
                            type="text"
                            placeholder="Name"
                            prop:value=move || name.get()
                            on:input=move |e| set_name.set(event_target_value(&e))
                        />
                        <input
                            type="email"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |e| set_email.set(event_target_value(&e))
                        />
                        <input
                            type="text"
                            placeholder="Card number"
                            class="card-input"
                            prop:value=move || card_number.get()
                            on:input=move |e| set_card_number.set(event_target_value(&e))
                        />
                        <div class="card-row">
                            <input
                                type="text"
                                placeholder="MM/YY"
                                prop:value=move || expiry.get()
                                on:input=move |e| set_expiry.set(event_target_value(&e))
                            />
                            <input
                                type="text"
                                placeholder="CVC"
                                prop:value=move || cvc.get()
                                on:input=move |e| set_cvc.set(event_target_value(&e))
                            />
                        </div>

                        {move || flow.with(|f| f.error().map(|message| view! {
                            <p class="error-message">{ message.to_string() }</p>
                        }))}

                        <button
                            id="pay-btn"
                            type="submit"
                            disabled=move || flow.with(|f| f.is_processing())
                        >
                            {move || if flow.with(|f| f.is_processing()) {
                                "Processing...".to_string()
                            } else {
                                format!("Pay Deposit ${}", deposit())
                            }}
                        </button>
                    </form>
                }.into_view(),
            }}
        </div>
    }
}
