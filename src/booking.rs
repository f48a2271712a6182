//! Deposit-payment gating for a booked slot. The actual card
//! tokenization belongs to an external collaborator behind
//! [`PaymentGateway`]; this module only owns the state around it:
//! reveal the form after booking, validate locally, disable submit
//! while a charge is pending, surface gateway errors for retry, and
//! confirm on success.

use crate::error::{BookingError, PaymentError, ValidationError};
use crate::models::catalog::deposit_for;
use chrono::NaiveDate;
use futures::future::LocalBoxFuture;
use leptos::logging::log;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String, // MM/YY
    pub cvc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
}

/// Opaque token handed back by the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodToken {
    pub id: String,
}

/// The external payment capability. Implementations must not block;
/// the returned future either yields a token or an error message the
/// UI shows verbatim.
pub trait PaymentGateway {
    fn create_payment_method(
        &self,
        card: &CardDetails,
        billing: &BillingDetails,
    ) -> LocalBoxFuture<'static, Result<PaymentMethodToken, PaymentError>>;
}

/// Stand-in gateway for the demo site: structural card checks, a short
/// simulated processing delay in the browser, then a fresh token.
#[derive(Default, Clone)]
pub struct DemoGateway;

impl DemoGateway {
    pub fn new() -> Self {
        Self
    }
}

/// Structural card checks the demo gateway applies before tokenizing.
pub fn check_card(card: &CardDetails) -> Result<(), PaymentError> {
    let digits: String = card.number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() < 12 || digits.len() > 19 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PaymentError::InvalidCardNumber);
    }
    let (month, year) = card
        .expiry
        .split_once('/')
        .ok_or(PaymentError::InvalidExpiry)?;
    let month: u32 = month.trim().parse().map_err(|_| PaymentError::InvalidExpiry)?;
    let year: u32 = year.trim().parse().map_err(|_| PaymentError::InvalidExpiry)?;
    if !(1..=12).contains(&month) || year > 99 {
        return Err(PaymentError::InvalidExpiry);
    }
    if card.cvc.len() < 3 || card.cvc.len() > 4 || !card.cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(PaymentError::InvalidCvc);
    }
    Ok(())
}

impl PaymentGateway for DemoGateway {
    fn create_payment_method(
        &self,
        card: &CardDetails,
        _billing: &BillingDetails,
    ) -> LocalBoxFuture<'static, Result<PaymentMethodToken, PaymentError>> {
        let card = card.clone();
        Box::pin(async move {
            check_card(&card)?;
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(650).await;
            Ok(PaymentMethodToken {
                id: format!("pm_{}", Uuid::new_v4().simple()),
            })
        })
    }
}

/// The deposit form as the visitor filled it in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepositForm {
    pub service_id: String,
    pub name: String,
    pub email: String,
    pub card: CardDetails,
}

impl DepositForm {
    /// Local checks run before the gateway is ever contacted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if self.card.number.trim().is_empty()
            || self.card.expiry.trim().is_empty()
            || self.card.cvc.trim().is_empty()
        {
            return Err(ValidationError::MissingCardDetails);
        }
        Ok(())
    }

    pub fn billing(&self) -> BillingDetails {
        BillingDetails {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// What the confirmation panel shows after a successful deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub service: String,
    pub deposit: u32,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowStage {
    #[default]
    SelectingSlot,
    PaymentDue {
        date: NaiveDate,
        time: String,
    },
    Confirmed(Confirmation),
}

#[derive(Debug, Clone, Default)]
pub struct BookingFlow {
    stage: FlowStage,
    processing: bool,
    error: Option<String>,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &FlowStage {
        &self.stage
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reveals the deposit form for a booked slot.
    pub fn begin_payment(&mut self, date: NaiveDate, time: String) {
        self.stage = FlowStage::PaymentDue { date, time };
        self.error = None;
    }

    pub fn start_processing(&mut self) {
        self.processing = true;
        self.error = None;
    }

    pub fn complete(&mut self, confirmation: Confirmation) {
        self.stage = FlowStage::Confirmed(confirmation);
        self.processing = false;
        self.error = None;
    }

    /// Gateway or validation failure: keep the form editable and show
    /// the message.
    pub fn fail(&mut self, message: String) {
        self.processing = false;
        self.error = Some(message);
    }

    /// Validate, charge through the gateway, and settle the flow. On
    /// any failure the stage stays `PaymentDue` so the visitor can fix
    /// the form and resubmit.
    pub async fn submit_deposit<G: PaymentGateway>(
        &mut self,
        gateway: &G,
        form: &DepositForm,
    ) -> Result<Confirmation, BookingError> {
        let (date, time) = match &self.stage {
            FlowStage::PaymentDue { date, time } => (*date, time.clone()),
            _ => return Err(BookingError::NotAwaitingPayment),
        };
        if self.processing {
            return Err(BookingError::PaymentPending);
        }
        let Some(option) = deposit_for(&form.service_id) else {
            self.fail(BookingError::UnknownService.to_string());
            return Err(BookingError::UnknownService);
        };
        if let Err(err) = form.validate() {
            self.fail(err.to_string());
            return Err(err.into());
        }

        self.start_processing();
        match gateway.create_payment_method(&form.card, &form.billing()).await {
            Ok(token) => {
                log!("[PAYMENT] tokenized deposit as {}", token.id);
                let confirmation = Confirmation {
                    service: option.name.to_string(),
                    deposit: option.deposit,
                    date,
                    time,
                };
                self.complete(confirmation.clone());
                Ok(confirmation)
            }
            Err(err) => {
                self.fail(err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StubGateway {
        outcome: Result<PaymentMethodToken, PaymentError>,
        calls: Rc<Cell<u32>>,
    }

    impl StubGateway {
        fn ok() -> Self {
            Self {
                outcome: Ok(PaymentMethodToken { id: "pm_test".into() }),
                calls: Rc::new(Cell::new(0)),
            }
        }

        fn declined(message: &str) -> Self {
            Self {
                outcome: Err(PaymentError::Declined(message.into())),
                calls: Rc::new(Cell::new(0)),
            }
        }
    }

    impl PaymentGateway for StubGateway {
        fn create_payment_method(
            &self,
            _card: &CardDetails,
            _billing: &BillingDetails,
        ) -> LocalBoxFuture<'static, Result<PaymentMethodToken, PaymentError>> {
            self.calls.set(self.calls.get() + 1);
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    fn slot_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 29).unwrap()
    }

    fn filled_form() -> DepositForm {
        DepositForm {
            service_id: "highlights".into(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            card: CardDetails {
                number: "4242 4242 4242 4242".into(),
                expiry: "12/27".into(),
                cvc: "123".into(),
            },
        }
    }

    fn flow_awaiting_payment() -> BookingFlow {
        let mut flow = BookingFlow::new();
        flow.begin_payment(slot_date(), "2:00 PM".into());
        flow
    }

    #[test]
    fn successful_deposit_confirms_with_service_amount_and_slot() {
        let mut flow = flow_awaiting_payment();
        let confirmation =
            block_on(flow.submit_deposit(&StubGateway::ok(), &filled_form())).unwrap();
        assert_eq!(confirmation.service, "Highlights");
        assert_eq!(confirmation.deposit, 75);
        assert_eq!(confirmation.date, slot_date());
        assert_eq!(confirmation.time, "2:00 PM");
        assert!(matches!(flow.stage(), FlowStage::Confirmed(_)));
        assert!(!flow.is_processing());
        assert!(flow.error().is_none());
    }

    #[test]
    fn gateway_failure_keeps_the_form_editable() {
        let mut flow = flow_awaiting_payment();
        let gateway = StubGateway::declined("Your card was declined.");
        let err = block_on(flow.submit_deposit(&gateway, &filled_form())).unwrap_err();
        assert!(matches!(err, BookingError::Payment(_)));
        assert_eq!(flow.error(), Some("Your card was declined."));
        assert!(matches!(flow.stage(), FlowStage::PaymentDue { .. }));
        assert!(!flow.is_processing());

        // retry after the failure goes through
        block_on(flow.submit_deposit(&StubGateway::ok(), &filled_form())).unwrap();
        assert!(matches!(flow.stage(), FlowStage::Confirmed(_)));
    }

    #[test]
    fn invalid_form_never_reaches_the_gateway() {
        let mut flow = flow_awaiting_payment();
        let gateway = StubGateway::ok();
        let mut form = filled_form();
        form.email = "not-an-email".into();
        let err = block_on(flow.submit_deposit(&gateway, &form)).unwrap_err();
        assert!(matches!(err, BookingError::Invalid(_)));
        assert_eq!(gateway.calls.get(), 0);
        assert!(flow.error().is_some());
    }

    #[test]
    fn deposit_requires_a_booked_slot() {
        let mut flow = BookingFlow::new();
        let err = block_on(flow.submit_deposit(&StubGateway::ok(), &filled_form())).unwrap_err();
        assert_eq!(err, BookingError::NotAwaitingPayment);
    }

    #[test]
    fn pending_payment_blocks_a_second_submit() {
        let mut flow = flow_awaiting_payment();
        flow.start_processing();
        let err = block_on(flow.submit_deposit(&StubGateway::ok(), &filled_form())).unwrap_err();
        assert_eq!(err, BookingError::PaymentPending);
    }

    #[test]
    fn unknown_service_has_no_deposit() {
        let mut flow = flow_awaiting_payment();
        let mut form = filled_form();
        form.service_id = "perm".into();
        let err = block_on(flow.submit_deposit(&StubGateway::ok(), &form)).unwrap_err();
        assert_eq!(err, BookingError::UnknownService);
        // surfaced like any other failure: message shown, form editable
        assert_eq!(flow.error(), Some(BookingError::UnknownService.to_string().as_str()));
        assert!(matches!(flow.stage(), FlowStage::PaymentDue { .. }));
        assert!(!flow.is_processing());
    }

    #[test]
    fn demo_gateway_rejects_structurally_bad_cards() {
        let good = filled_form().card;
        assert!(check_card(&good).is_ok());

        let mut bad = good.clone();
        bad.number = "42".into();
        assert_eq!(check_card(&bad), Err(PaymentError::InvalidCardNumber));

        let mut bad = good.clone();
        bad.expiry = "13/27".into();
        assert_eq!(check_card(&bad), Err(PaymentError::InvalidExpiry));

        let mut bad = good;
        bad.cvc = "12".into();
        assert_eq!(check_card(&bad), Err(PaymentError::InvalidCvc));
    }

    #[test]
    fn demo_gateway_tokenizes_a_valid_card() {
        let gateway = DemoGateway::new();
        let form = filled_form();
        let token = block_on(gateway.create_payment_method(&form.card, &form.billing())).unwrap();
        assert!(token.id.starts_with("pm_"));
    }
}
