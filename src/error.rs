use thiserror::Error;

/// Local input validation failures. These are rejected before any state
/// is mutated and their messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please write something before submitting.")]
    EmptyText,
    #[error("Please pick a rating between 1 and 5 stars.")]
    RatingOutOfRange,
    #[error("Unknown service: {0}")]
    UnknownService(String),
    #[error("Image is too large. Please choose an image under 5MB.")]
    ImageTooLarge,
    #[error("Only the author of a review can change it.")]
    NotAuthor,
    #[error("That review no longer exists.")]
    UnknownReview,
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please fill in your card details.")]
    MissingCardDetails,
}

/// Failures reported by the external payment collaborator. Surfaced
/// verbatim in the payment form; the form stays editable for a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Your card number is invalid.")]
    InvalidCardNumber,
    #[error("Your card's expiration date is invalid.")]
    InvalidExpiry,
    #[error("Your card's security code is invalid.")]
    InvalidCvc,
    #[error("{0}")]
    Declined(String),
}

/// Errors raised by the appointment calendar and the deposit flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("That date has no available time slots.")]
    DateUnavailable,
    #[error("That time is not available on the selected date.")]
    TimeUnavailable,
    #[error("Please select both a date and a time.")]
    IncompleteSelection,
    #[error("No deposit is configured for that service.")]
    UnknownService,
    #[error("A payment is already being processed.")]
    PaymentPending,
    #[error("No payment is due yet.")]
    NotAwaitingPayment,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}
