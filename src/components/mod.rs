pub mod booking_calendar;
pub mod header;
pub mod payment_form;
pub mod review_form;
pub mod review_summary;
pub mod reviews_list;
