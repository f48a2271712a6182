pub mod appointment;
pub mod home;
pub mod reviews;
pub mod services;
