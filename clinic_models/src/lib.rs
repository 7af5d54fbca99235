pub mod booking;
pub mod contact;
pub mod email_address;
