pub mod booking_service;
pub mod payment_service;
pub mod token_service;
