pub mod commission_service;
pub mod error;
pub mod notification_service;
pub mod payment_service;
