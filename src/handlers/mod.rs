pub mod device_handler;
pub mod health_handler;
