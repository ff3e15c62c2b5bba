pub mod device_routes;
pub mod health_routes;
