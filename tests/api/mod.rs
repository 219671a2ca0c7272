//! REST API endpoint tests

mod device_tests;
mod health_tests;
mod user_tests;
