pub mod send_service;

pub use send_service::{SendDisposition, SendService};
