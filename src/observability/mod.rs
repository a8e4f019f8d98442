pub mod logging;

pub use logging::{init_logging, mask_email, mask_sensitive, LogConfig, LogFormat};
