pub mod constants;
pub mod ticker;
pub mod timeout;

pub use ticker::run_ticker;
pub use timeout::TimeoutUtils;
