mod logs;
mod metrics;
mod shutdown;

pub use self::logs::Logger;
pub use self::metrics::{Method, Metrics, Status, render_metrics};
pub use self::shutdown::shutdown_signal;
