pub use crate::core::app::App;
pub use sitecfg_types::error::{Error, ScResult};
pub use sitecfg_types::types::{Setting, SettingEntry, Timestamp, now};

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4
