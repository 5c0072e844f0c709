pub use crate::error::{Error, ScResult};
pub use crate::types::{Timestamp, now};

pub use tracing::{debug, error, info, info_span, warn};

// vim: ts=4
