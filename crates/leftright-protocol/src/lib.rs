pub mod protocol;
pub mod ratio;

pub use protocol::{ErrorResponse, HealthResponse, RatioResponse, StarsResponse, SubmitRatioRequest};
pub use ratio::{
    parse_ratio, validate_layout_key, validate_ratio, RatioError, DEFAULT_RATIO, MAX_LAYOUT_KEY_LEN,
    MAX_RATIO, MIN_RATIO,
};
