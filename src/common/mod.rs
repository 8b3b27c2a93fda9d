pub mod response;
pub mod status_code;

pub use response::{ApiResponse, ResponseMeta};
pub use status_code::StatusCode;
