use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SUCCESS_MESSAGE: &str = "SUCCESS";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(status: u16, data: T) -> Self {
        Self {
            status,
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }
}
