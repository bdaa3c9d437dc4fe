use super::responses::ApiError;

pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
