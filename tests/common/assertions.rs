//! Custom assertion macros

/// Assert that a response carries the given status and error code
#[macro_export]
macro_rules! assert_error_response {
    ($response:expr, $status:expr, $code:expr) => {{
        let response = $response;
        assert_eq!(response.status_code(), $status);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], $code, "unexpected error body: {}", body);
        assert_eq!(body["status"], $status.as_u16());
    }};
}
