//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/analytics/{series}', use [format_endpoint].

/// The root route which redirects to the home page.
pub const ROOT: &str = "/";
/// The operator's home dashboard.
pub const HOME_VIEW: &str = "/home";
/// The page listing fare transactions.
pub const ACTIVITY_VIEW: &str = "/activity";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for setting the operator's duty status.
pub const DUTY_API: &str = "/api/duty";
/// The route for fetching an analytics series as JSON.
pub const ANALYTICS_API: &str = "/api/analytics/{series}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/analytics/{series}', '{series}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
