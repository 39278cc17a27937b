//! Alert messages that are swapped into the page's alert container by HTMX.

use axum::response::{IntoResponse, Response};
use maud::{Markup, Render, html};

/// A dismissable error message.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        let style = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400";

        html!(
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 5rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    span class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        " " (self.details)
                    }

                    button
                        type="button"
                        class="ms-2 underline"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "Dismiss"
                    }
                }
            }
        )
    }
}

impl IntoResponse for Alert<'_> {
    fn into_response(self) -> Response {
        self.render().into_response()
    }
}
