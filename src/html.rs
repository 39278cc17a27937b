use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2 text-sm text-blue-500 \
    border border-blue-500 rounded hover:bg-blue-50 dark:hover:bg-gray-700";

pub const BUTTON_GHOST_STYLE: &str = "w-full py-2 text-blue-500 font-medium \
    hover:bg-blue-50 dark:hover:bg-gray-800 rounded-lg transition-colors text-center";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-1 text-sm text-gray-600 dark:text-gray-400";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2 rounded-lg text-sm \
    text-gray-900 dark:text-white bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Card styles
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 rounded-lg border \
    border-gray-200 dark:border-gray-700 p-4";

// Pill styles for segmented controls such as the timeframe selector.
pub const PILL_ACTIVE_STYLE: &str =
    "px-3 py-1 rounded-full text-sm whitespace-nowrap bg-blue-500 text-white";
pub const PILL_INACTIVE_STYLE: &str = "px-3 py-1 rounded-full text-sm whitespace-nowrap \
    bg-gray-100 text-gray-600 dark:bg-gray-700 dark:text-gray-300";

// Status badge style
pub const STATUS_BADGE_STYLE: &str = "px-2 py-1 bg-green-100 text-green-700 rounded \
    dark:bg-green-900 dark:text-green-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "w-full max-w-[1000px] mx-auto px-4 py-6 \
    text-gray-900 dark:text-white";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Transit Console" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" {}

                style
                {
                    r#"
                    /* Keep chart tooltips below the fixed bottom nav, but above page content. */
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-100 dark:bg-gray-900 pb-20"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 5rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Home"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("\"$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("\"-$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits trailing zeros, so whole numbers come out as "$12" and
    // "12.30" comes out as "12.3". Pad back out to two decimal places.
    match formatted_string.find('.') {
        None => formatted_string.push_str(".00"),
        Some(point) if formatted_string.len() - point == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

/// Format a number of hours with one decimal place, e.g. "32.5 hrs".
pub fn format_hours(hours: f64) -> String {
    if hours == 1.0 {
        "1.0 hr".to_owned()
    } else {
        format!("{hours:.1} hrs")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_currency, format_hours};

    #[test]
    fn formats_currency_with_two_decimal_places() {
        assert_eq!(format_currency(2.5), "$2.50");
        assert_eq!(format_currency(245.5), "$245.50");
        assert_eq!(format_currency(2.0), "$2.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(12.34), "$12.34");
    }

    #[test]
    fn formats_negative_currency() {
        assert_eq!(format_currency(-1.5), "-$1.50");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_hours(32.5), "32.5 hrs");
        assert_eq!(format_hours(1.0), "1.0 hr");
        assert_eq!(format_hours(0.0), "0.0 hrs");
    }
}
