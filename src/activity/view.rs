//! HTML rendering for the activity page.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    endpoints,
    html::{
        BUTTON_GHOST_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, STATUS_BADGE_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    registry::{PASSENGER_TYPES, StopRegistry, passenger_type_info},
    transaction::{PassengerType, Transaction},
};

use super::{
    activity_page::ActivityQuery,
    filter::{DayGroup, FilterCriteria},
};

const DAY_HEADING_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// The filtered, grouped transactions ready for display.
pub(super) struct ActivityResults<'a> {
    pub days: Vec<DayGroup<'a>>,
    /// The number of transactions that matched the filters.
    pub match_count: usize,
    /// How many matching transactions are hidden behind "See more".
    pub hidden_count: usize,
    pub see_more_url: Option<String>,
    pub is_filtered: bool,
}

pub(super) fn activity_view(
    query: &ActivityQuery,
    criteria: &FilterCriteria,
    stops: &StopRegistry,
    results: &ActivityResults<'_>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACTIVITY_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="space-y-4 lg:max-w-3xl lg:mx-auto"
            {
                header class="flex justify-between items-end"
                {
                    h1 class="text-xl font-bold" { "Activity" }
                }

                (filter_form(query, criteria, stops))
                (activity_results_view(results))
            }
        }
    );

    base("Activity", &[], &content)
}

fn filter_form(query: &ActivityQuery, criteria: &FilterCriteria, stops: &StopRegistry) -> Markup {
    let selected_passenger_type = criteria.passenger_type;

    html!(
        form
            action=(endpoints::ACTIVITY_VIEW)
            method="get"
            hx-get=(endpoints::ACTIVITY_VIEW)
            hx-target="#activity-results"
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-trigger="change, keyup changed delay:300ms from:input[name='search']"
            class="space-y-3"
        {
            input
                type="search"
                name="search"
                aria-label="Search transactions"
                placeholder="Search by type, stop or transaction ID"
                value=[query.search.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);

            details
                id="filters"
                open[criteria.has_field_filters()]
                class=(CARD_STYLE)
            {
                summary class="cursor-pointer font-medium" { "Filters" }

                div class="grid grid-cols-1 sm:grid-cols-2 gap-3 mt-3"
                {
                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                        input
                            type="date"
                            id="date"
                            name="date"
                            value=[query.date.as_deref().filter(|date| !date.is_empty())]
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="passenger_type" class=(FORM_LABEL_STYLE) { "Passenger Type" }
                        select id="passenger_type" name="passenger_type" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" selected[selected_passenger_type.is_none()] { "Any" }

                            @for info in &PASSENGER_TYPES {
                                option
                                    value=(info.passenger_type)
                                    selected[selected_passenger_type == Some(info.passenger_type)]
                                {
                                    (info.label)
                                }
                            }
                        }
                    }

                    (stop_select("origin", "From", criteria.origin.as_deref(), stops))
                    (stop_select("destination", "To", criteria.destination.as_deref(), stops))
                }

                div class="flex gap-3 mt-3"
                {
                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply" }
                    a href=(endpoints::ACTIVITY_VIEW) class=(BUTTON_GHOST_STYLE) { "Clear all" }
                }
            }
        }
    )
}

fn stop_select(name: &str, label: &str, selected: Option<&str>, stops: &StopRegistry) -> Markup {
    html!(
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            select id=(name) name=(name) class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[selected.is_none()] { "Any stop" }

                @for stop in stops.stops() {
                    option value=(stop) selected[selected == Some(stop.as_str())] { (stop) }
                }
            }
        }
    )
}

/// The list of matching transactions grouped by day.
///
/// This is also the fragment returned for HTMX requests from the filter form.
pub(super) fn activity_results_view(results: &ActivityResults<'_>) -> Markup {
    let count_label = match results.match_count {
        1 => "1 transaction".to_owned(),
        count => format!("{count} transactions"),
    };

    html!(
        section id="activity-results" class="space-y-4"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" data-match-count=(results.match_count)
            {
                (count_label)
            }

            @if results.match_count == 0 {
                div class={ (CARD_STYLE) " text-center" } data-empty-state="true"
                {
                    p class="mb-2"
                    {
                        @if results.is_filtered {
                            "No transactions match these filters."
                        } @else {
                            "No transactions yet."
                        }
                    }

                    @if results.is_filtered {
                        a href=(endpoints::ACTIVITY_VIEW) class=(LINK_STYLE) { "Clear all" }
                    }
                }
            }

            @for day in &results.days {
                div class="space-y-2"
                {
                    h3
                        class="text-sm font-semibold text-gray-500 dark:text-gray-400"
                        data-day=(day.date)
                    {
                        (day_heading(day.date))
                    }

                    ul class="space-y-2"
                    {
                        @for transaction in &day.transactions {
                            (transaction_card(transaction))
                        }
                    }
                }
            }

            @if let Some(url) = &results.see_more_url {
                a
                    href=(url)
                    hx-get=(url)
                    hx-target="#activity-results"
                    hx-swap="outerHTML"
                    hx-push-url="true"
                    data-see-more="true"
                    class={ "block " (BUTTON_GHOST_STYLE) }
                {
                    "See more (" (results.hidden_count) ")"
                }
            }
        }
    )
}

fn day_heading(date: Date) -> String {
    date.format(DAY_HEADING_FORMAT)
        .inspect_err(|error| tracing::error!("Could not format date {date}: {error}"))
        .unwrap_or_else(|_| date.to_string())
}

fn passenger_icon(passenger_type: PassengerType) -> &'static str {
    match passenger_type {
        PassengerType::Adult => "🧑",
        PassengerType::Child => "🧒",
        PassengerType::Student => "🎓",
        PassengerType::Senior => "🧓",
    }
}

fn transaction_card(transaction: &Transaction) -> Markup {
    let info = passenger_type_info(transaction.passenger_type);

    html!(
        li class=(CARD_STYLE) data-transaction-id=(transaction.transaction_id)
        {
            div class="flex items-start justify-between gap-3"
            {
                div class="flex items-start gap-3"
                {
                    span class="text-2xl" aria-hidden="true" { (passenger_icon(transaction.passenger_type)) }

                    div
                    {
                        p class="font-medium" { (info.label) }
                        p class="text-sm text-gray-600 dark:text-gray-300"
                        {
                            (transaction.origin) " → " (transaction.destination)
                        }
                        p class="text-xs text-gray-500 dark:text-gray-400"
                        {
                            (transaction.formatted_time())
                            " · "
                            (transaction.payment_method)
                            " · "
                            (transaction.transaction_id)
                        }
                    }
                }

                div class="text-right space-y-1"
                {
                    p class="font-semibold" data-fare="true" { (format_currency(transaction.fare)) }
                    span class={ "text-xs " (STATUS_BADGE_STYLE) } { (transaction.status) }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{PassengerType, sample_transactions};

    use super::{ActivityResults, activity_results_view, day_heading, passenger_icon};
    use crate::activity::filter::{FilterCriteria, apply, group_by_day};

    #[test]
    fn day_heading_uses_long_month() {
        assert_eq!(day_heading(date!(2024 - 12 - 01)), "December 1, 2024");
        assert_eq!(day_heading(date!(2025 - 03 - 15)), "March 15, 2025");
    }

    #[test]
    fn every_passenger_type_has_an_icon() {
        for passenger_type in PassengerType::ALL {
            assert!(!passenger_icon(passenger_type).is_empty());
        }
    }

    #[test]
    fn card_shows_fare_route_and_status() {
        let transactions = sample_transactions();
        let filtered = apply(&transactions, &FilterCriteria::default());
        let results = ActivityResults {
            days: group_by_day(&filtered[..1]),
            match_count: 1,
            hidden_count: 0,
            see_more_url: None,
            is_filtered: false,
        };

        let html = Html::parse_fragment(&activity_results_view(&results).into_string());
        let card = html
            .select(&Selector::parse("li[data-transaction-id='#TXN001']").unwrap())
            .next()
            .expect("card missing");
        let text = card.text().collect::<String>();

        assert!(text.contains("Adult"));
        assert!(text.contains("St. Peters → Philipsburg"));
        assert!(text.contains("09:30 AM"));
        assert!(text.contains("Cash"));
        assert!(text.contains("$2.50"));
        assert!(text.contains("Completed"));
        assert_eq!(
            html.select(&Selector::parse("[data-match-count]").unwrap())
                .next()
                .map(|element| element.text().collect::<String>()),
            Some("1 transaction".to_owned())
        );
    }

    #[test]
    fn empty_unfiltered_list_has_no_clear_link() {
        let results = ActivityResults {
            days: Vec::new(),
            match_count: 0,
            hidden_count: 0,
            see_more_url: None,
            is_filtered: false,
        };

        let html = Html::parse_fragment(&activity_results_view(&results).into_string());
        let empty_state = html
            .select(&Selector::parse("[data-empty-state]").unwrap())
            .next()
            .expect("empty state missing");

        assert!(
            empty_state
                .text()
                .collect::<String>()
                .contains("No transactions yet.")
        );
        assert!(
            empty_state
                .select(&Selector::parse("a").unwrap())
                .next()
                .is_none()
        );
    }
}
