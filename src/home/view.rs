//! HTML rendering for the home page.

use maud::{Markup, PreEscaped, html};

use crate::{
    analytics::{
        AnalyticsChart, AnalyticsSeries, SeriesKind, Timeframe, charts_head_script,
        charts_init_script,
    },
    config::OperatorProfile,
    endpoints,
    html::{
        CARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, PILL_ACTIVE_STYLE, PILL_INACTIVE_STYLE,
        base, format_currency, format_hours,
    },
    navigation::NavBar,
};

use super::duty::DutyStatus;

pub(super) const EARNINGS_CHART_ID: &str = "earnings-chart";
pub(super) const HOURS_CHART_ID: &str = "hours-chart";

/// The series and charts shown in the analytics section.
pub(super) struct AnalyticsCards<'a> {
    pub timeframe: Timeframe,
    pub earnings: &'a AnalyticsSeries,
    pub hours: &'a AnalyticsSeries,
    pub charts: &'a [AnalyticsChart],
}

pub(super) fn home_view(
    operator: &OperatorProfile,
    duty_status: DutyStatus,
    cards: AnalyticsCards<'_>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="space-y-4"
            {
                (operator_header(operator))
                (route_panel(operator, duty_status))
                (map_preview(operator))
                (analytics_section(&cards, false))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_head_script(cards.charts),
    ];

    base("Home", &scripts, &content)
}

fn operator_header(operator: &OperatorProfile) -> Markup {
    html!(
        header class="flex items-center justify-between"
        {
            div
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Welcome back," }
                h1 class="text-xl font-bold" { (operator.name) }
            }

            span
                class="px-3 py-1 text-sm rounded-full bg-blue-100 text-blue-800
                    dark:bg-blue-900 dark:text-blue-300"
                data-vehicle="true"
            {
                (operator.vehicle)
            }
        }
    )
}

/// The current route with the duty status toggle.
///
/// This is also the fragment returned after the duty status changes, so it
/// must be swappable on its own.
pub(super) fn route_panel(operator: &OperatorProfile, duty_status: DutyStatus) -> Markup {
    let next_status = duty_status.toggle();

    html!(
        section id="route-panel" class=(CARD_STYLE)
        {
            div class="flex items-center justify-between mb-2"
            {
                h2 class="font-semibold" { "Current Route" }

                span class=(duty_status.badge_style()) data-duty-status=(duty_status.label())
                {
                    (duty_status.label())
                }
            }

            p class="text-lg" data-route="true"
            {
                (operator.route_origin) " → " (operator.route_destination)
            }

            form
                hx-post=(endpoints::DUTY_API)
                hx-target="#route-panel"
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                class="mt-3"
            {
                input
                    type="hidden"
                    name="on_duty"
                    value=(if next_status.is_on_duty() { "true" } else { "false" });

                button
                    type="submit"
                    class="w-full py-2 text-sm font-medium text-white bg-blue-600
                        rounded-lg hover:bg-blue-700"
                {
                    (duty_status.toggle_label())
                }
            }
        }
    )
}

fn map_preview(operator: &OperatorProfile) -> Markup {
    let description = format!(
        "Map preview of the route from {} to {}",
        operator.route_origin, operator.route_destination
    );

    html!(
        section
            id="map-preview"
            role="img"
            aria-label=(description)
            class="flex items-center justify-center h-40 rounded-lg bg-gray-200
                text-gray-500 dark:bg-gray-800 dark:text-gray-400"
        {
            "Map preview"
        }
    )
}

/// The timeframe selector and the earnings and hours cards.
///
/// When `include_script` is true the chart initialisation script is placed
/// after the chart containers so that HTMX runs it after the swap.
pub(super) fn analytics_section(cards: &AnalyticsCards<'_>, include_script: bool) -> Markup {
    html!(
        section id="analytics" class="space-y-4"
        {
            nav class="flex gap-2 overflow-x-auto" aria-label="Timeframe"
            {
                @for timeframe in Timeframe::ALL {
                    @let url = format!(
                        "{}?timeframe={}",
                        endpoints::HOME_VIEW,
                        timeframe.as_query_value()
                    );
                    @let is_current = timeframe == cards.timeframe;

                    a
                        href=(url)
                        hx-get=(url)
                        hx-target="#analytics"
                        hx-swap="outerHTML"
                        hx-push-url="true"
                        class=(if is_current { PILL_ACTIVE_STYLE } else { PILL_INACTIVE_STYLE })
                        aria-current=[is_current.then_some("true")]
                    {
                        (timeframe.label())
                    }
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
            {
                (analytics_card(
                    SeriesKind::Earnings,
                    cards.timeframe,
                    &format_currency(cards.earnings.total),
                    EARNINGS_CHART_ID,
                ))
                (analytics_card(
                    SeriesKind::Hours,
                    cards.timeframe,
                    &format_hours(cards.hours.total),
                    HOURS_CHART_ID,
                ))
            }

            @if include_script {
                script { (PreEscaped(charts_init_script(cards.charts))) }
            }
        }
    )
}

fn analytics_card(kind: SeriesKind, timeframe: Timeframe, total: &str, chart_id: &str) -> Markup {
    let series_url = format!(
        "{}?timeframe={}",
        endpoints::format_endpoint(endpoints::ANALYTICS_API, kind.as_str()),
        timeframe.as_query_value()
    );

    html!(
        div class=(CARD_STYLE) data-card=(chart_id) data-series-url=(series_url)
        {
            div class="flex items-baseline justify-between"
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { (kind.title()) }
                p class="text-2xl font-bold" data-total="true" { (total) }
            }

            div id=(chart_id) class="min-h-[240px] mt-2" {}
        }
    )
}
