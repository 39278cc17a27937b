//! ECharts configuration for the home screen's analytics cards.
//!
//! Charts are built with charming and serialised as ECharts options. The
//! browser draws them with the ECharts script loaded by the home page.

use charming::{
    Chart,
    component::{Axis, Grid},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, bar::Bar},
};
use maud::PreEscaped;

use crate::html::HeadElement;

use super::aggregation::AnalyticsSeries;

/// An analytics chart with its HTML container ID and ECharts configuration.
pub(crate) struct AnalyticsChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Line chart of earnings per day.
pub fn earnings_chart(series: &AnalyticsSeries) -> Chart {
    let (labels, values) = labels_and_values(series);

    Chart::new()
        .tooltip(tooltip(currency_formatter()))
        .grid(chart_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Earnings").data(values))
}

/// Bar chart of hours worked per week.
pub fn hours_chart(series: &AnalyticsSeries) -> Chart {
    let (labels, values) = labels_and_values(series);

    Chart::new()
        .tooltip(tooltip(hours_formatter()))
        .grid(chart_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(hours_formatter())),
        )
        .series(Bar::new().name("Hours").data(values))
}

fn labels_and_values(series: &AnalyticsSeries) -> (Vec<String>, Vec<f64>) {
    series
        .points
        .iter()
        .map(|point| (point.label.clone(), point.value))
        .unzip()
}

fn chart_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top("8%")
        .contain_label(true)
}

fn tooltip(value_formatter: JsFunction) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(value_formatter)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return currencyFormatter.format(number ?? 0);",
    )
}

#[inline]
fn hours_formatter() -> JsFunction {
    JsFunction::new_with_args("number", "return `${number ?? 0} hrs`;")
}

/// JavaScript that draws `charts` into their containers.
///
/// The script runs immediately, so it must be placed after the chart
/// containers or wrapped with [charts_head_script].
pub(crate) fn charts_init_script(charts: &[AnalyticsChart]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) {{ return; }}
                    echarts.getInstanceByDom(chartDom)?.dispose();
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A head script that draws `charts` once the page has loaded.
pub(crate) fn charts_head_script(charts: &[AnalyticsChart]) -> HeadElement {
    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        charts_init_script(charts)
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::analytics::{
        AnalyticsRecord, Bucketing, Timeframe, aggregate,
    };

    use super::{AnalyticsChart, charts_init_script, earnings_chart, hours_chart};

    #[test]
    fn earnings_chart_contains_labels_and_values() {
        let records = [AnalyticsRecord {
            date: date!(2024 - 12 - 01),
            value: 245.5,
        }];
        let series = aggregate(
            &records,
            Timeframe::SevenDays,
            date!(2024 - 12 - 01),
            Bucketing::Daily,
        )
        .unwrap();

        let options = earnings_chart(&series).to_string();

        assert!(options.contains("\"line\""), "{options}");
        assert!(options.contains("\"Sun\""), "{options}");
        assert!(options.contains("245.5"), "{options}");
    }

    #[test]
    fn hours_chart_is_a_bar_chart() {
        let records = [AnalyticsRecord {
            date: date!(2024 - 12 - 01),
            value: 32.5,
        }];
        let series = aggregate(
            &records,
            Timeframe::ThirtyDays,
            date!(2024 - 12 - 01),
            Bucketing::Weekly,
        )
        .unwrap();

        let options = hours_chart(&series).to_string();

        assert!(options.contains("\"bar\""), "{options}");
        assert!(options.contains("\"Week 5\""), "{options}");
        assert!(options.contains("32.5"), "{options}");
    }

    #[test]
    fn init_script_targets_each_chart() {
        let charts = [
            AnalyticsChart {
                id: "earnings-chart",
                options: "{}".to_owned(),
            },
            AnalyticsChart {
                id: "hours-chart",
                options: "{}".to_owned(),
            },
        ];

        let script = charts_init_script(&charts);

        assert!(script.contains("document.getElementById(\"earnings-chart\")"));
        assert!(script.contains("document.getElementById(\"hours-chart\")"));
    }
}
