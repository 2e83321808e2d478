//! Terminal rendering of alert reports.

use std::fmt::Write;

use database::AlertReport;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "EVENT")]
    event: String,
    #[tabled(rename = "ALERTS")]
    alert_count: i64,
}

#[derive(Tabled)]
struct SeverityRow {
    #[tabled(rename = "SEVERITY")]
    severity: String,
    #[tabled(rename = "ALERTS")]
    alert_count: i64,
    #[tabled(rename = "PERCENT")]
    percentage: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "METRIC")]
    metric: &'static str,
    #[tabled(rename = "COUNT")]
    count: i64,
}

#[derive(Tabled)]
struct ExpirationRow {
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "COUNT")]
    count: i64,
}

#[derive(Tabled)]
struct AreaRow {
    #[tabled(rename = "AREA")]
    area_desc: String,
    #[tabled(rename = "ACTIVE")]
    active_alerts: i64,
}

#[derive(Tabled)]
struct UrgentRow {
    #[tabled(rename = "EVENT")]
    event: String,
    #[tabled(rename = "AREA")]
    area_desc: String,
    #[tabled(rename = "SEVERITY")]
    severity: String,
    #[tabled(rename = "URGENCY")]
    urgency: String,
    #[tabled(rename = "MINUTES LEFT")]
    minutes: String,
}

#[derive(Tabled)]
struct QualityRow {
    #[tabled(rename = "COLUMN")]
    column: String,
    #[tabled(rename = "NON-NULL")]
    non_null_count: i64,
    #[tabled(rename = "NULL")]
    null_count: i64,
    #[tabled(rename = "NULL %")]
    null_percentage: String,
}

/// Render every report section as titled tables, in display order.
pub fn render_report(report: &AlertReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "WEATHER ALERT REPORTS (as of {})",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    section(&mut out, "1. COUNT OF ALERTS BY EVENT TYPE");
    table_or_empty(
        &mut out,
        report.event_counts.iter().map(|row| EventRow {
            event: row.event.clone(),
            alert_count: row.alert_count,
        }),
        "No alerts with an event type.",
    );

    section(&mut out, "2. ALERTS BY SEVERITY LEVEL");
    table_or_empty(
        &mut out,
        report.severity_distribution.iter().map(|row| SeverityRow {
            severity: or_dash(row.severity.as_deref()),
            alert_count: row.alert_count,
            percentage: format!("{:.2}", row.percentage),
        }),
        "No alerts stored.",
    );

    section(&mut out, "3. ALERTS IN TEXAS");
    table_or_empty(
        &mut out,
        [
            MetricRow {
                metric: "texas_alerts",
                count: report.texas.texas_alerts,
            },
            MetricRow {
                metric: "texas_alerts_this_week",
                count: report.texas.texas_alerts_this_week,
            },
        ],
        "",
    );

    section(&mut out, "4. EXPIRATION STATUS");
    table_or_empty(
        &mut out,
        report.expiration_status.iter().map(|row| ExpirationRow {
            status: row.status.to_string(),
            count: row.count,
        }),
        "No alerts stored.",
    );

    section(&mut out, "5. TOP AREAS BY NUMBER OF ACTIVE ALERTS");
    table_or_empty(
        &mut out,
        report.top_active_areas.iter().map(|row| AreaRow {
            area_desc: row.area_desc.clone(),
            active_alerts: row.active_alerts,
        }),
        "No active alerts.",
    );

    section(&mut out, "6. URGENT ALERTS NEEDING IMMEDIATE ACTION");
    table_or_empty(
        &mut out,
        report.urgent_alerts.iter().map(|row| UrgentRow {
            event: or_dash(row.event.as_deref()),
            area_desc: or_dash(row.area_desc.as_deref()),
            severity: or_dash(row.severity.as_deref()),
            urgency: or_dash(row.urgency.as_deref()),
            minutes: row
                .minutes_until_expiration
                .map(|m| m.to_string())
                .unwrap_or_else(|| "no expiry".to_string()),
        }),
        "No immediate urgent alerts found.",
    );

    let summary = &report.summary;
    section(&mut out, "7. SUMMARY STATISTICS");
    table_or_empty(
        &mut out,
        [
            ("total_alerts", summary.total_alerts),
            ("actual_alerts", summary.actual_alerts),
            ("test_alerts", summary.test_alerts),
            ("immediate_alerts", summary.immediate_alerts),
            ("severe_alerts", summary.severe_alerts),
            ("extreme_alerts", summary.extreme_alerts),
        ]
        .map(|(metric, count)| MetricRow { metric, count }),
        "",
    );

    section(&mut out, "8. DATA QUALITY");
    table_or_empty(
        &mut out,
        report.data_quality.iter().map(|row| QualityRow {
            column: row.column.clone(),
            non_null_count: row.non_null_count,
            null_count: row.null_count,
            null_percentage: format!("{:.2}", row.null_percentage),
        }),
        "No columns.",
    );

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}:", title);
    let _ = writeln!(out, "{}", "-".repeat(SECTION_RULE_WIDTH));
}

fn table_or_empty<T, I>(out: &mut String, rows: I, empty_message: &str)
where
    T: Tabled,
    I: IntoIterator<Item = T>,
{
    let rows: Vec<T> = rows.into_iter().collect();
    if rows.is_empty() {
        let _ = writeln!(out, "{}", empty_message);
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    let _ = writeln!(out, "{}", table);
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
