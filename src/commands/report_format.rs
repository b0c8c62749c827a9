use intake_forecasts::services::deadline_evaluation::Verdict;
use intake_forecasts::services::forecast_types::{ForecastReport, TruckReport};

pub fn format_forecast_report(report: &ForecastReport) -> String {
    let deadline_week = report
        .weeks
        .get(report.timeline.deadline_index)
        .map(|row| row.week.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let peak = match report.summary.peak_backlog_index.and_then(|index| report.weeks.get(index)) {
        Some(row) => format!("{:.2} IH in week {}", report.summary.peak_backlog, row.week),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!(
        "Timeline: {} - {} ({} weeks)",
        report.timeline.first_week, report.timeline.last_week, report.timeline.weeks
    ));
    lines.push(format!("Capacity: {:.2} IH/week", report.capacity_per_week));
    lines.push(format!("Rework rate: {:.2}", report.rework_rate));
    lines.push(String::new());
    lines.push("Volumes:".to_string());
    lines.push("Phase | IH".to_string());
    lines.push("------|---".to_string());
    lines.push(format_volume_row("Pre-work", report.summary.pre_work_volume));
    lines.push(format_volume_row("Pre-work overrun", report.summary.pre_work_overrun));
    lines.push(format_volume_row("Truck phase", report.summary.truck_phase_volume));
    lines.push(format_volume_row("Post-work", report.summary.post_work_volume));
    lines.push(format_volume_row("Unplaced", report.summary.unplaced_volume));
    lines.push(format_volume_row("Rework", report.summary.total_rework));
    lines.push(String::new());
    lines.push("Trucks:".to_string());
    lines.push("Truck | Arrival | Departure | IH".to_string());
    lines.push("------|---------|-----------|---".to_string());
    for truck in &report.trucks {
        lines.push(format_truck_row(report, truck));
    }
    lines.push(String::new());
    lines.push(format!("Peak backlog: {peak}"));
    lines.push(match report.verdict {
        Verdict::OnTarget => format!("Status: ON TARGET at RG {deadline_week}"),
        Verdict::Missed { amount } => {
            format!("Status: MISSED {} IH at RG {deadline_week}", amount as i64)
        }
    });

    lines.join("\n")
}

fn format_volume_row(label: &str, volume: f64) -> String {
    format!("{label} | {volume:.2}")
}

fn format_truck_row(report: &ForecastReport, truck: &TruckReport) -> String {
    let week_at = |index: usize| {
        report
            .weeks
            .get(index)
            .map(|row| row.week.to_string())
            .unwrap_or_default()
    };
    format!(
        "{} | {} | {} | {:.2}",
        truck.id,
        week_at(truck.arrival_index),
        week_at(truck.departure_index),
        truck.volume
    )
}
