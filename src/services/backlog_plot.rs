use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::domain::milestone::MilestoneKind;
use crate::services::deadline_evaluation::Verdict;
use crate::services::forecast::{Forecast, ForecastError, forecast_from_yaml_file};

#[derive(Error, Debug)]
pub enum BacklogPlotError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error("failed to render backlog chart: {0}")]
    Plot(String),
}

const OUTPUT_COLOR: RGBColor = RGBColor(0, 95, 158);
const START_COLOR: RGBColor = RGBColor(0, 0, 255);
const ARRIVAL_COLOR: RGBColor = RGBColor(0, 128, 0);
const DEPARTURE_COLOR: RGBColor = RGBColor(255, 165, 0);

pub fn plot_backlog_from_yaml_file(
    input_path: &str,
    output_path: &str,
) -> Result<(), BacklogPlotError> {
    let forecast = forecast_from_yaml_file(input_path)?;
    write_backlog_chart_png(output_path, &forecast)
}

pub fn write_backlog_chart_png(
    output_path: &str,
    forecast: &Forecast,
) -> Result<(), BacklogPlotError> {
    render_chart_png(output_path, forecast).map_err(BacklogPlotError::Plot)
}

fn milestone_color(kind: MilestoneKind) -> RGBColor {
    match kind {
        MilestoneKind::Fdg => RGBColor(128, 0, 128),
        MilestoneKind::CBuild => RGBColor(212, 175, 55),
        MilestoneKind::Fig => RGBColor(165, 42, 42),
        MilestoneKind::Rg => BLACK,
    }
}

fn render_chart_png(output_path: &str, forecast: &Forecast) -> Result<(), String> {
    let steps = forecast.run.steps();
    let weeks = forecast.timeline.weeks();
    let capacity = forecast.run.capacity();

    let max_generated = steps
        .iter()
        .map(|step| step.generated)
        .fold(0.0_f64, f64::max);
    let mut max_y = max_generated.max(capacity);
    if max_y <= 0.0 {
        max_y = 10.0;
    }
    let y_top = max_y * 1.6;
    let x_end = steps.len().max(1) as f64;

    let root = BitMapBackend::new(output_path, (1600, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Infoheader Intake vs. Team Output", ("sans-serif", 30))
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_end, 0.0..y_top)
        .map_err(|e| e.to_string())?;

    let label_step = if steps.len() < 80 { 2 } else { 4 };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Week (YYWW)")
        .y_desc("Infoheaders")
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 20))
        .x_labels(steps.len() / label_step + 1)
        .x_label_formatter(&|value| {
            if *value < 0.0 {
                return String::new();
            }
            weeks
                .get(value.floor() as usize)
                .map(|week| week.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(steps.iter().enumerate().map(|(index, step)| {
            let x = index as f64;
            Rectangle::new([(x + 0.1, 0.0), (x + 0.9, step.sent)], OUTPUT_COLOR.mix(0.9).filled())
        }))
        .map_err(|e| e.to_string())?
        .label("Team Output")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], OUTPUT_COLOR.filled()));

    chart
        .draw_series(LineSeries::new(
            steps
                .iter()
                .enumerate()
                .map(|(index, step)| (index as f64 + 0.5, step.generated)),
            BLACK.stroke_width(3),
        ))
        .map_err(|e| e.to_string())?
        .label("Work Generated")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(3)));

    chart
        .draw_series(LineSeries::new(
            vec![(0.0, capacity), (x_end, capacity)],
            RED.mix(0.5).stroke_width(2),
        ))
        .map_err(|e| e.to_string())?
        .label("Capacity")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5).stroke_width(2)));

    let mut markers = vec![(
        forecast.start_index,
        format!("Start {}", forecast.scenario.work_start),
        START_COLOR,
        max_y * 1.1,
    )];
    for truck in &forecast.trucks {
        markers.push((
            truck.arrival_index,
            format!("{} arrival", truck.id),
            ARRIVAL_COLOR,
            max_y * 1.02,
        ));
        markers.push((
            truck.departure_index,
            format!("{} departure", truck.id),
            DEPARTURE_COLOR,
            max_y * 1.02,
        ));
    }
    for milestone in &forecast.milestones {
        markers.push((
            milestone.index,
            milestone.name.to_string(),
            milestone_color(milestone.name),
            max_y * 0.85,
        ));
    }
    for (index, label, color, label_y) in markers {
        let x = index as f64 + 0.5;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, 0.0), (x, y_top)],
                color.stroke_width(1),
            )))
            .map_err(|e| e.to_string())?;
        chart
            .draw_series(std::iter::once(Text::new(
                label,
                (x, label_y),
                ("sans-serif", 15).into_font().color(&color),
            )))
            .map_err(|e| e.to_string())?;
    }

    let deadline_x = forecast.deadline_index as f64;
    match forecast.verdict {
        Verdict::Missed { amount } => {
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(deadline_x, 0.0), (deadline_x + 1.0, max_y * 0.4)],
                    RED.mix(0.5).filled(),
                )))
                .map_err(|e| e.to_string())?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("MISSED: {} IH", amount as i64),
                    ((deadline_x - 5.0).max(0.0), max_y * 0.6),
                    ("sans-serif", 22).into_font().color(&RED),
                )))
                .map_err(|e| e.to_string())?;
        }
        Verdict::OnTarget => {
            chart
                .draw_series(std::iter::once(Text::new(
                    "ON TARGET".to_string(),
                    (deadline_x, max_y * 0.5),
                    ("sans-serif", 22).into_font().color(&ARRIVAL_COLOR),
                )))
                .map_err(|e| e.to_string())?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    debug!(output_path, "rendered backlog chart");
    Ok(())
}
