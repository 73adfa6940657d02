//! Result views
//!
//! Clusters get a scatter chart; every other result is drawn from the same
//! text lines the headless CLI prints.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use minelab_sdk::shape::ClusterResult;
use minelab_sdk::NormalizedResult;

use crate::app::{App, ScreenTab};
use crate::render;

pub fn render_result(
    f: &mut Frame,
    area: Rect,
    block: Block,
    app: &App,
    tab: &ScreenTab,
    result: &NormalizedResult,
) {
    if let NormalizedResult::Cluster(clusters) = result {
        if !clusters.clusters.is_empty() {
            render_cluster_chart(f, area, block, clusters);
            return;
        }
    }

    let lines: Vec<Line> = render::result_lines(result, &app.config.api_url)
        .into_iter()
        .map(|line| {
            if line.starts_with(' ') {
                Line::from(line)
            } else {
                Line::from(Span::styled(line, Style::default().add_modifier(Modifier::BOLD)))
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((tab.result_scroll, 0));
    f.render_widget(paragraph, area);
}

/// Smallest and largest value, padded so points never sit on the axis
fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.05).max(0.5);
    [min - pad, max + pad]
}

fn render_cluster_chart(f: &mut Frame, area: Rect, block: Block, result: &ClusterResult) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)])
        .split(inner);

    let series: Vec<Vec<(f64, f64)>> = result
        .clusters
        .iter()
        .map(|s| s.points.iter().map(|[x, y]| (*x, *y)).collect())
        .collect();
    let centroids: Vec<(f64, f64)> = result
        .centroids
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect();

    let all_points = || series.iter().flatten().chain(centroids.iter());
    let x_bounds = bounds(all_points().map(|(x, _)| *x));
    let y_bounds = bounds(all_points().map(|(_, y)| *y));

    let mut datasets: Vec<Dataset> = result
        .clusters
        .iter()
        .zip(&series)
        .enumerate()
        .map(|(i, (cluster, points))| {
            Dataset::default()
                .name(format!("Cluster {}", cluster.label))
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(render::cluster_color(i)))
                .data(points)
        })
        .collect();
    if !centroids.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Centroids")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&centroids),
        );
    }

    let axis_labels = |[lo, hi]: [f64; 2]| {
        vec![
            Span::raw(format!("{:.1}", lo)),
            Span::raw(format!("{:.1}", (lo + hi) / 2.0)),
            Span::raw(format!("{:.1}", hi)),
        ]
    };

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    f.render_widget(chart, chunks[0]);

    let mut legend = vec![Line::from(Span::styled(
        format!("{} points", result.point_count),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, cluster) in result.clusters.iter().enumerate() {
        legend.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(render::cluster_color(i))),
            Span::raw(format!("Cluster {}: {}", cluster.label, cluster.points.len())),
        ]));
    }
    for (i, (x, y)) in centroids.iter().enumerate() {
        legend.push(Line::from(Span::styled(
            format!(
                "█ Centroid {}: ({}, {})",
                i,
                render::format_measure(*x),
                render::format_measure(*y)
            ),
            Style::default().fg(Color::White),
        )));
    }
    f.render_widget(Paragraph::new(legend).wrap(Wrap { trim: true }), chunks[1]);
}
