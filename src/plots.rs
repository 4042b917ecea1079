use plotters::coord::Shift;
use plotters::prelude::*;

use itertools::izip;
use ndarray::{Array2, Axis};

use crate::perceptron::EpochSnapshot;

const BOUNDARY_SAMPLES: usize = 100;

fn axis_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let pad = ((max - min) * 0.2).max(1.0);
    min - pad..max + pad
}

pub fn plot_decision_boundary<DB>(
    snapshot: &EpochSnapshot,
    features: &Array2<f64>,
    labels: &[u8],
    caption: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    assert_eq!(2, features.ncols(), "can only plot 2-dimensional features");
    assert_eq!(
        features.nrows(),
        labels.len(),
        "features and labels must have the same length"
    );

    drawing_area.fill(&WHITE)?;

    let x_range = axis_range(features.column(0).iter().cloned());
    let y_range = axis_range(features.column(1).iter().cloned());

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption(caption, ("Arial", 20))
        .set_all_label_area_size(40)
        .margin(10)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("x1")
        .y_labels(10)
        .y_desc("x2")
        .draw()?;

    let points_of = |class: u8, color: RGBColor| {
        izip!(features.axis_iter(Axis(0)), labels)
            .filter(move |&(_, &label)| label == class)
            .map(move |(row, _)| Circle::new((row[0], row[1]), 4, color.filled()))
    };

    chart_context
        .draw_series(points_of(0, RED))?
        .label("class 0")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    chart_context
        .draw_series(points_of(1, BLUE))?
        .label("class 1")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    // x2 = -(w1*x1 + b) / w2, skipping samples where the boundary is vertical
    let step = (x_range.end - x_range.start) / BOUNDARY_SAMPLES as f64;
    let boundary = LineSeries::new(
        (0..=BOUNDARY_SAMPLES)
            .map(|i| x_range.start + step * i as f64)
            .map(|x| {
                (
                    x,
                    -(snapshot.weights[0] * x + snapshot.bias) / snapshot.weights[1],
                )
            })
            .filter(|(_, y)| y.is_finite()),
        &GREEN,
    );

    chart_context
        .draw_series(boundary)?
        .label("boundary")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart_context
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE)
        .draw()?;

    Ok(())
}

pub fn plot_epoch_grid<DB>(
    history: &[EpochSnapshot],
    features: &Array2<f64>,
    labels: &[u8],
    cols: usize,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    assert!(cols >= 1, "grid must be at least one column wide");

    if history.is_empty() {
        return Ok(());
    }

    let rows = (history.len() + cols - 1) / cols;
    let tiles = drawing_area.split_evenly((rows, cols));

    for (i, (snapshot, tile)) in izip!(history, &tiles).enumerate() {
        plot_decision_boundary(snapshot, features, labels, &format!("Epoch {}", i + 1), tile)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_history() -> Vec<EpochSnapshot> {
        vec![
            EpochSnapshot {
                weights: array![0.3, -0.2],
                bias: 0.1,
            },
            EpochSnapshot {
                weights: array![0.1, 0.4],
                bias: -0.3,
            },
        ]
    }

    #[test]
    fn test_renders_single_epoch_svg() {
        let features = array![[2.0, 3.0], [5.0, 1.0]];
        let labels = [1, 0];

        let mut buf = String::new();
        {
            let area = SVGBackend::with_string(&mut buf, (600, 600)).into_drawing_area();
            plot_decision_boundary(&sample_history()[0], &features, &labels, "Epoch 1", &area)
                .unwrap();
            area.present().unwrap();
        }

        assert!(buf.contains("<svg"));
    }

    #[test]
    fn test_renders_epoch_grid_svg() {
        let features = array![[2.0, 3.0], [5.0, 1.0]];
        let labels = [1, 0];

        let mut buf = String::new();
        {
            let area = SVGBackend::with_string(&mut buf, (1200, 600)).into_drawing_area();
            plot_epoch_grid(&sample_history(), &features, &labels, 2, &area).unwrap();
            area.present().unwrap();
        }

        assert!(buf.contains("<svg"));
    }

    #[test]
    fn test_vertical_boundary_does_not_fail() {
        let features = array![[2.0, 3.0], [5.0, 1.0]];
        let labels = [1, 0];
        let snapshot = EpochSnapshot {
            weights: array![1.0, 0.0],
            bias: -3.0,
        };

        let mut buf = String::new();
        {
            let area = SVGBackend::with_string(&mut buf, (600, 600)).into_drawing_area();
            plot_decision_boundary(&snapshot, &features, &labels, "Epoch 1", &area).unwrap();
            area.present().unwrap();
        }
    }

    #[test]
    fn test_empty_history_renders_nothing() {
        let features = array![[2.0, 3.0], [5.0, 1.0]];
        let labels = [1, 0];

        let mut buf = String::new();
        {
            let area = SVGBackend::with_string(&mut buf, (600, 600)).into_drawing_area();
            plot_epoch_grid(&[], &features, &labels, 4, &area).unwrap();
            area.present().unwrap();
        }
    }
}
