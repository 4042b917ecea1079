use clap::Parser;

use ndarray::{array, Axis};

use rand::rngs::StdRng;
use rand::SeedableRng;

use plotters::prelude::*;

use perceptron_vis::perceptron::Perceptron;
use perceptron_vis::plots::{plot_decision_boundary, plot_epoch_grid};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, default_value_t = 100)]
    max_epochs: usize,

    #[clap(short, long, default_value_t = 0.1)]
    learning_rate: f64,

    #[clap(short, long, default_value = "plots")]
    output_dir: String,

    /// Width of the combined epoch grid
    #[clap(short, long, default_value_t = 4)]
    columns: usize,

    /// Fixed seed for reproducible runs; entropy-seeded when absent
    #[clap(short, long)]
    seed: Option<u64>,
}

fn recreate_dir(path: &str) -> std::io::Result<()> {
    if std::path::Path::new(path).exists() {
        std::fs::remove_dir_all(path)?;
    }
    std::fs::create_dir_all(path)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let features = array![
        [2.0, 3.0],
        [1.0, 1.0],
        [4.0, 5.0],
        [6.0, 7.0],
        [5.0, 1.0],
        [7.0, 3.0],
        [8.0, 7.0],
        [6.0, 5.0],
    ];
    // correspond to the feature rows
    let labels = [1u8, 0, 1, 1, 0, 0, 0, 0];

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut model = Perceptron::new(features.ncols(), &mut rng);

    let history = model.train(&features, &labels, args.max_epochs, args.learning_rate);

    if history.len() < args.max_epochs {
        println!("training stopped early at epoch {}", history.len() + 1);
    } else {
        println!("no convergence within {} epochs", args.max_epochs);
    }

    recreate_dir(&args.output_dir)?;

    for (i, snapshot) in history.iter().enumerate() {
        let path = format!("{}/epoch_{:03}.svg", args.output_dir, i + 1);
        let area = SVGBackend::new(&path, (600, 600)).into_drawing_area();

        let caption = format!("Epoch {} - Perceptron Decision Boundary", i + 1);
        plot_decision_boundary(snapshot, &features, &labels, &caption, &area)?;

        area.present()?;
    }

    if !history.is_empty() {
        let cols = args.columns.min(history.len());
        let rows = (history.len() + cols - 1) / cols;

        let path = format!("{}/epochs_grid.svg", args.output_dir);
        let area = SVGBackend::new(&path, (600 * cols as u32, 600 * rows as u32))
            .into_drawing_area();

        plot_epoch_grid(&history, &features, &labels, cols, &area)?;

        area.present()?;

        println!("wrote {} epoch plots to {}", history.len(), args.output_dir);
    }

    let correct = features
        .axis_iter(Axis(0))
        .zip(labels.iter())
        .filter(|(x, &label)| model.predict(x.view()) == label)
        .count();

    println!(
        "final weights: {}, bias: {:.4}, accuracy: {}/{}",
        model.weights,
        model.bias,
        correct,
        labels.len()
    );

    Ok(())
}
