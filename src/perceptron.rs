use itertools::izip;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::{distributions::Uniform, Rng};

// f(x) = 1 for x >= 0, else 0
fn step(x: f64) -> u8 {
    if x >= 0.0 {
        1
    } else {
        0
    }
}

/// Single-layer perceptron: a linear decision boundary in D-dimensional space.
#[derive(Debug, Clone)]
pub struct Perceptron {
    pub weights: Array1<f64>,
    pub bias: f64,
}

/// Parameters captured at the end of one training epoch. Owns its own copy of
/// the weights, so later updates to the live model do not touch it.
#[derive(Debug, Clone)]
pub struct EpochSnapshot {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl Perceptron {
    /// Initializes weights and bias uniformly from [0, 0.5). Pass a seeded
    /// generator for reproducible runs.
    pub fn new(input_size: usize, rng: &mut impl Rng) -> Self {
        assert!(input_size >= 1, "input size must be at least 1");

        let uniform = Uniform::new(0.0, 0.5);

        let weights = Array1::from_shape_fn(input_size, |_| rng.sample(uniform));
        let bias = rng.sample(uniform);

        Self { weights, bias }
    }

    /// w1*x1 + w2*x2 + ... + b, thresholded at zero.
    pub fn predict(&self, x: ArrayView1<f64>) -> u8 {
        assert_eq!(
            x.len(),
            self.weights.len(),
            "feature vector length must match model dimensionality"
        );

        step(self.weights.dot(&x) + self.bias)
    }

    /// Runs up to `max_epochs` full passes over the dataset, applying the
    /// perceptron update rule online, and returns one parameter snapshot per
    /// epoch that still misclassified something. A fully clean pass stops
    /// training without being recorded.
    pub fn train(
        &mut self,
        features: &Array2<f64>,
        labels: &[u8],
        max_epochs: usize,
        learning_rate: f64,
    ) -> Vec<EpochSnapshot> {
        assert_eq!(
            features.nrows(),
            labels.len(),
            "features and labels must have the same length"
        );
        assert_eq!(
            features.ncols(),
            self.weights.len(),
            "feature dimensionality must match model dimensionality"
        );
        assert!(learning_rate > 0.0, "learning rate must be positive");

        let mut history = Vec::new();

        for _ in 0..max_epochs {
            let mut misclassified = false;

            for (x, &label) in izip!(features.axis_iter(Axis(0)), labels) {
                let prediction = self.predict(x.view());
                let error = label as i32 - prediction as i32;

                if error != 0 {
                    misclassified = true;
                    self.weights
                        .scaled_add(learning_rate * error as f64, &x);
                    self.bias += learning_rate * error as f64;
                }
            }

            if !misclassified {
                break;
            }

            history.push(EpochSnapshot {
                weights: self.weights.clone(),
                bias: self.bias,
            });
        }

        history
    }
}
