pub mod perceptron;
pub mod plots;
