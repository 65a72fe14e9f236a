//! Example: Feature Attribution for a Linear Scorer
//!
//! A minimal example showing how to attribute a model's predictions to its
//! input features with integrated and expected gradients.
//!
//! Run with: cargo run --example feature_attribution

use burn::prelude::*;
use burn_autodiff::Autodiff;
use burn_ndarray::NdArray;

use gradpath::prelude::*;

type ExampleBackend = Autodiff<NdArray>;

/// A two-class linear scorer: score(x) = [w0 . x, w1 . x].
struct LinearScorer {
    weights: Tensor<ExampleBackend, 2>,
}

impl DifferentiableModel<ExampleBackend, 2> for LinearScorer {
    fn forward(&self, x: Tensor<ExampleBackend, 2>) -> gradpath_core::Result<Tensor<ExampleBackend, 2>> {
        Ok(x.matmul(self.weights.clone()))
    }

    fn n_outputs(&self) -> Option<usize> {
        Some(self.weights.dims()[1])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Feature Attribution with Path Gradients ===\n");

    let device = Default::default();

    // Step 1: A model. Any DifferentiableModel works; here a fixed linear
    // scorer with two output classes over four features.
    let weights = Tensor::<ExampleBackend, 2>::from_floats(
        [
            [1.0, -1.0],
            [2.0, 0.5],
            [0.0, 3.0],
            [-1.0, 1.0],
        ],
        &device,
    );
    let model = LinearScorer { weights };
    println!("Model: linear scorer, 4 features -> 2 classes");

    // Step 2: Inputs to explain and a baseline representing absent signal.
    let inputs = Tensor::<NdArray, 2>::from_floats(
        [
            [1.0, 1.0, 1.0, 1.0],
            [2.0, 0.0, -1.0, 3.0],
        ],
        &device,
    );
    let baseline = Tensor::<NdArray, 2>::zeros([1, 4], &device);
    println!("Inputs: {:?}, baseline: zero vector\n", inputs.dims());

    // Step 3: Integrated gradients for the class each input was scored on.
    let explainer = PathExplainer::<ExampleBackend, _>::new(model);
    let config = AttributionConfig::default()
        .with_use_expectation(false)
        .with_num_samples(100)
        .with_seed(Seed::new(42));

    let attr = explainer.attributions(
        inputs.clone(),
        baseline.clone(),
        &config,
        Some(&[0, 1]),
    )?;

    let maps = attr.per_input().expect("selected outputs give one map per input");
    println!("Per-input attributions (selected classes 0 and 1):");
    let values: Vec<f32> = maps.clone().into_data().to_vec().unwrap();
    for (i, row) in values.chunks(4).enumerate() {
        println!("  input {}: {:?}", i, row);
    }

    // For a linear model, each attribution row is exactly
    // (input - baseline) * class-weight column.
    println!("\nAttribution sums vs. scores:");
    for (i, sum) in attr.completeness_sums()[0].iter().enumerate() {
        println!("  input {}: attribution sum = {:.3}", i, sum);
    }

    // Step 4: All classes at once (no output selection).
    let all = explainer.attributions(inputs.clone(), baseline, &config, None)?;
    println!(
        "\nWithout selection: {} classes x {} inputs x 4 features",
        all.n_classes().unwrap_or(1),
        all.n_inputs()
    );

    // Step 5: Expected gradients against a reference set.
    let references = Tensor::<NdArray, 2>::from_floats(
        [
            [0.0, 0.0, 0.0, 0.0],
            [0.5, 0.5, 0.5, 0.5],
            [1.0, 0.0, 1.0, 0.0],
        ],
        &device,
    );
    let eg_config = AttributionConfig::default()
        .with_expectation_alphas(ExpectationAlphas::Uniform)
        .with_num_samples(200)
        .with_seed(Seed::new(42));

    let eg = explainer.attributions(inputs, references, &eg_config, Some(&[0, 1]))?;
    let eg_values: Vec<f32> = eg.per_input().unwrap().clone().into_data().to_vec().unwrap();
    println!("\nExpected-gradients attributions (uniform alphas):");
    for (i, row) in eg_values.chunks(4).enumerate() {
        println!("  input {}: {:?}", i, row);
    }

    Ok(())
}
