//! Benchmarks for attribution throughput.
//!
//! Run with: cargo bench --bench attribution_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use burn::prelude::*;
use burn_autodiff::Autodiff;
use burn_ndarray::NdArray;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use gradpath::prelude::*;

type BenchBackend = Autodiff<NdArray>;

/// Linear scoring model with fixed random weights.
struct LinearModel {
    weights: Tensor<BenchBackend, 2>,
}

impl LinearModel {
    fn new(n_features: usize, n_classes: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let data: Vec<f32> = (0..n_features * n_classes)
            .map(|_| rng.gen::<f32>() - 0.5)
            .collect();
        let weights = Tensor::from_data(
            burn::tensor::TensorData::new(data, [n_features, n_classes]),
            &Default::default(),
        );
        Self { weights }
    }
}

impl DifferentiableModel<BenchBackend, 2> for LinearModel {
    fn forward(&self, x: Tensor<BenchBackend, 2>) -> gradpath_core::Result<Tensor<BenchBackend, 2>> {
        Ok(x.matmul(self.weights.clone()))
    }

    fn n_outputs(&self) -> Option<usize> {
        Some(self.weights.dims()[1])
    }
}

fn create_inputs(n_inputs: usize, n_features: usize, seed: u64) -> Tensor<NdArray, 2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data: Vec<f32> = (0..n_inputs * n_features).map(|_| rng.gen()).collect();
    Tensor::from_data(
        burn::tensor::TensorData::new(data, [n_inputs, n_features]),
        &Default::default(),
    )
}

fn bench_integrated_gradients(c: &mut Criterion) {
    let n_features = 32;
    let inputs = create_inputs(8, n_features, 42);
    let baseline = Tensor::<NdArray, 2>::zeros([1, n_features], &Default::default());
    let explainer = PathExplainer::<BenchBackend, _>::new(LinearModel::new(n_features, 1, 7));

    let mut group = c.benchmark_group("integrated_gradients");
    for num_samples in [50, 200] {
        let config = AttributionConfig::default()
            .with_use_expectation(false)
            .with_num_samples(num_samples)
            .with_seed(Seed::new(42));

        group.bench_with_input(
            BenchmarkId::from_parameter(num_samples),
            &config,
            |b, config| {
                b.iter(|| {
                    let attr = explainer
                        .attributions(inputs.clone(), baseline.clone(), config, None)
                        .unwrap();
                    black_box(attr);
                });
            },
        );
    }
    group.finish();
}

fn bench_expected_gradients(c: &mut Criterion) {
    let n_features = 32;
    let inputs = create_inputs(8, n_features, 42);
    let references = create_inputs(16, n_features, 43);
    let explainer = PathExplainer::<BenchBackend, _>::new(LinearModel::new(n_features, 1, 7));

    let config = AttributionConfig::default()
        .with_num_samples(100)
        .with_seed(Seed::new(42));

    c.bench_function("expected_gradients/100", |b| {
        b.iter(|| {
            let attr = explainer
                .attributions(inputs.clone(), references.clone(), &config, None)
                .unwrap();
            black_box(attr);
        });
    });
}

criterion_group!(benches, bench_integrated_gradients, bench_expected_gradients);
criterion_main!(benches);
