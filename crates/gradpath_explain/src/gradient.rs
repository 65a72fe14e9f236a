//! Gradient capture along the interpolation path.

use std::marker::PhantomData;

use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use gradpath_core::{DifferentiableModel, Result};

/// Evaluate-with-gradient strategy.
///
/// All gradient capture happens here: the rest of the engine hands over value
/// tensors and receives value tensors back, and never branches on how the
/// autodiff graph is recorded. The interpolated batch is the watched leaf, so
/// the returned gradient is the model's gradient evaluated at each
/// interpolation point, exactly the path-integral integrand before it is
/// weighted by `input - baseline`.
pub(crate) struct GradientEvaluator<'a, B: AutodiffBackend, M> {
    model: &'a M,
    marker: PhantomData<B>,
}

impl<'a, B: AutodiffBackend, M> GradientEvaluator<'a, B, M> {
    pub(crate) fn new(model: &'a M) -> Self {
        Self {
            model,
            marker: PhantomData,
        }
    }

    /// Gradients of the (optionally output-indexed) predictions, evaluated
    /// at `alpha * input + (1 - alpha) * baseline`.
    ///
    /// The interpolation is formed on the value backend; only the resulting
    /// points enter the recorded graph. Rows are independent: summing the
    /// selected outputs before backpropagation yields each row's own
    /// gradient. A point that does not reach the selected output has zero
    /// gradient.
    pub(crate) fn interpolation_gradients<const D: usize>(
        &self,
        input: Tensor<B::InnerBackend, D>,
        baseline: Tensor<B::InnerBackend, D>,
        alphas: Tensor<B::InnerBackend, D>,
        output_index: Option<usize>,
    ) -> Result<Tensor<B::InnerBackend, D>>
    where
        M: DifferentiableModel<B, D>,
    {
        let dims = input.dims();
        let device = input.device();

        let one_minus = alphas.ones_like() - alphas.clone();
        let interpolated = input * alphas + baseline * one_minus;

        let tracked = Tensor::<B, D>::from_inner(interpolated).require_grad();
        let predictions = self.model.forward(tracked.clone())?;
        let selected = match output_index {
            Some(class) => predictions.narrow(1, class, 1),
            None => predictions,
        };

        let grads = selected.sum().backward();
        Ok(tracked
            .grad(&grads)
            .unwrap_or_else(|| Tensor::zeros(dims, &device)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradpath_core::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray>;

    /// f(x) = sum_j x_j^2 per row; grad f = 2x.
    struct SquareSumModel;

    impl<B: AutodiffBackend> DifferentiableModel<B, 2> for SquareSumModel {
        fn forward(&self, x: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
            Ok((x.clone() * x).sum_dim(1))
        }
    }

    /// Ignores its input entirely.
    struct ConstantModel;

    impl<B: AutodiffBackend> DifferentiableModel<B, 2> for ConstantModel {
        fn forward(&self, x: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
            let [batch, _] = x.dims();
            Ok(Tensor::ones([batch, 1], &x.device()))
        }
    }

    #[test]
    fn test_gradient_is_evaluated_at_the_interpolation_point() {
        let device = Default::default();
        let evaluator = GradientEvaluator::<TestBackend, _>::new(&SquareSumModel);

        let input = Tensor::<NdArray, 2>::from_floats([[3.0, 4.0]], &device);
        let baseline = Tensor::<NdArray, 2>::from_floats([[1.0, 2.0]], &device);

        // alpha = 1: the interpolated point is the input; grad f = 2 * input.
        let grad = evaluator
            .interpolation_gradients(
                input.clone(),
                baseline.clone(),
                Tensor::from_floats([[1.0]], &device),
                None,
            )
            .unwrap();
        let values: Vec<f32> = grad.into_data().to_vec().unwrap();
        assert_eq!(values, vec![6.0, 8.0]);

        // alpha = 0: the interpolated point is the baseline; grad f is
        // evaluated there, not zeroed.
        let grad = evaluator
            .interpolation_gradients(
                input,
                baseline,
                Tensor::from_floats([[0.0]], &device),
                None,
            )
            .unwrap();
        let values: Vec<f32> = grad.into_data().to_vec().unwrap();
        assert_eq!(values, vec![2.0, 4.0]);
    }

    #[test]
    fn test_midpoint_gradient() {
        let device = Default::default();
        let evaluator = GradientEvaluator::<TestBackend, _>::new(&SquareSumModel);

        let input = Tensor::<NdArray, 2>::from_floats([[2.0, 2.0]], &device);
        let baseline = Tensor::<NdArray, 2>::from_floats([[0.0, 0.0]], &device);

        // alpha = 0.5: the interpolated point is [1, 1]; grad f = 2 * [1, 1].
        let grad = evaluator
            .interpolation_gradients(
                input,
                baseline,
                Tensor::from_floats([[0.5]], &device),
                None,
            )
            .unwrap();
        let values: Vec<f32> = grad.into_data().to_vec().unwrap();
        for v in values {
            assert!((v - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_disconnected_input_yields_zero_gradient() {
        let device = Default::default();
        let evaluator = GradientEvaluator::<TestBackend, _>::new(&ConstantModel);

        let input = Tensor::<NdArray, 2>::from_floats([[1.0, 2.0], [3.0, 4.0]], &device);
        let baseline = Tensor::<NdArray, 2>::zeros([2, 2], &device);
        let alphas = Tensor::<NdArray, 2>::from_floats([[1.0], [1.0]], &device);

        let grad = evaluator
            .interpolation_gradients(input, baseline, alphas, None)
            .unwrap();

        assert_eq!(grad.dims(), [2, 2]);
        let values: Vec<f32> = grad.into_data().to_vec().unwrap();
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rows_do_not_cross_contaminate() {
        let device = Default::default();
        let evaluator = GradientEvaluator::<TestBackend, _>::new(&SquareSumModel);

        // Different alpha per row; each row's gradient must come from its own
        // interpolation point.
        let input = Tensor::<NdArray, 2>::from_floats([[1.0, 1.0], [1.0, 1.0]], &device);
        let baseline = Tensor::<NdArray, 2>::from_floats([[0.0, 0.0], [3.0, 3.0]], &device);
        let alphas = Tensor::<NdArray, 2>::from_floats([[1.0], [0.0]], &device);

        let grad = evaluator
            .interpolation_gradients(input, baseline, alphas, None)
            .unwrap();
        let values: Vec<f32> = grad.into_data().to_vec().unwrap();

        // Row 0 sits at its input [1, 1]; row 1 sits at its baseline [3, 3].
        assert_eq!(values, vec![2.0, 2.0, 6.0, 6.0]);
    }
}
