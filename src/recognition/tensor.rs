//! Scoped tensor buffers.
//!
//! Every tensor handed out by an arena is counted as live until it is
//! dropped. Inference code never frees tensors by hand; leaving scope releases
//! them on every path, including early returns and errors.

use std::sync::{
    atomic::{
        AtomicUsize,
        Ordering,
    },
    Arc,
};

use candle_core::Device;

use crate::core::KanaError;

#[derive(Debug, Clone)]
pub struct TensorArena {
    device: Device,
    live: Arc<AtomicUsize>,
}

impl Default for TensorArena {
    fn default() -> Self {
        Self { device: Device::Cpu, live: Arc::new(AtomicUsize::new(0)) }
    }
}

impl TensorArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tensor(&self, data: Vec<f32>, shape: &[usize]) -> Result<Tensor, KanaError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(KanaError::Inference(format!(
                "tensor shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }

        let inner = candle_core::Tensor::from_vec(data, shape, &self.device)?;
        Ok(self.track(inner))
    }

    /// Count a tensor produced by a model so it is released like any other.
    pub fn track(&self, inner: candle_core::Tensor) -> Tensor {
        self.live.fetch_add(1, Ordering::AcqRel);
        Tensor { inner, live: self.live.clone() }
    }

    /// Number of tensors from this arena that have not been released yet.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct Tensor {
    inner: candle_core::Tensor,
    live: Arc<AtomicUsize>,
}

impl Tensor {
    pub fn shape(&self) -> &[usize] {
        self.inner.dims()
    }

    pub fn inner(&self) -> &candle_core::Tensor {
        &self.inner
    }

    /// All values, flattened in row-major order.
    pub fn to_vec(&self) -> Result<Vec<f32>, KanaError> {
        Ok(self.inner.flatten_all()?.to_vec1::<f32>()?)
    }
}

impl Drop for Tensor {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_on_scope_exit() {
        let arena = TensorArena::new();
        {
            let batch = arena.tensor(vec![0.0; 8], &[1, 2, 2, 2]).unwrap();
            let output = arena.tensor(vec![1.0, 2.0], &[1, 2]).unwrap();
            assert_eq!(arena.live(), 2);
            assert_eq!(batch.shape(), &[1, 2, 2, 2]);
            assert_eq!(output.to_vec().unwrap(), vec![1.0, 2.0]);
        }
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_tracked_results_are_counted() {
        let arena = TensorArena::new();
        let input = arena.tensor(vec![1.0, -2.0, 3.0], &[1, 3]).unwrap();
        let relu = arena.track(input.inner().relu().unwrap());
        assert_eq!(arena.live(), 2);
        assert_eq!(relu.to_vec().unwrap(), vec![1.0, 0.0, 3.0]);

        drop(input);
        drop(relu);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_shape_mismatch_allocates_nothing() {
        let arena = TensorArena::new();
        assert!(matches!(arena.tensor(vec![0.0; 3], &[1, 2]), Err(KanaError::Inference(_))));
        assert_eq!(arena.live(), 0);
    }
}
