use std::sync::{
    atomic::{
        AtomicBool,
        Ordering,
    },
    Arc,
    RwLock,
};

use async_trait::async_trait;

use super::{
    surface::{
        DrawingSurface,
        INPUT_SIZE,
    },
    tensor::{
        Tensor,
        TensorArena,
    },
};
use crate::{
    core::{
        KanaError,
        ScriptVariant,
    },
    kana::label_at,
};

/// A pretrained shape classifier. Output index `i` refers to the i-th label of
/// whichever script is being judged.
#[async_trait]
pub trait KanaModel: Send + Sync {
    /// Forward pass over a `(1, 64, 64, 1)` batch; returns a probability tensor.
    async fn predict(&self, batch: &Tensor, arena: &TensorArena) -> Result<Tensor, KanaError>;
}

#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn KanaModel>, KanaError>;
}

/// Loader for deployments that ship without a model.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoModel;

#[async_trait]
impl ModelLoader for NoModel {
    async fn load(&self) -> Result<Arc<dyn KanaModel>, KanaError> {
        Err(KanaError::ClassifierUnavailable("no model configured".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Ready,
    /// Another caller is loading the model right now.
    InFlight,
    Unavailable,
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub label: Option<String>,
    pub confidence: f32,
}

/// Clears the in-flight flag when the load attempt ends, however it ends.
struct LoadingFlag<'a>(&'a AtomicBool);

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the lazily loaded classifier and the tensors fed through it.
pub struct ClassifierAdapter {
    loader: Arc<dyn ModelLoader>,
    model: RwLock<Option<Arc<dyn KanaModel>>>,
    loading: AtomicBool,
    arena: TensorArena,
}

impl ClassifierAdapter {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            model: RwLock::new(None),
            loading: AtomicBool::new(false),
            arena: TensorArena::new(),
        }
    }

    pub fn without_model() -> Self {
        Self::new(Arc::new(NoModel))
    }

    pub fn arena(&self) -> &TensorArena {
        &self.arena
    }

    pub fn is_loaded(&self) -> bool {
        self.model().is_some()
    }

    fn model(&self) -> Option<Arc<dyn KanaModel>> {
        self.model.read().ok().and_then(|model| model.clone())
    }

    /// Load the model if needed. Never waits on someone else's load: a caller
    /// that finds a load in flight gets `InFlight` back straight away.
    pub async fn ensure_loaded(&self) -> LoadState {
        if self.is_loaded() {
            return LoadState::Ready;
        }

        if self.loading.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err()
        {
            tracing::debug!("classifier load already in flight");
            return LoadState::InFlight;
        }
        let _flag = LoadingFlag(&self.loading);

        // A load may have completed between the first check and taking the flag
        if self.is_loaded() {
            return LoadState::Ready;
        }

        match self.loader.load().await {
            Ok(model) => match self.model.write() {
                Ok(mut slot) => {
                    *slot = Some(model);
                    tracing::info!("kana recognition model loaded");
                    LoadState::Ready
                }
                Err(_) => {
                    tracing::warn!("classifier slot poisoned; staying on heuristic judging");
                    LoadState::Unavailable
                }
            },
            Err(error) => {
                tracing::warn!(%error, "kana recognition model not available");
                LoadState::Unavailable
            }
        }
    }

    /// Turn a drawing into a `(1, N, N, 1)` batch of inverted, normalized intensities.
    pub fn preprocess(&self, surface: &DrawingSurface) -> Result<Tensor, KanaError> {
        let grid = surface.intensity_grid(INPUT_SIZE);
        self.arena.tensor(grid, &[1, INPUT_SIZE, INPUT_SIZE, 1])
    }

    /// Probabilities for every label of `variant`'s table. The output tensor is
    /// released before this returns; the batch stays owned by the caller.
    pub async fn infer(&self, batch: &Tensor, variant: ScriptVariant) -> Result<Vec<f32>, KanaError> {
        let model = self.model().ok_or_else(|| {
            KanaError::ClassifierUnavailable("model has not been loaded".to_string())
        })?;

        if batch.shape() != [1, INPUT_SIZE, INPUT_SIZE, 1] {
            return Err(KanaError::Inference(format!(
                "unexpected batch shape {:?}",
                batch.shape()
            )));
        }

        let output = model.predict(batch, &self.arena).await?;
        let probabilities = output.to_vec()?;
        if probabilities.is_empty() {
            return Err(KanaError::Inference("model returned no probabilities".to_string()));
        }

        tracing::trace!(%variant, classes = probabilities.len(), "inference complete");
        Ok(probabilities)
    }

    /// Preprocess, infer and pick the most likely label.
    pub async fn classify(
        &self,
        surface: &DrawingSurface,
        variant: ScriptVariant,
    ) -> Result<Prediction, KanaError> {
        let batch = self.preprocess(surface)?;
        let probabilities = self.infer(&batch, variant).await?;
        drop(batch);

        let (index, probability) = arg_max(&probabilities);
        Ok(Prediction {
            index,
            label: label_at(variant, index).map(str::to_string),
            confidence: probability.clamp(0.0, 1.0),
        })
    }
}

/// First index holding the largest value. NaNs never win.
fn arg_max(values: &[f32]) -> (usize, f32) {
    let mut best = (0, 0.0_f32);
    for (index, &value) in values.iter().enumerate() {
        if value > best.1 {
            best = (index, value);
        }
    }
    best
}
