//! Dense feed-forward classifier read from a JSON artifact.

use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
};

use async_trait::async_trait;
use candle_core::{
    Device,
    D,
};
use candle_nn::{
    Linear,
    Module,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    classifier::{
        KanaModel,
        ModelLoader,
    },
    surface::INPUT_SIZE,
    tensor::{
        Tensor,
        TensorArena,
    },
};
use crate::core::KanaError;

pub const MODEL_FORMAT: &str = "kana-dense-v1";

/// Where the artifact lives inside the app data directory.
pub const MODEL_RELATIVE_PATH: &str = "model/kana-model/model.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Softmax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub inputs: usize,
    pub units: usize,
    pub activation: Activation,
    pub weights: Vec<f32>, // inputs * units, row-major by input
    pub bias: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: String,
    pub input: Vec<usize>,
    pub layers: Vec<DenseLayer>,
}

/// One artifact layer as candle weights.
#[derive(Debug)]
struct LoadedLayer {
    linear: Linear,
    activation: Activation,
}

impl LoadedLayer {
    fn new(layer: &DenseLayer, device: &Device) -> candle_core::Result<Self> {
        // Stored (inputs, units); `Linear` wants (units, inputs)
        let weight = candle_core::Tensor::from_slice(&layer.weights, (layer.inputs, layer.units), device)?
            .t()?
            .contiguous()?;
        let bias = candle_core::Tensor::from_slice(&layer.bias, layer.units, device)?;
        Ok(Self { linear: Linear::new(weight, Some(bias)), activation: layer.activation })
    }

    fn forward(&self, xs: &candle_core::Tensor) -> candle_core::Result<candle_core::Tensor> {
        let xs = self.linear.forward(xs)?;
        match self.activation {
            Activation::Linear => Ok(xs),
            Activation::Relu => xs.relu(),
            Activation::Softmax => candle_nn::ops::softmax(&xs, D::Minus1),
        }
    }
}

#[derive(Debug)]
pub struct DenseModel {
    layers: Vec<LoadedLayer>,
    output_len: usize,
}

impl DenseModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, KanaError> {
        let invalid = |reason: String| KanaError::ClassifierUnavailable(reason);

        if artifact.format != MODEL_FORMAT {
            return Err(invalid(format!("unsupported model format '{}'", artifact.format)));
        }
        if artifact.input != [INPUT_SIZE, INPUT_SIZE, 1] {
            return Err(invalid(format!("unsupported input shape {:?}", artifact.input)));
        }
        if artifact.layers.is_empty() {
            return Err(invalid("model has no layers".to_string()));
        }

        let mut width = INPUT_SIZE * INPUT_SIZE;
        for (index, layer) in artifact.layers.iter().enumerate() {
            if layer.inputs != width {
                return Err(invalid(format!(
                    "layer {} expects {} inputs but receives {}",
                    index, layer.inputs, width
                )));
            }
            if layer.weights.len() != layer.inputs * layer.units || layer.bias.len() != layer.units
            {
                return Err(invalid(format!("layer {} has mismatched weight dimensions", index)));
            }
            width = layer.units;
        }

        let device = Device::Cpu;
        let layers = artifact
            .layers
            .iter()
            .map(|layer| LoadedLayer::new(layer, &device))
            .collect::<candle_core::Result<Vec<_>>>()
            .map_err(|e| invalid(format!("failed to build model tensors: {}", e)))?;

        Ok(Self { layers, output_len: width })
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    fn forward(&self, input: &candle_core::Tensor) -> candle_core::Result<candle_core::Tensor> {
        let mut xs = input.clone();
        for layer in &self.layers {
            xs = layer.forward(&xs)?;
        }
        Ok(xs)
    }
}

#[async_trait]
impl KanaModel for DenseModel {
    async fn predict(&self, batch: &Tensor, arena: &TensorArena) -> Result<Tensor, KanaError> {
        let expected = INPUT_SIZE * INPUT_SIZE;
        let received = batch.inner().elem_count();
        if received != expected {
            return Err(KanaError::Inference(format!(
                "expected {} input values, got {}",
                expected, received
            )));
        }

        let input = batch.inner().reshape((1, expected))?;
        let output = self.forward(&input)?;
        Ok(arena.track(output))
    }
}

/// Reads the artifact from disk on first use.
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    path: PathBuf,
}

impl ArtifactLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ModelLoader for ArtifactLoader {
    async fn load(&self) -> Result<Arc<dyn KanaModel>, KanaError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            KanaError::ClassifierUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let artifact: ModelArtifact = serde_json::from_slice(&bytes).map_err(|e| {
            KanaError::ClassifierUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let model = DenseModel::from_artifact(artifact)?;
        tracing::debug!(path = %self.path.display(), classes = model.output_len(), "parsed model artifact");
        Ok(Arc::new(model))
    }
}
