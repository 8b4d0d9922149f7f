pub mod classifier;
pub mod judge;
pub mod messages;
pub mod model;
pub mod pipeline;
pub mod stroke;
pub mod surface;
pub mod tensor;

pub use classifier::{
    ClassifierAdapter,
    KanaModel,
    LoadState,
    ModelLoader,
    NoModel,
    Prediction,
};
pub use judge::{
    HeuristicJudge,
    Judge,
    ModelJudge,
    RecognitionRequest,
    CONFIDENCE_GATE,
};
pub use model::{
    ArtifactLoader,
    DenseModel,
    ModelArtifact,
    MODEL_RELATIVE_PATH,
};
pub use pipeline::RecognitionPipeline;
pub use stroke::StrokeCheck;
pub use surface::{
    DrawingSurface,
    INPUT_SIZE,
};
pub use tensor::{
    Tensor,
    TensorArena,
};
