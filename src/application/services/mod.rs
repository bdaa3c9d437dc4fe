mod analysis_pipeline;

pub use analysis_pipeline::{AnalysisError, AnalysisPipeline, PipelineStage, ValidationError};
