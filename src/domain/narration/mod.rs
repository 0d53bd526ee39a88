pub mod assembler;
pub mod chunker;
pub mod error;
pub mod model;
pub mod service;

pub use assembler::{Assembler, AssemblyOutcome};
pub use chunker::chunk_text;
pub use error::NarrationError;
pub use model::SynthesisConfig;
pub use service::NarrationService;
