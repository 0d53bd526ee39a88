use super::assembler::{Assembler, AssemblyOutcome};
use super::chunker::chunk_text;
use super::error::NarrationError;
use super::model::SynthesisConfig;
use crate::domain::script::ScriptSet;
use crate::infrastructure::speech::SpeechBackend;
use std::path::PathBuf;

/// Drives one narration run: walks the title introduction and the fixed
/// section order, chunking each unit's text, synthesizing every chunk
/// through the resolved backend, and assembling the segments into one
/// audio file per unit.
///
/// Failures below the unit level are logged and absorbed; only a run that
/// produces no audio at all is an error.
pub struct NarrationService {
    output_root: PathBuf,
    assembler: Assembler,
}

impl NarrationService {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            assembler: Assembler::default(),
        }
    }

    /// Override the assembler, used by tests to simulate concat failures
    pub fn with_assembler(mut self, assembler: Assembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Directory owned by one run, keyed by the paper identifier
    pub fn run_dir(&self, paper_id: &str) -> PathBuf {
        self.output_root.join(paper_id)
    }

    /// Generate audio for every non-empty unit of the script, strictly in
    /// narration order. Returns the produced file names, relative to the
    /// run directory.
    pub async fn generate(
        &self,
        backend: &SpeechBackend,
        config: &SynthesisConfig,
        paper_id: &str,
        script: &ScriptSet,
    ) -> Result<Vec<String>, NarrationError> {
        let run_dir = self.run_dir(paper_id);
        tokio::fs::create_dir_all(&run_dir).await?;

        tracing::info!(
            paper_id = paper_id,
            language = %config.language,
            voice = %config.voice,
            mode = backend.mode(),
            "Starting narration run"
        );

        let mut audio_files = Vec::new();

        for unit in script.units() {
            if unit.text.trim().is_empty() {
                tracing::debug!(unit = %unit.file_stem(), "Skipping unit with empty text");
                continue;
            }

            let stem = unit.file_stem();
            let chunks = chunk_text(&unit.text, config.language, config.max_chunk_length);
            tracing::info!(
                unit = %stem,
                chunk_count = chunks.len(),
                "Generating unit audio"
            );

            let temp_dir = run_dir.join("temp_chunks");
            tokio::fs::create_dir_all(&temp_dir).await?;

            let mut segments = Vec::new();
            for (index, chunk) in chunks.iter().enumerate() {
                let segment_path = temp_dir.join(format!("{}_chunk_{:03}.wav", stem, index));
                match backend.synthesize_chunk(chunk, config, &segment_path).await {
                    Ok(()) => segments.push(segment_path),
                    Err(reason) => {
                        tracing::warn!(
                            unit = %stem,
                            chunk_index = index,
                            error = %reason,
                            "Segment synthesis failed, skipping chunk"
                        );
                    }
                }
            }

            if segments.is_empty() {
                tracing::warn!(unit = %stem, "No segments synthesized, unit produced no audio");
                continue;
            }

            let output_path = run_dir.join(format!("{}.wav", stem));
            match self.assembler.assemble(&segments, &output_path).await {
                Ok(AssemblyOutcome::Degraded) => {
                    tracing::warn!(
                        unit = %stem,
                        segment_count = segments.len(),
                        "Assembly degraded, unit audio contains only the first segment"
                    );
                }
                Ok(_) => {}
                Err(reason) => {
                    tracing::error!(unit = %stem, error = %reason, "Assembly failed");
                    continue;
                }
            }

            if output_path.exists() {
                audio_files.push(format!("{}.wav", stem));
                tracing::info!(unit = %stem, "Unit audio generated");
            }
        }

        if audio_files.is_empty() {
            return Err(NarrationError::NoAudioProduced(paper_id.to_string()));
        }

        tracing::info!(
            paper_id = paper_id,
            file_count = audio_files.len(),
            "Narration run completed"
        );
        Ok(audio_files)
    }
}
