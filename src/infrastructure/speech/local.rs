use crate::domain::language::Language;
use std::path::Path;
use tokio::process::Command;

/// Offline speech engine backed by the espeak-ng binary. Used when no
/// cloud credential is configured or the cloud probe fails.
pub struct LocalSpeechEngine {
    program: String,
}

impl Default for LocalSpeechEngine {
    fn default() -> Self {
        Self::new("espeak-ng")
    }
}

impl LocalSpeechEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Synthesize one chunk of text straight into `output_path`.
    /// A missing or empty output file counts as failure even when the
    /// process exits cleanly.
    pub async fn synthesize_to_file(
        &self,
        text: &str,
        language: Language,
        output_path: &Path,
    ) -> Result<(), String> {
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("cannot create output directory: {}", e))?;
        }

        let output = Command::new(&self.program)
            .arg("-v")
            .arg(language.as_str())
            .arg("-w")
            .arg(output_path)
            .arg(text)
            .output()
            .await
            .map_err(|e| format!("failed to run {}: {}", self.program, e))?;

        if !output.status.success() {
            return Err(format!(
                "{} exited with {:?}: {}",
                self.program,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        match tokio::fs::metadata(output_path).await {
            Ok(meta) if meta.len() > 0 => Ok(()),
            _ => Err(format!(
                "local engine produced an empty or missing file at {}",
                output_path.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = LocalSpeechEngine::new("no-such-speech-engine");
        let result = engine
            .synthesize_to_file("hello", Language::English, &dir.path().join("out.wav"))
            .await;
        assert!(result.is_err());
    }
}
