use std::path::{Path, PathBuf};
use tokio::process::Command;

/// How the final unit file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// A single segment was copied straight to the output path
    SingleSegment,
    /// All segments were concatenated losslessly
    Merged,
    /// Concatenation failed; only the first segment was kept
    Degraded,
}

/// Joins per-chunk segment files into one audio file per unit.
///
/// Multiple segments go through an external concat step (stream copy, no
/// re-encode). If that tool fails the assembler keeps the first segment
/// alone rather than failing the unit — partial audio over no audio.
pub struct Assembler {
    concat_program: String,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Assembler {
    pub fn new(concat_program: impl Into<String>) -> Self {
        Self {
            concat_program: concat_program.into(),
        }
    }

    /// Assemble ordered segment files into `output_path`.
    pub async fn assemble(
        &self,
        segments: &[PathBuf],
        output_path: &Path,
    ) -> Result<AssemblyOutcome, String> {
        let first = segments
            .first()
            .ok_or_else(|| "no segments to assemble".to_string())?;

        if segments.len() == 1 {
            copy_segment(first, output_path).await?;
            return Ok(AssemblyOutcome::SingleSegment);
        }

        let list_path = self.write_concat_manifest(segments, output_path).await?;

        let result = Command::new(&self.concat_program)
            .arg("-y")
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .arg(&list_path)
            .arg("-c")
            .arg("copy")
            .arg(output_path)
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => Ok(AssemblyOutcome::Merged),
            Ok(output) => {
                tracing::warn!(
                    program = %self.concat_program,
                    status = ?output.status.code(),
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "Concatenation failed, keeping first segment only"
                );
                copy_segment(first, output_path).await?;
                Ok(AssemblyOutcome::Degraded)
            }
            Err(e) => {
                tracing::warn!(
                    program = %self.concat_program,
                    error = %e,
                    "Concatenation tool unavailable, keeping first segment only"
                );
                copy_segment(first, output_path).await?;
                Ok(AssemblyOutcome::Degraded)
            }
        }
    }

    /// Write the concat demuxer manifest: one `file '<abs path>'` line per
    /// segment, in chunk order.
    async fn write_concat_manifest(
        &self,
        segments: &[PathBuf],
        output_path: &Path,
    ) -> Result<PathBuf, String> {
        let stem = output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unit");
        let dir = segments[0].parent().unwrap_or_else(|| Path::new("."));
        let list_path = dir.join(format!("{}_list.txt", stem));

        let mut manifest = String::new();
        for segment in segments {
            let absolute = segment
                .canonicalize()
                .map_err(|e| format!("cannot resolve segment path {}: {}", segment.display(), e))?;
            manifest.push_str(&format!("file '{}'\n", absolute.display()));
        }

        tokio::fs::write(&list_path, manifest)
            .await
            .map_err(|e| format!("cannot write concat manifest: {}", e))?;

        Ok(list_path)
    }
}

async fn copy_segment(segment: &Path, output_path: &Path) -> Result<(), String> {
    tokio::fs::copy(segment, output_path)
        .await
        .map(|_| ())
        .map_err(|e| {
            format!(
                "cannot copy segment {} to {}: {}",
                segment.display(),
                output_path.display(),
                e
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn write_segment(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_single_segment_is_copied() {
        let dir = tempfile::tempdir().unwrap();
        let segment = write_segment(dir.path(), "seg_000.wav", b"segment-bytes").await;
        let output = dir.path().join("00_title_introduction.wav");

        let outcome = Assembler::default()
            .assemble(&[segment], &output)
            .await
            .unwrap();

        assert_eq!(outcome, AssemblyOutcome::SingleSegment);
        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"segment-bytes");
    }

    #[tokio::test]
    async fn test_no_segments_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wav");
        let result = Assembler::default().assemble(&[], &output).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failed_concat_keeps_first_segment() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_segment(dir.path(), "seg_000.wav", b"first").await;
        let second = write_segment(dir.path(), "seg_001.wav", b"second").await;
        let third = write_segment(dir.path(), "seg_002.wav", b"third").await;
        let output = dir.path().join("01_introduction.wav");

        let assembler = Assembler::new("no-such-concat-tool");
        let outcome = assembler
            .assemble(&[first, second, third], &output)
            .await
            .unwrap();

        assert_eq!(outcome, AssemblyOutcome::Degraded);
        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_manifest_lists_segments_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_segment(dir.path(), "seg_000.wav", b"a").await;
        let second = write_segment(dir.path(), "seg_001.wav", b"b").await;
        let output = dir.path().join("02_methodology.wav");

        let assembler = Assembler::new("no-such-concat-tool");
        assembler.assemble(&[first, second], &output).await.unwrap();

        let manifest = tokio::fs::read_to_string(dir.path().join("02_methodology_list.txt"))
            .await
            .unwrap();
        let lines: Vec<&str> = manifest.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("file '"));
        assert!(lines[0].contains("seg_000.wav"));
        assert!(lines[1].contains("seg_001.wav"));
    }
}
