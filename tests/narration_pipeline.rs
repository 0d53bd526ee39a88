use papercast_backend::domain::language::Language;
use papercast_backend::domain::narration::{NarrationError, NarrationService, SynthesisConfig};
use papercast_backend::domain::script::{ScriptSet, SectionName};
use papercast_backend::infrastructure::speech::{LocalSpeechEngine, SpeechBackend};

fn script_with(sections: &[(SectionName, &str)], title: &str) -> ScriptSet {
    ScriptSet {
        title_introduction: title.to_string(),
        sections: sections
            .iter()
            .map(|(name, text)| (*name, text.to_string()))
            .collect(),
    }
}

/// Shell stand-in for the speech engine: accepts the real argument shape
/// (`-v <lang> -w <path> <text>`) and writes the chunk text into the
/// segment file, so tests can assert on segment content.
#[cfg(unix)]
fn fake_engine(dir: &std::path::Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-engine.sh");
    std::fs::write(
        &path,
        "#!/bin/sh\nwhile [ \"$1\" != \"-w\" ]; do shift; done\nshift\nout=\"$1\"\nshift\ncase \"$1\" in *FAIL*) exit 1;; esac\nprintf '%s' \"$1\" > \"$out\"\n",
    )
    .unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn all_units_failing_is_a_run_level_failure() {
    let dir = tempfile::tempdir().unwrap();
    let service = NarrationService::new(dir.path());
    let backend = SpeechBackend::Local(LocalSpeechEngine::new("no-such-speech-engine"));
    let config = SynthesisConfig::new(Language::English, None);
    let script = script_with(
        &[(SectionName::Introduction, "Some narration text.")],
        "Welcome to the presentation.",
    );

    let result = service
        .generate(&backend, &config, "paper-1", &script)
        .await;

    match result {
        Err(NarrationError::NoAudioProduced(paper_id)) => assert_eq!(paper_id, "paper-1"),
        other => panic!("expected NoAudioProduced, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn empty_script_produces_no_audio_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let service = NarrationService::new(dir.path());
    let backend = SpeechBackend::Local(LocalSpeechEngine::new("no-such-speech-engine"));
    let config = SynthesisConfig::new(Language::English, None);
    let script = script_with(
        &[
            (SectionName::Introduction, ""),
            (SectionName::Results, "   "),
        ],
        "",
    );

    // Empty units are skipped without touching the engine, so the run ends
    // with zero successes.
    let result = service
        .generate(&backend, &config, "paper-2", &script)
        .await;
    assert!(matches!(result, Err(NarrationError::NoAudioProduced(_))));
}

#[cfg(unix)]
#[tokio::test]
async fn units_are_generated_in_narration_order() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(dir.path());
    let out_root = dir.path().join("audio");

    let service = NarrationService::new(&out_root);
    let backend = SpeechBackend::Local(LocalSpeechEngine::new(engine.to_str().unwrap()));
    let config = SynthesisConfig::new(Language::English, None);
    let script = script_with(
        &[
            (SectionName::Conclusion, "The method works."),
            (SectionName::Introduction, "This paper narrates itself."),
        ],
        "Welcome to this presentation.",
    );

    let files = service
        .generate(&backend, &config, "paper-3", &script)
        .await
        .unwrap();

    assert_eq!(
        files,
        vec![
            "00_title_introduction.wav",
            "01_introduction.wav",
            "05_conclusion.wav"
        ]
    );
    for name in &files {
        let path = out_root.join("paper-3").join(name);
        assert!(path.exists(), "missing output file {}", path.display());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
    // Per-chunk segments are left behind as accepted artifacts.
    assert!(out_root.join("paper-3").join("temp_chunks").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn empty_units_are_skipped_but_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(dir.path());
    let out_root = dir.path().join("audio");

    let service = NarrationService::new(&out_root);
    let backend = SpeechBackend::Local(LocalSpeechEngine::new(engine.to_str().unwrap()));
    let config = SynthesisConfig::new(Language::English, None);
    let script = script_with(
        &[
            (SectionName::Introduction, ""),
            (SectionName::Methodology, "We narrate every section."),
        ],
        "",
    );

    let files = service
        .generate(&backend, &config, "paper-4", &script)
        .await
        .unwrap();

    assert_eq!(files, vec!["02_methodology.wav"]);
}

#[cfg(unix)]
#[tokio::test]
async fn failing_unit_is_skipped_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(dir.path());
    let out_root = dir.path().join("audio");

    let service = NarrationService::new(&out_root);
    let backend = SpeechBackend::Local(LocalSpeechEngine::new(engine.to_str().unwrap()));
    let config = SynthesisConfig::new(Language::English, None);
    let script = script_with(
        &[
            (SectionName::Introduction, "FAIL this entire unit."),
            (SectionName::Discussion, "This section still narrates."),
        ],
        "",
    );

    let files = service
        .generate(&backend, &config, "paper-6", &script)
        .await
        .unwrap();

    // The failing unit contributes no file; its sibling is unaffected.
    assert_eq!(files, vec!["04_discussion.wav"]);
    assert!(!out_root.join("paper-6").join("01_introduction.wav").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn degraded_assembly_keeps_first_chunk_audio() {
    use papercast_backend::domain::narration::Assembler;

    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(dir.path());
    let out_root = dir.path().join("audio");

    // Two sentences, each alone under the bound but together over it, so
    // the unit becomes two chunks and assembly must concatenate.
    let first_sentence = format!("{}.", "alpha ".repeat(50).trim_end());
    let second_sentence = format!("{}.", "omega ".repeat(50).trim_end());
    let text = format!("{} {}", first_sentence, second_sentence);

    let service = NarrationService::new(&out_root)
        .with_assembler(Assembler::new("no-such-concat-tool"));
    let backend = SpeechBackend::Local(LocalSpeechEngine::new(engine.to_str().unwrap()));
    let config = SynthesisConfig::new(Language::English, None);
    let script = script_with(&[(SectionName::Introduction, text.as_str())], "");

    let files = service
        .generate(&backend, &config, "paper-5", &script)
        .await
        .unwrap();

    assert_eq!(files, vec!["01_introduction.wav"]);
    // The degraded output is exactly the first chunk's audio.
    let produced = std::fs::read_to_string(out_root.join("paper-5").join("01_introduction.wav"))
        .unwrap();
    assert_eq!(produced, first_sentence);
}
