mod common;

use common::{fixture, TestEnv};

#[test]
fn summarize_subcommand_is_available() {
    let output = TestEnv::new().run(&["summarize", "--help"]);

    assert!(
        output.status.success(),
        "summarize --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn summarize_requires_model_api_key() {
    let output = TestEnv::new().run(&["summarize", "Acme"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("OpenAI API key is missing"),
        "expected missing key error, got:\n{}",
        stderr
    );
}

#[test]
fn summarize_rejects_unknown_provider() {
    let env = TestEnv::new();
    env.write_config("[llm]\nprovider = \"mystery\"\napi_key = \"k\"\n");

    let output = env.run(&["summarize", "Acme"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Unsupported llm.provider"), "got:\n{}", stderr);
}

#[test]
fn summarize_requires_recording_service_key() {
    let env = TestEnv::new().with_llm_api_key("sk-test");

    let output = env.run(&["summarize", "Acme"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Fireflies API key is missing"), "got:\n{}", stderr);
}

#[test]
fn summarize_reports_unreadable_transcript() {
    let env = TestEnv::new().with_llm_api_key("sk-test");
    let missing = env.scratch("missing.json");

    let output = env.run(&[
        "summarize",
        "Acme",
        "--transcript",
        missing.to_str().unwrap(),
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Could not read the transcript of Acme"),
        "got:\n{}",
        stderr
    );
}

#[test]
fn empty_transcript_prints_only_the_framing() {
    let env = TestEnv::new().with_llm_api_key("sk-test");
    let transcript = env.scratch("empty.json");
    std::fs::write(&transcript, "[]").unwrap();

    let output = env.run(&[
        "summarize",
        "Acme",
        "--transcript",
        transcript.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "## Acme call summary\n#review_startup\n"
    );
}

#[test]
fn filler_only_transcript_is_inserted_into_note() {
    let env = TestEnv::new().with_llm_api_key("sk-test");
    let transcript = env.scratch("filler.json");
    std::fs::write(&transcript, r#"[{"speaker": "Bob", "text": "yeah okay sure"}]"#).unwrap();
    let note = env.scratch("acme.md");
    std::fs::write(&note, "# Acme\nmeeting notes\n").unwrap();

    let output = env.run(&[
        "summarize",
        "Acme",
        "--title",
        "Acme Seed",
        "--transcript",
        transcript.to_str().unwrap(),
        "--note",
        note.to_str().unwrap(),
        "--line",
        "2",
    ]);

    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        std::fs::read_to_string(&note).unwrap(),
        "# Acme\n## Acme Seed call summary\n#review_startup\nmeeting notes\n"
    );
}

#[test]
fn line_requires_note() {
    let output = TestEnv::new().with_llm_api_key("test-key").run(&[
        "summarize",
        "Acme",
        "--transcript",
        &fixture("acme_call.json"),
        "--line",
        "3",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2), "stderr:\n{}", stderr);
    assert!(
        stderr.contains("the following required arguments were not provided")
            && stderr.contains("--note <PATH>"),
        "expected clap requires error, got:\n{}",
        stderr
    );
    assert!(output.stdout.is_empty());
}
