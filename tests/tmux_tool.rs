//! End-to-end tests for the `tmux-tool` binary.
//!
//! Most scenarios use a fake `tmux` script. The last test talks to a real
//! tmux and is ignored by default.

#![cfg(unix)]

mod harness;

use harness::{stderr_of, stdout_of, Scenario};

const BINARY: &str = env!("CARGO_BIN_EXE_tmux-tool");

/// Fake tmux: appends one line per call (argv after the server flags) and
/// remembers created sessions with a marker file.
const FAKE_TMUX: &str = r#"shift 4
echo "$*" >> "$FAKE_LOG/calls"
case "$1" in
  has-session) [ -f "$FAKE_LOG/session" ] || exit 1 ;;
  new-session) touch "$FAKE_LOG/session" ;;
  new-window) echo 1 ;;
  list-windows) echo "0: sh"; echo "1: make" ;;
  capture-pane) echo "pane $4" ;;
  list-sessions) echo "one session" ;;
esac
exit 0
"#;

fn setup(name: &str) -> (Scenario, String) {
    let scenario = Scenario::create(name).expect("scenario");
    let tmux = scenario.write_script("fake-tmux", FAKE_TMUX).expect("script");
    (scenario, tmux.display().to_string())
}

fn execute(scenario: &Scenario, tmux: &str, request: &str) -> std::process::Output {
    scenario
        .run_tool(
            BINARY,
            "execute",
            &[
                ("TOOLBOX_TMUX_BIN", tmux),
                ("TOOLBOX_SEND_KEYS_DELAY_MS", "0"),
            ],
            request,
        )
        .expect("run")
}

fn calls(scenario: &Scenario) -> Vec<String> {
    scenario
        .read_log("calls")
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn run_shell_creates_session_then_window_then_types_command() {
    let (scenario, tmux) = setup("tmux-run-shell");
    let session = scenario.session_name();
    let output = execute(&scenario, &tmux, r#"{"action":"run-shell","args":["echo hi"]}"#);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));

    let calls = calls(&scenario);
    assert_eq!(calls.len(), 5, "calls: {calls:?}");
    assert_eq!(calls[0], format!("has-session -t ={session}"));
    assert!(calls[1].starts_with(&format!("new-session -d -s {session} -c ")));
    assert!(calls[2].starts_with(&format!("new-window -d -P -F #{{window_index}} -t {session}: -c ")));
    assert_eq!(calls[3], format!("send-keys -t {session}:1 -l -- echo hi"));
    assert_eq!(calls[4], format!("send-keys -t {session}:1 -- Enter"));
    assert!(stdout_of(&output).contains("window 1"));
}

#[test]
fn second_call_reuses_the_session() {
    let (scenario, tmux) = setup("tmux-reuse");
    execute(&scenario, &tmux, r#"{"action":"list-windows"}"#);
    let output = execute(&scenario, &tmux, r#"{"action":"list-windows"}"#);
    assert_eq!(stdout_of(&output), "0: sh\n1: make\n");
    let creates = calls(&scenario)
        .iter()
        .filter(|c| c.starts_with("new-session"))
        .count();
    assert_eq!(creates, 1);
}

#[test]
fn capture_output_targets() {
    let (scenario, tmux) = setup("tmux-capture");
    let session = scenario.session_name();
    let output = execute(&scenario, &tmux, r#"{"action":"capture-output"}"#);
    assert_eq!(stdout_of(&output), format!("pane {session}\n"));

    let output = execute(
        &scenario,
        &tmux,
        r#"{"action":"capture-output","target":"foo:1.2"}"#,
    );
    assert_eq!(stdout_of(&output), "pane foo:1.2\n");
}

#[test]
fn send_keys_in_order() {
    let (scenario, tmux) = setup("tmux-keys");
    let output = execute(
        &scenario,
        &tmux,
        r#"{"action":"send-keys","target":"w:1","args":["a","b","c"]}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        calls(&scenario),
        [
            "send-keys -t w:1 -- a",
            "send-keys -t w:1 -- b",
            "send-keys -t w:1 -- c"
        ]
    );
}

#[test]
fn unknown_action_exits_one_without_calling_tmux() {
    let (scenario, tmux) = setup("tmux-unknown");
    let output = execute(&scenario, &tmux, r#"{"action":"attach"}"#);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("unknown action `attach`"));
    assert!(calls(&scenario).is_empty());
}

#[test]
fn malformed_request_exits_one() {
    let (scenario, tmux) = setup("tmux-bad-json");
    let output = execute(&scenario, &tmux, "{\"action\":");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).starts_with("Error: "));
}

/// Real tmux round trip on a throwaway socket.
#[test]
#[ignore = "requires a tmux binary"]
fn real_tmux_run_shell_and_capture() {
    let scenario = Scenario::create("tmux-real").expect("scenario");
    let socket = format!("toolbox-it-{}", std::process::id());
    let env = [("TOOLBOX_TMUX_SOCKET", socket.as_str())];
    let run = |request: &str| {
        scenario
            .run_tool(BINARY, "execute", &env, request)
            .expect("run")
    };

    let started = run(r#"{"action":"run-shell","args":["echo toolbox-marker"]}"#);
    assert_eq!(started.status.code(), Some(0), "{}", stderr_of(&started));
    let target = format!("{}:1", scenario.session_name());

    let mut seen = false;
    for _ in 0..20 {
        std::thread::sleep(std::time::Duration::from_millis(100));
        let captured = run(&format!(
            r#"{{"action":"capture-output","target":"{target}"}}"#
        ));
        if stdout_of(&captured).contains("toolbox-marker") {
            seen = true;
            break;
        }
    }
    run(r#"{"action":"run-raw-commands","args":["kill-server"]}"#);
    assert!(seen, "marker never appeared in {target}");
}
