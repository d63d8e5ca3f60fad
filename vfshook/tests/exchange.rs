//! Exchanges with a fake mount service over a real Unix socket.

#![cfg(unix)]

mod support;

use std::io;

use support::{FakeService, Reply};
use vfshook::{Client, Config, Error, Invocation, ReturnCode};

fn exchange(service: &FakeService) -> (vfshook::Result<vfshook::RelaySummary>, Vec<u8>) {
    let mut out = Vec::new();
    let result = Client::connect(service.path()).and_then(|c| c.modified_paths(&mut out));
    (result, out)
}

#[test]
fn relays_payload_without_prefix_or_terminator() {
    let service = FakeService::start(Reply::whole(b"S OK\n"), 1);
    let (result, out) = exchange(&service);

    result.unwrap();
    assert_eq!(out, b"OK");
    assert_eq!(service.requests(), vec![b"MPL|1\n".to_vec()]);
}

#[test]
fn multi_chunk_response_is_concatenated() {
    let service = FakeService::start(
        Reply::chunks(&[b"S", b" src/lib.rs\0", b"docs/\0", b"README.md\0\n"]),
        1,
    );
    let (result, out) = exchange(&service);

    result.unwrap();
    assert_eq!(out, b"src/lib.rs\0docs/\0README.md\0");
    service.requests();
}

#[test]
fn empty_payload_is_success() {
    let service = FakeService::start(Reply::whole(b"S \n"), 1);
    let (result, out) = exchange(&service);

    assert_eq!(result.unwrap().payload_bytes, 0);
    assert!(out.is_empty());
    service.requests();
}

#[test]
fn service_closing_without_reply_is_empty_response() {
    let service = FakeService::start(Reply(Vec::new()), 1);
    let (result, out) = exchange(&service);

    assert_eq!(result.unwrap().reads, 0);
    assert!(out.is_empty());
    service.requests();
}

#[test]
fn failure_status_is_protocol_error() {
    let service = FakeService::start(Reply::whole(b"FMountNotReady\n"), 1);
    let (result, out) = exchange(&service);

    let err = result.unwrap_err();
    assert!(matches!(err, Error::ProtocolError { ref message } if message == "FMountNotReady"));
    assert_eq!(err.exit_code(), ReturnCode::ServiceFailure);
    assert!(out.is_empty());
    service.requests();
}

#[test]
fn hang_up_mid_response_is_read_failure() {
    let service = FakeService::start(Reply::chunks(&[b"S partial\0"]), 1);
    let (result, out) = exchange(&service);

    let err = result.unwrap_err();
    match &err {
        Error::ChannelReadFailed { source, .. } => {
            assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
        }
        other => panic!("expected ChannelReadFailed, got {other:?}"),
    }
    assert_eq!(err.exit_code(), ReturnCode::PipeReadFailed);
    // Payload read before the failure already reached the sink.
    assert_eq!(out, b"partial\0");
    service.requests();
}

#[test]
fn fresh_connections_give_identical_output() {
    let service = FakeService::start(Reply::chunks(&[b"S a\0", b"b\0\n"]), 2);
    let (first, first_out) = exchange(&service);
    let (second, second_out) = exchange(&service);

    first.unwrap();
    second.unwrap();
    assert_eq!(first_out, second_out);
    assert_eq!(service.requests().len(), 2);
}

#[test]
fn missing_socket_is_connect_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Client::connect(dir.path().join("absent")).unwrap_err();
    assert_eq!(err.exit_code(), ReturnCode::PipeConnectError);
    assert!(err.os_code().is_some());
}

#[test]
fn run_uses_configured_pipe() {
    let service = FakeService::start(Reply::whole(b"S x\0\n"), 1);
    let invocation = Invocation::parse(["/not/an/enlistment/hook", "1"]).unwrap();
    let config = Config::default().with_pipe(service.path());

    let mut out = Vec::new();
    vfshook::run(&invocation, &config, &mut out).unwrap();
    assert_eq!(out, b"x\0");
    service.requests();
}

#[test]
fn run_locates_pipe_from_hook_path() {
    let dir = tempfile::tempdir().unwrap();
    let dot = dir.path().join(vfshook::DOT_DIR);
    std::fs::create_dir(&dot).unwrap();
    let hooks = dir.path().join("src/.git/hooks");
    std::fs::create_dir_all(&hooks).unwrap();

    let pipe = dot.join(vfshook::PIPE_FILE);
    let root = dir.path().to_path_buf();
    let service = FakeService::start_at(dir, pipe, Reply::whole(b"S found\n"), 1);

    let hook = root.join("src/.git/hooks/virtual-filesystem");
    let invocation = Invocation::parse([hook.as_os_str(), std::ffi::OsStr::new("1")]).unwrap();
    let mut out = Vec::new();
    vfshook::run(&invocation, &Config::default(), &mut out).unwrap();
    assert_eq!(out, b"found");
    service.requests();
}
