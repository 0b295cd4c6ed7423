// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::process::Target;
use crate::spy::Spy;
use serde_json::json;
use yare::parameterized;

#[test]
fn recording_write_records_and_reports_success() {
    let spy: WriteSpy = Spy::new(Target::Stdout);
    let sink = RecordingWrite::new(spy.clone());

    assert!(sink.write_str("Hello, world!"));

    assert_eq!(spy.call_count(), 1);
    assert!(spy.was_called_with(&WriteCall::new("Hello, world!")));
    assert!(spy.returned_with(&true));
}

#[test]
fn recording_write_keeps_bytes_encoding_and_callback() {
    let spy: WriteSpy = Spy::new(Target::Stderr);
    let sink = RecordingWrite::new(spy.clone());
    let cb = WriteCallback::new(|_| panic!("stand-in must not invoke the callback"));

    sink.write_bytes(b"Hello, world");
    sink.write(WriteData::from("Hello, world!"), Some("utf-8"), None);
    sink.write_with_callback(WriteData::from(""), cb.clone());

    assert_eq!(
        spy.call(0).unwrap().data,
        WriteData::Bytes(b"Hello, world".to_vec())
    );
    assert!(spy.was_called_with(&WriteCall::new("Hello, world!").with_encoding("utf-8")));
    assert_eq!(spy.call(2).unwrap().callback, Some(cb));
    assert_eq!(spy.count_matching(|c| c.callback.is_some()), 1);
}

#[test]
fn recording_exit_returns_instead_of_terminating() {
    let spy: ExitSpy = Spy::new(Target::Exit);
    let sink = RecordingExit::new(spy.clone());

    sink.exit(-2);
    sink.exit(0);

    assert_eq!(spy.call_count(), 2);
    assert!(spy.was_called_with(&ExitCall::new(-2)));
    assert_eq!(sink.spy().last_call(), Some(ExitCall::new(0)));
}

#[test]
fn recording_log_keeps_values_unchanged() {
    let spy: LogSpy = Spy::new(Target::Log);
    let sink = RecordingLog::new(spy.clone());
    let obj = json!({ "array": [], "null": null });

    sink.log(vec![obj.clone()]);

    assert_eq!(spy.call_count(), 1);
    assert!(spy.was_called_with(&LogCall::new(vec![obj])));
}

#[test]
fn console_log_macro_converts_arguments() {
    let spy: LogSpy = Spy::new(Target::Log);
    let sink = RecordingLog::new(spy.clone());

    crate::console_log!(sink, "count:", 3, vec!["a", "b"]);
    crate::console_log!(sink);

    assert_eq!(
        spy.call(0).unwrap(),
        LogCall::new(vec![json!("count:"), json!(3), json!(["a", "b"])])
    );
    assert_eq!(spy.call(1).unwrap(), LogCall::default());
}

#[test]
fn console_log_writes_formatted_line_through_sink() {
    let spy: WriteSpy = Spy::new(Target::Stdout);
    let log = ConsoleLog::new(RecordingWrite::new(spy.clone()));

    log.log(vec![json!("total"), json!(2), json!({ "ok": true })]);

    assert_eq!(
        spy.last_call().unwrap().data,
        WriteData::from("total 2 {\"ok\":true}\n")
    );
}

#[parameterized(
    empty = { vec![], "\n" },
    plain_string = { vec![json!("Hello, world!")], "Hello, world!\n" },
    string_not_quoted = { vec![json!("a"), json!("b")], "a b\n" },
    null_and_bool = { vec![json!(null), json!(false)], "null false\n" },
    object = { vec![json!({ "array": [], "null": null })], "{\"array\":[],\"null\":null}\n" },
    nested_string_quoted = { vec![json!(["x"])], "[\"x\"]\n" },
)]
fn format_line_renders_console_style(args: Vec<Value>, expected: &str) {
    assert_eq!(format_line(&args), expected);
}

#[test]
fn std_stream_reports_encoding_failure_to_callback() {
    let failed = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = std::sync::Arc::clone(&failed);
    let cb = WriteCallback::new(move |err| {
        if let Some(err) = err {
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    });

    // Malformed hex fails before anything reaches the stream.
    let ok = StdStream::stderr().write(WriteData::from("zz"), Some("hex"), Some(cb));

    assert!(!ok);
    assert!(failed.load(std::sync::atomic::Ordering::SeqCst));
}

#[test]
fn std_stream_targets() {
    assert_eq!(StdStream::stdout().stream(), Stream::Stdout);
    assert_eq!(StdStream::stderr().stream(), Stream::Stderr);
}

#[test]
fn arc_sinks_forward_to_inner_sink() {
    let write_spy: WriteSpy = Spy::new(Target::Stdout);
    let out: Arc<dyn WriteSink> = Arc::new(RecordingWrite::new(write_spy.clone()));
    let log = ConsoleLog::new(Arc::clone(&out));

    log.log(vec![json!("via"), json!("arc")]);
    assert!(out.write_str("direct"));

    assert!(write_spy.was_called_with(&WriteCall::new("via arc\n")));
    assert!(write_spy.was_called_with(&WriteCall::new("direct")));

    let exit_spy: ExitSpy = Spy::new(Target::Exit);
    let exit: Arc<dyn ExitSink> = Arc::new(RecordingExit::new(exit_spy.clone()));
    ExitSink::exit(&exit, 4);
    assert!(exit_spy.was_called_with(&ExitCall::new(4)));

    let log_spy: LogSpy = Spy::new(Target::Log);
    let logger: Arc<dyn LogSink> = Arc::new(RecordingLog::new(log_spy.clone()));
    crate::console_log!(logger, 1, 2);
    assert!(log_spy.was_called_with(&LogCall::new(vec![json!(1), json!(2)])));
}
