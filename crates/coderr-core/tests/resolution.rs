use std::sync::Arc;
use std::thread;

use coderr_core::{Coder, Error, ErrorKind, RegisterError, Registry, ResultExt, coded};

const ERR_BAD_ID: i32 = 1001;
const ERR_INVALID_JSON: i32 = 1002;
const ERR_LOAD_CONFIG: i32 = 1003;

fn registry() -> Registry {
    let registry = Registry::new();
    registry
        .register_unique(Coder::new(ERR_BAD_ID, 400, "bad id"))
        .unwrap();
    registry
        .register_unique(Coder::new(ERR_INVALID_JSON, 500, "Data is not valid JSON"))
        .unwrap();
    registry
        .register_unique(Coder::new(ERR_LOAD_CONFIG, 500, "Load configuration file failed"))
        .unwrap();
    registry
}

fn load_config() -> coderr_core::Result<()> {
    Err(Error::new("open config.toml: no such file"))
}

#[test]
fn registered_codes_resolve_to_their_coder() {
    let registry = registry();
    for (code, http, message) in [
        (ERR_BAD_ID, 400, "bad id"),
        (ERR_INVALID_JSON, 500, "Data is not valid JSON"),
        (ERR_LOAD_CONFIG, 500, "Load configuration file failed"),
    ] {
        let coder = registry
            .parse_coder(&Error::new_with_code(code, "details"))
            .unwrap();
        assert_eq!(coder.code(), code);
        assert_eq!(coder.http_status(), http);
        assert_eq!(coder.to_string(), message);
    }
}

#[test]
fn no_error_resolves_to_nothing() {
    assert!(registry().parse_coder(None::<&Error>).is_none());
}

#[test]
fn uncoded_errors_resolve_to_unknown() {
    let registry = registry();
    let io = Error::from(std::io::Error::other("disk"));
    for err in [
        Error::new("plain"),
        Error::new_with_stack("stacked"),
        Error::new("x").with_message("annotated"),
        io,
    ] {
        let coder = registry.parse_coder(&err).unwrap();
        assert_eq!(coder.code(), 1);
        assert_eq!(coder.http_status(), 500);
        assert_eq!(coder.message(), "An internal server error occurred");
    }
}

#[test]
fn stacking_twice_keeps_first_capture() {
    let err = Error::new("root");
    let once = err.with_stack();
    let twice = once.clone().with_stack();
    assert!(twice.ptr_eq(&once));
    assert_eq!(twice.chain().count(), 2);
}

#[test]
fn last_code_wins() {
    let registry = registry();
    let err = Error::new("root").with_code(ERR_BAD_ID).with_code(ERR_LOAD_CONFIG);
    assert_eq!(registry.parse_coder(&err).unwrap().code(), ERR_LOAD_CONFIG);

    let err = Error::new_with_code(ERR_BAD_ID, "inner").wrap_code(ERR_INVALID_JSON, "outer");
    assert!(registry.is_code(&err, ERR_INVALID_JSON));
    assert!(!registry.is_code(&err, ERR_BAD_ID));
}

#[test]
fn messages_do_not_change_classification() {
    let registry = registry();
    let err = Error::new_with_code(ERR_BAD_ID, "m")
        .with_message("extra")
        .with_message(format!("request {}", 42));
    assert_eq!(registry.parse_coder(&err).unwrap().code(), ERR_BAD_ID);
    assert_eq!(err.to_string(), "request 42");
}

#[test]
fn restacking_keeps_classification() {
    let registry = registry();
    let err = Error::new_with_code(ERR_BAD_ID, "m").with_message("ctx").with_stack();
    assert_eq!(err.kind(), ErrorKind::Code);
    assert!(registry.is_code(&err, ERR_BAD_ID));
}

#[test]
fn result_annotations_classify_foreign_errors() {
    let registry = registry();
    let err = load_config()
        .with_code(ERR_LOAD_CONFIG)
        .with_message("starting server")
        .unwrap_err();

    let coder = registry.parse_coder(&err).unwrap();
    assert_eq!(coder.message(), "Load configuration file failed");
    assert_eq!(err.root_cause().to_string(), "open config.toml: no such file");
}

#[test]
fn bad_id_scenario() {
    let registry = Registry::new();
    registry.register(Coder::new(1001, 400, "bad id")).unwrap();

    let err = coded!(1001, "id {}", "abc");
    let coder = registry.parse_coder(&err).unwrap();
    assert_eq!(coder.http_status(), 400);
    assert_eq!(coder.code(), 1001);
    assert_eq!(registry.render_plain(&err), "bad id");
}

#[test]
fn registration_guards() {
    let registry = Registry::new();
    assert_eq!(
        registry.register(Coder::new(0, 400, "zero")),
        Err(RegisterError::ReservedCode)
    );

    registry.register_unique(Coder::new(42, 400, "first")).unwrap();
    assert_eq!(
        registry.register_unique(Coder::new(42, 404, "second")),
        Err(RegisterError::Duplicate { code: 42 })
    );

    registry.register(Coder::new(43, 400, "first")).unwrap();
    registry.register(Coder::new(43, 404, "second")).unwrap();
    let coder = registry.get_coder(43);
    assert_eq!((coder.http_status(), coder.message()), (404, "second"));
}

#[test]
fn concurrent_readers_and_writers() {
    let registry = Arc::new(registry());
    let err = Error::new_with_code(ERR_BAD_ID, "shared");

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                for code in 0..50 {
                    registry
                        .register(Coder::new(10_000 + i * 100 + code, 400, "generated"))
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            let err = err.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    assert!(registry.is_code(&err, ERR_BAD_ID));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), 4 + 4 * 50);
}
