mod common;

use common::new_session;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};
use winforth::runtime::{
    error::ErrorKind,
    interpreter::{CodeManagement, Interpreter, InterpreterStack},
};

fn script_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    file.write_all(source.as_bytes()).unwrap();
    file.flush().unwrap();

    file
}

fn load_command(file: &NamedTempFile) -> String {
    format!("s\" {}\" loadfile", file.path().display())
}

#[test]
fn test_loadfile_resumes_outer_input() {
    let file = script_file("1 2 +\n: triple\n  3 * ;\n");
    let (mut interp, sink) = new_session();

    interp
        .process_source("<test>", &format!("{} 10 triple", load_command(&file)))
        .unwrap();

    assert_eq!(interp.stack(), &vec![3, 30]);
    assert_eq!(sink.contents(), "triple ");
}

#[test]
fn test_loadfile_failure_discards_outer_input() {
    let file = script_file("5\n1 0 /\n6\n");
    let (mut interp, _) = new_session();

    let err = interp
        .process_source("<test>", &format!("{} 99 100", load_command(&file)))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Arithmetic);
    assert_eq!(interp.stack(), &vec![5]);
    assert!(interp.pending_tokens().iter().all(|token| !token.is("99")));
}

#[test]
fn test_loadfile_error_location_names_the_file() {
    let file = script_file("1 2\n  nope\n");
    let (mut interp, _) = new_session();

    let err = interp.process_source("<test>", &load_command(&file)).unwrap_err();
    let location = err.location().clone().unwrap();

    assert_eq!(err.kind(), ErrorKind::UnknownWord);
    assert_eq!(location.line(), 2);
    assert_eq!(location.column(), 3);
    assert!(location.path().ends_with(&*file.path().file_name().unwrap().to_string_lossy()));
}

#[test]
fn test_loadfile_missing_file() {
    let (mut interp, _) = new_session();

    let err = interp
        .process_source("<test>", "s\" no/such/file.f\" loadfile 1")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(interp.stack().is_empty());
}

#[test]
fn test_loadfile_with_empty_string() {
    let (mut interp, _) = new_session();

    let err = interp.process_source("<test>", "s\" \" loadfile").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingString);
}

#[test]
fn test_loadfile_inside_a_loop() {
    let file = script_file("7\n");
    let (mut interp, _) = new_session();

    interp
        .process_source("<test>", &format!("{} 3 0 do loadfile loop 1", load_command(&file)))
        .unwrap();

    assert_eq!(interp.stack(), &vec![7, 7, 7, 1]);
}

#[test]
fn test_loadfile_uses_search_paths() {
    let directory = tempdir().unwrap();
    let path = directory.path().join("library.f");

    std::fs::write(&path, ": answer 42 ;\n").unwrap();

    let (mut interp, _) = new_session();

    interp.add_search_path(&directory.path().to_string_lossy()).unwrap();
    interp
        .process_source("<test>", "s\" library.f\" loadfile answer")
        .unwrap();

    assert_eq!(interp.stack(), &vec![42]);
}

#[test]
fn test_search_path_must_exist() {
    let (mut interp, _) = new_session();

    let err = interp.add_search_path("/no/such/directory/at/all").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_process_source_file() {
    let file = script_file("2 3 *\n");
    let (mut interp, _) = new_session();

    interp.process_source_file(&file.path().to_string_lossy()).unwrap();

    assert_eq!(interp.stack(), &vec![6]);
}
