use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use tool_launcher::launcher::{classify, LaunchError, LaunchOutcome, Launcher, Opener, TargetClass};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Url(String),
    Path(PathBuf),
    Command(String, Vec<String>, PathBuf),
}

#[derive(Default)]
struct RecordingOpener {
    calls: RefCell<Vec<Call>>,
    fail: bool,
}

impl RecordingOpener {
    fn result(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("no handler available")
        }
        Ok(())
    }
}

impl Opener for RecordingOpener {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(Call::Url(url.to_string()));
        self.result()
    }

    fn open_path(&self, path: &Path) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(Call::Path(path.to_path_buf()));
        self.result()
    }

    fn run_command(&self, program: &str, args: &[String], cwd: &Path) -> anyhow::Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Command(program.to_string(), args.to_vec(), cwd.to_path_buf()));
        self.result()
    }
}

#[test]
fn classifies_targets() {
    assert_eq!(classify("https://example.com"), TargetClass::Url);
    assert_eq!(classify("HTTP://EXAMPLE.COM"), TargetClass::Url);
    assert_eq!(classify("www.example.com"), TargetClass::Url);
    assert_eq!(classify("  https://padded.example  "), TargetClass::Url);
    assert_eq!(classify("ftp://example.com"), TargetClass::Local);
    assert_eq!(classify("C:\\Tools\\app.exe"), TargetClass::Local);
    assert_eq!(classify("notepad.exe"), TargetClass::Local);
    assert_eq!(classify(""), TargetClass::Local);
}

#[test]
fn urls_go_to_browser() {
    let launcher = Launcher::new(RecordingOpener::default(), ".");
    let outcome = launcher.launch("https://doc.rust-lang.org").unwrap();
    assert_eq!(outcome, LaunchOutcome::Url("https://doc.rust-lang.org".into()));
    assert_eq!(
        *launcher.opener().calls.borrow(),
        [Call::Url("https://doc.rust-lang.org".into())]
    );
}

#[test]
fn bare_www_gets_https_scheme() {
    let launcher = Launcher::new(RecordingOpener::default(), ".");
    let outcome = launcher.launch("www.example.com").unwrap();
    assert_eq!(outcome, LaunchOutcome::Url("https://www.example.com".into()));
}

#[test]
fn relative_paths_resolve_against_base_dir() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    let launcher = Launcher::new(RecordingOpener::default(), dir.path());
    let outcome = launcher.launch("notes.txt").unwrap();
    assert_eq!(outcome, LaunchOutcome::Path(file.clone()));
    assert_eq!(*launcher.opener().calls.borrow(), [Call::Path(file)]);
}

#[test]
fn absolute_paths_are_kept() {
    let dir = tempdir().unwrap();
    let launcher = Launcher::new(RecordingOpener::default(), "/somewhere/else");
    assert_eq!(launcher.resolve(&dir.path().to_string_lossy()), dir.path());
    assert_eq!(launcher.resolve("x.txt"), Path::new("/somewhere/else").join("x.txt"));
}

#[test]
fn unknown_target_runs_as_command_line() {
    let dir = tempdir().unwrap();
    let launcher = Launcher::new(RecordingOpener::default(), dir.path());
    let outcome = launcher.launch("git log \"--format=%h %s\"").unwrap();

    let args = vec!["log".to_string(), "--format=%h %s".to_string()];
    assert_eq!(
        outcome,
        LaunchOutcome::Command {
            program: "git".into(),
            args: args.clone(),
        }
    );
    assert_eq!(
        *launcher.opener().calls.borrow(),
        [Call::Command("git".into(), args, dir.path().to_path_buf())]
    );
}

#[test]
fn unbalanced_quotes_are_rejected() {
    let launcher = Launcher::new(RecordingOpener::default(), ".");
    let err = launcher.launch("run \"unterminated").unwrap_err();
    assert!(matches!(err, LaunchError::Unparseable(_)));
    assert!(launcher.opener().calls.borrow().is_empty());
}

#[test]
fn empty_target_is_an_error() {
    let launcher = Launcher::new(RecordingOpener::default(), ".");
    assert!(matches!(launcher.launch("   "), Err(LaunchError::EmptyTarget)));
}

#[test]
fn opener_failure_is_reported_not_raised() {
    let opener = RecordingOpener {
        fail: true,
        ..Default::default()
    };
    let launcher = Launcher::new(opener, ".");
    let err = launcher.launch("https://example.com").unwrap_err();
    match err {
        LaunchError::Failed { target, source } => {
            assert_eq!(target, "https://example.com");
            assert!(source.to_string().contains("no handler"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
