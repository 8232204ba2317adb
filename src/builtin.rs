use crate::command::{CommandFactory, ExecutableCommand, Factory, Stdin, Stdout};
use crate::env::GlobalEnvironment;
use crate::parser::Invocation;
use anyhow::{Context, Result, anyhow};
use argh::{EarlyExit, FromArgs};
use regex::RegexBuilder;
use std::env;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process on the thread of their pipeline stage.
pub(crate) trait BuiltinCommand: Sized + FromArgs + Send {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Executes the command using provided IO streams and environment.
    fn execute(
        self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &GlobalEnvironment,
    ) -> Result<()>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        mut stdin: &mut dyn Stdin,
        mut stdout: &mut dyn Stdout,
        env: &GlobalEnvironment,
    ) -> Result<()> {
        <T as BuiltinCommand>::execute(*self, &mut stdin, &mut stdout, env)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Stand-in for a builtin whose arguments argh rejected or that was asked for `--help`.
struct InvalidArgs {
    name: &'static str,
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _stdin: &mut dyn Stdin,
        stdout: &mut dyn Stdout,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        stdout.write_all(self.output.as_bytes())?;
        if !self.output.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        if self.is_error {
            return Err(anyhow!("{}: invalid arguments", self.name));
        }
        Ok(())
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, invocation: &Invocation) -> Option<Box<dyn ExecutableCommand>> {
        if invocation.name != T::name() {
            return None;
        }
        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        Some(match T::from_args(&[T::name()], &args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                name: T::name(),
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        let dir = env::current_dir().context("pwd: can't read current directory")?;
        writeln!(stdout, "{}", dir.to_string_lossy())?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
/// If no target is provided, changes to the directory specified by the HOME environment variable.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to, absolute or relative; $HOME when omitted
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        _stdout: &mut dyn Write,
        env: &GlobalEnvironment,
    ) -> Result<()> {
        let target = match &self.target {
            Some(t) if !t.is_empty() => PathBuf::from(t),
            _ => env
                .get("HOME")
                .map(PathBuf::from)
                .ok_or_else(|| anyhow!("cd: no target and HOME not set"))?,
        };

        let canonical = fs::canonicalize(&target)
            .with_context(|| format!("cd: can't canonicalize {}", target.display()))?;

        env::set_current_dir(&canonical)
            .with_context(|| format!("cd: can't chdir to {}", canonical.display()))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Exit shell process
pub struct Exit {
    #[argh(positional)]
    /// exit status of the shell, 0 by default.
    pub code: Option<i32>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        _stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        std::process::exit(self.code.unwrap_or(0))
    }
}

#[derive(FromArgs)]
/// write the arguments to standard output, separated by spaces.
/// by default, a trailing newline is printed.
pub struct Echo {
    #[argh(switch, short = 'n')]
    /// do not output the trailing newline.
    pub no_newline: bool,

    #[argh(positional, greedy)]
    /// values to print as-is, separated by spaces.
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        let s = self.args.join(" ");
        if self.no_newline {
            write!(stdout, "{}", s)?;
        } else {
            writeln!(stdout, "{}", s)?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// count lines, words and bytes
pub struct WC {
    #[argh(positional, greedy)]
    /// files to count. If none provided, reads from stdin.
    pub files: Vec<String>,
}

/// Lines, words and bytes of `data`.
fn count(data: &[u8]) -> (usize, usize, usize) {
    let text = String::from_utf8_lossy(data);
    (text.lines().count(), text.split_whitespace().count(), data.len())
}

impl BuiltinCommand for WC {
    fn name() -> &'static str {
        "wc"
    }

    fn execute(
        self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        if self.files.is_empty() {
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf)?;
            let (lines, words, bytes) = count(&buf);
            writeln!(stdout, "{} {} {}", lines, words, bytes)?;
            return Ok(());
        }
        for fname in self.files {
            let buf = fs::read(&fname).map_err(|e| anyhow!("wc: {}: {}", fname, e))?;
            let (lines, words, bytes) = count(&buf);
            writeln!(stdout, "{} {} {} {}", lines, words, bytes, fname)?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// print file(s) to stdout
pub struct Cat {
    #[argh(positional, greedy)]
    /// files to print. If none provided, copies stdin.
    pub files: Vec<String>,
}

impl BuiltinCommand for Cat {
    fn name() -> &'static str {
        "cat"
    }

    fn execute(
        self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        if self.files.is_empty() {
            io::copy(stdin, stdout)?;
            return Ok(());
        }
        for fname in self.files {
            let mut f =
                fs::File::open(&fname).map_err(|e| anyhow!("cat: {}: {}", fname, e))?;
            io::copy(&mut f, stdout)?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// list directory contents
pub struct Ls {
    #[argh(positional)]
    /// directory or file to list. Defaults to the current directory.
    pub path: Option<String>,
}

/// ls-like permission string, e.g. `drwxr-xr-x`.
fn permission_string(meta: &fs::Metadata) -> String {
    let mode = meta.permissions().mode();
    let mut perm = String::with_capacity(10);
    perm.push(if meta.file_type().is_symlink() {
        'l'
    } else if meta.is_dir() {
        'd'
    } else {
        '-'
    });
    // owner, group, others
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        perm.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        perm.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        perm.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    perm
}

fn report_entry(stdout: &mut dyn Write, meta: &fs::Metadata, name: &str) -> io::Result<()> {
    writeln!(stdout, "{} {}", permission_string(meta), name)
}

impl BuiltinCommand for Ls {
    fn name() -> &'static str {
        "ls"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        let path = match self.path {
            Some(p) => PathBuf::from(p),
            None => env::current_dir().context("ls: unable to determine current directory")?,
        };

        let meta = fs::symlink_metadata(&path)
            .with_context(|| format!("ls: unable to read file info ({})", path.display()))?;

        if !meta.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            report_entry(stdout, &meta, &name)?;
            return Ok(());
        }

        let mut entries = fs::read_dir(&path)
            .with_context(|| format!("ls: unable to read given directory ({})", path.display()))?
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let meta = entry.metadata().with_context(|| {
                format!("ls: unable to read file info ({})", entry.path().display())
            })?;
            report_entry(stdout, &meta, &entry.file_name().to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// print the lines of the input that match a regular expression
pub struct Grep {
    #[argh(switch, short = 'i')]
    /// match letters regardless of case
    pub ignore_case: bool,

    #[argh(switch, short = 'w')]
    /// require the match to be a whole word
    pub word_regexp: bool,

    #[argh(option, short = 'A', default = "0")]
    /// number of lines to print after each matching line
    pub after_context: usize,

    #[argh(positional)]
    /// regular expression to look for
    pub pattern: String,

    #[argh(positional, greedy)]
    /// files to read; standard input when empty
    pub files: Vec<String>,
}

impl Grep {
    fn process_source(
        &self,
        reader: &mut dyn Read,
        stdout: &mut dyn Write,
        file_name: Option<&str>,
        re: &regex::Regex,
    ) -> Result<()> {
        let reader = BufReader::new(reader);

        let mut lines = Vec::new();
        let mut match_indices = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.context("read error")?;
            if re.is_match(&line) {
                match_indices.push(line_num);
            }
            lines.push(line);
        }

        let total_lines = lines.len();
        let mut to_print = vec![false; total_lines];

        for &match_line in &match_indices {
            let end_print = (match_line + self.after_context + 1).min(total_lines);
            for flag in &mut to_print[match_line..end_print] {
                *flag = true;
            }
        }

        let prefix = file_name
            .map(|name| format!("{}:", name))
            .unwrap_or_default();
        let mut last_printed_index: Option<usize> = None;

        for (i, line) in lines.iter().enumerate() {
            if !to_print[i] {
                continue;
            }
            let gap = matches!(last_printed_index, Some(last) if i > last + 1);
            if self.after_context > 0 && gap {
                stdout.write_all(b"--\n")?;
            }
            writeln!(stdout, "{}{}", prefix, line)?;
            last_printed_index = Some(i);
        }

        Ok(())
    }
}

impl BuiltinCommand for Grep {
    fn name() -> &'static str {
        "grep"
    }

    fn execute(
        self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &GlobalEnvironment,
    ) -> Result<()> {
        let pattern = if self.word_regexp {
            format!(r"\b({})\b", self.pattern)
        } else {
            self.pattern.clone()
        };

        let re = RegexBuilder::new(&pattern)
            .case_insensitive(self.ignore_case)
            .build()
            .with_context(|| format!("grep: invalid regex pattern: {}", pattern))?;

        if self.files.is_empty() {
            return self.process_source(stdin, stdout, None, &re);
        }

        let mut first_error = None;
        for file_name in &self.files {
            let result = fs::File::open(Path::new(file_name))
                .map_err(anyhow::Error::from)
                .and_then(|mut f| {
                    let prefix = (self.files.len() > 1).then_some(file_name.as_str());
                    self.process_source(&mut f, stdout, prefix, &re)
                });
            if let Err(e) = result {
                first_error.get_or_insert_with(|| anyhow!("grep: {}: {}", file_name, e));
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lock_current_dir;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run<T: BuiltinCommand>(cmd: T, input: &[u8]) -> (Result<()>, String) {
        let env = GlobalEnvironment::new();
        let mut out: Vec<u8> = Vec::new();
        let res = cmd.execute(&mut Cursor::new(input.to_vec()), &mut out, &env);
        (res, String::from_utf8(out).unwrap())
    }

    /// Temporary directory holding `test_data.txt` with `content`.
    fn setup_test_environment(content: &str) -> (TempDir, String) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file_path = dir.path().join("test_data.txt");
        fs::write(&file_path, content).expect("write test file");
        (dir, file_path.to_string_lossy().to_string())
    }

    #[test]
    fn test_pwd_prints_current_dir() {
        let _lock = lock_current_dir();
        let cur = env::current_dir().unwrap();

        let (res, out) = run(Pwd {}, b"");
        assert!(res.is_ok());
        assert_eq!(out, format!("{}\n", cur.to_string_lossy()));
    }

    #[test]
    fn test_echo_with_and_without_newline() {
        let args = vec!["hello".to_string(), "world".to_string()];
        let (res, out) = run(
            Echo {
                no_newline: false,
                args,
            },
            b"",
        );
        assert!(res.is_ok());
        assert_eq!(out, "hello world\n");

        let args = vec!["foo".to_string(), "bar".to_string()];
        let (res, out) = run(
            Echo {
                no_newline: true,
                args,
            },
            b"",
        );
        assert!(res.is_ok());
        assert_eq!(out, "foo bar");
    }

    #[test]
    fn test_cd_to_absolute_path() {
        let _lock = lock_current_dir();
        let temp = tempfile::tempdir().unwrap();
        let canonical_temp = fs::canonicalize(temp.path()).unwrap();
        let orig = env::current_dir().unwrap();

        let target = Some(canonical_temp.to_string_lossy().to_string());
        let (res, _) = run(Cd { target }, b"");
        let new_cwd = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert!(res.is_ok());
        assert_eq!(fs::canonicalize(new_cwd).unwrap(), canonical_temp);
    }

    #[test]
    fn test_cd_to_home_when_none() {
        let _lock = lock_current_dir();
        let temp = tempfile::tempdir().unwrap();
        let canonical_temp = fs::canonicalize(temp.path()).unwrap();
        let orig = env::current_dir().unwrap();

        let shell_env = GlobalEnvironment::new();
        shell_env.set("HOME", canonical_temp.to_string_lossy().to_string());

        let cmd = Cd { target: None };
        let mut out: Vec<u8> = Vec::new();
        let res = cmd.execute(&mut Cursor::new(Vec::<u8>::new()), &mut out, &shell_env);
        let new_cwd = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert!(res.is_ok());
        assert_eq!(fs::canonicalize(new_cwd).unwrap(), canonical_temp);
    }

    #[test]
    fn test_cd_without_home_errors() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();

        let (res, _) = run(Cd { target: None }, b"");
        assert!(res.is_err());
        assert_eq!(env::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();

        let name = format!("nonexistent_dir_for_cd_test_{}", std::process::id());
        let (res, _) = run(Cd { target: Some(name) }, b"");

        assert!(res.is_err());
        assert_eq!(env::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cat_reads_file() {
        let (_dir, file) = setup_test_environment("hello\nworld\n");
        let (res, out) = run(Cat { files: vec![file] }, b"");
        assert!(res.is_ok());
        assert_eq!(out, "hello\nworld\n");
    }

    #[test]
    fn test_cat_reads_stdin_when_no_args() {
        let (res, out) = run(Cat { files: Vec::new() }, b"from stdin\nline2\n");
        assert!(res.is_ok());
        assert_eq!(out, "from stdin\nline2\n");
    }

    #[test]
    fn test_cat_missing_file_fails() {
        let (res, out) = run(
            Cat {
                files: vec!["/nonexistent/cat/input".to_string()],
            },
            b"",
        );
        assert!(res.unwrap_err().to_string().starts_with("cat: /nonexistent/cat/input"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_wc_counts_file() {
        let (_dir, file) = setup_test_environment("one two\nthree\n");
        let (res, out) = run(
            WC {
                files: vec![file.clone()],
            },
            b"",
        );
        assert!(res.is_ok());
        // lines = 2, words = 3, bytes = len("one two\nthree\n") = 14
        assert_eq!(out, format!("2 3 14 {}\n", file));
    }

    #[test]
    fn test_wc_counts_stdin_when_no_args() {
        let (res, out) = run(WC { files: Vec::new() }, b"a b c\n");
        assert!(res.is_ok());
        assert_eq!(out, "1 3 6\n");

        let (_, out) = run(WC { files: Vec::new() }, b"42\n");
        assert_eq!(out, "1 1 3\n");
    }

    #[test]
    fn test_wc_multiple_files_output_contains_each_filename() {
        let (_dir1, file1) = setup_test_environment("a b\n");
        let (_dir2, file2) = setup_test_environment("c\n");

        let (res, out) = run(
            WC {
                files: vec![file1.clone(), file2.clone()],
            },
            b"",
        );
        assert!(res.is_ok());
        assert_eq!(out, format!("1 2 4 {}\n1 1 2 {}\n", file1, file2));
    }

    #[test]
    fn test_ls_lists_sorted_entries_with_permissions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::set_permissions(dir.path().join("a.txt"), fs::Permissions::from_mode(0o644)).unwrap();
        fs::set_permissions(dir.path().join("b.txt"), fs::Permissions::from_mode(0o600)).unwrap();
        fs::set_permissions(dir.path().join("sub"), fs::Permissions::from_mode(0o755)).unwrap();

        let (res, out) = run(
            Ls {
                path: Some(dir.path().to_string_lossy().to_string()),
            },
            b"",
        );
        assert!(res.is_ok());
        assert_eq!(out, "-rw-r--r-- a.txt\n-rw------- b.txt\ndrwxr-xr-x sub\n");
    }

    #[test]
    fn test_ls_single_file() {
        let (_dir, file) = setup_test_environment("data");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o751)).unwrap();

        let (res, out) = run(Ls { path: Some(file) }, b"");
        assert!(res.is_ok());
        assert_eq!(out, "-rwxr-x--x test_data.txt\n");
    }

    #[test]
    fn test_ls_missing_path_errors() {
        let (res, _) = run(
            Ls {
                path: Some("/nonexistent/ls/target".to_string()),
            },
            b"",
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_grep_ignore_case_i_isolated() {
        let (_dir, file) = setup_test_environment("Target 1\nTaRgEt 2\nNo match\n");

        let grep = Grep {
            pattern: "target".to_string(),
            files: vec![file],
            word_regexp: false,
            ignore_case: true, // <- -i
            after_context: 0,
        };

        let (res, out) = run(grep, b"");
        assert!(res.is_ok());
        assert_eq!(out, "Target 1\nTaRgEt 2\n");
    }

    #[test]
    fn test_grep_whole_words() {
        let grep = Grep {
            pattern: "cat".to_string(),
            files: Vec::new(),
            word_regexp: true, // <- -w
            ignore_case: false,
            after_context: 0,
        };

        let (res, out) = run(grep, b"concatenate\na cat here\ncat\n");
        assert!(res.is_ok());
        assert_eq!(out, "a cat here\ncat\n");
    }

    #[test]
    fn test_grep_trailing_context_a_1_isolated() {
        let content = "Line 1\nMATCH 1\nLine 3\nLine 4\nMATCH 2\nLine 6\nLine 7\nLine 8\n";

        let grep = Grep {
            pattern: "MATCH".to_string(),
            files: Vec::new(),
            word_regexp: false,
            ignore_case: false,
            after_context: 1, // <- -A 1
        };

        let (res, out) = run(grep, content.as_bytes());
        assert!(res.is_ok());
        assert_eq!(out, "MATCH 1\nLine 3\n--\nMATCH 2\nLine 6\n");
    }

    #[test]
    fn test_grep_context_overlap_a_2_isolated() {
        let content = "MATCH 1\nLine 2\nMATCH 2\nLine 4\nLine 5\nLine 6\n";

        let grep = Grep {
            pattern: "MATCH".to_string(),
            files: Vec::new(),
            word_regexp: false,
            ignore_case: false,
            after_context: 2, // <- -A 2
        };

        let (res, out) = run(grep, content.as_bytes());
        assert!(res.is_ok());
        assert_eq!(out, "MATCH 1\nLine 2\nMATCH 2\nLine 4\nLine 5\n");
    }

    #[test]
    fn test_grep_prefixes_names_for_several_files() {
        let (_dir1, file1) = setup_test_environment("pipe one\nother\n");
        let (_dir2, file2) = setup_test_environment("two pipe\n");

        let grep = Grep {
            pattern: "pipe".to_string(),
            files: vec![file1.clone(), file2.clone()],
            word_regexp: false,
            ignore_case: false,
            after_context: 0,
        };

        let (res, out) = run(grep, b"");
        assert!(res.is_ok());
        assert_eq!(out, format!("{}:pipe one\n{}:two pipe\n", file1, file2));
    }

    #[test]
    fn test_grep_invalid_pattern_fails() {
        let grep = Grep {
            pattern: "(".to_string(),
            files: Vec::new(),
            word_regexp: false,
            ignore_case: false,
            after_context: 0,
        };
        let (res, _) = run(grep, b"(\n");
        assert!(res.is_err());
    }

    #[test]
    fn test_factory_parses_arguments() {
        let cmd = Factory::<Grep>::default()
            .try_create(&Invocation::new("grep", &["-i", "-A", "1", "x"]))
            .unwrap();
        let mut out: Vec<u8> = Vec::new();
        cmd.execute(
            &mut Cursor::new(b"X\nnext\nlast\n".to_vec()),
            &mut out,
            &GlobalEnvironment::new(),
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "X\nnext\n");

        assert!(
            Factory::<Grep>::default()
                .try_create(&Invocation::new("egrep", &["x"]))
                .is_none()
        );
    }

    #[test]
    fn test_factory_reports_invalid_arguments() {
        let cmd = Factory::<Echo>::default()
            .try_create(&Invocation::new("echo", &["--bogus"]))
            .unwrap();
        let mut out: Vec<u8> = Vec::new();
        let shell_env = GlobalEnvironment::new();
        let res = cmd.execute(&mut Cursor::new(Vec::<u8>::new()), &mut out, &shell_env);
        assert!(res.is_err());
        assert!(!out.is_empty());
    }

    #[test]
    fn test_factory_help_is_not_an_error() {
        let cmd = Factory::<WC>::default()
            .try_create(&Invocation::new("wc", &["--help"]))
            .unwrap();
        let mut out: Vec<u8> = Vec::new();
        let shell_env = GlobalEnvironment::new();
        let res = cmd.execute(&mut Cursor::new(Vec::<u8>::new()), &mut out, &shell_env);
        assert!(res.is_ok());
        assert!(String::from_utf8(out).unwrap().contains("Usage: wc"));
    }
}
