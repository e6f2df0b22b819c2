//! Launching the JVM with the resolved classpath.

use crate::error::{BootError, BootResult};
use std::process::{Command, Stdio};

/// What to run: `<java> -cp <classpath> <main_class> <args...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub java: String,
    pub classpath: String,
    pub main_class: String,
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// Full argument vector, program first.
    pub fn command_line(&self) -> Vec<String> {
        let mut argv = vec![
            self.java.clone(),
            "-cp".to_string(),
            self.classpath.clone(),
            self.main_class.clone(),
        ];
        argv.extend(self.args.iter().cloned());
        argv
    }
}

/// Run the child in the current directory with inherited stdout/stderr and
/// return its exit code. A child killed by a signal reports 128 + signal on Unix.
pub fn launch(spec: &LaunchSpec) -> BootResult<i32> {
    let argv = spec.command_line();
    tracing::info!("EXECUTING '{}'", argv.join(" "));

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| BootError::Launch {
            program: spec.java.clone(),
            source,
        })?;

    let code = exit_code(status);
    tracing::info!(code, "process exited");
    Ok(code)
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(java: &str, main_class: &str, args: &[&str]) -> LaunchSpec {
        LaunchSpec {
            java: java.to_string(),
            classpath: "/r/a.jar:/r/b.jar".to_string(),
            main_class: main_class.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn command_line_order() {
        let s = spec("java", "com.example.Main", &["--flag", "x"]);
        assert_eq!(
            s.command_line(),
            ["java", "-cp", "/r/a.jar:/r/b.jar", "com.example.Main", "--flag", "x"]
        );
    }

    #[test]
    fn missing_program_is_launch_error() {
        let s = spec("/nonexistent/bin/java-does-not-exist", "Main", &[]);
        match launch(&s) {
            Err(BootError::Launch { program, .. }) => {
                assert_eq!(program, "/nonexistent/bin/java-does-not-exist")
            }
            other => panic!("expected Launch error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_propagated() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake_java = dir.path().join("java");
        std::fs::write(&fake_java, "#!/bin/sh\nexit 7\n").unwrap();
        std::fs::set_permissions(&fake_java, std::fs::Permissions::from_mode(0o755)).unwrap();

        let s = spec(fake_java.to_str().unwrap(), "com.example.Main", &["a"]);
        assert_eq!(launch(&s).unwrap(), 7);
    }
}
