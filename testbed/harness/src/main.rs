use std::fs;
use std::io::Read;
use std::process::exit;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::thread::sleep;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;

/// One invocation of the console binary and what it must produce.
#[derive(Debug, Deserialize)]
struct Scenario {
    description: String,
    command: Vec<String>,
    #[serde(default)]
    assertions: Assertions,
    /// Present for runs that only stop when told to.
    long_running: Option<LongRunning>,
}

#[derive(Debug, Deserialize)]
struct LongRunning {
    startup_timeout_ms: u64,
    #[serde(default)]
    stop_with: StopWith,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StopWith {
    /// SIGTERM, leaving the console a chance to say goodbye.
    #[default]
    Term,
    Kill,
}

#[derive(Debug, Default, Deserialize)]
struct Assertions {
    exit_code: Option<i32>,
    exit_signal: Option<i32>,
    stdout_contains: Option<String>,
    stderr_contains: Option<String>,
}

struct Outcome {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Harness error:\n{:#}", err);
        exit(1);
    }
}

fn run() -> Result<()> {
    let scenario_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: youpi-test-harness <scenario.yaml>"))?;

    println!("--- Scenario {scenario_path} ---");
    let content = fs::read_to_string(&scenario_path)
        .with_context(|| format!("Failed to read scenario file '{scenario_path}'"))?;
    let scenario: Scenario =
        serde_yaml::from_str(&content).context("Failed to parse scenario YAML")?;
    println!("{}", scenario.description);

    let Some((executable, args)) = scenario.command.split_first() else {
        bail!("Scenario command cannot be empty");
    };

    let outcome = match &scenario.long_running {
        Some(mode) => run_long(executable, args, mode)?,
        None => {
            let output = Command::new(executable)
                .args(args)
                .output()
                .with_context(|| format!("Failed to execute {:?}", scenario.command))?;
            Outcome {
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
        }
    };

    verify(&outcome, &scenario.assertions)?;
    println!("--- Scenario passed ---");
    return Ok(());
}

fn run_long(executable: &str, args: &[String], mode: &LongRunning) -> Result<Outcome> {
    let mut child = Command::new(executable)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to spawn {executable}"))?;

    println!("Waiting {}ms for the console to start", mode.startup_timeout_ms);
    sleep(Duration::from_millis(mode.startup_timeout_ms));

    if let Some(status) = child.try_wait()? {
        let outcome = collect(&mut child, status)?;
        bail!(
            "Console exited prematurely with {}\n---\nSTDOUT:\n{}\n---\nSTDERR:\n{}",
            outcome.status,
            outcome.stdout,
            outcome.stderr
        );
    }

    match mode.stop_with {
        StopWith::Term => {
            let pid = child.id().to_string();
            let status = Command::new("kill")
                .args(["-TERM", &pid])
                .status()
                .context("Failed to send SIGTERM")?;
            if !status.success() {
                bail!("kill -TERM {pid} failed with {status}");
            }
        }
        StopWith::Kill => child.kill().context("Failed to kill the console")?,
    }

    let status = child.wait().context("Failed to wait for the console")?;
    return collect(&mut child, status);
}

fn collect(child: &mut Child, status: ExitStatus) -> Result<Outcome> {
    let mut stdout = String::new();
    if let Some(mut pipe) = child.stdout.take() {
        pipe.read_to_string(&mut stdout)?;
    }
    let mut stderr = String::new();
    if let Some(mut pipe) = child.stderr.take() {
        pipe.read_to_string(&mut stderr)?;
    }

    return Ok(Outcome {
        status,
        stdout,
        stderr,
    });
}

fn verify(outcome: &Outcome, assertions: &Assertions) -> Result<()> {
    let report = || {
        return format!(
            "---\nSTDOUT:\n{}\n---\nSTDERR:\n{}",
            outcome.stdout, outcome.stderr
        );
    };

    if let Some(expected) = assertions.exit_code {
        if outcome.status.code() != Some(expected) {
            bail!(
                "Exit code mismatch: expected {expected}, got {:?}\n{}",
                outcome.status.code(),
                report()
            );
        }
    }

    #[cfg(unix)]
    if let Some(expected) = assertions.exit_signal {
        use std::os::unix::process::ExitStatusExt;
        if outcome.status.signal() != Some(expected) {
            bail!(
                "Exit signal mismatch: expected {expected}, got {:?}\n{}",
                outcome.status.signal(),
                report()
            );
        }
    }

    if let Some(expected) = &assertions.stdout_contains {
        if !outcome.stdout.contains(expected.as_str()) {
            bail!("STDOUT does not contain '{expected}'\n{}", report());
        }
    }

    if let Some(expected) = &assertions.stderr_contains {
        if !outcome.stderr.contains(expected.as_str()) {
            bail!("STDERR does not contain '{expected}'\n{}", report());
        }
    }

    return Ok(());
}
