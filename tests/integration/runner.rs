use crate::integration::config::write_config_for;
use crate::integration::scenarios::TestScenario;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

pub fn run_scenario(scenario: &TestScenario) {
    info!("▶ Running scenario: {}", scenario.name);

    let (_dir, config_path) = write_config_for(
        &scenario.name,
        scenario.logging.as_ref(),
        scenario.pipeline.as_ref(),
    );
    debug!("Using config path: {}", config_path);

    let mut cli = Command::new(env!("CARGO_BIN_EXE_moment_cli"))
        .args(&scenario.args)
        .env("MOMENT_CONFIG", &config_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start moment_cli");

    {
        let mut stdin = cli.stdin.take().expect("stdin is piped");
        // the CLI may exit before reading its input, e.g. on a config error
        if let Err(e) = stdin.write_all(scenario.stdin.as_bytes()) {
            debug!("stdin closed early: {}", e);
        }
    }

    let output = cli.wait_with_output().expect("moment_cli did not finish");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    debug!("stdout:\n{}", stdout);
    debug!("stderr:\n{}", stderr);

    if output.status.success() == scenario.expect_failure {
        error!(
            "Unexpected exit status {:?} (expect_failure = {})\nstderr:\n{}",
            output.status.code(),
            scenario.expect_failure,
            stderr
        );
        panic!("Scenario '{}' failed", scenario.name);
    }

    let actual = if scenario.expect_failure {
        stderr
    } else {
        stdout
    };
    if scenario.matchers.iter().all(|m| m.matches(&actual)) {
        info!("✅ Scenario '{}' passed", scenario.name);
    } else {
        error!(
            "Expected all matchers to pass. Matchers: {:?}\nActual:\n{}",
            scenario.matchers, actual
        );
        panic!("Scenario '{}' failed", scenario.name);
    }
}
