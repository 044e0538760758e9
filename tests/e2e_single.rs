
use std::fs;
use std::process::Output;

use tempfile::tempdir;

use support_single::{
    RESPONSE, closed_port, run_webstress, run_webstress_in, silent_listener,
    spawn_http_server_or_skip, spawn_webstress,
};

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Lines from the summary title through the closing rule.
fn summary_block(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .skip_while(|line| line.as_str() != "==== Stress Test Summary ====")
        .take(10)
        .cloned()
        .collect()
}

fn require(checks: &[(bool, &str)], output: &Output) -> Result<(), String> {
    for (ok, message) in checks {
        if !ok {
            return Err(format!("{}\n{}", message, describe(output)));
        }
    }
    Ok(())
}

#[test]
fn e2e_single_prints_parameters_and_summary() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let port_arg = port.to_string();
    let output = run_webstress([
        "--host",
        "127.0.0.1",
        "--port",
        port_arg.as_str(),
        "--clients",
        "5",
        "--concurrency",
        "2",
        "--timeout",
        "5",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let lines = stdout_lines(&output);
    let parameters: Vec<&str> = lines.iter().take(8).map(String::as_str).collect();
    let expected_parameters = vec![
        "Stress test parameters:".to_owned(),
        " - host: 127.0.0.1".to_owned(),
        format!(" - port: {}", port),
        " - clients: 5".to_owned(),
        " - path: /".to_owned(),
        " - timeout: 5.0s".to_owned(),
        " - ramp: 0.0s".to_owned(),
        " - concurrency: 2".to_owned(),
    ];
    let summary = summary_block(&lines);
    let labels: Vec<&str> = summary
        .iter()
        .map(|line| line.split(':').next().unwrap_or_default())
        .collect();
    let expected_labels = [
        "==== Stress Test Summary ====",
        "Clients requested",
        "Elapsed time",
        "Successful responses",
        "Connection errors",
        "Timeouts",
        "Other errors",
        "Avg latency (s)",
        "Total bytes received",
        "=============================",
    ];

    require(
        &[
            (parameters == expected_parameters, "Unexpected parameter block"),
            (labels == expected_labels, "Summary lines out of order"),
            (
                summary.iter().any(|line| line == "Clients requested: 5"),
                "Missing client count",
            ),
            (
                summary.iter().any(|line| line == "Successful responses: 5"),
                "Expected every client to succeed",
            ),
            (
                summary.iter().any(|line| line == "Connection errors: 0"),
                "Expected no connection errors",
            ),
            (
                summary.iter().any(|line| line == "Timeouts: 0"),
                "Expected no timeouts",
            ),
        ],
        &output,
    )
}

#[test]
fn e2e_single_counts_connect_errors_without_listener() -> Result<(), String> {
    let port = closed_port()?.to_string();
    let output = run_webstress(["--port", port.as_str(), "-c", "5", "-t", "2"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let lines = stdout_lines(&output);
    let has = |expected: &str| lines.iter().any(|line| line == expected);

    require(
        &[
            (has("Connection errors: 5"), "Expected five connection errors"),
            (has("Successful responses: 0"), "Expected no successes"),
            (has("Avg latency (s): 0.0000"), "Expected zero mean latency"),
            (has("Total bytes received: 0"), "Expected no bytes"),
        ],
        &output,
    )
}

#[test]
fn e2e_single_exports_json_summary() -> Result<(), String> {
    let Some((port, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let export = dir.path().join("summary.json");
    let port_arg = port.to_string();
    let export_arg = export.to_string_lossy().into_owned();

    let output = run_webstress([
        "--port",
        port_arg.as_str(),
        "--clients",
        "3",
        "--ramp",
        "0.3",
        "--export-json",
        export_arg.as_str(),
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let content = fs::read_to_string(&export).map_err(|err| format!("read export failed: {}", err))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| format!("parse export failed: {}", err))?;
    let max_bytes = u64::try_from(RESPONSE.len()).unwrap_or(u64::MAX) * 3;
    let bytes = value["bytes_received"].as_u64().unwrap_or(u64::MAX);

    require(
        &[
            (value["counters"]["success"] == 3, "Expected three successes"),
            (value["config"]["clients"] == 3, "Unexpected client count"),
            (value["started_at"].is_string(), "Missing start timestamp"),
            (bytes > 0 && bytes <= max_bytes, "Unexpected byte total"),
            (
                value["creation_span_s"].as_f64().unwrap_or_default() >= 0.15,
                "Ramp not reflected in creation span",
            ),
        ],
        &output,
    )
}

#[test]
fn e2e_single_reads_default_config_file() -> Result<(), String> {
    let port = closed_port()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = format!(
        "host = \"127.0.0.1\"\nport = {}\nclients = 3\ntimeout = \"2s\"\nconcurrency = 2\n",
        port
    );
    fs::write(dir.path().join("webstress.toml"), config)
        .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_webstress_in(dir.path(), ["--clients", "4"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let lines = stdout_lines(&output);
    let has = |expected: &str| lines.iter().any(|line| line == expected);

    require(
        &[
            (has(" - clients: 4"), "Command line must override config"),
            (has(" - concurrency: 2"), "Config concurrency not applied"),
            (has(" - timeout: 2.0s"), "Config timeout not applied"),
            (has("Connection errors: 4"), "Expected four connection errors"),
        ],
        &output,
    )
}

#[test]
fn e2e_single_rejects_zero_concurrency() -> Result<(), String> {
    let output = run_webstress(["--concurrency", "0"])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    if String::from_utf8_lossy(&output.stdout).contains("Stress Test Summary") {
        return Err(format!("Run must not start\n{}", describe(&output)));
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn e2e_single_interrupt_exits_with_status_one() -> Result<(), String> {
    use std::time::Duration;

    let (port, _listener) = silent_listener()?;
    let port_arg = port.to_string();
    let child = spawn_webstress([
        "--port",
        port_arg.as_str(),
        "--clients",
        "2",
        "--timeout",
        "30",
    ])?;

    std::thread::sleep(Duration::from_millis(500));
    let pid = libc::pid_t::try_from(child.id()).map_err(|err| format!("bad pid: {}", err))?;
    // Safety: `pid` belongs to the child spawned above, which has not been waited on.
    let sent = unsafe { libc::kill(pid, libc::SIGTERM) };
    if sent != 0 {
        return Err("Failed to signal child".to_owned());
    }

    let output = child
        .wait_with_output()
        .map_err(|err| format!("wait failed: {}", err))?;
    require(
        &[
            (output.status.code() == Some(1), "Expected exit status 1"),
            (
                stdout_lines(&output)
                    .iter()
                    .any(|line| line == "Interrupted by user"),
                "Expected interruption notice",
            ),
            (
                !String::from_utf8_lossy(&output.stdout).contains("Stress Test Summary"),
                "Summary must not print after interruption",
            ),
        ],
        &output,
    )
}
