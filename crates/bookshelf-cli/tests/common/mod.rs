use std::process::{Command, Output};

/// Run the CLI binary against the given store URL.
pub fn run_cli(args: &[&str], store_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bookshelf"));
    cmd.args(args);
    cmd.env("BOOKSHELF_STORE", store_url);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], store_url: &str) -> String {
    let output = run_cli(args, store_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Count the JSON lines (actual books) in list output.
pub fn count_books(stdout: &str) -> usize {
    stdout.lines().filter(|l| l.starts_with('{')).count()
}

/// Extract the continuation token from list stderr, if any.
pub fn next_page_token(output: &Output) -> Option<String> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .find_map(|line| line.split("Next page token: ").nth(1))
        .map(|token| token.trim().to_string())
}
