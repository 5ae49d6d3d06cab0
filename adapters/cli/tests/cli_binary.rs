use std::process::Command;

fn maze_runner(arguments: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_maze-runner"))
        .args(arguments)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch maze-runner binary")
}

#[test]
fn prints_one_easy_maze() {
    let output = maze_runner(&["--difficulty", "easy", "--seed", "3"]);
    assert!(output.status.success(), "maze-runner exited with {}", output.status);

    let text = String::from_utf8(output.stdout).expect("utf-8 output");
    let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    assert_eq!(rows.len(), 11, "easy maze should print eleven rows");
    assert!(rows.iter().all(|row| row.chars().count() == 11));
    assert_eq!(rows[1].chars().nth(1), Some('S'));
    assert_eq!(text.matches('G').count(), 1);
}

#[test]
fn even_rows_fail_with_message() {
    let output = maze_runner(&["--rows", "8", "--columns", "9"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("rows must be odd"),
        "unexpected stderr: {stderr}"
    );
}
