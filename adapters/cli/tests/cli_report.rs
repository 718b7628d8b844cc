use std::process::Command;

fn ballistics(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_ballistics"))
        .args(args)
        .env_remove("RUST_LOG")
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("failed to run ballistics binary");

    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn exposed_player_gets_cover_suggestions() {
    let (success, stdout, _) = ballistics(&[
        "--size",
        "5",
        "--place",
        "player@0,0",
        "--place",
        "enemy@4,0",
        "defenses",
    ]);

    assert!(success);
    assert_eq!(stdout, "(3, 0)\n(2, 0)\n(1, 0)\n");
}

#[test]
fn report_draws_the_board_and_status() {
    let (success, stdout, _) = ballistics(&[
        "--size",
        "5",
        "--place",
        "player@0,0",
        "--place",
        "enemy@4,0",
        "--place",
        "wall@2,0",
    ]);

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "@.#.E");
    assert_eq!(lines[5], "all lines of fire are blocked, the player is safe");
}

#[test]
fn placing_on_an_occupied_cell_fails() {
    let (success, _, stderr) = ballistics(&[
        "--place",
        "player@1,1",
        "--place",
        "wall@1,1",
    ]);

    assert!(!success);
    assert!(stderr.contains("cannot place wall at (1, 1)"), "{stderr}");
}

#[test]
fn builtin_scenarios_are_listed() {
    let (success, stdout, _) = ballistics(&["scenarios"]);

    assert!(success);
    assert!(stdout.lines().any(|line| line.starts_with("corridor")));
}
