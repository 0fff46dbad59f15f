use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn run_solve_corridor() {
    let output = "Solving levels/01-corridor.txt...
Found solution:
Right Right Right
Moves: 3
Total cost: 9
";

    Command::main_binary()
        .unwrap()
        .arg("levels/01-corridor.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_solve_unsolvable() {
    let output = "Solving levels/03-no-solution.txt...
No solution
";

    Command::main_binary()
        .unwrap()
        .arg("levels/03-no-solution.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_taboo_render() {
    let output = "#######
#X    #
#######
";

    Command::main_binary()
        .unwrap()
        .arg("--taboo")
        .arg("levels/01-corridor.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_missing_file_arg() {
    // doesn't check stderr - clap's usage text can change between patch versions
    // enough to test that it fails and doesn't print to stdout

    Command::main_binary()
        .unwrap()
        .assert()
        .failure()
        .stdout("");
}
