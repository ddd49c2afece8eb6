use assert_cmd::Command;

pub fn fyq_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fyq").unwrap();
    cmd.env_remove("FYQ_DB_PASSWORD");
    cmd
}
