use assert_cmd::Command;

#[test]
fn help_lists_serve_command() {
    let output = Command::cargo_bin("shelfmark-cli")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("serve"));
}
