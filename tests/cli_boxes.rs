use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_boxes() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    let output = cmd
        .arg("boxes")
        .arg("tests/chain/pair_a.tsv")
        .arg("tests/chain/pair_b.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.starts_with("# labels\tc\traw\t2\tkept\t2"));
    assert!(stdout.contains("c\t(1,0)\t(2,1)\t1\n"));
    assert!(stdout.contains("c\t(1,1)\t(2,2)\t0.55\n"));

    Ok(())
}

#[test]
fn command_boxes_disjoint() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    cmd.arg("boxes")
        .arg("tests/chain/pair_b.tsv")
        .arg("tests/chain/gt.tsv")
        .assert()
        .success()
        .stdout(predicate::str::contains("raw\t0\tkept\t0"));

    Ok(())
}

#[test]
fn command_boxes_bounded() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    let output = cmd
        .arg("boxes")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/acgt.tsv")
        .arg("--max-boxes")
        .arg("2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("raw\t4\tkept\t2"));
    assert_eq!(stdout.lines().filter(|l| !l.starts_with('#')).count(), 2);

    Ok(())
}
