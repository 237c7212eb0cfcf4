use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_chain_pair() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    let output = cmd
        .arg("chain")
        .arg("tests/chain/pair_a.tsv")
        .arg("tests/chain/pair_b.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.lines().next().unwrap().starts_with("#label"));
    assert!(stdout.contains("c\t1-2\t0-1\t1\tA-c"));
    assert!(stdout.contains("# weight\t1"));

    Ok(())
}

#[test]
fn command_chain_identical() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    let output = cmd
        .arg("chain")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/acgt.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let labels: Vec<&str> = stdout
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(labels, vec!["a", "c", "g", "t"]);
    assert!(stdout.contains("# weight\t4"));
    // unnamed hits are called after their file and line
    assert!(stdout.contains("tests/chain/acgt.tsv:1"));

    Ok(())
}

#[test]
fn command_chain_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("out.tsv");

    let mut cmd = Command::cargo_bin("maxchain")?;
    cmd.arg("chain")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/gt.tsv")
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    let content = fs::read_to_string(&outfile)?;
    assert!(content.contains("g\t2-3\t0-1\t1\t"));
    assert!(content.contains("t\t3-4\t1-2\t1\t"));
    assert!(content.contains("# weight\t2"));

    Ok(())
}

#[test]
fn command_chain_single_sequence() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    cmd.arg("chain")
        .arg("tests/chain/acgt.tsv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 sequences"));

    Ok(())
}

#[test]
fn command_chain_max_dims() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    cmd.arg("chain")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/acgt.tsv")
        .arg("--max-dims")
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed the maximum of 2"));

    Ok(())
}

#[test]
fn command_chain_limit() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("maxchain")?;
    cmd.arg("chain")
        .arg("tests/chain/acgt.tsv")
        .arg("tests/chain/acgt.tsv")
        .arg("--limit")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# skipped\t4 boxes"));

    Ok(())
}

#[test]
fn command_chain_bad_input() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bad = temp.path().join("bad.tsv");
    fs::write(&bad, "a\t5\t1\t1.0\n")?;

    let mut cmd = Command::cargo_bin("maxchain")?;
    cmd.arg("chain")
        .arg("tests/chain/acgt.tsv")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.tsv:1"));

    Ok(())
}

#[test]
fn command_chain_seeded_bound() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let mut files = vec![];
    for s in 0..3 {
        let path = temp.path().join(format!("seq{}.tsv", s));
        let content: String = (0..10)
            .map(|i| format!("m\t{}\t{}\t1.0\n", i * 4 + s, i * 4 + s + 2))
            .collect();
        fs::write(&path, content)?;
        files.push(path);
    }

    let run = || -> anyhow::Result<String> {
        let mut cmd = Command::cargo_bin("maxchain")?;
        let output = cmd
            .arg("chain")
            .args(&files)
            .arg("--max-boxes")
            .arg("50")
            .arg("--seed")
            .arg("3")
            .output()?;
        assert!(output.status.success());
        Ok(String::from_utf8(output.stdout)?)
    };

    let first = run()?;
    assert_eq!(first, run()?);
    assert!(first.contains("# weight\t"));

    Ok(())
}
