use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const SAM: &str = "I am Sam. Sam I am. I do not like this Sam I am.\n";

// Write the test input into the temporary directory
fn write_input(temp_dir: &tempfile::TempDir,dat: &[u8]) -> Result<PathBuf,Box<dyn std::error::Error>> {
    let in_path = temp_dir.path().join("input.txt");
    std::fs::write(&in_path,dat)?;
    Ok(in_path)
}

fn classic_input() -> Vec<u8> {
    [("A",5),("B",9),("C",12),("D",13),("E",16),("F",45)].iter()
        .map(|(s,n)| s.repeat(*n))
        .collect::<String>()
        .into_bytes()
}

#[test]
fn code_report() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_input(&temp_dir,&classic_input())?;
    let expected = "\
'A' : 1100 (  4 *    5)
'B' : 1101 (  4 *    9)
'C' :  100 (  3 *   12)
'D' :  101 (  3 *   13)
'E' :  111 (  3 *   16)
'F' :    0 (  1 *   45)
28 Bytes

";
    Command::cargo_bin("huffsort")?
        .arg("codes")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout(expected)
        .stderr(predicate::str::contains("encoded 100 into 28"));
    Ok(())
}

#[test]
fn sentence_report() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_input(&temp_dir,SAM.as_bytes())?;
    Command::cargo_bin("huffsort")?
        .arg("codes")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("010 : 111110 (  6 *    1)\n"))
        .stdout(predicate::str::contains("' ' :     10 (  2 *   13)\n"))
        .stdout(predicate::str::ends_with("22 Bytes\n\n"));
    Ok(())
}

#[test]
fn tree_drawing() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_input(&temp_dir,"ab".as_bytes())?;
    Command::cargo_bin("huffsort")?
        .arg("tree")
        .arg("--letters")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout("#-B \n|   \nA   \n    \n\n");
    Ok(())
}

#[test]
fn summary_with_offset() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_input(&temp_dir,"zzzzabcd".as_bytes())?;
    Command::cargo_bin("huffsort")?
        .arg("stats")
        .arg("--offset").arg("4")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout("symbols: 4\nmerges: 3\nheight: 2\ninput bytes: 4\nencoded bytes: 1\n");
    Ok(())
}

#[test]
fn single_symbol_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_input(&temp_dir,"aaaa".as_bytes())?;
    Command::cargo_bin("huffsort")?
        .arg("codes")
        .arg("-i").arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("InsufficientSymbols(1)"));
    Ok(())
}

#[test]
fn missing_input_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    Command::cargo_bin("huffsort")?
        .arg("tree")
        .arg("-i").arg(temp_dir.path().join("nothing.txt"))
        .assert()
        .failure();
    Ok(())
}
