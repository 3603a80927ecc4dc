//! Rewrites `tests/golden/<case>/expected_document.json` from each case's
//! `input.prog_bin`.
//!
//! Usage: `regenerate_golden [--case NAME]... [--check] [--pretty]`
//!
//! `--check` compares documents as JSON values and writes nothing; it exits
//! non-zero when any case is stale.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use xdpreset_core::{PresetDocument, decode_program};

const INPUT_FILE: &str = "input.prog_bin";
const EXPECTED_FILE: &str = "expected_document.json";

#[derive(Debug, Default)]
struct Options {
    cases: Vec<String>,
    check: bool,
    pretty: bool,
}

enum Outcome {
    Written,
    UpToDate,
    Stale,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool, String> {
    let options = parse_args(std::env::args().skip(1))?;
    let root = PathBuf::from("tests").join("golden");
    let cases = select_cases(&root, &options.cases)?;

    let mut clean = true;
    for (name, dir) in cases {
        match process_case(&dir, &options)? {
            Outcome::Written => println!("updated {name}"),
            Outcome::UpToDate => println!("ok {name}"),
            Outcome::Stale => {
                println!("stale {name}");
                clean = false;
            }
        }
    }
    Ok(clean)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--case" => {
                let name = args
                    .next()
                    .ok_or_else(|| "--case needs a case name".to_string())?;
                options.cases.push(name);
            }
            "--check" => options.check = true,
            "--pretty" => options.pretty = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

/// Case directories holding an input record, sorted by name.
fn select_cases(root: &Path, wanted: &[String]) -> Result<Vec<(String, PathBuf)>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    let mut cases = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let dir = entry.path();
        if !dir.join(INPUT_FILE).is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if wanted.is_empty() || wanted.contains(&name) {
            cases.push((name, dir));
        }
    }
    cases.sort();

    if let Some(missing) = wanted
        .iter()
        .find(|name| !cases.iter().any(|(case, _)| case == *name))
    {
        return Err(format!("no golden case named '{missing}'"));
    }
    Ok(cases)
}

fn process_case(dir: &Path, options: &Options) -> Result<Outcome, String> {
    let input = dir.join(INPUT_FILE);
    let output = dir.join(EXPECTED_FILE);

    let data =
        fs::read(&input).map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let program = decode_program(&data)
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    let document = PresetDocument::from_program(&program);

    if options.check {
        let actual = serde_json::to_value(&document)
            .map_err(|err| format!("JSON serialization failed: {}", err))?;
        let expected = fs::read_to_string(&output)
            .ok()
            .and_then(|json| serde_json::from_str::<serde_json::Value>(&json).ok());
        return Ok(if expected.as_ref() == Some(&actual) {
            Outcome::UpToDate
        } else {
            Outcome::Stale
        });
    }

    let json = if options.pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    }
    .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(&output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(Outcome::Written)
}

#[cfg(test)]
mod tests {
    use super::parse_args;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_repeated_cases_and_flags() {
        let options =
            parse_args(args(&["--case", "init_program", "--check", "--case", "x"])).unwrap();
        assert_eq!(options.cases, vec!["init_program", "x"]);
        assert!(options.check);
        assert!(!options.pretty);
    }

    #[test]
    fn rejects_unknown_and_incomplete_arguments() {
        assert!(parse_args(args(&["--case"])).is_err());
        assert!(parse_args(args(&["--fast"])).is_err());
    }
}
