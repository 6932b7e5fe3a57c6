//! Parseo manual de argumentos.
//!
//! `ngenconf capabilities`
//! `ngenconf generate --hydrofabric <FILE> --linked <FILE> [--out <DIR>] [--target <NAME>]...`
use std::path::PathBuf;

use crate::errors::AppError;

pub const USAGE: &str = "Uso: ngenconf capabilities\n       ngenconf generate --hydrofabric <FILE> --linked <FILE> [--out <DIR>] [--target <NAME>]...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    pub hydrofabric: PathBuf,
    pub linked: PathBuf,
    /// `None` = usar `NGENCONF_OUTPUT_ROOT`.
    pub out: Option<PathBuf>,
    /// Vacío = todos los targets incluidos.
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Capabilities,
    Generate(GenerateArgs),
}

/// `args` sin el nombre del programa.
pub fn parse_args(args: &[String]) -> Result<Command, AppError> {
    match args.first().map(String::as_str) {
        Some("capabilities") => Ok(Command::Capabilities),
        Some("generate") => parse_generate(&args[1..]).map(Command::Generate),
        Some(other) => Err(AppError::Usage(format!("subcomando desconocido {other:?}"))),
        None => Err(AppError::Usage("falta el subcomando".into())),
    }
}

fn parse_generate(args: &[String]) -> Result<GenerateArgs, AppError> {
    let mut hydrofabric: Option<PathBuf> = None;
    let mut linked: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut targets = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1)
                        .cloned()
                        .ok_or_else(|| AppError::Usage(format!("{flag} requiere un valor")))?;
        match flag {
            "--hydrofabric" => hydrofabric = Some(value.into()),
            "--linked" => linked = Some(value.into()),
            "--out" => out = Some(value.into()),
            "--target" => targets.push(value),
            _ => return Err(AppError::Usage(format!("opción desconocida {flag:?}"))),
        }
        i += 2;
    }
    let hydrofabric = hydrofabric.ok_or_else(|| AppError::Usage("falta --hydrofabric".into()))?;
    let linked = linked.ok_or_else(|| AppError::Usage("falta --linked".into()))?;
    Ok(GenerateArgs { hydrofabric,
                      linked,
                      out,
                      targets })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn generate_collects_repeated_targets() {
        let cmd = parse_args(&args("generate --hydrofabric hf.json --linked lnk.jsonl --target PET --target pet")).unwrap();
        let Command::Generate(g) = cmd else { panic!("expected generate") };
        assert_eq!(g.hydrofabric, PathBuf::from("hf.json"));
        assert_eq!(g.out, None);
        assert_eq!(g.targets, vec!["PET", "pet"]);
    }

    #[test]
    fn missing_values_and_sources_are_usage_errors() {
        assert!(matches!(parse_args(&args("generate --hydrofabric")), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(&args("generate --linked l.json")), Err(AppError::Usage(m)) if m.contains("--hydrofabric")));
        assert!(matches!(parse_args(&args("generate --hydrofabric a --linked b --bogus c")), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(&[]), Err(AppError::Usage(_))));
        assert_eq!(parse_args(&args("capabilities")).unwrap(), Command::Capabilities);
    }
}
