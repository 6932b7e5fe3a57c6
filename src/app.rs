//! Comandos de la aplicación sobre ngen-core + ngen-domain.
use std::fmt::Write as _;

use log::info;
use ngen_core::{Capability, CapabilityRegistry, DefaultFileWriter, GenerateReport, Orchestrator, PairedProvider};
use ngen_domain::{add_builtin_target, builtin_registry, builtin_target_names};

use crate::cli::GenerateArgs;
use crate::config::GeneratorConfig;
use crate::errors::AppError;
use crate::loader::load_records;

/// Catálogo de capabilities y tipos registrados, en texto.
pub fn describe_capabilities(registry: &CapabilityRegistry) -> String {
    let mut out = String::from("capabilities:\n");
    for c in Capability::ALL {
        let _ = writeln!(out, "  {:<24} {:<26} payload: {}", c.to_string(), c.interface(), c.expected_shape());
    }
    out.push_str("targets:\n");
    for d in registry.iter() {
        let shape = d.output_shape().map(|s| s.to_string()).unwrap_or_else(|| "-".into());
        let caps: Vec<String> = d.capabilities().iter().map(|c| c.to_string()).collect();
        let _ = writeln!(out, "  {:<24} {:<10} {}", d.name(), shape, caps.join(", "));
    }
    out
}

/// Carga ambas fuentes y escribe un archivo por (unidad, target).
pub fn run_generate(args: &GenerateArgs, config: &GeneratorConfig) -> Result<GenerateReport, AppError> {
    let hydrofabric = load_records(&args.hydrofabric)?;
    let linked = load_records(&args.linked)?;
    let provider = PairedProvider::new(hydrofabric, linked, config.provider_options())?;

    let registry = builtin_registry();
    let mut orchestrator = Orchestrator::new(&registry);
    let targets: Vec<String> = if args.targets.is_empty() {
        builtin_target_names().into_iter().map(String::from).collect()
    } else {
        args.targets.clone()
    };
    for name in &targets {
        add_builtin_target(&mut orchestrator, name)?;
    }

    let root = args.out.clone().unwrap_or_else(|| config.output_root.clone());
    let mut writer = DefaultFileWriter::new(&root)?;
    info!("generating {:?} into {}", targets, root.display());
    Ok(orchestrator.generate([provider], &mut writer)?)
}
