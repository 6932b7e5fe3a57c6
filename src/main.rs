use log::error;
use ngenconf_rust::app::{describe_capabilities, run_generate};
use ngenconf_rust::cli::{parse_args, Command, USAGE};
use ngenconf_rust::config::CONFIG;
use ngenconf_rust::AppError;

fn run(args: &[String]) -> Result<(), AppError> {
    match parse_args(args)? {
        Command::Capabilities => {
            print!("{}", describe_capabilities(&ngen_domain::builtin_registry()));
        }
        Command::Generate(g) => {
            let report = run_generate(&g, &CONFIG)?;
            for w in &report.written {
                println!("{}", w.path.display());
            }
            println!("batch {}: {} unidades, {} archivos, {} colisiones",
                     report.batch_id,
                     report.units,
                     report.written.len(),
                     report.collisions());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        if matches!(e, AppError::Usage(_)) {
            eprintln!("{e}\n{USAGE}");
        } else {
            error!("{e}");
            eprintln!("[ngenconf] error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
