use automodel_cli::AutomodelCli;

fn main() {
    if let Err(err) = AutomodelCli::new().parse_and_run() {
        tracing::error!("automodel failed: {err:?}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
