use clap::Parser;

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let mut args = megacart::cli::Args::parse_from(argv.iter().cloned());
    if let Err(err) = megacart::cli::finalize_inputs(&mut args, &argv) {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
    if let Err(err) = megacart::run(args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
