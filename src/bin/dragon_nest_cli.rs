use clap::Parser;
use dragon_nest::{
    cli::{run_cli, Cli},
    init,
};

fn main() {
    init();

    let cli = Cli::parse();
    if let Err(err) = run_cli(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
