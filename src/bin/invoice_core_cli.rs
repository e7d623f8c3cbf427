use invoice_core::{
    cli::{batch, run_cli},
    init,
};

fn main() {
    init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = if args.is_empty() {
        run_cli()
    } else {
        batch::run(&args)
    };

    if let Err(err) = outcome {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
