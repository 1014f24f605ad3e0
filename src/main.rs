use clap::Parser;

use nestlead::cli::{Cli, Commands};
use nestlead::system::panic_handler::{RunMode, install_panic_hook};
use nestlead::{config, runtime, system};

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    config::init_config(cli.config.as_deref());

    let exit_code = if *cli.command_or_default() == Commands::Serve {
        run_server_mode()
    } else {
        run_cli_mode(cli)
    };
    std::process::exit(exit_code);
}

fn run_server_mode() -> i32 {
    install_panic_hook(RunMode::Server);

    let config = config::get_config();
    let _guard = match system::logging::init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            return 1;
        }
    };

    let result = actix_web::rt::System::new().block_on(runtime::modes::run_server());
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Server exited with error: {:#}", e);
            eprintln!("Server error: {:#}", e);
            1
        }
    }
}

fn run_cli_mode(cli: Cli) -> i32 {
    install_panic_hook(RunMode::Cli);

    let Some(command) = cli.command else {
        return 0;
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return 1;
        }
    };

    match rt.block_on(runtime::modes::run_cli(command)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            1
        }
    }
}
