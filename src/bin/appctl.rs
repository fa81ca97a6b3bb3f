use std::process;

use appctl::cli::Appctl;
use appctl::command::output::print_error;
use clap::Parser;
use tokio_util::sync::CancellationToken;

fn main() {
    let app = Appctl::parse();
    timber::init(app.log_level);
    if let Ok(command_structure) = serde_json::to_string(&app.command) {
        tracing::trace!(%command_structure);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: could not start the async runtime: {error}");
            process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let result = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("received Ctrl-C, cancelling");
                on_interrupt.cancel();
            }
        });
        app.run(&cancel).await
    });

    let exit_code = match result {
        Ok(output) => match output.print(app.format_type) {
            Ok(()) => 0,
            Err(error) => {
                tracing::debug!(%error, "could not print the output");
                1
            }
        },
        Err(error) => {
            tracing::debug!(?error);
            let cancelled = error.is_cancellation();
            if let Err(print_error) = print_error(error, app.format_type) {
                tracing::debug!(%print_error, "could not print the error");
            }
            if cancelled { 130 } else { 1 }
        }
    };
    process::exit(exit_code)
}
