use clap::Parser;
use kanban_board::{
    dispatch, KanbanConfig, KanbanContext, KanbanError, KanbanOperationProcessor, UserId,
    SUPPORTED_OPERATIONS,
};
use serde_json::{json, Value};
use std::io::Read;
use std::process;

mod cli;
mod exit_codes;
mod logging;

use cli::{Cli, Commands};
use exit_codes::{exit_code_for, EXIT_ERROR, EXIT_SUCCESS};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{e}");
                    process::exit(EXIT_SUCCESS);
                }
                _ => {
                    eprintln!("{e}");
                    process::exit(EXIT_ERROR);
                }
            }
        }
    };

    logging::configure_logging(cli.debug, cli.quiet);

    let exit_code = match run(cli).await {
        Ok(value) => {
            print_json(&value);
            EXIT_SUCCESS
        }
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("Error: {error}");
            exit_code_for(&error)
        }
    };
    process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<Value, KanbanError> {
    if let Commands::Ops = cli.command {
        return Ok(json!({ "operations": SUPPORTED_OPERATIONS }));
    }

    let mut config = KanbanConfig::load_from(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    let ctx = KanbanContext::open(config).await?;
    let ctx = match cli.user {
        Some(user) => ctx.as_user(UserId(user)),
        None => ctx,
    };
    let processor = KanbanOperationProcessor::new();

    match cli.command {
        Commands::Init => Ok(json!({
            "initialized": true,
            "database": ctx.database_path().display().to_string(),
        })),
        Commands::Exec { op, params } => {
            let params = read_params(params.as_deref())?;
            dispatch(&op, params, &ctx, &processor).await
        }
        Commands::Activity { limit } => {
            dispatch("list activity", json!({ "limit": limit }), &ctx, &processor).await
        }
        Commands::Ops => Ok(json!({ "operations": SUPPORTED_OPERATIONS })),
    }
}

fn read_params(params: Option<&str>) -> Result<Value, KanbanError> {
    let text = match params {
        None => return Ok(Value::Null),
        Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| KanbanError::validation("params", format!("reading stdin: {e}")))?;
            buffer
        }
        Some(text) => text.to_string(),
    };
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| KanbanError::validation("params", e.to_string()))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}
