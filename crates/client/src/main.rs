//! orgadmin-client CLI entry point.

use clap::Parser;
use orgadmin_client::cli::connection::{into_variables, ConnectionAction};
use orgadmin_client::cli::recurrence::RecurrenceAction;
use orgadmin_client::cli::{Cli, Commands, OutputFormat};
use orgadmin_client::client::{fetch_connection, GraphQlClient, GraphQlPageFetcher};
use orgadmin_client::output::{format_output, pretty};
use orgadmin_client::{ClientConfig, ClientError};
use orgadmin_core::pagination::PaginationOptions;
use orgadmin_core::recurrence::{
    monthly_options, recurrence_errors, RecurrenceForm, RecurrenceInput,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orgadmin_client=info,orgadmin_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.graphql_url {
        config.graphql_url = url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }

    match cli.command {
        Commands::Recurrence(recurrence_cmd) => match recurrence_cmd.action {
            RecurrenceAction::Describe(args) => {
                let form = RecurrenceForm::from(args);
                let rule = form.to_rule();
                match cli.format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "description": form.preview(),
                            "rule": rule,
                        });
                        println!("{}", format_output(&output, cli.format))
                    }
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_rule(&rule, form.start_date, form.end_date))
                    }
                }
            }
            RecurrenceAction::Validate(args) => {
                let form = RecurrenceForm::from(args);
                let errors = recurrence_errors(&form.to_rule(), form.start_date, form.end_date);
                match cli.format {
                    OutputFormat::Json => {
                        let messages = errors.iter().map(ToString::to_string).collect::<Vec<_>>();
                        let output = serde_json::json!({
                            "valid": errors.is_empty(),
                            "errors": messages,
                        });
                        println!("{}", format_output(&output, cli.format));
                    }
                    OutputFormat::Pretty => {
                        if !errors.is_empty() || !cli.quiet {
                            println!("{}", pretty::format_validation_errors(&errors));
                        }
                    }
                }
                if let Some(first) = errors.into_iter().next() {
                    return Err(ClientError::from(first).into());
                }
            }
            RecurrenceAction::MonthlyOptions { start } => {
                let options = monthly_options(start);
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&options, cli.format)),
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_monthly_options(&options))
                    }
                }
            }
            RecurrenceAction::Payload(args) => {
                let form = RecurrenceForm::from(args);
                let rule = form.validated_rule().map_err(ClientError::from)?;
                let payload = RecurrenceInput::from_rule(&rule, form.start_date, form.end_date);
                println!("{}", format_output(&payload, cli.format));
            }
        },
        Commands::Connection(connection_cmd) => match connection_cmd.action {
            ConnectionAction::List {
                query_file,
                data_path,
                vars,
                page_size,
                all,
                dedupe,
            } => {
                let query = std::fs::read_to_string(&query_file).map_err(ClientError::from)?;
                let client = GraphQlClient::from_config(&config)?;
                let fetcher = GraphQlPageFetcher::new(client, query);
                let options = PaginationOptions::new(data_path)
                    .with_page_size(page_size.unwrap_or(config.page_size))
                    .with_query_variables(into_variables(vars))
                    .with_dedupe(dedupe);

                let page = fetch_connection(fetcher, options, all).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&page, cli.format)),
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_nodes(&page.items, page.page_info.as_ref()))
                    }
                }
                if !cli.quiet {
                    eprintln!("Fetched {} items from {}", page.items.len(), config.graphql_url);
                }
            }
        },
    }

    Ok(())
}
