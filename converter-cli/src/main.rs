//! Currency converter CLI
//!
//! Command-line front-end for the currency converter: one-shot lookups and an
//! interactive session that plays the part of the widget's presentation layer.

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use converter_core::{ConverterViewModel, CurrencyCache, WidgetEvent, widgets};
use converter_types::{
    ConversionError, ConversionRequest, ConverterState, CurrencyApi, round_to_cents,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Live currency converter", long_about = None)]
struct Cli {
    /// Base URL of the currency API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "https://api.currencybeacon.com/v1"
    )]
    api_url: String,

    /// API key sent as the `api_key` query parameter
    #[arg(long, env = "CONVERTER_API_KEY")]
    api_key: Option<String>,

    /// Quiet period before an edit becomes a request
    #[arg(long, env = "CONVERTER_DEBOUNCE_MS", default_value_t = 500)]
    debounce_ms: u64,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available currencies
    Currencies,
    /// Convert an amount once
    Convert {
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
        /// Amount in the source currency
        amount: f64,
    },
    /// Edit amount and currencies line by line and watch the result update
    Interactive,
}

/// One line typed in an interactive session.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Widget(WidgetEvent),
    Refresh,
    Show,
    Help,
    Quit,
}

const HELP: &str =
    "commands: amount <N> | from <CODE> | to <CODE> | swap | refresh | state | help | quit";

fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let arg = words.next();

    match (command.as_str(), arg) {
        ("amount", Some(value)) => value
            .parse::<f64>()
            .map(|v| Input::Widget(WidgetEvent::AmountChanged(v)))
            .map_err(|_| format!("not a number: {value}")),
        ("from", Some(code)) => Ok(Input::Widget(WidgetEvent::FromSelected(code.to_uppercase()))),
        ("to", Some(code)) => Ok(Input::Widget(WidgetEvent::ToSelected(code.to_uppercase()))),
        ("swap", None) => Ok(Input::Widget(WidgetEvent::SwapRequested)),
        ("refresh", None) => Ok(Input::Refresh),
        ("state", None) => Ok(Input::Show),
        ("help", None) | ("?", None) => Ok(Input::Help),
        ("quit", None) | ("exit", None) => Ok(Input::Quit),
        ("", None) => Ok(Input::Show),
        _ => Err(format!("unrecognised input: {line}")),
    }
}

/// One-line summary of the widget, e.g. `$100.00 -> 92,15 € (rate 0.9215)`.
fn render(state: &ConverterState) -> String {
    let from = widgets::from_selector(state);
    let to = widgets::to_selector(state);
    let from_amount = widgets::from_amount_field(state).value.unwrap_or_default();

    let format = |selector: &widgets::CurrencySelectorProps, value: f64| {
        match selector.selected_currency() {
            Some(currency) => currency.format_amount(value),
            None => format!("{value:.2} {}", selector.selected),
        }
    };

    let lhs = format(&from, from_amount);
    if state.is_converting {
        return format!("{lhs} -> ... {}", to.selected);
    }
    if state.has_error() {
        return format!("{lhs} -> {} ({})", to.selected, state.error_message);
    }
    match widgets::to_amount_field(state).value {
        Some(value) => match state.exchange_rate() {
            Some(rate) => format!("{lhs} -> {} (rate {rate})", format(&to, value)),
            None => format!("{lhs} -> {}", format(&to, value)),
        },
        None => format!("{lhs} -> {}", to.selected),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,converter_core=info,converter_client=info".into());

    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn interactive(config: &Config) -> Result<()> {
    let cache = Arc::new(CurrencyCache::new(Arc::new(config.gateway())));
    let vm = ConverterViewModel::new(cache, config.options());
    vm.init();

    let mut rx = vm.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let line = render(&rx.borrow_and_update());
            println!("{line}");
        }
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Ok(Input::Widget(event)) => vm.handle(event),
            Ok(Input::Refresh) => vm.refresh_currencies(),
            Ok(Input::Show) => {
                let state = vm.state();
                let codes: Vec<_> = state
                    .currencies
                    .iter()
                    .map(|c| c.short_code.as_str())
                    .collect();
                println!("{} currencies: {}", codes.len(), codes.join(" "));
                println!("{}", render(&state));
            }
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Quit) => break,
            Err(message) => eprintln!("{message}\n{HELP}"),
        }
    }

    printer.abort();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = Config::new(&cli.api_url, cli.api_key.as_deref(), cli.debounce_ms)?;
    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    match cli.command {
        Commands::Currencies => {
            let currencies = config.gateway().currencies().await?;
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }

        Commands::Convert { from, to, amount } => {
            let request =
                ConversionRequest::new(from.to_uppercase(), to.to_uppercase(), amount);
            if !request.is_valid() {
                anyhow::bail!(
                    "nothing to convert: need two different currency codes and a positive amount"
                );
            }
            match config.gateway().convert(&request).await {
                Ok(Some(value)) => println!(
                    "{} {} = {:.2} {}",
                    request.amount,
                    request.from,
                    round_to_cents(value),
                    request.to
                ),
                Ok(None) => {
                    eprintln!("{}", ConversionError::NoResult);
                    std::process::exit(1);
                }
                Err(e) => {
                    tracing::error!(error = %e, "conversion failed");
                    eprintln!("{}", ConversionError::from(e));
                    std::process::exit(1);
                }
            }
        }

        Commands::Interactive => interactive(&config).await?,
    }

    Ok(())
}
