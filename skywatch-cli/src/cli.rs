use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use skywatch_core::{
    CityQuery, ClientConfig, Config, OpenWeatherClient, Units, ViewController,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "City weather viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default city and units in the config file.
    Configure,

    /// Fetch and render weather for a city once, then exit.
    Show {
        /// City name, e.g. "Toronto".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            None => interactive().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .with_initial_value(config.api_key.as_deref().unwrap_or(""))
        .prompt()?;
    let default_city = Text::new("Default city:")
        .with_initial_value(&config.default_city)
        .prompt()?;
    let units = Select::new("Units:", vec![Units::Metric, Units::Imperial]).prompt()?;

    let api_key = api_key.trim();
    config.api_key = (!api_key.is_empty()).then(|| api_key.to_owned());
    if let Some(city) = CityQuery::parse(&default_city) {
        config.default_city = city.as_str().to_owned();
    }
    config.units = units;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> Result<()> {
    // Blank input is ignored the same way the search bar ignores it.
    let Some(query) = CityQuery::parse(city) else {
        return Ok(());
    };

    let config = Config::load()?;
    let mut controller = controller_for(&config, query)?;

    println!("Loading...");
    controller.refresh().await;
    render::render(&controller, config.units);

    Ok(())
}

async fn interactive() -> Result<()> {
    let config = Config::load()?;
    let default_city = CityQuery::parse(&config.default_city)
        .ok_or_else(|| anyhow!("Default city in the config file is blank"))?;

    let mut controller = controller_for(&config, default_city)?;

    println!("Loading...");
    controller.refresh().await;
    render::render(&controller, config.units);

    loop {
        let input = match Text::new("Search for a city (blank to keep, \"q\" to quit):").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if input.trim() == "q" {
            break;
        }

        controller.set_search_text(input);
        if controller.submit_search() {
            println!("Loading...");
            controller.refresh().await;
            render::render(&controller, config.units);
        }
    }

    Ok(())
}

fn controller_for(config: &Config, city: CityQuery) -> Result<ViewController> {
    let api_key = config.resolved_api_key()?;
    let client = OpenWeatherClient::new(ClientConfig::new(api_key, config.units));

    Ok(ViewController::new(Box::new(client), city))
}
