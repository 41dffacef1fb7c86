//! Human-friendly rendering of the weather panel.

use chrono::{DateTime, Local};
use skywatch_core::{CurrentConditions, ForecastEntry, Units, ViewController, ViewState};

pub fn render(controller: &ViewController, units: Units) {
    match controller.view_state() {
        ViewState::Loading => println!("Loading..."),
        ViewState::Loaded(current, forecast) => {
            print!("{}", panel(current, forecast, Local::now(), units));
        }
        ViewState::Empty => println!("No data available for \"{}\".", controller.city()),
    }
}

fn panel(
    current: &CurrentConditions,
    forecast: &[ForecastEntry],
    now: DateTime<Local>,
    units: Units,
) -> String {
    let mut out = current_block(current, now, units);

    out.push_str("\nForecast:\n");
    for entry in forecast {
        out.push_str(&forecast_card(entry, units));
        out.push('\n');
    }

    out
}

fn current_block(current: &CurrentConditions, now: DateTime<Local>, units: Units) -> String {
    format!(
        "{}\n{}\n{} - {}\n{}{}\n{}\n",
        now.format("%A"),
        now.format("%Y-%m-%d"),
        current.name,
        current.country,
        current.rounded_temperature(),
        units.suffix(),
        current.description,
    )
}

fn forecast_card(entry: &ForecastEntry, units: Units) -> String {
    format!(
        "{}  {:>3}{}  {}  {}",
        entry.timestamp.format("%a"),
        entry.rounded_temperature(),
        units.suffix(),
        entry.description,
        entry.icon_url(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn toronto_conditions() -> CurrentConditions {
        CurrentConditions {
            name: "Toronto".to_owned(),
            country: "CA".to_owned(),
            temperature: 21.4,
            description: "clear sky".to_owned(),
        }
    }

    #[test]
    fn current_block_shows_rounded_celsius_and_description() {
        let block = current_block(&toronto_conditions(), Local::now(), Units::Metric);

        assert!(block.contains("Toronto - CA"));
        assert!(block.contains("21°C"));
        assert!(block.contains("clear sky"));
    }

    #[test]
    fn forecast_card_shows_weekday_temp_and_icon_url() {
        // 2023-11-14 22:13:20 UTC, a Tuesday.
        let entry = ForecastEntry {
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid"),
            temperature: 11.6,
            description: "few clouds".to_owned(),
            icon: "02d".to_owned(),
        };

        let card = forecast_card(&entry, Units::Metric);

        assert!(card.starts_with("Tue"));
        assert!(card.contains("12°C"));
        assert!(card.contains("few clouds"));
        assert!(card.contains("https://openweathermap.org/img/wn/02d@2x.png"));
    }

    #[test]
    fn imperial_units_render_fahrenheit_suffix() {
        let block = current_block(&toronto_conditions(), Local::now(), Units::Imperial);

        assert!(block.contains("21°F"));
    }
}
