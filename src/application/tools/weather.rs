use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::tooling::{
    ParamKind, ParamSpec, Tool, ToolFailure, ToolSpec, string_argument,
};

/// Looks up current conditions and today's forecast for a city. Upstream
/// HTTP errors are reported with their status and body so the model can
/// read what went wrong; nothing here escapes as a hard error.
pub struct WeatherTool {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherTool {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "weather",
            description: "Get weather for a city",
            params: vec![ParamSpec {
                name: "city",
                kind: ParamKind::String,
                description: "City name to look up",
                required: true,
            }],
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFailure> {
        let city = string_argument(arguments, "city")?;
        let url = format!("{}/forecast.json", self.base_url.trim_end_matches('/'));

        debug!(city, "requesting forecast");
        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", "1"),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|err| {
                ToolFailure(format!("unexpected error in weather with {city} param: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "weather API returned an error");
            return Err(ToolFailure(format!(
                "weather API returned status {}: {body}",
                status.as_u16()
            )));
        }

        let forecast: ForecastResponse = response.json().await.map_err(|err| {
            ToolFailure(format!("unexpected error in weather with {city} param: {err}"))
        })?;
        let day = forecast.forecast.forecastday.first().ok_or_else(|| {
            ToolFailure(format!(
                "unexpected error in weather with {city} param: response carried no forecast day"
            ))
        })?;

        Ok(Value::String(format_forecast(
            &forecast.location,
            &forecast.current,
            &day.day,
        )))
    }
}

fn format_forecast(location: &Location, current: &Current, day: &Day) -> String {
    format!(
        "{name} in {country} currently has a temperature of {temp_c} Celsius or {temp_f} Fahrenheit, \
with a max of {max_c} C\u{b0} / {max_f} F\u{b0} and min of {min_c} C\u{b0} / {min_f} F\u{b0}. \
It feels like {feels_c} Celsius or {feels_f} Fahrenheit. It is {condition} outside. \
Wind is moving at {wind_mph} Mph or {wind_kph} Km/h.",
        name = location.name,
        country = location.country,
        temp_c = current.temp_c,
        temp_f = current.temp_f,
        max_c = day.maxtemp_c,
        max_f = day.maxtemp_f,
        min_c = day.mintemp_c,
        min_f = day.mintemp_f,
        feels_c = current.feelslike_c,
        feels_f = current.feelslike_f,
        condition = current.condition.text,
        wind_mph = current.wind_mph,
        wind_kph = current.wind_kph,
    )
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: Location,
    current: Current,
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
    temp_f: f64,
    feelslike_c: f64,
    feelslike_f: f64,
    wind_mph: f64,
    wind_kph: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day: Day,
}

#[derive(Debug, Deserialize)]
struct Day {
    maxtemp_c: f64,
    maxtemp_f: f64,
    mintemp_c: f64,
    mintemp_f: f64,
}
