use crate::config::WidgetSettings;
use crate::models::{ExchangeRate, WeatherReport};
use crate::services::cache::{CacheKey, CacheManager};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    weather: Vec<Conditions>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Conditions {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    date: Option<String>,
}

/// Weather and exchange-rate widgets for the practical-info page
///
/// Both widgets always answer: upstream failures and a missing API key
/// degrade to fixed placeholder values, which are never cached.
pub struct WidgetClient {
    client: Client,
    settings: WidgetSettings,
    cache: Arc<CacheManager>,
}

impl WidgetClient {
    pub fn new(settings: WidgetSettings, cache: Arc<CacheManager>) -> Result<Self, WidgetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.unwrap_or(10)))
            .build()?;

        Ok(Self {
            client,
            settings,
            cache,
        })
    }

    /// Current weather for each configured city, in configuration order
    pub async fn weather(&self) -> Vec<WeatherReport> {
        let Some(api_key) = self.settings.weather_api_key.as_deref().filter(|k| !k.is_empty()) else {
            tracing::debug!("No weather API key configured, serving placeholder weather");
            return self.settings.cities.iter().map(|c| fallback_weather(c)).collect();
        };

        let cache_key = CacheKey::weather(&self.settings.country);
        match self.cache.get::<Vec<WeatherReport>>(&cache_key).await {
            Ok(Some(reports)) => return reports,
            Ok(None) => {}
            Err(e) => tracing::warn!("Weather cache read failed: {}", e),
        }

        let mut tasks = tokio::task::JoinSet::new();
        for (index, city) in self.settings.cities.iter().enumerate() {
            let client = self.client.clone();
            let url = self.settings.weather_url.clone();
            let query = format!("{},{}", city, self.settings.country);
            let api_key = api_key.to_string();
            let city = city.clone();
            tasks.spawn(async move {
                let result = fetch_weather(&client, &url, &query, &api_key, &city).await;
                (index, city, result)
            });
        }

        let mut reports: Vec<(usize, WeatherReport)> = Vec::with_capacity(self.settings.cities.len());
        let mut complete = true;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(report))) => reports.push((index, report)),
                Ok((index, city, Err(e))) => {
                    tracing::warn!("Weather lookup for {} failed, using placeholder: {}", city, e);
                    complete = false;
                    reports.push((index, fallback_weather(&city)));
                }
                Err(e) => {
                    tracing::error!("Weather task panicked: {}", e);
                    complete = false;
                }
            }
        }

        // Cities whose task died still get a placeholder
        for (index, city) in self.settings.cities.iter().enumerate() {
            if !reports.iter().any(|(i, _)| *i == index) {
                reports.push((index, fallback_weather(city)));
            }
        }
        reports.sort_by_key(|(index, _)| *index);
        let reports: Vec<WeatherReport> = reports.into_iter().map(|(_, report)| report).collect();

        if complete {
            let ttl = Duration::from_secs(self.settings.weather_ttl_secs);
            if let Err(e) = self.cache.set(&cache_key, &reports, ttl).await {
                tracing::warn!("Weather cache write failed: {}", e);
            }
        }

        reports
    }

    /// Exchange rate from USD to the configured currency
    pub async fn exchange_rate(&self) -> ExchangeRate {
        let cache_key = CacheKey::exchange_rate(&self.settings.currency_code);
        match self.cache.get::<ExchangeRate>(&cache_key).await {
            Ok(Some(rate)) => return rate,
            Ok(None) => {}
            Err(e) => tracing::warn!("Exchange rate cache read failed: {}", e),
        }

        match self.fetch_exchange_rate().await {
            Ok(rate) => {
                let ttl = Duration::from_secs(self.settings.currency_ttl_secs);
                if let Err(e) = self.cache.set(&cache_key, &rate, ttl).await {
                    tracing::warn!("Exchange rate cache write failed: {}", e);
                }
                rate
            }
            Err(e) => {
                tracing::warn!("Exchange rate lookup failed, using fallback: {}", e);
                ExchangeRate {
                    rate: self.settings.fallback_rate,
                    date: chrono::Utc::now().to_rfc3339(),
                }
            }
        }
    }

    async fn fetch_exchange_rate(&self) -> Result<ExchangeRate, WidgetError> {
        let response = self.client.get(&self.settings.currency_url).send().await?;
        if !response.status().is_success() {
            return Err(WidgetError::Status(response.status().as_u16()));
        }

        let latest: LatestRates = response
            .json()
            .await
            .map_err(|e| WidgetError::InvalidResponse(e.to_string()))?;

        let rate = latest
            .rates
            .get(&self.settings.currency_code)
            .copied()
            .filter(|r| *r > 0.0)
            .unwrap_or(self.settings.fallback_rate);

        Ok(ExchangeRate {
            rate,
            date: latest.date.unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        })
    }
}

async fn fetch_weather(
    client: &Client,
    url: &str,
    query: &str,
    api_key: &str,
    city: &str,
) -> Result<WeatherReport, WidgetError> {
    let response = client
        .get(url)
        .query(&[("q", query), ("units", "metric"), ("appid", api_key)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(WidgetError::Status(response.status().as_u16()));
    }

    let current: CurrentWeather = response
        .json()
        .await
        .map_err(|e| WidgetError::InvalidResponse(e.to_string()))?;

    let conditions = current
        .weather
        .first()
        .ok_or_else(|| WidgetError::InvalidResponse("Missing weather conditions".into()))?;

    Ok(WeatherReport {
        city: city.to_string(),
        temp: current.main.temp.round() as i64,
        description: conditions.description.clone(),
        humidity: current.main.humidity.round() as i64,
        // m/s to km/h
        wind_speed: (current.wind.speed * 3.6).round() as i64,
        icon: conditions.icon.clone(),
    })
}

/// Placeholder shown when live weather is unavailable
pub fn fallback_weather(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        temp: 30,
        description: "Sunny".to_string(),
        humidity: 70,
        wind_speed: 10,
        icon: "01d".to_string(),
    }
}
