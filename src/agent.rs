//! One dialog turn: utterance in, weather report (or a typed failure) out.

use tracing::{debug, info};

use crate::config::PogodaConfig;
use crate::date_resolver::DateResolver;
use crate::location_resolver::LocationExtractor;
use crate::models::ResolvedDate;
use crate::weather::{WeatherApiClient, WeatherProvider};
use crate::Result;

const PROMPT_CITY: &str = "Введите город: ";
const PROMPT_CITY_AND_DATE: &str = "Введите город и дату: ";

/// Composes location extraction, date resolution and the weather lookup
pub struct WeatherAgent {
    locations: LocationExtractor,
    dates: Option<DateResolver>,
    weather: Box<dyn WeatherProvider>,
}

impl WeatherAgent {
    /// Agent with the built-in recognizers. `dates` is `None` to skip date resolution.
    pub fn new(
        locations: LocationExtractor,
        dates: Option<DateResolver>,
        weather: impl WeatherProvider + 'static,
    ) -> Self {
        Self {
            locations,
            dates,
            weather: Box::new(weather),
        }
    }

    /// Agent wired to the HTTP weather client as configured
    pub fn from_config(config: &PogodaConfig) -> Result<Self> {
        let client = WeatherApiClient::new(&config.weather)?;
        let dates = config.dialog.resolve_dates.then(DateResolver::default);
        Ok(Self::new(LocationExtractor::default(), dates, client))
    }

    #[must_use]
    pub fn resolves_dates(&self) -> bool {
        self.dates.is_some()
    }

    /// Text shown before reading the next line
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        if self.resolves_dates() {
            PROMPT_CITY_AND_DATE
        } else {
            PROMPT_CITY
        }
    }

    /// Handle one line of user input
    pub async fn handle_turn(&self, raw: &str) -> Result<String> {
        let utterance = raw.to_lowercase();

        let location = self.locations.extract_location(&utterance)?;
        let asked: Option<ResolvedDate> = match &self.dates {
            Some(resolver) => Some(resolver.resolve_date(&utterance)?),
            None => None,
        };

        let city = location.city_name();
        match asked {
            Some(date) => info!(%city, %date, "Answering weather question"),
            None => info!(%city, "Answering weather question"),
        }
        // only current conditions are available; the date is not sent upstream
        let report = self.weather.fetch_weather(&city).await?;
        debug!("Report ready for {}", city);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PogodaError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingProvider {
        cities: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn fetch_weather(&self, city: &str) -> Result<String> {
            self.cities.lock().unwrap().push(city.to_string());
            Ok(format!("погода в {city}"))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl WeatherProvider for FailingProvider {
        async fn fetch_weather(&self, _city: &str) -> Result<String> {
            Err(PogodaError::request())
        }
    }

    fn agent(provider: RecordingProvider, dates: bool) -> WeatherAgent {
        WeatherAgent::new(
            LocationExtractor::default(),
            dates.then(DateResolver::default),
            provider,
        )
    }

    #[tokio::test]
    async fn test_turn_passes_title_cased_city() {
        let provider = RecordingProvider::default();
        let agent = agent(provider.clone(), true);

        let reply = agent.handle_turn("Какая погода в МОСКВЕ завтра?").await.unwrap();
        assert_eq!(reply, "погода в Москва");
        assert_eq!(*provider.cities.lock().unwrap(), vec!["Москва".to_string()]);
    }

    #[tokio::test]
    async fn test_location_checked_before_date() {
        let provider = RecordingProvider::default();
        let agent = agent(provider.clone(), true);

        let result = agent.handle_turn("как там погода").await;
        assert!(matches!(result, Err(PogodaError::LocationExtraction)));
        assert!(provider.cities.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_date_stops_before_request() {
        let provider = RecordingProvider::default();
        let agent = agent(provider.clone(), true);

        let result = agent.handle_turn("погода в казани").await;
        assert!(matches!(result, Err(PogodaError::DateExtraction)));
        assert!(provider.cities.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_date_free_mode() {
        let provider = RecordingProvider::default();
        let agent = agent(provider.clone(), false);

        assert_eq!(agent.prompt(), "Введите город: ");
        let reply = agent.handle_turn("погода в казани").await.unwrap();
        assert_eq!(reply, "погода в Казань");
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let agent = WeatherAgent::new(
            LocationExtractor::default(),
            Some(DateResolver::default()),
            FailingProvider,
        );
        assert_eq!(agent.prompt(), "Введите город и дату: ");

        let err = agent.handle_turn("москва сегодня").await.unwrap_err();
        assert!(err.is_dialog_error());
        assert!(err.user_message().starts_with("Упс"));
    }
}
