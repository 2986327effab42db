//! Weather synchronisation
//!
//! Runs weather fetches in background tasks and hands their results back
//! one at a time, so they can be applied to the store as ordinary
//! sequential updates. Every request gets a ticket; a result whose ticket
//! has been superseded by a newer request is dropped before it reaches the
//! store.

use std::future::Future;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinError;

use crate::data::{ConditionsUpdate, Coordinates, WeatherClient, WeatherError, WeatherReport};

/// What a fetch task hands back once it is joined
struct Finished {
    ticket: u64,
    coordinates: Coordinates,
    result: Result<Result<WeatherReport, WeatherError>, JoinError>,
}

/// A result from the newest outstanding request
#[derive(Debug)]
pub enum SyncOutcome {
    /// Weather ready to be applied with `ConditionsStore::update`
    Update {
        ticket: u64,
        location: String,
        update: ConditionsUpdate,
    },
    /// The request failed; the snapshot should stay as it is
    Failed { ticket: u64, message: String },
}

/// Handle for issuing weather requests and collecting their results
pub struct WeatherSync {
    client: WeatherClient,
    latest: u64,
    in_flight: FuturesUnordered<BoxFuture<'static, Finished>>,
}

impl WeatherSync {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            latest: 0,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Starts fetching weather for a position and returns the request ticket.
    ///
    /// Any earlier request still in flight becomes stale.
    pub fn request(&mut self, coordinates: Coordinates) -> u64 {
        let client = self.client.clone();
        self.dispatch(coordinates, async move {
            client.fetch_local_weather(coordinates).await
        })
    }

    fn dispatch<F>(&mut self, coordinates: Coordinates, fetch: F) -> u64
    where
        F: Future<Output = Result<WeatherReport, WeatherError>> + Send + 'static,
    {
        self.latest += 1;
        let ticket = self.latest;

        tracing::debug!(ticket, lat = coordinates.lat, lon = coordinates.lon, "weather requested");
        let handle = tokio::spawn(fetch);
        self.in_flight.push(Box::pin(async move {
            Finished {
                ticket,
                coordinates,
                result: handle.await,
            }
        }));
        ticket
    }

    /// True if no newer request has been issued since `ticket`.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }

    /// Waits for the next result that is still current.
    ///
    /// Stale results are discarded along the way. A task that panicked or
    /// was cancelled counts as a failure. Returns `None` once no request is
    /// outstanding.
    pub async fn next_outcome(&mut self) -> Option<SyncOutcome> {
        while let Some(finished) = self.in_flight.next().await {
            let Finished {
                ticket,
                coordinates,
                result,
            } = finished;

            if !self.is_current(ticket) {
                tracing::debug!(ticket, "dropping superseded weather result");
                continue;
            }

            return Some(match result {
                Ok(Ok(report)) => {
                    tracing::info!(ticket, location = %report.location(), "weather synced");
                    SyncOutcome::Update {
                        ticket,
                        location: report.location(),
                        update: report.into_update(coordinates),
                    }
                }
                Ok(Err(error)) => {
                    tracing::warn!(ticket, error = %error, "weather sync failed");
                    SyncOutcome::Failed {
                        ticket,
                        message: format!("Météo indisponible : {}", error),
                    }
                }
                Err(error) => {
                    tracing::error!(ticket, error = %error, "weather task did not finish");
                    SyncOutcome::Failed {
                        ticket,
                        message: format!("Météo indisponible : requête interrompue ({})", error),
                    }
                }
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WindDirection;
    use crate::solar::Period;
    use std::time::Duration;

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            weather_score: 70,
            wind_score: 31,
            wind_direction: WindDirection::West,
            time_of_day: 540,
            period: Period::June,
            pressure_hpa: 1012.6,
            region: Some("Finistère".to_string()),
            city_name: city.to_string(),
        }
    }

    fn brest() -> Coordinates {
        Coordinates::new(48.39, -4.49).unwrap()
    }

    #[tokio::test]
    async fn test_current_result_is_delivered() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        let ticket = sync.dispatch(brest(), async { Ok(report("Brest")) });
        assert!(sync.is_current(ticket));

        match sync.next_outcome().await {
            Some(SyncOutcome::Update {
                ticket: got,
                location,
                update,
            }) => {
                assert_eq!(got, ticket);
                assert_eq!(location, "Brest (Finistère)");
                assert_eq!(update.pressure, Some(1013));
                assert_eq!(update.region, Some(Some("Finistère".to_string())));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(sync.next_outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_superseded_result_is_dropped() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        let first = sync.dispatch(brest(), async { Ok(report("Ancien")) });
        let second = sync.dispatch(brest(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(report("Brest"))
        });
        assert!(!sync.is_current(first));

        match sync.next_outcome().await {
            Some(SyncOutcome::Update { ticket, location, .. }) => {
                assert_eq!(ticket, second);
                assert_eq!(location, "Brest (Finistère)");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(sync.next_outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_late_stale_result_is_dropped() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        sync.dispatch(brest(), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(report("Ancien"))
        });
        let second = sync.dispatch(brest(), async { Ok(report("Brest")) });

        assert!(matches!(
            sync.next_outcome().await,
            Some(SyncOutcome::Update { ticket, .. }) if ticket == second
        ));
        // the slow first request arrives afterwards and is ignored
        assert!(sync.next_outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_labeled() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        sync.dispatch(brest(), async {
            Err(WeatherError::Unavailable("timeout".to_string()))
        });
        match sync.next_outcome().await {
            Some(SyncOutcome::Failed { message, .. }) => {
                assert!(message.starts_with("Météo indisponible"));
                assert!(message.contains("timeout"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_panicked_fetch_is_reported_not_awaited_forever() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        sync.dispatch(brest(), async {
            if brest().lat > 0.0 {
                panic!("provider crashed");
            }
            Ok(report("Brest"))
        });

        let outcome = tokio::time::timeout(Duration::from_secs(5), sync.next_outcome())
            .await
            .expect("next_outcome hung on a panicked task");
        match outcome {
            Some(SyncOutcome::Failed { message, .. }) => {
                assert!(message.contains("requête interrompue"), "{}", message);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(sync.next_outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_stale_panicked_fetch_is_dropped() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        sync.dispatch(brest(), async {
            if brest().lat > 0.0 {
                panic!("provider crashed");
            }
            Ok(report("Ancien"))
        });
        let second = sync.dispatch(brest(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(report("Brest"))
        });

        assert!(matches!(
            sync.next_outcome().await,
            Some(SyncOutcome::Update { ticket, .. }) if ticket == second
        ));
        assert!(sync.next_outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_no_request_returns_none() {
        let mut sync = WeatherSync::new(WeatherClient::new());
        assert!(sync.next_outcome().await.is_none());
    }
}
