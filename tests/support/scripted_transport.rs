use async_trait::async_trait;
use marquee_lib::modules::catalog::CatalogTransport;
use marquee_lib::shared::{AppError, AppResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
struct Route {
    delay: Duration,
    response: AppResult<Value>,
}

/// In-memory catalog: canned responses per path, each after its own delay.
/// Unknown paths answer 404. Every call is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(self, path: &str, delay: Duration, response: AppResult<Value>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Route { delay, response });
        self
    }

    pub fn on(self, path: &str, body: Value) -> Self {
        self.route(path, Duration::ZERO, Ok(body))
    }

    pub fn on_delayed(self, path: &str, delay: Duration, body: Value) -> Self {
        self.route(path, delay, Ok(body))
    }

    pub fn fail(self, path: &str, error: AppError) -> Self {
        self.route(path, Duration::ZERO, Err(error))
    }

    pub fn fail_delayed(self, path: &str, delay: Duration, error: AppError) -> Self {
        self.route(path, delay, Err(error))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|p| p.as_str() == path).count()
    }

    /// Query of the first call to `path`
    pub fn query_of(&self, path: &str) -> Option<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, query)| query.clone())
    }
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), query.to_vec()));

        let route = self.routes.lock().unwrap().get(path).cloned();
        match route {
            Some(route) => {
                if !route.delay.is_zero() {
                    tokio::time::sleep(route.delay).await;
                }
                route.response
            }
            None => Err(AppError::NotFound(
                "The resource you requested could not be found.".to_string(),
            )),
        }
    }
}
