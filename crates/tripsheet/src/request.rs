//! JSON request envelope spoken by the trip page.
//!
//! ```json
//! {"action": "toggle-packing", "id": "4", "checked": true}
//! ```

use serde::{Deserialize, Serialize};

use crate::itinerary::{ActionResult, EventUpdate, Itinerary, NewExpense, PackingToggle, TripData};
use crate::store::BackingStore;

/// One logical request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Request {
    FetchAll,
    UpdateEvent(EventUpdate),
    TogglePacking(PackingToggle),
    AddExpense(NewExpense),
}

impl Request {
    /// Whether the request changes the store
    pub fn is_write(&self) -> bool {
        !matches!(self, Request::FetchAll)
    }
}

/// Response to a [`Request`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Data(TripData),
    Action(ActionResult),
}

impl Response {
    pub fn is_success(&self) -> bool {
        match self {
            Response::Data(data) => data.success,
            Response::Action(result) => result.success,
        }
    }
}

impl<S: BackingStore> Itinerary<S> {
    /// Run one request. Never fails; errors become a failed [`ActionResult`].
    pub fn dispatch(&mut self, request: &Request) -> Response {
        match request {
            Request::FetchAll => Response::Data(self.fetch_all()),
            Request::UpdateEvent(update) => Response::Action(self.update_event(update)),
            Request::TogglePacking(toggle) => Response::Action(self.toggle_packing(toggle)),
            Request::AddExpense(expense) => Response::Action(self.add_expense(expense)),
        }
    }

    /// Parse and run one JSON request
    pub fn dispatch_json(&mut self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => {
                let response = self.dispatch(&request);
                if request.is_write() {
                    tracing::debug!("write request done, success={}", response.is_success());
                }
                response
            }
            Err(e) => {
                tracing::warn!("malformed request: {e}");
                Response::Action(ActionResult::failure(format!("malformed request: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_tags() {
        let request: Request = serde_json::from_str(r#"{"action": "fetch-all"}"#).unwrap();
        assert_eq!(request, Request::FetchAll);
        assert!(!request.is_write());

        let request: Request =
            serde_json::from_str(r#"{"action": "toggle-packing", "rowIndex": 2, "checked": false}"#)
                .unwrap();
        assert_eq!(
            request,
            Request::TogglePacking(PackingToggle {
                id: None,
                row_index: Some(2),
                checked: false,
            })
        );
        assert!(request.is_write());
    }

    #[test]
    fn test_dispatch_json() {
        let mut itinerary = Itinerary::new(MemoryStore::new());
        itinerary.init_template().unwrap();

        let response = itinerary.dispatch_json(
            r#"{"action": "add-expense", "date": "2024/07/02", "desc": "Bus", "amount": 12}"#,
        );
        assert!(response.is_success());

        let response = itinerary.dispatch_json(r#"{"action": "fetch-all"}"#);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["expenses"][0]["desc"], "Bus");
        assert_eq!(json["expenses"][0]["amount"], 12.0);
        assert_eq!(json["expenses"][0]["rowIndex"], 2);
    }

    #[test]
    fn test_malformed_request_is_a_failure() {
        let mut itinerary = Itinerary::new(MemoryStore::new());
        for line in ["", "{}", r#"{"action": "delete-trip"}"#] {
            let response = itinerary.dispatch_json(line);
            assert!(!response.is_success());
        }
    }
}
