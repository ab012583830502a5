//! Scripted endpoints and recording collaborators for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use firestock_core::{
    ApiResponse, CrudEndpoints, Department, DepartmentInput, IdentityProvider, ListParams,
    Notifier, PagedResponse, Result,
};

use crate::envelope::Collaborators;
use crate::notify::Notification;

/// Collects notifications for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.seen.lock().unwrap().push(Notification::Success {
            message: message.to_string(),
        });
    }

    fn notify_error(&self, title: &str, description: &str) {
        self.seen.lock().unwrap().push(Notification::Error {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}

/// Records login redirects.
pub struct RecordingIdentity {
    location: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl Default for RecordingIdentity {
    fn default() -> Self {
        Self {
            location: Mutex::new("/".to_string()),
            redirects: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingIdentity {
    pub fn set_location(&self, location: &str) {
        *self.location.lock().unwrap() = location.to_string();
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }

    pub fn redirect_count(&self) -> usize {
        self.redirects.lock().unwrap().len()
    }
}

impl IdentityProvider for RecordingIdentity {
    fn current_location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn redirect_to_login(&self, return_url: &str) {
        self.redirects.lock().unwrap().push(return_url.to_string());
    }
}

/// Collaborators wired to recorders.
pub fn collaborators() -> (Collaborators, Arc<RecordingNotifier>, Arc<RecordingIdentity>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let identity = Arc::new(RecordingIdentity::default());
    let collab = Collaborators::new(notifier.clone(), identity.clone());
    (collab, notifier, identity)
}

pub fn department(id: &str) -> Department {
    Department {
        id: id.to_string(),
        name: format!("Department {}", id),
        short_name: None,
    }
}

/// A page of departments with consistent totals.
pub fn department_page(ids: &[&str], total_items: u64, page: u32, page_size: u32) -> PagedResponse<Department> {
    PagedResponse::new(
        ids.iter().map(|id| department(id)).collect(),
        total_items,
        page,
        page_size,
    )
}

struct Scripted<T> {
    delay: Option<Duration>,
    response: Result<ApiResponse<T>>,
}

#[derive(Default)]
struct Script {
    list: VecDeque<Scripted<PagedResponse<Department>>>,
    create: VecDeque<Result<ApiResponse<Option<Department>>>>,
    update: VecDeque<Result<ApiResponse<Option<Department>>>>,
    delete: VecDeque<Result<ApiResponse<Option<JsonValue>>>>,
}

/// Department endpoints answering from per-operation queues.
///
/// An exhausted list queue answers with an empty page; exhausted mutation
/// queues answer 200 with no body.
#[derive(Default)]
pub struct ScriptedEndpoints {
    script: Mutex<Script>,
    list_calls: Mutex<Vec<ListParams>>,
    mutation_calls: Mutex<Vec<String>>,
}

impl ScriptedEndpoints {
    pub fn push_list(&self, response: Result<ApiResponse<PagedResponse<Department>>>) -> &Self {
        self.script.lock().unwrap().list.push_back(Scripted {
            delay: None,
            response,
        });
        self
    }

    pub fn push_list_delayed(
        &self,
        delay: Duration,
        response: Result<ApiResponse<PagedResponse<Department>>>,
    ) -> &Self {
        self.script.lock().unwrap().list.push_back(Scripted {
            delay: Some(delay),
            response,
        });
        self
    }

    pub fn push_create(&self, response: Result<ApiResponse<Option<Department>>>) -> &Self {
        self.script.lock().unwrap().create.push_back(response);
        self
    }

    pub fn push_update(&self, response: Result<ApiResponse<Option<Department>>>) -> &Self {
        self.script.lock().unwrap().update.push_back(response);
        self
    }

    pub fn push_delete(&self, response: Result<ApiResponse<Option<JsonValue>>>) -> &Self {
        self.script.lock().unwrap().delete.push_back(response);
        self
    }

    /// Parameters of every list call, in dispatch order.
    pub fn list_calls(&self) -> Vec<ListParams> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    /// "create", "update:<id>", "delete:<id>" in call order.
    pub fn mutation_calls(&self) -> Vec<String> {
        self.mutation_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CrudEndpoints for ScriptedEndpoints {
    type Item = Department;
    type Create = DepartmentInput;
    type Update = DepartmentInput;

    fn name(&self) -> &str {
        "/departments"
    }

    async fn list(&self, params: &ListParams) -> Result<ApiResponse<PagedResponse<Department>>> {
        self.list_calls.lock().unwrap().push(params.clone());
        let next = self.script.lock().unwrap().list.pop_front();
        match next {
            Some(Scripted { delay, response }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Ok(ApiResponse::ok(PagedResponse::default())),
        }
    }

    async fn create(&self, _body: &DepartmentInput) -> Result<ApiResponse<Option<Department>>> {
        self.mutation_calls.lock().unwrap().push("create".to_string());
        let next = self.script.lock().unwrap().create.pop_front();
        next.unwrap_or_else(|| Ok(ApiResponse::ok(None)))
    }

    async fn update(
        &self,
        id: &str,
        _body: &DepartmentInput,
    ) -> Result<ApiResponse<Option<Department>>> {
        self.mutation_calls.lock().unwrap().push(format!("update:{}", id));
        let next = self.script.lock().unwrap().update.pop_front();
        next.unwrap_or_else(|| Ok(ApiResponse::ok(None)))
    }

    async fn delete(&self, id: &str) -> Result<ApiResponse<Option<JsonValue>>> {
        self.mutation_calls.lock().unwrap().push(format!("delete:{}", id));
        let next = self.script.lock().unwrap().delete.pop_front();
        next.unwrap_or_else(|| Ok(ApiResponse::ok(None)))
    }
}
