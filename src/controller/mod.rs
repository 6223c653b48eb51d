//! Directory controller.
//!
//! Owns the customer list, the loading flag and the active criteria, and keeps
//! them consistent with the store across reloads and mutations. The controller
//! lives in a single request task: state sits in a `RefCell` and the only
//! suspension points are the store calls, which run on the blocking pool
//! through [`web::block`]. Reloads queued by criteria changes run in the same
//! task once the caller awaits [`DirectoryController::settle`].
//!
//! Every failure is caught here, logged, and reported through exactly one
//! [`Notifier`] call.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::web;

use crate::domain::criteria::{CriteriaChange, QueryCriteria};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::dto::customers::DirectoryView;
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::directory;
use crate::services::{DirectoryError, DirectoryResult, WriteFailure};

pub mod notify;

pub use notify::{Confirmation, FlashNotifier, Notifier};

/// Prompt shown before a customer is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this customer?";

type CriteriaListener<R, N> = Box<dyn Fn(&DirectoryController<R, N>)>;
type PendingReload = Pin<Box<dyn Future<Output = ()>>>;

#[derive(Debug, Default)]
struct DirectoryState {
    records: Vec<Customer>,
    loading: bool,
    criteria: QueryCriteria,
    /// Token of the most recently issued reload.
    latest_request: u64,
}

struct Inner<R, N> {
    repo: Arc<R>,
    notifier: N,
    state: RefCell<DirectoryState>,
    listeners: RefCell<Vec<CriteriaListener<R, N>>>,
    scheduled: RefCell<Vec<PendingReload>>,
}

/// Cheaply cloneable handle to the directory state.
pub struct DirectoryController<R, N> {
    inner: Rc<Inner<R, N>>,
}

impl<R, N> Clone for DirectoryController<R, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

fn blocking_write(message: String) -> DirectoryError {
    WriteFailure::Rejected(message).into()
}

impl<R, N> DirectoryController<R, N>
where
    R: CustomerReader + CustomerWriter + Send + Sync + 'static,
    N: Notifier + 'static,
{
    /// Creates a controller with default criteria and an empty list.
    pub fn new(repo: Arc<R>, notifier: N) -> Self {
        Self::with_criteria(repo, notifier, QueryCriteria::default())
    }

    /// Creates a controller seeded with `criteria`. Seeding does not reload.
    pub fn with_criteria(repo: Arc<R>, notifier: N, criteria: QueryCriteria) -> Self {
        let controller = Self {
            inner: Rc::new(Inner {
                repo,
                notifier,
                state: RefCell::new(DirectoryState {
                    criteria,
                    ..DirectoryState::default()
                }),
                listeners: RefCell::new(Vec::new()),
                scheduled: RefCell::new(Vec::new()),
            }),
        };
        controller.subscribe(Self::schedule_reload);
        controller
    }

    /// Registers a callback run after every criteria replacement.
    ///
    /// Listeners must not call `subscribe` themselves.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Self) + 'static,
    {
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Applies a criteria change and notifies listeners; the built-in
    /// listener schedules a reload.
    pub fn set_criteria(&self, change: CriteriaChange) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.criteria = state.criteria.apply(change);
        }
        self.emit_criteria_changed();
    }

    /// Textual variant of [`Self::set_criteria`] used by form controls.
    ///
    /// `sort` expects a combined `<field>:<direction>` token.
    pub fn set_field(&self, field: &str, value: &str) -> DirectoryResult<()> {
        let change = QueryCriteria::parse_change(field, value).map_err(|err| {
            log::warn!("Rejected criteria change {field}={value}: {err}");
            self.inner.notifier.notify_error("Invalid filter");
            DirectoryError::from(err)
        })?;
        self.set_criteria(change);
        Ok(())
    }

    /// Runs every reload queued by criteria changes, in order.
    pub async fn settle(&self) {
        loop {
            let scheduled: Vec<_> = self.inner.scheduled.borrow_mut().drain(..).collect();
            if scheduled.is_empty() {
                break;
            }
            for reload in scheduled {
                reload.await;
            }
        }
    }

    /// Fetches the list for the current criteria and replaces the records.
    ///
    /// Overlapping reloads resolve to the most recently issued one; results
    /// of superseded requests are dropped.
    pub async fn reload(&self) {
        let (token, criteria) = self.begin_load();
        log::debug!("Loading customers (request {token})");

        let result = self
            .call_store(
                move |repo| directory::list_customers(repo, &criteria),
                DirectoryError::RemoteQuery,
            )
            .await;

        self.finish_load(token, result);
    }

    /// Creates a customer and appends it to the end of the current list.
    pub async fn add_customer(&self, new_customer: NewCustomer) -> DirectoryResult<Customer> {
        let result = self
            .call_store(
                move |repo| directory::create_customer(repo, &new_customer),
                blocking_write,
            )
            .await;

        match result {
            Ok(customer) => {
                {
                    let mut state = self.inner.state.borrow_mut();
                    match state.records.iter().position(|c| c.id == customer.id) {
                        Some(index) => state.records[index] = customer.clone(),
                        None => state.records.push(customer.clone()),
                    }
                }
                self.inner
                    .notifier
                    .notify_success("Customer added successfully");
                Ok(customer)
            }
            Err(err) => {
                log::error!("Error adding customer: {err}");
                self.inner.notifier.notify_error("Failed to add customer");
                Err(err)
            }
        }
    }

    /// Patches a customer, then reloads the whole list.
    pub async fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: UpdateCustomer,
    ) -> DirectoryResult<()> {
        let result = self
            .call_store(
                move |repo| directory::update_customer(repo, customer_id, &updates),
                blocking_write,
            )
            .await;

        match result {
            Ok(_) => {
                self.inner
                    .notifier
                    .notify_success("Customer updated successfully");
                self.reload().await;
                Ok(())
            }
            Err(err) => {
                log::error!("Error updating customer {customer_id}: {err}");
                self.inner.notifier.notify_error("Failed to update customer");
                Err(err)
            }
        }
    }

    /// Deletes a customer once `confirmation` agrees, then reloads.
    ///
    /// Returns `Ok(false)` when the user declined.
    pub async fn remove_customer<C>(
        &self,
        customer_id: CustomerId,
        confirmation: &C,
    ) -> DirectoryResult<bool>
    where
        C: Confirmation + ?Sized,
    {
        if !confirmation.confirm(DELETE_PROMPT) {
            log::debug!("Deletion of customer {customer_id} was not confirmed");
            return Ok(false);
        }

        let result = self
            .call_store(
                move |repo| directory::delete_customer(repo, customer_id),
                blocking_write,
            )
            .await;

        match result {
            Ok(()) => {
                self.inner
                    .notifier
                    .notify_success("Customer deleted successfully");
                self.reload().await;
                Ok(true)
            }
            Err(err) => {
                log::error!("Error deleting customer {customer_id}: {err}");
                self.inner.notifier.notify_error("Failed to delete customer");
                Err(err)
            }
        }
    }

    /// Fetches one customer for the details view.
    pub async fn customer(&self, customer_id: CustomerId) -> DirectoryResult<Customer> {
        let result = self
            .call_store(
                move |repo| directory::get_customer(repo, customer_id),
                DirectoryError::RemoteQuery,
            )
            .await;

        if let Err(err) = &result {
            log::error!("Error loading customer {customer_id}: {err}");
            self.inner.notifier.notify_error("Failed to load customer");
        }

        result
    }

    pub fn records(&self) -> Vec<Customer> {
        self.inner.state.borrow().records.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn criteria(&self) -> QueryCriteria {
        self.inner.state.borrow().criteria.clone()
    }

    pub fn notifier(&self) -> &N {
        &self.inner.notifier
    }

    pub fn snapshot(&self) -> DirectoryView {
        let state = self.inner.state.borrow();
        DirectoryView {
            records: state.records.clone(),
            loading: state.loading,
            criteria: state.criteria.clone(),
            sort_token: state.criteria.sort_token(),
        }
    }

    fn schedule_reload(&self) {
        // Weak, so a queue that is never settled does not keep the state alive.
        let inner = Rc::downgrade(&self.inner);
        self.inner.scheduled.borrow_mut().push(Box::pin(async move {
            if let Some(inner) = inner.upgrade() {
                DirectoryController { inner }.reload().await;
            }
        }));
    }

    fn emit_criteria_changed(&self) {
        let listeners = self.inner.listeners.borrow();
        for listener in listeners.iter() {
            listener(self);
        }
    }

    fn begin_load(&self) -> (u64, QueryCriteria) {
        let mut state = self.inner.state.borrow_mut();
        state.latest_request += 1;
        state.loading = true;
        (state.latest_request, state.criteria.clone())
    }

    /// Applies a list result; returns whether the records were replaced.
    fn finish_load(&self, token: u64, result: DirectoryResult<Vec<Customer>>) -> bool {
        let mut state = self.inner.state.borrow_mut();
        if token != state.latest_request {
            log::debug!(
                "Dropping customers from request {token}, superseded by {}",
                state.latest_request
            );
            return false;
        }

        state.loading = false;
        match result {
            Ok(records) => {
                state.records = records;
                true
            }
            Err(err) => {
                drop(state);
                log::error!("Error loading customers: {err}");
                self.inner.notifier.notify_error("Failed to load customers");
                false
            }
        }
    }

    async fn call_store<T, F>(
        &self,
        op: F,
        on_blocking_error: fn(String) -> DirectoryError,
    ) -> DirectoryResult<T>
    where
        F: FnOnce(&R) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.inner.repo);
        match web::block(move || op(repo.as_ref())).await {
            Ok(result) => result,
            Err(err) => Err(on_blocking_error(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::notify::MockNotifier;
    use super::*;
    use crate::domain::criteria::{SortField, SortOrder, StatusFilter};
    use crate::domain::customer::CustomerStatus;
    use crate::domain::types::{CustomerEmail, CustomerName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn customer(id: i32, name: &str, status: CustomerStatus) -> Customer {
        Customer {
            id: CustomerId::new(id).unwrap(),
            name: CustomerName::new(name).unwrap(),
            email: CustomerEmail::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            status,
            company: None,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn new_customer(name: &str) -> NewCustomer {
        NewCustomer::new(
            CustomerName::new(name).unwrap(),
            CustomerEmail::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            CustomerStatus::Active,
            None,
        )
    }

    fn id(value: i32) -> CustomerId {
        CustomerId::new(value).unwrap()
    }

    fn names(controller: &DirectoryController<MockRepository, MockNotifier>) -> Vec<String> {
        controller
            .records()
            .into_iter()
            .map(|c| c.name.into_inner())
            .collect()
    }

    /// Counts calls to `Confirmation::confirm` and answers with a fixed value.
    struct CountingConfirmation {
        answer: bool,
        asked: AtomicUsize,
    }

    impl Confirmation for CountingConfirmation {
        fn confirm(&self, prompt: &str) -> bool {
            assert_eq!(prompt, DELETE_PROMPT);
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    #[actix_web::test]
    async fn reload_replaces_records_and_clears_loading() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers().times(1).returning(|_| {
            Ok(vec![
                customer(1, "Bob", CustomerStatus::Active),
                customer(3, "Zed", CustomerStatus::Active),
            ])
        });

        let controller = DirectoryController::new(Arc::new(repo), MockNotifier::new());
        controller.reload().await;

        assert_eq!(names(&controller), vec!["Bob", "Zed"]);
        assert!(!controller.is_loading());
    }

    #[actix_web::test]
    async fn reload_twice_with_same_criteria_is_idempotent() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(2)
            .returning(|_| Ok(vec![customer(1, "Bob", CustomerStatus::Active)]));

        let controller = DirectoryController::new(Arc::new(repo), MockNotifier::new());
        controller.reload().await;
        let first = controller.records();
        controller.reload().await;

        assert_eq!(controller.records(), first);
    }

    #[actix_web::test]
    async fn failed_reload_keeps_previous_records_and_notifies_once() {
        let calls = AtomicUsize::new(0);
        let mut repo = MockRepository::new();
        repo.expect_list_customers().times(2).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![customer(1, "Bob", CustomerStatus::Active)])
            } else {
                Err(RepositoryError::ConnectionError("offline".into()))
            }
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Failed to load customers")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        controller.reload().await;
        controller.reload().await;

        assert_eq!(names(&controller), vec!["Bob"]);
        assert!(!controller.is_loading());
    }

    #[test]
    fn superseded_reload_results_are_discarded() {
        let controller = DirectoryController::new(
            Arc::new(MockRepository::new()),
            MockNotifier::new(),
        );

        let (first, _) = controller.begin_load();
        let (second, _) = controller.begin_load();
        assert!(controller.is_loading());

        assert!(controller.finish_load(second, Ok(vec![customer(3, "Zed", CustomerStatus::Active)])));
        assert!(!controller.is_loading());

        // The older request resolves last and must not win.
        assert!(!controller.finish_load(first, Ok(vec![customer(1, "Bob", CustomerStatus::Active)])));
        assert_eq!(names(&controller), vec!["Zed"]);

        // A superseded failure is not reported either.
        let (stale, _) = controller.begin_load();
        let (_latest, _) = controller.begin_load();
        assert!(!controller.finish_load(stale, Err(DirectoryError::RemoteQuery("late".into()))));
        assert!(controller.is_loading());
    }

    #[actix_web::test]
    async fn sort_token_change_reloads_with_both_fields() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .withf(|query| {
                query.sort_by == SortField::CreatedAt && query.sort_order == SortOrder::Desc
            })
            .times(1)
            .returning(|_| Ok(vec![customer(2, "Amy", CustomerStatus::Inactive)]));

        let controller = DirectoryController::new(Arc::new(repo), MockNotifier::new());

        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        controller.subscribe(move |c| {
            let criteria = c.criteria();
            sink.borrow_mut().push((criteria.sort_by, criteria.sort_order));
        });

        controller
            .set_field("sort", "created_at:desc")
            .expect("valid sort token");
        controller.settle().await;

        assert_eq!(
            *observed.borrow(),
            vec![(SortField::CreatedAt, SortOrder::Desc)]
        );
        assert_eq!(controller.criteria().sort_token(), "created_at:desc");
        assert_eq!(names(&controller), vec!["Amy"]);
    }

    #[actix_web::test]
    async fn every_criteria_change_schedules_a_reload() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(2)
            .returning(|_| Ok(Vec::new()));

        let controller = DirectoryController::new(Arc::new(repo), MockNotifier::new());
        controller.set_criteria(CriteriaChange::Status(StatusFilter::Active));
        controller.set_criteria(CriteriaChange::Status(StatusFilter::Active));
        controller.settle().await;

        assert_eq!(controller.criteria().status, StatusFilter::Active);
    }

    #[actix_web::test]
    async fn queued_reload_runs_only_inside_settle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut repo = MockRepository::new();
        repo.expect_list_customers().times(1).returning(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Err(RepositoryError::ConnectionError("offline".into()))
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Failed to load customers")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        controller.set_criteria(CriteriaChange::Search("bob".into()));
        actix_web::rt::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        controller.settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
    }

    #[test]
    fn unsettled_reloads_do_not_keep_the_state_alive() {
        let controller = DirectoryController::new(
            Arc::new(MockRepository::new()),
            MockNotifier::new(),
        );
        let weak = Rc::downgrade(&controller.inner);

        controller.set_criteria(CriteriaChange::Status(StatusFilter::Inactive));
        drop(controller);

        assert!(weak.upgrade().is_none());
    }

    #[actix_web::test]
    async fn invalid_criteria_change_is_rejected_without_reload() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers().times(0);
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Invalid filter")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        let result = controller.set_field("sort", "name");
        controller.settle().await;

        assert!(matches!(result, Err(DirectoryError::InvalidCriteria(_))));
        assert_eq!(controller.criteria(), QueryCriteria::default());
    }

    #[actix_web::test]
    async fn added_customer_is_appended_to_the_tail() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(1)
            .returning(|_| Ok(vec![customer(3, "Zed", CustomerStatus::Active)]));
        repo.expect_create_customer()
            .withf(|new| new.name.as_str() == "Amy")
            .times(1)
            .returning(|_| Ok(customer(4, "Amy", CustomerStatus::Active)));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_success()
            .withf(|message| message == "Customer added successfully")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        controller.reload().await;
        let created = controller
            .add_customer(new_customer("Amy"))
            .await
            .expect("should add customer");

        assert_eq!(names(&controller), vec!["Zed", "Amy"]);
        let occurrences = controller
            .records()
            .iter()
            .filter(|c| c.id == created.id)
            .count();
        assert_eq!(occurrences, 1);
    }

    #[actix_web::test]
    async fn failed_add_leaves_records_untouched() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(1)
            .returning(|_| Ok(vec![customer(3, "Zed", CustomerStatus::Active)]));
        repo.expect_create_customer()
            .times(1)
            .returning(|_| Err(RepositoryError::ConstraintViolation("duplicate".into())));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Failed to add customer")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        controller.reload().await;
        let result = controller.add_customer(new_customer("Amy")).await;

        assert!(matches!(
            result,
            Err(DirectoryError::RemoteWrite(WriteFailure::Rejected(_)))
        ));
        assert_eq!(names(&controller), vec!["Zed"]);
    }

    #[actix_web::test]
    async fn update_reloads_instead_of_patching() {
        let mut repo = MockRepository::new();
        repo.expect_update_customer()
            .withf(|customer_id, updates| {
                customer_id.get() == 3 && updates.status == Some(CustomerStatus::Inactive)
            })
            .times(1)
            .returning(|_, _| Ok(customer(3, "Zed", CustomerStatus::Inactive)));
        repo.expect_list_customers()
            .times(1)
            .returning(|_| Ok(vec![customer(1, "Bob", CustomerStatus::Active)]));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_success()
            .withf(|message| message == "Customer updated successfully")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        controller
            .update_customer(id(3), UpdateCustomer::default().status(CustomerStatus::Inactive))
            .await
            .expect("should update customer");

        // The list comes from the reload, not from the patched record.
        assert_eq!(names(&controller), vec!["Bob"]);
    }

    #[actix_web::test]
    async fn failed_update_notifies_and_skips_reload() {
        let mut repo = MockRepository::new();
        repo.expect_update_customer()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));
        repo.expect_list_customers().times(0);
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Failed to update customer")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        let result = controller
            .update_customer(id(3), UpdateCustomer::default().status(CustomerStatus::Inactive))
            .await;

        assert!(result.as_ref().is_err_and(DirectoryError::is_not_found));
    }

    #[actix_web::test]
    async fn declined_removal_never_reaches_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_delete_customer().times(0);
        repo.expect_list_customers().times(0);
        let confirmation = CountingConfirmation {
            answer: false,
            asked: AtomicUsize::new(0),
        };

        let controller = DirectoryController::new(Arc::new(repo), MockNotifier::new());
        let removed = controller
            .remove_customer(id(5), &confirmation)
            .await
            .expect("declining is not an error");

        assert!(!removed);
        assert_eq!(confirmation.asked.load(Ordering::SeqCst), 1);
        assert!(controller.records().is_empty());
    }

    #[actix_web::test]
    async fn confirmed_removal_deletes_then_reloads() {
        let mut repo = MockRepository::new();
        repo.expect_delete_customer()
            .withf(|customer_id| customer_id.get() == 5)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_customers()
            .times(1)
            .returning(|_| Ok(vec![customer(1, "Bob", CustomerStatus::Active)]));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_success()
            .withf(|message| message == "Customer deleted successfully")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        let removed = controller
            .remove_customer(id(5), &true)
            .await
            .expect("should delete customer");

        assert!(removed);
        assert_eq!(names(&controller), vec!["Bob"]);
    }

    #[actix_web::test]
    async fn failed_removal_notifies_and_keeps_state() {
        let mut repo = MockRepository::new();
        repo.expect_delete_customer()
            .times(1)
            .returning(|_| Err(RepositoryError::DatabaseError("locked".into())));
        repo.expect_list_customers().times(0);
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Failed to delete customer")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        let result = controller.remove_customer(id(5), &true).await;

        assert!(result.is_err());
        assert!(controller.records().is_empty());
    }

    #[actix_web::test]
    async fn missing_customer_details_report_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|_| Ok(None));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|message| message == "Failed to load customer")
            .times(1)
            .return_const(());

        let controller = DirectoryController::new(Arc::new(repo), notifier);
        let result = controller.customer(id(8)).await;

        assert!(matches!(result, Err(DirectoryError::RemoteNotFound(_))));
    }
}
