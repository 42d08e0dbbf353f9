// src/app/manager.rs
//! Film list cache and the form draft.
//!
//! Operations that talk to the server are split in two: the first half
//! returns an [`ApiRequest`] for the worker, and [`FilmManager::apply`]
//! patches local state once the server has answered. Nothing is changed
//! ahead of a successful response.

use tracing::{debug, error, info, warn};

use super::data::{Film, FilmDraft, FilmField, FilmId, FormError};
use super::worker::{ApiOutcome, ApiRequest};

/// Kind of request currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingRequest {
    Load,
    Create,
    Update,
    Delete(FilmId),
}

#[derive(Debug, Default)]
pub struct FilmManager {
    films: Vec<Film>,
    draft: FilmDraft,
    is_editing: bool,
    show_form: bool,
    pending: Option<PendingRequest>,
    confirm_delete: Option<FilmId>,
    did_load: bool,
}

impl FilmManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- read access for rendering ----
    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn draft(&self) -> &FilmDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn show_form(&self) -> bool {
        self.show_form
    }

    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn confirming_delete(&self) -> Option<FilmId> {
        self.confirm_delete
    }

    fn start(&mut self, kind: PendingRequest) -> bool {
        if let Some(current) = self.pending {
            warn!("{kind:?} ignored: {current:?} still in flight");
            return false;
        }
        self.pending = Some(kind);
        true
    }

    // ---- operations ----

    /// Fetch the collection. Only the first call does anything.
    pub fn load(&mut self) -> Option<ApiRequest> {
        if self.did_load {
            return None;
        }
        if !self.start(PendingRequest::Load) {
            return None;
        }
        self.did_load = true;
        info!("loading films");
        Some(ApiRequest::List)
    }

    pub fn begin_create(&mut self) {
        self.draft = FilmDraft::default();
        self.is_editing = false;
        self.show_form = true;
    }

    pub fn begin_edit(&mut self, film: &Film) {
        self.draft = FilmDraft::from_film(film);
        self.is_editing = true;
        self.show_form = true;
    }

    pub fn set_field(&mut self, field: FilmField, value: String) {
        debug!(field = field.as_str(), "draft field changed");
        *self.draft.field_mut(field) = value;
    }

    /// Returns `false` when `name` is not a film field.
    pub fn set_field_by_name(&mut self, name: &str, value: String) -> bool {
        match FilmField::from_name(name) {
            Some(field) => {
                self.set_field(field, value);
                true
            }
            None => {
                debug!("ignoring change to unknown field `{name}`");
                false
            }
        }
    }

    /// Validate and coerce the draft. `Ok(None)` means another request is in flight.
    pub fn submit(&mut self) -> Result<Option<ApiRequest>, FormError> {
        self.draft.check()?;
        let film = self.draft.to_film();

        let req = if self.is_editing {
            let Some(id) = film.id else {
                error!("editing a film without an id; submit dropped");
                return Ok(None);
            };
            if !self.start(PendingRequest::Update) {
                return Ok(None);
            }
            ApiRequest::Update { id, film }
        } else {
            if !self.start(PendingRequest::Create) {
                return Ok(None);
            }
            ApiRequest::Create(film)
        };
        Ok(Some(req))
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: FilmId) {
        self.confirm_delete = Some(id);
    }

    pub fn decline_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<ApiRequest> {
        let id = self.confirm_delete?;
        if !self.start(PendingRequest::Delete(id)) {
            return None;
        }
        self.confirm_delete = None;
        Some(ApiRequest::Delete(id))
    }

    pub fn cancel(&mut self) {
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.draft = FilmDraft::default();
        self.is_editing = false;
        self.show_form = false;
    }

    /// Patch local state with a server response.
    pub fn apply(&mut self, outcome: ApiOutcome) {
        self.pending = None;
        match outcome {
            ApiOutcome::Listed(Ok(films)) => {
                info!("loaded {} films", films.len());
                self.films = films;
            }
            ApiOutcome::Listed(Err(err)) => error!("failed to load films: {err}"),

            ApiOutcome::Created(Ok(film)) => {
                info!(id = ?film.id, "film created");
                self.films.push(film);
                self.reset_form();
            }
            ApiOutcome::Updated(Ok(film)) => {
                info!(id = ?film.id, "film updated");
                match self.films.iter_mut().find(|f| f.id == film.id) {
                    Some(slot) => *slot = film,
                    None => warn!(id = ?film.id, "updated film not in local list"),
                }
                self.reset_form();
            }
            ApiOutcome::Created(Err(err)) | ApiOutcome::Updated(Err(err)) => {
                error!("failed to save film: {err}");
            }

            ApiOutcome::Deleted { id, result: Ok(()) } => {
                info!(id, "film deleted");
                self.films.retain(|f| f.id != Some(id));
            }
            ApiOutcome::Deleted { id, result: Err(err) } => {
                error!(id, "failed to delete film: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::api::{ApiError, FilmApi};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted in-memory server that records every call.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<ApiRequest>>,
        fail_with: Mutex<VecDeque<u16>>,
        next_id: Mutex<FilmId>,
        films: Mutex<Vec<Film>>,
    }

    impl FakeApi {
        fn with(films: Vec<Film>) -> Self {
            let next = films.iter().filter_map(|f| f.id).max().unwrap_or(0) + 1;
            Self {
                next_id: Mutex::new(next),
                films: Mutex::new(films),
                ..Self::default()
            }
        }

        fn fail_next(&self, status: u16) {
            self.fail_with.lock().unwrap().push_back(status);
        }

        fn failure(&self) -> Result<(), ApiError> {
            match self.fail_with.lock().unwrap().pop_front() {
                Some(code) => Err(ApiError::Status(code)),
                None => Ok(()),
            }
        }

        fn record(&self, req: ApiRequest) {
            self.calls.lock().unwrap().push(req);
        }

        fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FilmApi for FakeApi {
        fn list(&self) -> Result<Vec<Film>, ApiError> {
            self.record(ApiRequest::List);
            self.failure()?;
            Ok(self.films.lock().unwrap().clone())
        }

        fn create(&self, film: &Film) -> Result<Film, ApiError> {
            self.record(ApiRequest::Create(film.clone()));
            self.failure()?;
            let mut next = self.next_id.lock().unwrap();
            let saved = Film {
                id: Some(*next),
                ..film.clone()
            };
            *next += 1;
            Ok(saved)
        }

        fn update(&self, id: FilmId, film: &Film) -> Result<Film, ApiError> {
            self.record(ApiRequest::Update {
                id,
                film: film.clone(),
            });
            self.failure()?;
            Ok(Film {
                id: Some(id),
                ..film.clone()
            })
        }

        fn delete(&self, id: FilmId) -> Result<(), ApiError> {
            self.record(ApiRequest::Delete(id));
            self.failure()
        }
    }

    fn film(id: FilmId, title: &str, score: Option<f64>) -> Film {
        Film {
            id: Some(id),
            title: title.into(),
            length: Some(100 + id),
            year: Some(2000 + id),
            score,
            genre: Some(1),
        }
    }

    fn loaded(api: &FakeApi) -> FilmManager {
        let mut mgr = FilmManager::new();
        let req = mgr.load().expect("first load issues a request");
        mgr.apply(req.execute(api));
        mgr
    }

    fn run(mgr: &mut FilmManager, api: &FakeApi, req: Option<ApiRequest>) {
        let req = req.expect("request issued");
        mgr.apply(req.execute(api));
    }

    fn fill_inception(mgr: &mut FilmManager) {
        mgr.set_field(FilmField::Title, "Inception".into());
        mgr.set_field(FilmField::Length, "148".into());
        mgr.set_field(FilmField::Year, "2010".into());
        mgr.set_field(FilmField::Score, "8.8".into());
    }

    #[test]
    fn load_replaces_list_in_response_order() {
        let api = FakeApi::with(vec![film(3, "C", None), film(1, "A", None), film(2, "B", None)]);
        let mut mgr = loaded(&api);
        let titles: Vec<_> = mgr.films().iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
        assert!(!mgr.is_busy());

        // Mounting again does not refetch.
        assert_eq!(mgr.load(), None);
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn load_failure_is_swallowed() {
        let api = FakeApi::with(vec![film(1, "A", None)]);
        api.fail_next(500);
        let mgr = loaded(&api);
        assert!(mgr.films().is_empty());
        assert!(!mgr.is_busy());
    }

    #[test]
    fn create_sends_coerced_payload_and_appends() {
        let api = FakeApi::with(Vec::new());
        let mut mgr = loaded(&api);

        mgr.begin_create();
        fill_inception(&mut mgr);
        let req = mgr.submit().expect("form valid");
        assert_eq!(
            req,
            Some(ApiRequest::Create(Film {
                id: None,
                title: "Inception".into(),
                length: Some(148),
                year: Some(2010),
                score: Some(8.8),
                genre: None,
            }))
        );
        run(&mut mgr, &api, req);

        assert_eq!(
            mgr.films(),
            [Film {
                id: Some(1),
                title: "Inception".into(),
                length: Some(148),
                year: Some(2010),
                score: Some(8.8),
                genre: None,
            }]
        );
        assert!(!mgr.show_form());
        assert!(!mgr.is_editing());
        assert_eq!(mgr.draft(), &FilmDraft::default());
    }

    #[test]
    fn edit_replaces_only_the_matching_record() {
        let api = FakeApi::with(vec![
            film(1, "A", Some(5.0)),
            film(2, "B", Some(6.0)),
            film(3, "C", Some(7.0)),
        ]);
        let mut mgr = loaded(&api);
        let before = mgr.films().to_vec();

        let target = before[1].clone();
        mgr.begin_edit(&target);
        assert!(mgr.is_editing());
        assert!(mgr.show_form());
        assert!(mgr.set_field_by_name("score", "9.0".into()));

        let req = mgr.submit().expect("form valid");
        match &req {
            Some(ApiRequest::Update { id, film }) => {
                assert_eq!(*id, 2);
                assert_eq!(film.score, Some(9.0));
                assert_eq!(film.genre, Some(1));
            }
            other => panic!("expected update, got {other:?}"),
        }
        run(&mut mgr, &api, req);

        let after = mgr.films();
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].id, Some(2));
        assert_eq!(after[1].score, Some(9.0));
        assert!(!mgr.show_form());
    }

    #[test]
    fn confirmed_delete_removes_exactly_one() {
        let api = FakeApi::with(vec![film(1, "A", None), film(2, "B", None), film(3, "C", None)]);
        let mut mgr = loaded(&api);

        mgr.request_delete(2);
        assert_eq!(mgr.confirming_delete(), Some(2));
        let req = mgr.confirm_delete();
        assert_eq!(req, Some(ApiRequest::Delete(2)));
        run(&mut mgr, &api, req);

        let ids: Vec<_> = mgr.films().iter().map(|f| f.id).collect();
        assert_eq!(ids, [Some(1), Some(3)]);
        assert_eq!(mgr.confirming_delete(), None);
    }

    #[test]
    fn declined_delete_issues_nothing() {
        let api = FakeApi::with(vec![film(1, "A", None)]);
        let mut mgr = loaded(&api);

        mgr.request_delete(1);
        mgr.decline_delete();
        assert_eq!(mgr.confirm_delete(), None);
        assert_eq!(mgr.films().len(), 1);
        assert_eq!(api.calls(), [ApiRequest::List]);
    }

    #[test]
    fn failures_leave_list_and_form_untouched() {
        let api = FakeApi::with(vec![film(1, "A", Some(5.0))]);
        let mut mgr = loaded(&api);
        let before = mgr.films().to_vec();

        // create
        mgr.begin_create();
        fill_inception(&mut mgr);
        let draft = mgr.draft().clone();
        api.fail_next(500);
        let req = mgr.submit().expect("form valid");
        run(&mut mgr, &api, req);
        assert_eq!(mgr.films(), before.as_slice());
        assert!(mgr.show_form());
        assert_eq!(mgr.draft(), &draft);

        // update
        mgr.begin_edit(&before[0]);
        mgr.set_field(FilmField::Score, "1.0".into());
        api.fail_next(500);
        let req = mgr.submit().expect("form valid");
        run(&mut mgr, &api, req);
        assert_eq!(mgr.films(), before.as_slice());
        assert!(mgr.show_form());
        assert!(mgr.is_editing());
        assert_eq!(mgr.draft().score, "1.0");

        // delete
        mgr.cancel();
        mgr.request_delete(1);
        api.fail_next(500);
        let req = mgr.confirm_delete();
        run(&mut mgr, &api, req);
        assert_eq!(mgr.films(), before.as_slice());
        assert!(!mgr.is_busy());
    }

    #[test]
    fn cancel_discards_draft_without_touching_list() {
        let api = FakeApi::with(vec![film(1, "A", Some(5.0))]);
        let mut mgr = loaded(&api);
        let before = mgr.films().to_vec();

        mgr.begin_edit(&before[0]);
        mgr.set_field(FilmField::Title, "Changed".into());
        mgr.cancel();
        assert!(!mgr.show_form());
        assert!(!mgr.is_editing());
        assert_eq!(mgr.draft(), &FilmDraft::default());
        assert_eq!(mgr.films(), before.as_slice());

        mgr.begin_create();
        fill_inception(&mut mgr);
        mgr.cancel();
        assert_eq!(mgr.draft(), &FilmDraft::default());
        assert_eq!(api.calls(), [ApiRequest::List]);
    }

    #[test]
    fn blank_numbers_submit_as_null() {
        let api = FakeApi::with(vec![Film {
            id: Some(1),
            title: "Sparse".into(),
            ..Film::default()
        }]);
        let mut mgr = loaded(&api);
        let sparse = mgr.films()[0].clone();
        mgr.begin_edit(&sparse);
        // Constraints require length/year/score; genre alone may stay blank.
        mgr.set_field(FilmField::Length, "90".into());
        mgr.set_field(FilmField::Year, "1999".into());
        mgr.set_field(FilmField::Score, "7".into());
        let req = mgr.submit().expect("form valid");
        let Some(ApiRequest::Update { film, .. }) = req else {
            panic!("expected update");
        };
        assert_eq!(film.genre, None);
    }

    #[test]
    fn invalid_form_is_refused_before_any_request() {
        let api = FakeApi::with(Vec::new());
        let mut mgr = loaded(&api);
        mgr.begin_create();
        mgr.set_field(FilmField::Title, "No numbers".into());
        assert_eq!(mgr.submit(), Err(FormError::Missing(FilmField::Length)));
        assert!(!mgr.is_busy());
        assert!(mgr.show_form());
    }

    #[test]
    fn second_submit_while_pending_is_ignored() {
        let api = FakeApi::with(Vec::new());
        let mut mgr = loaded(&api);
        mgr.begin_create();
        fill_inception(&mut mgr);

        let first = mgr.submit().expect("form valid");
        assert!(first.is_some());
        assert_eq!(mgr.pending(), Some(PendingRequest::Create));
        assert_eq!(mgr.submit(), Ok(None));

        mgr.request_delete(1);
        assert_eq!(mgr.confirm_delete(), None);
        assert_eq!(mgr.confirming_delete(), Some(1));

        run(&mut mgr, &api, first);
        assert_eq!(mgr.films().len(), 1);
        assert!(!mgr.is_busy());
    }

    #[test]
    fn unknown_field_names_are_ignored() {
        let mut mgr = FilmManager::new();
        mgr.begin_create();
        assert!(!mgr.set_field_by_name("director", "Nolan".into()));
        assert_eq!(mgr.draft(), &FilmDraft::default());
    }
}
