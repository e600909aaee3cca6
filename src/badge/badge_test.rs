use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use futures::executor::block_on;

use super::identity::NoAuth;
use super::*;
use crate::config::BackendConfig;
use crate::error::{DomError, QueryError};
use crate::net::transport::{HttpResponse, Transport};
use crate::net::unread::RestUnreadSource;
use crate::util::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct RecordingView {
    painted: RefCell<Vec<bool>>,
    missing_target: bool,
}

impl RecordingView {
    fn missing() -> Self {
        Self { missing_target: true, ..Self::default() }
    }

    fn current(&self) -> Option<bool> {
        self.painted.borrow().last().copied()
    }

    fn history(&self) -> Vec<bool> {
        self.painted.borrow().clone()
    }
}

impl BadgeView for RecordingView {
    fn set_visible(&self, visible: bool) -> Result<(), DomError> {
        if self.missing_target {
            return Err(DomError::TargetNotFound);
        }
        self.painted.borrow_mut().push(visible);
        Ok(())
    }
}

/// Source that answers from a fixed reply and notes what the page showed
/// at the moment the query started.
struct ScriptedSource {
    reply: Result<bool, QueryError>,
    calls: Cell<usize>,
    observed_view: Option<Rc<RecordingView>>,
    seen_before_query: Cell<Option<bool>>,
}

impl ScriptedSource {
    fn new(reply: Result<bool, QueryError>) -> Self {
        Self { reply, calls: Cell::new(0), observed_view: None, seen_before_query: Cell::new(None) }
    }

    fn observing(reply: Result<bool, QueryError>, view: Rc<RecordingView>) -> Self {
        Self { observed_view: Some(view), ..Self::new(reply) }
    }
}

#[async_trait(?Send)]
impl UnreadSource for ScriptedSource {
    async fn has_unread(&self, _user_id: &str) -> Result<bool, QueryError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(view) = &self.observed_view {
            self.seen_before_query.set(view.current());
        }
        self.reply.clone()
    }
}

struct StaticTransport {
    status: u16,
    body: &'static str,
    calls: Cell<usize>,
}

impl StaticTransport {
    fn new(status: u16, body: &'static str) -> Self {
        Self { status, body, calls: Cell::new(0) }
    }
}

#[async_trait(?Send)]
impl Transport for StaticTransport {
    async fn get(&self, _url: &str, _headers: &[(String, String)]) -> Result<HttpResponse, QueryError> {
        self.calls.set(self.calls.get() + 1);
        Ok(HttpResponse { status: self.status, body: self.body.to_owned() })
    }
}

fn signed_in_store() -> MemoryStore {
    MemoryStore::with_entries([("sb_user_id_v1", "user-1")])
}

fn cached(store: &MemoryStore) -> Option<String> {
    store.get(UNREAD_CACHE_KEY).unwrap()
}

fn rest_badge(
    store: MemoryStore,
    config: Option<BackendConfig>,
    status: u16,
    body: &'static str,
) -> BadgeIndicator<MemoryStore, NoAuth, RestUnreadSource<StaticTransport>, RecordingView> {
    let source = RestUnreadSource::new(config, StaticTransport::new(status, body));
    BadgeIndicator::new(store, NoAuth, source, RecordingView::default())
}

fn backend() -> Option<BackendConfig> {
    Some(BackendConfig::new("https://db.example.com").with_api_key("anon"))
}

// =============================================================
// Cached flag codec
// =============================================================

#[test]
fn cached_flag_accepts_only_zero_and_one() {
    assert_eq!(decode_cached_flag("1"), Some(true));
    assert_eq!(decode_cached_flag("0"), Some(false));
    assert_eq!(decode_cached_flag("true"), None);
    assert_eq!(decode_cached_flag(""), None);
    assert_eq!(encode_cached_flag(true), "1");
    assert_eq!(encode_cached_flag(false), "0");
}

// =============================================================
// Cached paint
// =============================================================

#[test]
fn paint_cached_shows_badge_for_one() {
    let store = MemoryStore::with_entries([(UNREAD_CACHE_KEY, "1")]);
    let badge = BadgeIndicator::new(store, NoAuth, ScriptedSource::new(Ok(false)), RecordingView::default());
    assert_eq!(badge.paint_cached(), Ok(Some(true)));
    assert_eq!(badge.view().history(), vec![true]);
}

#[test]
fn paint_cached_ignores_unknown_values() {
    let store = MemoryStore::with_entries([(UNREAD_CACHE_KEY, "yes")]);
    let badge = BadgeIndicator::new(store, NoAuth, ScriptedSource::new(Ok(false)), RecordingView::default());
    assert_eq!(badge.paint_cached(), Ok(None));
    assert!(badge.view().history().is_empty());
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn non_empty_array_renders_visible_and_caches_one() {
    let badge = rest_badge(signed_in_store(), backend(), 200, r#"[{"id":3}]"#);
    assert_eq!(block_on(badge.refresh()), Ok(true));
    assert_eq!(badge.view().current(), Some(true));
    assert_eq!(cached(badge.store()).as_deref(), Some("1"));
}

#[test]
fn empty_array_renders_hidden_and_caches_zero() {
    let badge = rest_badge(signed_in_store(), backend(), 200, "[]");
    assert_eq!(block_on(badge.refresh()), Ok(false));
    assert_eq!(badge.view().current(), Some(false));
    assert_eq!(cached(badge.store()).as_deref(), Some("0"));
}

#[test]
fn non_success_status_renders_hidden() {
    let badge = rest_badge(signed_in_store(), backend(), 500, "[1]");
    assert_eq!(block_on(badge.refresh()), Err(BadgeError::Query(QueryError::Status(500))));
    assert_eq!(badge.view().current(), Some(false));
    assert_eq!(cached(badge.store()).as_deref(), Some("0"));
}

#[test]
fn missing_config_renders_hidden_without_network_call() {
    let badge = rest_badge(signed_in_store(), None, 200, "[1]");
    assert_eq!(block_on(badge.refresh()), Err(BadgeError::Query(QueryError::MissingConfig)));
    assert_eq!(badge.view().current(), Some(false));
    assert_eq!(badge.source.transport().calls.get(), 0);
}

#[test]
fn anonymous_user_is_hidden_regardless_of_backend() {
    for (status, body) in [(200, "[1]"), (200, "[]"), (503, "")] {
        let badge = rest_badge(MemoryStore::new(), backend(), status, body);
        assert_eq!(block_on(badge.refresh()), Err(BadgeError::Anonymous));
        assert_eq!(badge.view().history(), vec![false]);
        assert_eq!(badge.source.transport().calls.get(), 0);
        assert_eq!(cached(badge.store()), None);
    }
}

#[test]
fn empty_stored_identity_is_anonymous() {
    let store = MemoryStore::with_entries([("sb_user_id_v1", ""), ("currentUserId", "")]);
    let badge = rest_badge(store, backend(), 200, "[1]");
    assert_eq!(block_on(badge.refresh()), Err(BadgeError::Anonymous));
    assert_eq!(badge.view().current(), Some(false));
}

#[test]
fn missing_dom_target_still_caches_live_result() {
    let badge = BadgeIndicator::new(signed_in_store(), NoAuth, ScriptedSource::new(Ok(true)), RecordingView::missing());
    assert_eq!(block_on(badge.refresh()), Err(BadgeError::Dom(DomError::TargetNotFound)));
    assert_eq!(cached(badge.store()).as_deref(), Some("1"));
}

// =============================================================
// Full run
// =============================================================

#[test]
fn cached_one_paints_before_network_then_live_result_wins() {
    let view = Rc::new(RecordingView::default());
    let store = MemoryStore::with_entries([(UNREAD_CACHE_KEY, "1"), ("currentUserId", "user-1")]);
    let source = ScriptedSource::observing(Ok(false), Rc::clone(&view));
    let badge = BadgeIndicator::new(store, NoAuth, source, Rc::clone(&view));

    block_on(badge.run());

    assert_eq!(badge.source.seen_before_query.get(), Some(true));
    assert_eq!(view.history(), vec![true, false]);
    assert_eq!(cached(badge.store()).as_deref(), Some("0"));
}

#[test]
fn run_swallows_every_failure() {
    let badge = BadgeIndicator::new(
        MemoryStore::new(),
        NoAuth,
        ScriptedSource::new(Err(QueryError::Network("down".to_owned()))),
        RecordingView::missing(),
    );
    block_on(badge.run());
    assert!(badge.view().history().is_empty());
}

#[test]
fn query_runs_once_per_refresh() {
    let badge = BadgeIndicator::new(signed_in_store(), NoAuth, ScriptedSource::new(Ok(true)), RecordingView::default());
    block_on(badge.run());
    assert_eq!(badge.source.calls.get(), 1);
}
