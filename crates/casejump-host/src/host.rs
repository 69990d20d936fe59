//! Request dispatcher: wires classification, resolution, verification,
//! popup control, and persisted state together.
//!
//! All process-scoped state (the open popup, pending post-navigation checks,
//! the bounds saver) lives on [`Host`] and is only touched through
//! [`Host::handle`]. Storage is read-modify-write per request with no
//! locking across requests.

use std::sync::Arc;

use casejump_core::menu::{MenuAction, action_for, build_menu};
use casejump_core::page::inspect_page;
use casejump_core::placement::placement;
use casejump_core::{
    Classification, CoreError, EntryPoint, HistoryEntry, PageReport, PatternCatalog,
    ResolvedTarget, Selection, UrlResolver, classify, classify_for_law, classify_precedent,
    find_law,
};
use casejump_store::{KvBackend, StateStore};
use casejump_verify::{
    ExistenceProbe, ExistenceVerifier, Outcome, PageOutcome, PendingVerifications, TabId,
};
use tracing::{debug, info, warn};

use crate::HostError;
use crate::bounds::BoundsSaver;
use crate::config::{HostConfig, VerifyStrategy};
use crate::popup::{PopupController, PopupSurface, WindowId};
use crate::request::{Request, Response};

/// Shown in place of the destination site's error page.
pub const NOT_FOUND_NOTICE: &str = concat!(
    "검색 결과를 찾을 수 없습니다. ",
    "선택하신 내용에 해당하는 정보를 CaseNote에서 찾지 못했습니다. ",
    "입력하신 법률/판례 번호 또는 조문 형식을 다시 확인해주세요."
);

/// Which classifier a lookup runs.
#[derive(Debug, Clone)]
pub enum Lookup {
    Intelligent,
    Precedent,
    Law(String),
}

pub struct Host<B, P, S> {
    config: HostConfig,
    catalog: PatternCatalog,
    resolver: UrlResolver,
    verifier: ExistenceVerifier<P>,
    store: Arc<StateStore<B>>,
    popup: PopupController<S>,
    pending: PendingVerifications,
    bounds: Option<BoundsSaver>,
}

impl<B, P, S> Host<B, P, S>
where
    B: KvBackend + 'static,
    P: ExistenceProbe,
    S: PopupSurface,
{
    pub fn new(
        config: HostConfig,
        store: Arc<StateStore<B>>,
        probe: P,
        surface: S,
    ) -> Result<Self, HostError> {
        let catalog = PatternCatalog::standard()?;
        let resolver = UrlResolver::new(&config.site);
        let verifier = ExistenceVerifier::new(probe).with_deadline(config.probe_timeout);
        Ok(Self {
            config,
            catalog,
            resolver,
            verifier,
            store,
            popup: PopupController::new(surface),
            pending: PendingVerifications::new(),
            bounds: None,
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn store(&self) -> &StateStore<B> {
        &self.store
    }

    pub fn popup(&self) -> &PopupController<S> {
        &self.popup
    }

    pub fn pending(&self) -> &PendingVerifications {
        &self.pending
    }

    pub fn verifier(&self) -> &ExistenceVerifier<P> {
        &self.verifier
    }

    /// Classify and resolve without touching the network or storage.
    pub fn plan(
        &self,
        selection: &Selection,
        lookup: &Lookup,
    ) -> Result<ResolvedTarget, HostError> {
        let (classification, entry) = self.classify_lookup(selection, lookup)?;
        Ok(self.resolver.resolve(&classification, selection, entry))
    }

    fn classify_lookup(
        &self,
        selection: &Selection,
        lookup: &Lookup,
    ) -> Result<(Classification, EntryPoint), HostError> {
        Ok(match lookup {
            Lookup::Intelligent => (classify(selection, &self.catalog), EntryPoint::Intelligent),
            Lookup::Precedent => (
                classify_precedent(selection, &self.catalog),
                EntryPoint::Precedent,
            ),
            Lookup::Law(id) => {
                let law = find_law(id).ok_or_else(|| CoreError::UnknownLaw(id.clone()))?;
                (
                    classify_for_law(law, selection, &self.catalog),
                    EntryPoint::DirectLaw,
                )
            }
        })
    }

    /// Handle one inbound message. Failures become [`Response::Failed`];
    /// nothing here is surfaced to the user as a raw error.
    pub async fn handle(&mut self, request: Request) -> Response {
        debug!(?request, "handling request");
        match self.dispatch(request).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "request failed");
                Response::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn dispatch(&mut self, request: Request) -> Result<Response, HostError> {
        match request {
            Request::IntelligentSearch { selection } => {
                self.lookup(&selection, Lookup::Intelligent).await
            }
            Request::PrecedentSearch { selection } => {
                self.lookup(&selection, Lookup::Precedent).await
            }
            Request::DirectLawSearch { law_id, selection } => {
                self.lookup(&selection, Lookup::Law(law_id)).await
            }
            Request::MenuClick {
                menu_item_id,
                selection,
            } => match action_for(&menu_item_id) {
                Some(MenuAction::Intelligent) => self.lookup(&selection, Lookup::Intelligent).await,
                Some(MenuAction::Precedent) => self.lookup(&selection, Lookup::Precedent).await,
                Some(MenuAction::Law(id)) => self.lookup(&selection, Lookup::Law(id)).await,
                None => Ok(Response::Ignored {
                    reason: format!("unknown menu item {menu_item_id}"),
                }),
            },
            Request::OpenFromHistory { item } => self.open_from_history(item).await,
            Request::UpdateMenus => self.menus().await,
            Request::UpdateHistoryTitle { url, new_title } => {
                self.store.history().update_title(&url, &new_title).await?;
                Ok(Response::Ack)
            }
            Request::KeepAlive => Ok(Response::Ack),
            Request::PageLoaded { tab_id, url, title } => {
                self.page_loaded(tab_id, &url, &title).await
            }
            Request::TabClosed { tab_id } => {
                self.pending.tab_closed(tab_id);
                Ok(Response::Ack)
            }
            Request::WindowBoundsChanged { bounds } => {
                let quiet = self.config.bounds_quiet;
                let store = Arc::clone(&self.store);
                self.bounds
                    .get_or_insert_with(|| BoundsSaver::spawn(store, quiet))
                    .changed(bounds);
                Ok(Response::Ack)
            }
            Request::WindowClosed { window_id } => {
                self.popup.window_closed(window_id);
                self.pending.tab_closed(window_id);
                Ok(Response::Ack)
            }
            Request::ListHistory => Ok(Response::History {
                entries: self.store.history().list().await?.into_entries(),
            }),
            Request::RemoveHistory { index } => {
                self.store.history().remove(index).await?;
                Ok(Response::History {
                    entries: self.store.history().list().await?.into_entries(),
                })
            }
            Request::ClearHistory => {
                self.store.history().clear().await?;
                Ok(Response::History {
                    entries: Vec::new(),
                })
            }
            Request::GetSettings => {
                let settings = self.store.settings().await?;
                Ok(Response::Settings {
                    enabled: settings.enabled,
                    favorites: settings.favorites,
                })
            }
            Request::SetLawEnabled { law_id, enabled } => {
                let mut settings = self.store.settings().await?;
                settings.set_enabled(&law_id, enabled)?;
                self.store.save_settings(&settings).await?;
                self.menus().await
            }
            Request::ToggleFavorite { law_id } => {
                let mut settings = self.store.settings().await?;
                settings.toggle_favorite(&law_id)?;
                self.store.save_settings(&settings).await?;
                self.menus().await
            }
        }
    }

    /// Run one lookup end to end.
    pub async fn lookup(&mut self, selection: &str, lookup: Lookup) -> Result<Response, HostError> {
        let Ok(selection) = Selection::parse(selection) else {
            return Ok(Response::Ignored {
                reason: "empty selection".into(),
            });
        };
        let target = self.plan(&selection, &lookup)?;
        info!(
            selection = %selection,
            candidate = %target.candidate_url,
            verify = target.requires_verification,
            "lookup resolved"
        );

        match self.config.strategy {
            VerifyStrategy::Probe => {
                let verdict = self.verifier.verify(&target).await;
                let window_id = self.open(&verdict.url).await?;
                self.record(verdict.history_entry()).await;
                Ok(Response::Opened {
                    window_id,
                    url: verdict.url,
                    label: verdict.label,
                    verification: outcome_name(&verdict.outcome).to_string(),
                })
            }
            VerifyStrategy::PostNavigation => {
                let window_id = self.open(&target.candidate_url).await?;
                if target.requires_verification {
                    let url = target.candidate_url.clone();
                    self.pending.register(window_id, target);
                    return Ok(Response::Pending { window_id, url });
                }
                self.record(HistoryEntry::new(&target.candidate_url, &target.display_label))
                    .await;
                Ok(Response::Opened {
                    window_id,
                    url: target.candidate_url,
                    label: target.display_label,
                    verification: outcome_name(&Outcome::NotRequired).to_string(),
                })
            }
        }
    }

    async fn open_from_history(&mut self, item: HistoryEntry) -> Result<Response, HostError> {
        let window_id = self.open(&item.url).await?;
        self.record(item.clone()).await;
        Ok(Response::Opened {
            window_id,
            url: item.url,
            label: item.display_text,
            verification: outcome_name(&Outcome::NotRequired).to_string(),
        })
    }

    async fn page_loaded(
        &mut self,
        tab: TabId,
        url: &str,
        title: &str,
    ) -> Result<Response, HostError> {
        match self.pending.page_loaded(tab, url, title) {
            PageOutcome::Redirect { url, entry } => {
                self.popup.navigate(tab, &url).await?;
                self.record(entry).await;
                return Ok(Response::Redirected { window_id: tab, url });
            }
            PageOutcome::Commit(entry) => self.record(entry).await,
            PageOutcome::Untracked => {}
        }

        match inspect_page(url, title) {
            PageReport::NotFound => Ok(Response::NotFound {
                message: NOT_FOUND_NOTICE.to_string(),
            }),
            PageReport::Found { title: Some(clean) } => {
                self.store.history().update_title(url, &clean).await?;
                Ok(Response::Ack)
            }
            PageReport::Found { title: None } => Ok(Response::Ack),
        }
    }

    async fn menus(&self) -> Result<Response, HostError> {
        let settings = self.store.settings().await?;
        Ok(Response::Menus {
            items: build_menu(&settings),
        })
    }

    async fn open(&mut self, url: &str) -> Result<WindowId, HostError> {
        let saved = match self.store.window_bounds().await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "window bounds unavailable, using default placement");
                None
            }
        };
        let bounds = placement(saved, self.config.display);
        self.popup.open(url, bounds).await
    }

    /// Storage failures drop the entry for this lookup only.
    async fn record(&self, entry: HistoryEntry) {
        if let Err(e) = self.store.history().record(entry).await {
            warn!(error = %e, "history write failed, entry dropped");
        }
    }

    /// Flush background work (pending bounds writes).
    pub async fn shutdown(self) {
        if let Some(saver) = self.bounds {
            saver.shutdown().await;
        }
    }
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::NotRequired => "notRequired",
        Outcome::Confirmed => "confirmed",
        Outcome::FellBack { .. } => "fellBack",
    }
}
