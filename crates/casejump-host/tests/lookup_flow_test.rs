#![allow(clippy::expect_used, clippy::unwrap_used)]

//! End-to-end lookup flows through the host: classification, resolution,
//! verification (both strategies), popup control, and history.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use casejump_core::{HistoryEntry, WindowBounds};
use casejump_host::{
    Host, HostConfig, HostError, PopupSurface, Request, Response, VerifyStrategy, WindowId,
    run_session,
};
use casejump_store::{MemoryBackend, StateStore};
use casejump_verify::mock::StaticProbe;

// ── Helpers ──

#[derive(Default)]
struct RecordingSurface {
    next: Mutex<WindowId>,
    visits: Mutex<Vec<(WindowId, String)>>,
}

impl RecordingSurface {
    fn visits(&self) -> Vec<(WindowId, String)> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl PopupSurface for RecordingSurface {
    async fn create(&self, url: &str, _bounds: WindowBounds) -> Result<WindowId, HostError> {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        self.visits.lock().unwrap().push((*next, url.to_string()));
        Ok(*next)
    }

    async fn navigate(&self, window: WindowId, url: &str) -> Result<(), HostError> {
        self.visits.lock().unwrap().push((window, url.to_string()));
        Ok(())
    }
}

type TestHost = Host<MemoryBackend, StaticProbe, RecordingSurface>;

const PRECEDENT_URL: &str = "https://casenote.kr/대법원/2019%EB%8B%A412345";
const PRECEDENT_SEARCH: &str = "https://casenote.kr/search/?q=2019%EB%8B%A412345";

fn host_with(strategy: VerifyStrategy, probe: StaticProbe) -> TestHost {
    let config = HostConfig {
        strategy,
        ..HostConfig::default()
    };
    let store = Arc::new(StateStore::new(MemoryBackend::new()));
    Host::new(config, store, probe, RecordingSurface::default()).unwrap()
}

fn search(selection: &str) -> Request {
    Request::IntelligentSearch {
        selection: selection.into(),
    }
}

async fn history(host: &TestHost) -> Vec<HistoryEntry> {
    host.store().history().list().await.unwrap().into_entries()
}

// ── Probe strategy ──

#[tokio::test]
async fn article_lookup_opens_statute_page() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    let resp = host.handle(search("민법 제839조의2")).await;

    let url = "https://casenote.kr/법령/민법/제839조의2";
    assert_eq!(
        resp,
        Response::Opened {
            window_id: 1,
            url: url.into(),
            label: "민법 제839조의2".into(),
            verification: "notRequired".into(),
        }
    );
    assert!(host.verifier().probe().calls().is_empty());
    assert_eq!(history(&host).await, vec![HistoryEntry::new(url, "민법 제839조의2")]);
}

#[tokio::test]
async fn missing_precedent_opens_and_records_search() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    let resp = host.handle(search("2019다12345")).await;

    match resp {
        Response::Opened {
            url, verification, ..
        } => {
            assert_eq!(url, PRECEDENT_SEARCH);
            assert_eq!(verification, "fellBack");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(host.verifier().probe().calls(), vec![PRECEDENT_URL.to_string()]);
    assert_eq!(host.popup().surface().visits(), vec![(1, PRECEDENT_SEARCH.to_string())]);
    assert_eq!(
        history(&host).await,
        vec![HistoryEntry::new(PRECEDENT_SEARCH, "2019다12345")]
    );
}

#[tokio::test]
async fn existing_precedent_opens_case_page() {
    let probe = StaticProbe::new().with_status(PRECEDENT_URL, 200);
    let mut host = host_with(VerifyStrategy::Probe, probe);
    host.handle(search("2019다12345")).await;
    assert_eq!(
        history(&host).await,
        vec![HistoryEntry::new(PRECEDENT_URL, "대법원 2019다12345")]
    );
}

#[tokio::test]
async fn plain_text_is_searched_verbatim() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    host.handle(search("계약의 성립")).await;
    let entries = history(&host).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].url,
        "https://casenote.kr/search/?q=%EA%B3%84%EC%95%BD%EC%9D%98%20%EC%84%B1%EB%A6%BD"
    );
    assert_eq!(entries[0].display_text, "계약의 성립");
}

#[tokio::test]
async fn blank_selection_is_ignored() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    let resp = host.handle(search("   ")).await;
    assert!(matches!(resp, Response::Ignored { .. }));
    assert!(history(&host).await.is_empty());
    assert!(host.popup().surface().visits().is_empty());
}

#[tokio::test]
async fn popup_is_reused_across_lookups() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    host.handle(search("민법 제750조")).await;
    host.handle(search("형법 제250조")).await;
    let windows: Vec<WindowId> = host.popup().surface().visits().iter().map(|v| v.0).collect();
    assert_eq!(windows, vec![1, 1]);

    host.handle(Request::WindowClosed { window_id: 1 }).await;
    host.handle(search("상법 제24조")).await;
    assert_eq!(host.popup().surface().visits().last().unwrap().0, 2);
}

#[tokio::test]
async fn menu_click_runs_law_specific_search() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    let resp = host
        .handle(Request::MenuClick {
            menu_item_id: "civilLaw".into(),
            selection: "750조 참조".into(),
        })
        .await;
    match resp {
        Response::Opened { url, label, .. } => {
            assert_eq!(url, "https://casenote.kr/법령/민법/제750조");
            assert_eq!(label, "민법 제750조");
        }
        other => panic!("unexpected {other:?}"),
    }

    let resp = host
        .handle(Request::DirectLawSearch {
            law_id: "nope".into(),
            selection: "x".into(),
        })
        .await;
    assert!(matches!(resp, Response::Failed { .. }));
}

// ── History operations ──

#[tokio::test]
async fn history_is_capped_and_deduplicated() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    for n in 1..=7 {
        host.handle(search(&format!("민법 제{n}조"))).await;
    }
    host.handle(search("민법 제5조")).await;

    let entries = history(&host).await;
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].display_text, "민법 제5조");
    assert_eq!(
        entries.iter().filter(|e| e.display_text == "민법 제5조").count(),
        1
    );
}

#[tokio::test]
async fn open_from_history_moves_entry_to_head() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    host.handle(search("민법 제1조")).await;
    host.handle(search("민법 제2조")).await;
    let oldest = history(&host).await[1].clone();

    host.handle(Request::OpenFromHistory {
        item: oldest.clone(),
    })
    .await;
    let entries = history(&host).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], oldest);
}

#[tokio::test]
async fn title_repair_updates_label_in_place() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    host.handle(search("민법 제1조")).await;
    host.handle(search("민법 제2조")).await;
    let before = history(&host).await;

    host.handle(Request::UpdateHistoryTitle {
        url: before[1].url.clone(),
        new_title: "민법 제1조 (법원)".into(),
    })
    .await;
    let after = history(&host).await;
    assert_eq!(after[1].display_text, "민법 제1조 (법원)");
    assert_eq!(after[0], before[0]);

    host.handle(Request::UpdateHistoryTitle {
        url: before[1].url.clone(),
        new_title: "민법 제1조 (법원)".into(),
    })
    .await;
    assert_eq!(history(&host).await, after);
}

#[tokio::test]
async fn remove_and_clear_history() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    host.handle(search("민법 제1조")).await;
    host.handle(search("민법 제2조")).await;

    match host.handle(Request::RemoveHistory { index: 0 }).await {
        Response::History { entries } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].display_text, "민법 제1조");
        }
        other => panic!("unexpected {other:?}"),
    }
    host.handle(Request::ClearHistory).await;
    assert!(history(&host).await.is_empty());
}

// ── Post-navigation strategy ──

#[tokio::test]
async fn error_page_redirects_and_records_fallback_once() {
    let mut host = host_with(VerifyStrategy::PostNavigation, StaticProbe::new());
    let resp = host.handle(search("2019다12345")).await;
    assert_eq!(
        resp,
        Response::Pending {
            window_id: 1,
            url: PRECEDENT_URL.into()
        }
    );
    assert!(history(&host).await.is_empty());

    let resp = host
        .handle(Request::PageLoaded {
            tab_id: 1,
            url: PRECEDENT_URL.into(),
            title: "에러(404) - CaseNote".into(),
        })
        .await;
    assert_eq!(
        resp,
        Response::Redirected {
            window_id: 1,
            url: PRECEDENT_SEARCH.into()
        }
    );

    // The search page then loads; it contributes nothing.
    host.handle(Request::PageLoaded {
        tab_id: 1,
        url: PRECEDENT_SEARCH.into(),
        title: "2019다12345 - CaseNote".into(),
    })
    .await;

    assert_eq!(
        history(&host).await,
        vec![HistoryEntry::new(PRECEDENT_SEARCH, "2019다12345")]
    );
    assert!(host.pending().is_empty());
    assert!(host.verifier().probe().calls().is_empty());
}

#[tokio::test]
async fn real_page_commits_with_cleaned_title() {
    let mut host = host_with(VerifyStrategy::PostNavigation, StaticProbe::new());
    host.handle(search("2019다12345")).await;
    host.handle(Request::PageLoaded {
        tab_id: 1,
        url: PRECEDENT_URL.into(),
        title: "대법원 2020. 1. 9. 선고 2019다12345 판결 - CaseNote".into(),
    })
    .await;

    assert_eq!(
        history(&host).await,
        vec![HistoryEntry::new(
            PRECEDENT_URL,
            "대법원 2020. 1. 9. 선고 2019다12345 판결"
        )]
    );
}

#[tokio::test]
async fn closed_tab_discards_pending_check() {
    let mut host = host_with(VerifyStrategy::PostNavigation, StaticProbe::new());
    host.handle(search("2020헌가5")).await;
    assert_eq!(host.pending().len(), 1);

    let resp = host.handle(Request::TabClosed { tab_id: 1 }).await;
    assert_eq!(resp, Response::Ack);
    assert!(host.pending().is_empty());
    assert!(history(&host).await.is_empty());
}

#[tokio::test]
async fn statute_lookup_records_immediately_without_check() {
    let mut host = host_with(VerifyStrategy::PostNavigation, StaticProbe::new());
    let resp = host.handle(search("형법 제250조")).await;
    assert!(matches!(resp, Response::Opened { .. }));
    assert!(host.pending().is_empty());
    assert_eq!(history(&host).await.len(), 1);
}

#[tokio::test]
async fn untracked_error_page_gets_notice() {
    let mut host = host_with(VerifyStrategy::PostNavigation, StaticProbe::new());
    let resp = host
        .handle(Request::PageLoaded {
            tab_id: 9,
            url: "https://casenote.kr/대법원/1다1".into(),
            title: "에러(404)".into(),
        })
        .await;
    assert!(matches!(resp, Response::NotFound { .. }));
}

// ── Settings and menus ──

#[tokio::test]
async fn settings_changes_rebuild_menus() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    let resp = host
        .handle(Request::SetLawEnabled {
            law_id: "patentAct".into(),
            enabled: true,
        })
        .await;
    match resp {
        Response::Menus { items } => assert!(items.iter().any(|i| i.id == "patentAct")),
        other => panic!("unexpected {other:?}"),
    }

    for id in ["civilLaw", "criminalLaw", "patentAct"] {
        host.handle(Request::ToggleFavorite { law_id: id.into() }).await;
    }
    let resp = host
        .handle(Request::ToggleFavorite {
            law_id: "constitution".into(),
        })
        .await;
    assert!(matches!(resp, Response::Failed { .. }));

    match host.handle(Request::GetSettings).await {
        Response::Settings { favorites, .. } => {
            assert_eq!(favorites, vec!["civilLaw", "criminalLaw", "patentAct"])
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ── Session ──

#[tokio::test]
async fn session_answers_each_line() {
    let mut host = host_with(VerifyStrategy::Probe, StaticProbe::new());
    let input = concat!(
        r#"{"action":"keepAlive"}"#,
        "\n\n",
        r#"{"action":"intelligentSearch","selection":"민법 제750조"}"#,
        "\n",
        "not json\n",
        r#"{"action":"listHistory"}"#,
        "\n",
    );
    let mut out = Vec::new();
    let handled = run_session(&mut host, input.as_bytes(), &mut out).await.unwrap();
    assert_eq!(handled, 4);

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[0]["kind"], "ack");
    assert_eq!(lines[1]["kind"], "opened");
    assert_eq!(lines[2]["kind"], "failed");
    assert_eq!(lines[3]["entries"][0]["displayText"], "민법 제750조");
}
