use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const WEEK_0: &str = "Week 0: Dec 01 - Dec 07, 2025";
const WEEK_3: &str = "Week 3: Dec 22 - Dec 28, 2025";
const WEEK_7: &str = "Week 7: Jan 19 - Jan 25, 2026";

#[derive(Debug, Deserialize)]
struct WeekListResponse {
    weeks: Vec<String>,
    default_week: String,
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Week")]
    label: String,
}

#[derive(Debug, Deserialize)]
struct Delta {
    status: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeekView {
    current: Record,
    previous: Option<Record>,
    deltas: BTreeMap<String, Delta>,
    comparison_label: String,
}

#[derive(Debug, Deserialize)]
struct Chart {
    tab: String,
}

#[derive(Debug, Deserialize)]
struct DashboardPage {
    reporting_period: String,
    charts: Vec<Chart>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/weeks")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_growth_dashboard"))
        .env("PORT", port.to_string())
        .env_remove("DASHBOARD_DEFAULT_WEEK")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_week(server: &TestServer, week: &str) -> reqwest::Response {
    Client::new()
        .get(format!("{}/api/week", server.base_url))
        .query(&[("week", week)])
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_lists_weeks_in_order() {
    let server = shared_server().await;

    let list: WeekListResponse = Client::new()
        .get(format!("{}/api/weeks", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(list.weeks.len(), 8);
    assert_eq!(list.weeks[0], WEEK_0);
    assert_eq!(list.weeks[3], WEEK_3);
    assert_eq!(list.default_week, WEEK_7);
}

#[tokio::test]
async fn http_week_reports_signed_deltas() {
    let server = shared_server().await;

    let view: WeekView = get_week(&server, WEEK_3).await.json().await.unwrap();

    assert_eq!(view.current.label, WEEK_3);
    assert_eq!(view.previous.unwrap().label, "Week 2: Dec 15 - Dec 21, 2025");
    assert_eq!(view.comparison_label, "vs last week");
    let subs = &view.deltas["Total Subs"];
    assert_eq!(subs.status, "change");
    assert_eq!(subs.value, Some(16144.0));
}

#[tokio::test]
async fn http_first_week_has_unavailable_deltas() {
    let server = shared_server().await;

    let view: WeekView = get_week(&server, WEEK_0).await.json().await.unwrap();

    assert!(view.previous.is_none());
    assert_eq!(view.comparison_label, "(no previous data)");
    let dau = &view.deltas["Avg DAU"];
    assert_eq!(dau.status, "unavailable");
    assert_eq!(dau.value, None);
}

#[tokio::test]
async fn http_unknown_week_is_not_found() {
    let server = shared_server().await;

    let response = get_week(&server, "does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = Client::new()
        .get(format!("{}/", server.base_url))
        .query(&[("week", "does-not-exist")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_dashboard_defaults_to_latest_week() {
    let server = shared_server().await;
    let client = Client::new();

    let page: DashboardPage = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.reporting_period, WEEK_7);
    let tabs: Vec<_> = page.charts.iter().map(|chart| chart.tab.as_str()).collect();
    assert_eq!(tabs, vec!["Subscriber Growth", "App Activity", "YouTube Views"]);

    let html = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Soullab Growth Dashboard"));
    assert!(html.contains(WEEK_7));
}
