#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use std::{net::TcpListener, time::Duration};
use userdir::directory::{
    DirectoryClient, DirectoryConfig, DirectoryView, ErrorPolicy, LoadError, render,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn user(id: u64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        "first_name": first,
        "last_name": last,
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

fn page_one() -> Value {
    json!({
        "page": 1,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": [
            user(1, "George", "Bluth"),
            user(2, "Janet", "Weaver"),
            user(3, "Emma", "Wong"),
            user(4, "Eve", "Holt"),
            user(5, "Charles", "Morris"),
            user(6, "Tracey", "Ramos"),
        ]
    })
}

fn page_two() -> Value {
    json!({
        "page": 2,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": [
            user(7, "Michael", "Lawson"),
            user(8, "Lindsay", "Ferguson"),
            user(9, "Tobias", "Funke"),
            user(10, "Byron", "Fields"),
            user(11, "George", "Edwards"),
            user(12, "Rachel", "Howell"),
        ]
    })
}

async fn mount_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_one()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_two()))
        .mount(server)
        .await;
}

fn view(server: &MockServer, policy: ErrorPolicy) -> DirectoryView<DirectoryClient> {
    let config = DirectoryConfig::new(&server.uri()).with_timeout(Duration::from_secs(5));
    DirectoryView::new(DirectoryClient::new(&config).unwrap(), policy)
}

#[tokio::test]
async fn paging_enables_controls_from_reported_total() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_pages(&server).await;
    let view = view(&server, ErrorPolicy::Retain);

    let state = view.mount().await;
    assert_eq!(state.users().len(), 6);
    assert_eq!(state.page().current_page, 1);
    assert_eq!(state.page().total_pages, 2);
    assert!(state.has_next());
    assert!(!state.has_previous());
    assert!(!state.is_loading_list());

    assert!(view.next_page().await);
    let state = view.snapshot();
    assert_eq!(state.page().current_page, 2);
    assert_eq!(state.users()[0].id, 7);
    assert!(!state.has_next());
    assert!(state.has_previous());

    assert!(!view.next_page().await);
    assert_eq!(view.snapshot().page().current_page, 2);

    let text = render::render_list(&view.snapshot());
    assert!(text.contains("Page 2 of 2"));
    assert!(text.contains("Michael Lawson"));
}

#[tokio::test]
async fn selecting_user_shows_detail_and_advisory() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_pages(&server).await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": user(7, "Michael", "Lawson"),
            "support": {
                "url": "https://contentcaddy.io",
                "text": "Buy now"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let view = view(&server, ErrorPolicy::Retain);

    view.set_page(2).await.unwrap();
    let summary = view.snapshot().find_user(7).cloned().unwrap();
    let state = view.select(summary).await;

    assert_eq!(state.selected_user_id(), Some(7));
    assert_eq!(state.detail().unwrap().email, "michael.lawson@reqres.in");
    assert_eq!(state.advisory().unwrap().text, "Buy now");
    assert!(!state.is_loading_detail());

    let panel = render::render_detail(&state).unwrap();
    assert!(panel.contains("Michael Lawson"));
    assert!(panel.contains("Buy now"));
    assert!(panel.contains("Learn more: https://contentcaddy.io"));

    let cleared = view.clear();
    assert!(cleared.selection().is_none());
    assert!(cleared.advisory().is_none());
    assert_eq!(view.clear(), cleared);
}

#[tokio::test]
async fn failed_list_keeps_previous_users() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_pages(&server).await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;
    let view = view(&server, ErrorPolicy::Retain);

    view.mount().await;
    let state = view.set_page(3).await.unwrap();

    assert_eq!(state.users().len(), 6);
    assert_eq!(state.users()[0].id, 1);
    assert!(!state.is_loading_list());
    let error = state.list_error().unwrap();
    assert!(matches!(error, LoadError::List(_)));
    let message = error.to_string();
    assert!(message.starts_with("Failed to fetch users:"));
    assert!(message.contains("500"));
    assert!(message.contains("upstream exploded"));
    assert_eq!(state.banner(), Some(error));
}

#[tokio::test]
async fn failed_detail_keeps_selection_and_list() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_pages(&server).await;
    Mock::given(method("GET"))
        .and(path("/users/23"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;
    let view = view(&server, ErrorPolicy::Retain);

    view.mount().await;
    let state = view.open(23).await;

    assert_eq!(state.selected_user_id(), Some(23));
    assert!(state.detail().is_none());
    assert_eq!(state.users().len(), 6);
    assert!(state.list_error().is_none());
    let message = state.detail_error().unwrap().to_string();
    assert!(message.starts_with("Failed to fetch user details:"));
    assert!(message.contains("404"));
    assert_eq!(
        render::render_detail(&state).as_deref(),
        Some("User details not available\n")
    );
}

#[tokio::test]
async fn slow_earlier_page_does_not_overwrite_later_page() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_one())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_two()))
        .mount(&server)
        .await;
    let view = view(&server, ErrorPolicy::Retain);

    let first = view.set_page(1);
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        view.set_page(2).await
    };
    let (_, _) = tokio::join!(first, second);

    let state = view.snapshot();
    assert_eq!(state.page().current_page, 2);
    assert_eq!(state.users()[0].id, 7);
    assert!(!state.is_loading_list());
}

#[tokio::test]
async fn clear_on_success_policy_drops_recovered_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_pages(&server).await;
    let view = view(&server, ErrorPolicy::ClearOnSuccess);

    let state = view.mount().await;
    assert!(state.list_error().is_some());
    assert!(state.users().is_empty());

    let state = view.reload().await;
    assert!(state.list_error().is_none());
    assert!(state.banner().is_none());
    assert_eq!(state.users().len(), 6);
}
