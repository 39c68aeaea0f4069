use std::net::TcpListener;

use actix_web::middleware::Logger;
use actix_web::{rt, web, App, HttpServer};
use serde_json::{json, Value};
use taskdesk::routes::{self, health, setup};
use taskdesk::AppState;

// bcrypt keeps its MIN_COST (4) private; mirror it for tests.
const MIN_COST: u32 = 4;

/// Serves the full application on an ephemeral port and returns its base URL.
fn spawn_server() -> (String, actix_web::dev::ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let state = web::Data::new(AppState::in_memory(MIN_COST));
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(routes::cors())
            .wrap(Logger::default())
            .service(health::index)
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();

    let handle = server.handle();
    rt::spawn(server);
    (format!("http://127.0.0.1:{}", port), handle)
}

#[actix_rt::test]
async fn test_banner_and_login_over_http() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (base, handle) = spawn_server();
    let client = reqwest::Client::new();

    let banner = client
        .get(&base)
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .unwrap();
    assert_eq!(banner, health::BANNER);

    let message = client
        .get(format!("{}/api/setup", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(message, setup::SETUP_COMPLETE);

    let resp = client
        .post(format!("{}/api/login", base))
        .json(&json!({ "username": "admin", "password": setup::DEFAULT_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["user"]["role"], "admin");

    let resp = client
        .post(format!("{}/api/login", base))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.status(),
        reqwest::StatusCode::UNAUTHORIZED,
        "Expected 401 Unauthorized, got {}",
        resp.status()
    );

    handle.stop(true).await;
}
