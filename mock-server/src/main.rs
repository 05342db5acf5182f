use mock_server::{MockState, Reply};
use serde_json::json;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");

    let state = MockState::default();
    state.set_fallback(Reply::json(json!({
        "homeworks": [{"id": 1, "homework_name": "demo_project.zip", "status": "reviewing"}],
        "current_date": 0
    })));

    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    mock_server::run(listener, state).await
}
