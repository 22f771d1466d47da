use mock_server::Student;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
            )
            .finish(),
    )?;

    let students: Vec<Student> = match std::env::var("STUDENTS_SEED") {
        Ok(path) => {
            info!(%path, "loading seed data");
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => Vec::new(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    mock_server::run_with(listener, students).await?;
    Ok(())
}
