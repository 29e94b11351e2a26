use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Secret the spawned server signs with; tests craft tokens against it.
#[allow(dead_code)]
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    #[allow(dead_code)]
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Isolated storage per test binary so suites cannot interfere
        let data_dir: PathBuf = std::env::temp_dir().join(format!("tareas-api-test-{}", port));
        std::fs::create_dir_all(&data_dir)?;

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tareas-api-rust"));
        cmd.env("PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .env("TASKS_FILE", data_dir.join("tareas.json"))
            .env(
                "DATABASE_URL",
                format!("sqlite://{}", data_dir.join("database.sqlite").display()),
            )
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Register (idempotently) and log in, returning a bearer token.
#[allow(dead_code)]
pub async fn obtain_token(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
) -> Result<String> {
    let password = "secreto123";
    let credentials = serde_json::json!({ "username": username, "password": password });

    let res = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&credentials)
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED || res.status() == StatusCode::CONFLICT,
        "register failed: {}",
        res.status()
    );

    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&credentials)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response missing token")
}
