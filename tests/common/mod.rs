//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::net::TcpListener;

use secret_gateway::config::GatewayConfig;
use secret_gateway::http::HttpServer;
use secret_gateway::lifecycle::Shutdown;

/// Key list printed by the fake client.
pub const KEYS_JSON: &str = r#"[{"name":"b","address":"secret1other"},{"name":"a","address":"secret1faucet"}]"#;

/// Behaves like `secretd` for the three commands the gateway issues.
///
/// Bank sends answer with `SEND-<destination>`. Registrations read the
/// certificate twice with a pause in between and answer with its contents,
/// so an overwritten file shows up as a failed or mismatched response.
pub const HAPPY_CLIENT: &str = r#"
case "$1 $2" in
  "keys list")
    printf '%s' "$KEYS" ;;
  "tx bank")
    printf '{"height":"0","txhash":"SEND-%s","code":0,"raw_log":"[]"}' "$5" ;;
  "tx register")
    first=$(cat "$4") || exit 1
    sleep 0.3
    second=$(cat "$4") || exit 1
    [ "$first" = "$second" ] || { echo "certificate changed underneath" >&2; exit 1; }
    printf '{"txhash":"%s"}' "$first" ;;
  *)
    echo "unexpected command: $*" >&2; exit 64 ;;
esac
"#;

/// A fake client binary plus the directories a test needs.
pub struct FakeClient {
    dir: TempDir,
    pub binary: PathBuf,
    pub cert_dir: PathBuf,
    pub log: PathBuf,
}

impl FakeClient {
    /// Write an executable script whose body runs after every invocation is logged.
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("secretd");
        let cert_dir = dir.path().join("certs");
        let log = dir.path().join("invocations.log");
        std::fs::create_dir(&cert_dir).unwrap();

        let script = format!(
            "#!/bin/sh\nKEYS='{}'\necho \"$*\" >> '{}'\n{}\n",
            KEYS_JSON,
            log.display(),
            body
        );
        std::fs::write(&binary, script).unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            dir,
            binary,
            cert_dir,
            log,
        }
    }

    /// Gateway configuration pointing at this fake client.
    pub fn config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.chain.binary = self.binary.display().to_string();
        config.storage.cert_dir = self.cert_dir.clone();
        config.timeouts.command_secs = 10;
        config.timeouts.request_secs = 30;
        config
    }

    /// Every command line the fake client has seen, in order.
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Files left behind in the certificate directory.
    pub fn leftover_certs(&self) -> usize {
        std::fs::read_dir(&self.cert_dir).unwrap().count()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// A gateway served on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start(config: GatewayConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        let server = HttpServer::new(config);

        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
