use async_trait::async_trait;
use fic_dashboard::data_provider::{DataFetcher, FetchResult};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// 直接回傳固定 JSON 的資料來源
#[allow(dead_code)]
pub struct StaticFetcher {
    pub payload: Value,
}

#[async_trait]
impl DataFetcher for StaticFetcher {
    async fn fetch_json(&self) -> FetchResult<Value> {
        Ok(self.payload.clone())
    }
}

/// 仿照 datos.gov.co 回應格式的樣本資料（所有值皆為字串）
#[allow(dead_code)]
pub fn sample_payload() -> Value {
    json!([
        {"fecha_corte": "2023-01-02T00:00:00.000", "nombre_entidad": "Fiduciaria A", "tipo_entidad": "5", "rentabilidad_diaria": "0.0100"},
        {"fecha_corte": "2023-01-01T00:00:00.000", "nombre_entidad": "Fiduciaria A", "tipo_entidad": "5", "rentabilidad_diaria": "0.0300"},
        {"fecha_corte": "2023-01-01T00:00:00.000", "nombre_entidad": "Fiduciaria B", "tipo_entidad": "5", "rentabilidad_diaria": "0.0500"},
        {"fecha_corte": "2023-01-02T00:00:00.000", "nombre_entidad": "Comisionista C", "tipo_entidad": "85", "rentabilidad_diaria": "-0.0200"},
        {"fecha_corte": "2023-01-03T00:00:00.000", "nombre_entidad": "Fiduciaria B", "tipo_entidad": "5", "rentabilidad_diaria": "0.0100"}
    ])
}

/// 單次回應的本地 HTTP 伺服器；回傳位址與收到的原始請求
#[allow(dead_code)]
pub async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    (format!("http://{}/resource/qhpu-8ixx.json", addr), rx)
}
