//! OpenAI-compatible chat completions client.
//!
//! Works against the hosted API as well as local servers that expose the same
//! `/v1/chat/completions` shape (llama.cpp, Ollama, vLLM).

use crate::{CommandOracle, OracleConfig, OracleError, OracleRequest, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct OpenAiOracle {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAiOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!(
                env = %config.api_key_env,
                "no API key in environment; sending unauthenticated requests"
            );
        }
        let client = Client::builder()
            .build()
            .map_err(|e| OracleError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Pull the first choice's text out of a chat completions body.
fn extract_reply(body: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| OracleError::Malformed(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| OracleError::Malformed("no choices in response".into()))
}

fn map_transport(err: reqwest::Error) -> OracleError {
    if err.is_timeout() {
        OracleError::Timeout
    } else {
        OracleError::Http(err.to_string())
    }
}

impl CommandOracle for OpenAiOracle {
    fn complete(&mut self, request: &OracleRequest<'_>) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.instruction,
                },
            ],
            temperature: self.temperature,
        };

        let mut http = self
            .client
            .post(&self.endpoint)
            .timeout(request.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let start = std::time::Instant::now();
        let resp = http.send().map_err(map_transport)?;
        let status = resp.status();
        let text = resp.text().map_err(map_transport)?;
        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "chat completion"
        );
        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        extract_reply(&text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Serve exactly one HTTP exchange and return the request body.
    fn serve_once(
        listener: TcpListener,
        status: &'static str,
        body: &'static str,
    ) -> thread::JoinHandle<anyhow::Result<String>> {
        thread::spawn(move || {
            let (conn, _) = listener.accept()?;
            let mut reader = BufReader::new(conn.try_clone()?);
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line)?;
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    content_length = v.trim().parse()?;
                }
            }
            let mut req_body = vec![0u8; content_length];
            reader.read_exact(&mut req_body)?;
            let mut conn = conn;
            write!(
                conn,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )?;
            Ok(String::from_utf8(req_body)?)
        })
    }

    fn oracle_for(addr: &str) -> Result<OpenAiOracle> {
        OpenAiOracle::new(&OracleConfig {
            endpoint: format!("http://{addr}/v1/chat/completions"),
            api_key_env: "VOICE_ARM_TEST_UNSET_KEY".into(),
            ..OracleConfig::default()
        })
    }

    fn request(timeout: Duration) -> OracleRequest<'static> {
        OracleRequest {
            system: "role",
            utterance: "go left 40",
            instruction: "instruction text".into(),
            timeout,
        }
    }

    #[test]
    fn extracts_first_choice() -> Result<()> {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"[0, 40, 0]"}}]}"#;
        assert_eq!(extract_reply(body)?, "[0, 40, 0]");
        assert!(matches!(
            extract_reply(r#"{"choices":[]}"#),
            Err(OracleError::Malformed(_))
        ));
        Ok(())
    }

    #[test]
    fn round_trip_against_local_server() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?.to_string();
        let server = serve_once(
            listener,
            "200 OK",
            r#"{"choices":[{"message":{"content":"1"}}]}"#,
        );
        let mut oracle = oracle_for(&addr)?;
        let reply = oracle.complete(&request(Duration::from_secs(5)))?;
        assert_eq!(reply, "1");
        let sent = server.join().map_err(|_| anyhow::anyhow!("server panicked"))??;
        let json: serde_json::Value = serde_json::from_str(&sent)?;
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "instruction text");
        Ok(())
    }

    #[test]
    fn error_status_is_reported() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?.to_string();
        let server = serve_once(listener, "401 Unauthorized", r#"{"error":"no key"}"#);
        let mut oracle = oracle_for(&addr)?;
        let res = oracle.complete(&request(Duration::from_secs(5)));
        assert!(matches!(res, Err(OracleError::Status { status: 401, .. })));
        let _ = server.join();
        Ok(())
    }

    #[test]
    fn silent_server_times_out() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?.to_string();
        let hold = thread::spawn(move || {
            let conn = listener.accept();
            thread::sleep(Duration::from_millis(1500));
            drop(conn);
        });
        let mut oracle = oracle_for(&addr)?;
        let res = oracle.complete(&request(Duration::from_millis(200)));
        assert!(matches!(res, Err(OracleError::Timeout)), "{res:?}");
        let _ = hold.join();
        Ok(())
    }
}
