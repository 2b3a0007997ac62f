use super::types::*;
use super::AgentRunner;
use crate::agent::AgentHandle;
use crate::config::LookupConfig;
use crate::version;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Runs agents through the OpenAI Responses API with hosted tools
///
/// The API key is passed on every request; nothing is read from the
/// process environment here.
pub struct OpenAiResponsesRunner {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiResponsesRunner {
    pub fn from_config(config: &LookupConfig) -> crate::error::Result<Self> {
        let mut builder = Client::builder().user_agent(version::user_agent());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.credential.as_str().to_string(),
            endpoint: format!("{}/responses", config.api_base),
        })
    }

    async fn send_request(&self, request: &ResponsesRequest<'_>) -> Result<reqwest::Response> {
        self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to send request to OpenAI")
    }
}

#[async_trait]
impl AgentRunner for OpenAiResponsesRunner {
    async fn run(&self, agent: &AgentHandle, input: &str) -> Result<RunOutput> {
        let request = ResponsesRequest {
            model: agent.model(),
            instructions: agent.instructions(),
            input,
            tools: agent.tools(),
        };

        let response = self.send_request(&request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);
            anyhow::bail!("OpenAI API error {}: {}", status, detail);
        }

        let body: ResponsesResponse = response
            .json()
            .await
            .context("Malformed response from OpenAI")?;

        extract_output(body)
    }

    fn name(&self) -> &str {
        "OpenAI Responses"
    }
}

/// Pull the final text out of a Responses API payload
///
/// The final output is the text of the last assistant message; earlier
/// messages are intermediate narration between tool calls. Only runs with
/// status `completed` (or no status at all) count; partial text from an
/// incomplete run is discarded.
fn extract_output(body: ResponsesResponse) -> Result<RunOutput> {
    if let Some(error) = body.error {
        match error.code {
            Some(code) => anyhow::bail!("{} ({})", error.message, code),
            None => anyhow::bail!("{}", error.message),
        }
    }

    if let Some(status) = body.status.as_deref() {
        if status != "completed" {
            tracing::warn!("Agent run finished with status '{}'", status);
            match body.incomplete_details.and_then(|details| details.reason) {
                Some(reason) => anyhow::bail!("Agent run {}: {}", status, reason),
                None => anyhow::bail!("Agent run {}", status),
            }
        }
    }

    let mut web_searches = 0;
    let mut last_message = None;

    for item in body.output {
        match item {
            OutputItem::Message { content } => last_message = Some(content),
            OutputItem::WebSearchCall { status } => {
                web_searches += 1;
                tracing::debug!("Web search call ({})", status.as_deref().unwrap_or("unknown"));
            }
            OutputItem::Other => {}
        }
    }

    let mut text = String::new();
    for part in last_message.unwrap_or_default() {
        match part {
            ContentPart::OutputText { text: chunk } => text.push_str(&chunk),
            ContentPart::Refusal { refusal } => anyhow::bail!("Agent refused the request: {}", refusal),
            ContentPart::Other => {}
        }
    }

    if text.is_empty() {
        if let Some(aggregate) = body.output_text {
            text = aggregate;
        }
    }

    Ok(RunOutput {
        final_output: (!text.is_empty()).then_some(text),
        web_searches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::create_person_lookup_agent;
    use crate::config::resolve_credential;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn parse(value: serde_json::Value) -> ResponsesResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_wire_format() {
        let agent = create_person_lookup_agent("Be thorough.".to_string(), "gpt-4o-mini");
        let request = ResponsesRequest {
            model: agent.model(),
            instructions: agent.instructions(),
            input: "Who is Ada Lovelace?",
            tools: agent.tools(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "model": "gpt-4o-mini",
                "instructions": "Be thorough.",
                "input": "Who is Ada Lovelace?",
                "tools": [{ "type": "web_search_preview" }]
            })
        );
    }

    #[test]
    fn test_extracts_last_message_and_counts_searches() {
        let body = parse(json!({
            "status": "completed",
            "output": [
                { "type": "web_search_call", "id": "ws_1", "status": "completed" },
                { "type": "message", "role": "assistant",
                  "content": [{ "type": "output_text", "text": "Searching more..." }] },
                { "type": "web_search_call", "id": "ws_2", "status": "completed" },
                { "type": "message", "role": "assistant",
                  "content": [
                      { "type": "output_text", "text": "Ada Lovelace was ", "annotations": [] },
                      { "type": "output_text", "text": "a mathematician." }
                  ] }
            ]
        }));

        let output = extract_output(body).unwrap();
        assert_eq!(output.final_output.as_deref(), Some("Ada Lovelace was a mathematician."));
        assert_eq!(output.web_searches, 2);
    }

    #[test]
    fn test_unknown_items_are_ignored() {
        let body = parse(json!({
            "output": [
                { "type": "reasoning", "summary": [] },
                { "type": "message", "content": [{ "type": "output_text", "text": "Done" }] }
            ]
        }));

        assert_eq!(extract_output(body).unwrap(), RunOutput::text("Done"));
    }

    #[test]
    fn test_no_message_means_no_output() {
        let body = parse(json!({ "status": "completed", "output": [] }));
        assert_eq!(extract_output(body).unwrap(), RunOutput::empty());
    }

    #[test]
    fn test_falls_back_to_aggregate_output_text() {
        let body = parse(json!({ "output": [], "output_text": "aggregate" }));
        assert_eq!(extract_output(body).unwrap().final_output.as_deref(), Some("aggregate"));
    }

    #[test]
    fn test_payload_error_is_reported() {
        let body = parse(json!({
            "status": "failed",
            "error": { "code": "server_error", "message": "The model crashed" },
            "output": []
        }));

        let err = extract_output(body).unwrap_err();
        assert_eq!(err.to_string(), "The model crashed (server_error)");
    }

    #[test]
    fn test_incomplete_run_is_an_error() {
        let body = parse(json!({
            "status": "incomplete",
            "incomplete_details": { "reason": "max_output_tokens" },
            "output": [
                { "type": "message", "content": [{ "type": "output_text", "text": "Ada Lovelace was" }] }
            ]
        }));

        let err = extract_output(body).unwrap_err();
        assert_eq!(err.to_string(), "Agent run incomplete: max_output_tokens");
    }

    #[test]
    fn test_non_completed_status_without_details() {
        let body = parse(json!({ "status": "cancelled", "output": [] }));
        assert_eq!(extract_output(body).unwrap_err().to_string(), "Agent run cancelled");
    }

    #[test]
    fn test_refusal_is_an_error() {
        let body = parse(json!({
            "output": [{ "type": "message", "content": [{ "type": "refusal", "refusal": "No." }] }]
        }));

        assert!(extract_output(body).unwrap_err().to_string().contains("No."));
    }

    /// Serve exactly one canned HTTP response on a local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Drain the request (headers plus Content-Length bytes of body)
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn runner_for(api_base: String) -> OpenAiResponsesRunner {
        let mut config = LookupConfig::with_credential(resolve_credential(Some("test-key")).unwrap());
        config.api_base = api_base;
        OpenAiResponsesRunner::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_run_against_local_server() {
        let base = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"status":"completed","output":[{"type":"message","content":[{"type":"output_text","text":"Report"}]}]}"#,
        )
        .await;

        let agent = create_person_lookup_agent("x".to_string(), "gpt-4o-mini");
        let output = runner_for(base).run(&agent, "Who?").await.unwrap();

        assert_eq!(output.final_output.as_deref(), Some("Report"));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_api_message() {
        let base = serve_once(
            "HTTP/1.1 429 Too Many Requests",
            r#"{"error":{"message":"rate limited","type":"requests","code":"rate_limit_exceeded"}}"#,
        )
        .await;

        let agent = create_person_lookup_agent("x".to_string(), "gpt-4o-mini");
        let err = runner_for(base).run(&agent, "Who?").await.unwrap_err();

        assert_eq!(err.to_string(), "OpenAI API error 429 Too Many Requests: rate limited");
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let base = serve_once("HTTP/1.1 200 OK", "not json").await;

        let agent = create_person_lookup_agent("x".to_string(), "gpt-4o-mini");
        let err = runner_for(base).run(&agent, "Who?").await.unwrap_err();

        assert!(err.to_string().contains("Malformed response"));
    }
}
