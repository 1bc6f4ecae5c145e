#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pressence::ai::client::{ChatCompletion, ChatReply, ChatRequest};
use pressence::ai::models::ModelChain;
use pressence::core::models::Diagnostics;
use pressence::errors::SummaryError;
use pressence::pipeline::{SearchDefaults, SearchSummaryHandler};
use pressence::search::cse::parse_cse_body;
use pressence::search::duckduckgo::results_from_html;
use pressence::search::{SearchOutcome, SearchQuery, SearchStrategy};

pub const PRIMARY_MODEL: &str = "openrouter/auto";
pub const FALLBACK_MODEL: &str = "openai/gpt-3.5-turbo";
pub const REPLY_TEXT: &str = "Summary: Jane Doe appears mostly in directory listings.\nConclusion: None of it establishes authority; elite press placement is overdue.";

pub fn completion_body(text: &str) -> String {
    json!({
        "id": "gen-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": text } }]
    })
    .to_string()
}

pub fn reply(status: u16) -> Result<ChatReply, SummaryError> {
    let body = if (200..300).contains(&status) {
        completion_body(&format!("  {REPLY_TEXT}\n"))
    } else {
        json!({ "error": { "code": status, "message": "upstream said no" } }).to_string()
    };
    Ok(ChatReply { status, body })
}

pub fn transport_error() -> Result<ChatReply, SummaryError> {
    Err(SummaryError::HttpError("operation timed out".to_string()))
}

/// CSE response body with `n` items.
pub fn cse_body(n: usize) -> String {
    let items: Vec<serde_json::Value> = (1..=n)
        .map(|i| {
            json!({
                "kind": "customsearch#result",
                "title": format!("Jane Doe | Result {i}"),
                "link": format!("https://www.example.com/jane-{i}"),
                "snippet": format!("Snippet {i}"),
                "displayLink": "www.example.com"
            })
        })
        .collect();
    json!({ "kind": "customsearch#search", "items": items }).to_string()
}

/// DuckDuckGo HTML page with `n` organic result anchors, plus snippet
/// anchors that must not be picked up.
pub fn ddg_html(n: usize) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html><html><head><title>Jane Doe at DuckDuckGo</title></head><body><div id="links" class="results">"#,
    );
    for i in 1..=n {
        html.push_str(&format!(
            r#"<div class="result results_links web-result"><h2 class="result__title"><a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2F{i}&amp;rut=abc{i}">Jane <b>Doe</b> &amp; Result {i}</a></h2><a class="result__snippet" href="https://example.com/{i}">Snippet for {i}</a></div>"#
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// Stand-in for the CSE strategy. `body: None` simulates an upstream failure.
pub struct MockCse {
    pub body: Option<String>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SearchStrategy for MockCse {
    fn name(&self) -> &'static str {
        "mock_cse"
    }

    async fn attempt(&self, query: &SearchQuery, diagnostics: &mut Diagnostics) -> SearchOutcome {
        if query.cse_key.is_none() {
            return SearchOutcome::Empty;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        diagnostics.cse_attempted = true;
        match self.body.as_deref().map(parse_cse_body) {
            Some(Ok(items)) => {
                diagnostics.cse_ok = true;
                SearchOutcome::from_items(items)
            }
            _ => SearchOutcome::Empty,
        }
    }
}

/// Stand-in for the DuckDuckGo strategy. `html: None` simulates a network failure.
pub struct MockScraper {
    pub html: Option<String>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SearchStrategy for MockScraper {
    fn name(&self) -> &'static str {
        "mock_duckduckgo"
    }

    async fn attempt(&self, _query: &SearchQuery, diagnostics: &mut Diagnostics) -> SearchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        diagnostics.ddg_used = true;
        match &self.html {
            Some(html) => SearchOutcome::from_items(results_from_html(html)),
            None => SearchOutcome::Empty,
        }
    }
}

pub struct PanickingStrategy;

#[async_trait]
impl SearchStrategy for PanickingStrategy {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn attempt(&self, _query: &SearchQuery, _diagnostics: &mut Diagnostics) -> SearchOutcome {
        panic!("strategy blew up");
    }
}

/// Completion client that replays scripted replies and records requests.
pub struct MockCompletion {
    pub replies: Mutex<VecDeque<Result<ChatReply, SummaryError>>>,
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

#[async_trait]
impl ChatCompletion for MockCompletion {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, SummaryError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| reply(500))
    }
}

pub struct Scenario {
    pub cse_key: Option<String>,
    pub cse_body: Option<String>,
    pub ddg_html: Option<String>,
    /// `None` means no model credential is configured.
    pub model_replies: Option<Vec<Result<ChatReply, SummaryError>>>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            cse_key: Some("cse-key".to_string()),
            cse_body: Some(cse_body(3)),
            ddg_html: Some(ddg_html(5)),
            model_replies: Some(vec![reply(200)]),
        }
    }
}

pub struct Harness {
    pub handler: SearchSummaryHandler,
    pub cse_calls: Arc<AtomicUsize>,
    pub scrape_calls: Arc<AtomicUsize>,
    pub model_requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl Harness {
    pub fn cse_calls(&self) -> usize {
        self.cse_calls.load(Ordering::SeqCst)
    }

    pub fn scrape_calls(&self) -> usize {
        self.scrape_calls.load(Ordering::SeqCst)
    }

    pub fn model_calls(&self) -> usize {
        self.model_requests.lock().unwrap().len()
    }

    pub fn model_request(&self, idx: usize) -> ChatRequest {
        self.model_requests.lock().unwrap()[idx].clone()
    }
}

pub fn harness(scenario: Scenario) -> Harness {
    let cse_calls = Arc::new(AtomicUsize::new(0));
    let scrape_calls = Arc::new(AtomicUsize::new(0));
    let model_requests = Arc::new(Mutex::new(Vec::new()));

    let strategies: Vec<Box<dyn SearchStrategy>> = vec![
        Box::new(MockCse {
            body: scenario.cse_body,
            calls: Arc::clone(&cse_calls),
        }),
        Box::new(MockScraper {
            html: scenario.ddg_html,
            calls: Arc::clone(&scrape_calls),
        }),
    ];

    let completion = scenario.model_replies.map(|replies| {
        Box::new(MockCompletion {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Arc::clone(&model_requests),
        }) as Box<dyn ChatCompletion>
    });

    let handler = SearchSummaryHandler::new(
        strategies,
        completion,
        ModelChain::new(PRIMARY_MODEL, Some(FALLBACK_MODEL.to_string())),
        SearchDefaults {
            cse_key: scenario.cse_key,
            ..SearchDefaults::default()
        },
    );

    Harness {
        handler,
        cse_calls,
        scrape_calls,
        model_requests,
    }
}

pub fn panicking_handler() -> SearchSummaryHandler {
    SearchSummaryHandler::new(
        vec![Box::new(PanickingStrategy)],
        None,
        ModelChain::new(PRIMARY_MODEL, None),
        SearchDefaults::default(),
    )
}
