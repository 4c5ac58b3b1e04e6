//! Email triage.
//!
//! Searches Gmail with the `gog` CLI and sorts each message into a bucket
//! using simple keyword rules.

use crate::exec::{run_checked, CommandRunner};
use crate::{WorkflowError, WorkflowResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::info;

pub const DEFAULT_QUERY: &str = "newer_than:1d";
pub const DEFAULT_MAX: u32 = 20;

static PROMO_REGEX: OnceLock<regex::Regex> = OnceLock::new();
static FINANCE_REGEX: OnceLock<regex::Regex> = OnceLock::new();
static URGENT_REGEX: OnceLock<regex::Regex> = OnceLock::new();
static ADDRESS_REGEX: OnceLock<regex::Regex> = OnceLock::new();

fn cached_regex(cell: &'static OnceLock<regex::Regex>, pattern: &str) -> &'static regex::Regex {
    cell.get_or_init(|| {
        regex::Regex::new(pattern).expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// Where a message should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    NeedsReply,
    NeedsAction,
    Fyi,
}

/// Bucket plus the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub bucket: Bucket,
    pub reason: &'static str,
}

/// Classify a message by its subject and snippet. First matching rule wins.
pub fn classify_email(subject: &str, snippet: &str) -> Classification {
    let text = format!("{subject} {snippet}").to_lowercase();

    let (bucket, reason) = if cached_regex(
        &PROMO_REGEX,
        "unsubscribe|newsletter|promo|sale|discount",
    )
    .is_match(&text)
    {
        (Bucket::Fyi, "newsletter/promo-ish")
    } else if cached_regex(&FINANCE_REGEX, "invoice|receipt|payment|charged|billing")
        .is_match(&text)
    {
        (Bucket::NeedsAction, "finance keyword")
    } else if cached_regex(&URGENT_REGEX, "asap|urgent|action required|deadline|due")
        .is_match(&text)
    {
        (Bucket::NeedsAction, "urgency keyword")
    } else if text.contains('?') {
        (Bucket::NeedsReply, "question mark")
    } else {
        (Bucket::Fyi, "default")
    };

    Classification { bucket, reason }
}

/// Extract the address from a `From` header: the text inside the first
/// non-empty `<...>`, or the whole (trimmed) value.
pub fn parse_email_address(from: &str) -> String {
    let from = from.trim();
    cached_regex(&ADDRESS_REGEX, "<([^>]+)>")
        .captures(from)
        .and_then(|caps| caps.get(1))
        .map_or(from, |inner| inner.as_str())
        .trim()
        .to_string()
}

/// One classified message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriagedEmail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<Value>,
    pub from: String,
    pub from_email: String,
    pub subject: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    pub bucket: Bucket,
    pub reason: String,
    pub raw: Value,
}

/// Look up `key`, falling back to its capitalized form (`Subject`).
fn field<'a>(raw: &'a Map<String, Value>, key: &str, fallback: &str) -> Option<&'a Value> {
    raw.get(key)
        .filter(|v| !v.is_null())
        .or_else(|| raw.get(fallback).filter(|v| !v.is_null()))
}

fn text_field(raw: &Map<String, Value>, key: &str, fallback: &str) -> String {
    match field(raw, key, fallback) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl TriagedEmail {
    /// Classify one raw message from `gog gmail search --json`.
    pub fn from_raw(raw: Value) -> Self {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);

        let subject = text_field(fields, "subject", "Subject");
        let from = text_field(fields, "from", "From");
        let snippet = text_field(fields, "snippet", "Snippet");
        let id = field(fields, "id", "Id").cloned();
        let thread_id = field(fields, "threadId", "ThreadId").cloned();
        let date = field(fields, "date", "Date").cloned();
        let classification = classify_email(&subject, &snippet);

        Self {
            id,
            thread_id,
            from_email: parse_email_address(&from),
            from,
            subject,
            snippet,
            date,
            bucket: classification.bucket,
            reason: classification.reason.to_string(),
            raw,
        }
    }
}

/// Message counts per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSummary {
    pub total: usize,
    pub needs_reply: usize,
    pub needs_action: usize,
    pub fyi: usize,
}

/// Messages grouped by bucket, in search order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageBuckets {
    pub needs_reply: Vec<TriagedEmail>,
    pub needs_action: Vec<TriagedEmail>,
    pub fyi: Vec<TriagedEmail>,
}

/// Result of one triage run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "email.triage")]
pub struct TriageReport {
    pub query: String,
    pub max: u32,
    pub summary: TriageSummary,
    pub items: Vec<TriagedEmail>,
    pub buckets: TriageBuckets,
}

impl TriageReport {
    /// Classify `raw` messages and group them.
    pub fn from_messages(query: impl Into<String>, max: u32, raw: Vec<Value>) -> Self {
        let items: Vec<TriagedEmail> = raw.into_iter().map(TriagedEmail::from_raw).collect();

        let mut buckets = TriageBuckets::default();
        for item in &items {
            let bucket = match item.bucket {
                Bucket::NeedsReply => &mut buckets.needs_reply,
                Bucket::NeedsAction => &mut buckets.needs_action,
                Bucket::Fyi => &mut buckets.fyi,
            };
            bucket.push(item.clone());
        }

        let summary = TriageSummary {
            total: items.len(),
            needs_reply: buckets.needs_reply.len(),
            needs_action: buckets.needs_action.len(),
            fyi: buckets.fyi.len(),
        };

        Self {
            query: query.into(),
            max,
            summary,
            items,
            buckets,
        }
    }
}

/// Arguments for email triage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageArgs {
    /// Gmail search query.
    pub query: String,
    /// Maximum number of messages to fetch.
    pub max: u32,
    /// Account to search, passed to `gog` as `GOG_ACCOUNT`.
    pub account: Option<String>,
}

impl Default for TriageArgs {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            max: DEFAULT_MAX,
            account: None,
        }
    }
}

impl TriageArgs {
    fn gog_args(&self) -> Vec<String> {
        vec![
            "gmail".to_string(),
            "search".to_string(),
            self.query.clone(),
            "--max".to_string(),
            self.max.to_string(),
            "--json".to_string(),
            "--no-input".to_string(),
        ]
    }

    fn gog_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        if let Some(account) = &self.account {
            env.insert("GOG_ACCOUNT".to_string(), account.clone());
        }
        env
    }
}

/// Parse `gog` search output: blank means no messages, a single object
/// counts as one message.
pub fn parse_search_output(stdout: &str) -> WorkflowResult<Vec<Value>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let parsed: Value = serde_json::from_str(trimmed)
        .map_err(|_| WorkflowError::invalid_output("gog gmail search returned non-JSON output"))?;

    Ok(match parsed {
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// Search and classify recent mail.
pub async fn run_email_triage(
    runner: &dyn CommandRunner,
    args: &TriageArgs,
) -> WorkflowResult<TriageReport> {
    let output = run_checked(
        runner,
        "gog",
        &args.gog_args(),
        &args.gog_env(),
        "install steipete/gog from ClawdHub",
    )
    .await?;

    let messages = parse_search_output(&output.stdout)?;
    let report = TriageReport::from_messages(args.query.clone(), args.max, messages);

    info!(
        query = %args.query,
        total = report.summary.total,
        needs_reply = report.summary.needs_reply,
        needs_action = report.summary.needs_action,
        "Email triage run"
    );

    Ok(report)
}
