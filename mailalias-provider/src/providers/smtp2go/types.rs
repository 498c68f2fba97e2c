//! SMTP2GO API 类型定义

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// `/v3/email/send` 请求体
#[derive(Debug, Serialize)]
pub struct SendPayload<'a> {
    pub api_key: &'a str,
    pub to: &'a [String],
    pub sender: &'a str,
    pub subject: &'a str,
    pub text_body: String,
    pub html_body: String,
}

/// 成功响应
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: SendData,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendData {
    #[serde(default)]
    pub succeeded: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// 非 2xx 响应体，两种形态都可能出现
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SendData>,
}

/// 计算纯文本与 HTML 两份正文
///
/// 有纯文本时：HTML 取传入值，否则把换行替换为 `<br>`。
/// 只有 HTML 时：纯文本为去掉标签并把 `&nbsp;` 换成空格的结果。
pub fn derive_bodies(text: Option<&str>, html: Option<&str>) -> (String, String) {
    let text = text.filter(|t| !t.is_empty());
    let html = html.filter(|h| !h.is_empty());
    match (text, html) {
        (Some(text), Some(html)) => (text.to_string(), html.to_string()),
        (Some(text), None) => (text.to_string(), text.replace('\n', "<br>")),
        (None, Some(html)) => (strip_tags(html), html.to_string()),
        (None, None) => (String::new(), String::new()),
    }
}

fn strip_tags(html: &str) -> String {
    let stripped = match HTML_TAG.as_ref() {
        Some(re) => re.replace_all(html, "").into_owned(),
        None => html.to_string(),
    };
    stripped.replace("&nbsp;", " ")
}
