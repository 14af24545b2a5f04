//! 提交程序文本抓取
//!
//! submitted_program 字段存的是对象存储 URL，查看提交时按需抓取正文。

use once_cell::sync::Lazy;
use reqwest::Client;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let config = AppConfig::get();
    Client::builder()
        .timeout(std::time::Duration::from_secs(config.fetch.timeout))
        .build()
        .unwrap_or_default()
});

/// 抓取提交的程序文本
///
/// 非 2xx 状态码和超大正文都视为抓取失败，由调用方映射为 ContentFetch 错误。
pub async fn fetch_program_text(url: &str) -> Result<String> {
    let config = AppConfig::get();

    let response = HTTP_CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!("Program fetch returned non-success status: url={url}, status={status}");
        return Err(CourseHubError::content_fetch(format!(
            "Upstream returned status {status}"
        )));
    }

    if let Some(length) = response.content_length()
        && length > config.fetch.max_body_size as u64
    {
        return Err(CourseHubError::content_fetch(format!(
            "Program body too large: {length} bytes"
        )));
    }

    let body = response.text().await?;
    if body.len() > config.fetch.max_body_size {
        return Err(CourseHubError::content_fetch(format!(
            "Program body too large: {} bytes",
            body.len()
        )));
    }
    Ok(body)
}
