//! Cloudflare HTTP 请求方法

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, RawResponse};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::CloudflareError;
use super::{CloudflareErrorEnvelope, CloudflareProvider, CloudflareResponse};

/// 错误响应无法解析时使用的兜底消息
pub(crate) const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

impl CloudflareProvider {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.api_token))
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let request = self.authorized(self.client.get(&url));
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "GET", &url).await?;
        self.unwrap_result(&response, context)
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let request = self.authorized(self.client.post(&url)).json(body);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;
        self.unwrap_result(&response, context)
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let request = self.authorized(self.client.patch(&url)).json(body);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "PATCH", &url).await?;
        self.unwrap_result(&response, context)
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let url = self.url(path);
        let request = self.authorized(self.client.delete(&url));
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "DELETE", &url).await?;
        self.check_status(&response, context.clone())?;
        // 2xx 即删除成功；只有显式的 success: false 才算失败
        match serde_json::from_str::<CloudflareResponse<serde_json::Value>>(&response.body) {
            Ok(cf_response) if !cf_response.success => Err(self.reject(cf_response.errors, context)),
            _ => Ok(()),
        }
    }

    fn unwrap_result<T: DeserializeOwned>(
        &self,
        response: &RawResponse,
        context: ErrorContext,
    ) -> Result<T> {
        self.decode(response, context)?
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 解码 Cloudflare 响应信封
    ///
    /// 非 2xx 或 `success: false` 都视为失败，取 `errors[0]` 作为原始错误；
    /// 错误体无法解析时使用 [`UNKNOWN_ERROR_MESSAGE`]。
    fn decode<T: DeserializeOwned>(
        &self,
        response: &RawResponse,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        self.check_status(response, context.clone())?;

        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(&response.body, self.provider_name())?;

        if !cf_response.success {
            return Err(self.reject(cf_response.errors, context));
        }

        Ok(cf_response)
    }

    /// 2xx 但 `success: false`
    fn reject(&self, errors: Option<Vec<CloudflareError>>, context: ErrorContext) -> ProviderError {
        let raw = errors
            .and_then(|errors| errors.into_iter().next())
            .map_or_else(|| RawApiError::new(UNKNOWN_ERROR_MESSAGE), CloudflareError::into_raw);
        log::error!("[{}] API 错误: {}", self.provider_name(), raw.message);
        self.map_error(raw, context)
    }

    /// 非 2xx 时从错误信封取 `errors[0]`
    fn check_status(&self, response: &RawResponse, context: ErrorContext) -> Result<()> {
        if !response.is_success() {
            let raw = Self::first_error(&response.body);
            log::error!(
                "[{}] API 错误 (HTTP {}): {}",
                self.provider_name(),
                response.status,
                raw.message
            );
            if response.status == 429 {
                return Err(ProviderError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: response.retry_after,
                    raw_message: Some(raw.message),
                });
            }
            return Err(self.map_error(raw, context));
        }
        Ok(())
    }

    fn first_error(body: &str) -> RawApiError {
        serde_json::from_str::<CloudflareErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.errors.into_iter().next())
            .map_or_else(|| RawApiError::new(UNKNOWN_ERROR_MESSAGE), CloudflareError::into_raw)
    }
}
