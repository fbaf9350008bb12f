use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::ApiError,
    types::{CodeEnvelope, LoginState, QrCheck, QrCode, QrImageData, QrKeyData},
};

use super::{ApiClient, LoginApi, timestamp};

const SUCCESS_CODE: i64 = 200;

impl ApiClient {
    /// `POST /login/qr/key` with the current time in milliseconds.
    pub async fn qr_key(&self) -> Result<Value, ApiError> {
        self.post("/login/qr/key", &[("timestamp", timestamp())])
            .await
    }

    /// `POST /login/qr/create` with `qrimg=true`, so the answer embeds the
    /// image as a data URL.
    pub async fn qr_create(&self, key: &str) -> Result<Value, ApiError> {
        self.post(
            "/login/qr/create",
            &[("key", key.to_string()), ("qrimg", "true".to_string())],
        )
        .await
    }

    /// `POST /login/qr/check`.
    pub async fn qr_check(&self, key: &str) -> Result<Value, ApiError> {
        self.post(
            "/login/qr/check",
            &[("key", key.to_string()), ("timestamp", timestamp())],
        )
        .await
    }
}

impl LoginApi for ApiClient {
    async fn qr_image_url(&self) -> Result<QrCode, ApiError> {
        let key = parse_qr_key(&self.qr_key().await?)?;
        let image = parse_qr_image(&self.qr_create(&key).await?)?;
        Ok(QrCode { key, image })
    }

    async fn qr_login_status(&self, key: &str) -> Result<QrCheck, ApiError> {
        let check = parse_qr_check(&self.qr_check(key).await?)?;

        if check.state == LoginState::Success {
            if let Some(cookie) = &check.cookie {
                self.cookies.absorb(cookie, &self.gateway_url()?)?;
            }
        }

        Ok(check)
    }
}

/// Extracts `data` from a login response whose `code` must be 200.
fn expect_success<T: DeserializeOwned>(
    value: &Value,
    default_message: &str,
) -> Result<T, ApiError> {
    let envelope =
        CodeEnvelope::<Value>::deserialize(value).map_err(|_| ApiError::MissingField("code"))?;

    if envelope.code != SUCCESS_CODE {
        return Err(ApiError::Remote {
            code: envelope.code,
            message: envelope
                .remote_message()
                .unwrap_or_else(|| default_message.to_string()),
        });
    }

    let data = envelope.data.ok_or(ApiError::MissingField("data"))?;
    T::deserialize(data).map_err(|_| ApiError::MissingField("data"))
}

/// Extracts `data.unikey` from a `/login/qr/key` response.
///
/// # Errors
///
/// [`ApiError::Remote`] if `code` is not 200, [`ApiError::MissingField`] if
/// the key is missing.
pub fn parse_qr_key(value: &Value) -> Result<String, ApiError> {
    let data: QrKeyData = expect_success(value, "Failed to obtain QR key")?;
    Ok(data.unikey)
}

/// Extracts `data.qrimg` from a `/login/qr/create` response.
pub fn parse_qr_image(value: &Value) -> Result<String, ApiError> {
    let data: QrImageData = expect_success(value, "Failed to create QR image")?;
    Ok(data.qrimg)
}

/// Maps a `/login/qr/check` response to a [`QrCheck`].
///
/// Any code is accepted here; an empty `cookie` field counts as absent.
pub fn parse_qr_check(value: &Value) -> Result<QrCheck, ApiError> {
    let envelope =
        CodeEnvelope::<Value>::deserialize(value).map_err(|_| ApiError::MissingField("code"))?;

    Ok(QrCheck {
        state: LoginState::from_check_code(envelope.code),
        code: envelope.code,
        cookie: envelope.cookie.filter(|c| !c.is_empty()),
    })
}
