use std::collections::BTreeMap;
use std::error::Error;

use axum::async_trait;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use bytes::Bytes;
use http_body_util::BodyExt;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

pub const APPLICATION_HAL_JSON: &str = "application/hal+json";
pub const INDEX_PATH: &str = "/api";

/// Named link relations embedded in response bodies, serialized under
/// `_links` as `{"rel": {"href": "..."}}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(BTreeMap<String, Link>);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

impl Links {
    pub fn new() -> Self {
        Links(BTreeMap::new())
    }

    pub fn add(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.0.insert(rel.into(), Link { href: href.into() });
        self
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub object_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub default_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<Value>,
}

impl ErrorRecord {
    pub fn object(
        object_name: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ErrorRecord {
            object_name: object_name.into(),
            field: None,
            code: code.into(),
            default_message: message.into(),
            rejected_value: None,
        }
    }

    pub fn field(
        object_name: impl Into<String>,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ErrorRecord {
            object_name: object_name.into(),
            field: Some(field.into()),
            code: code.into(),
            default_message: message.into(),
            rejected_value: None,
        }
    }

    pub fn with_rejected_value(self, value: Value) -> Self {
        ErrorRecord {
            rejected_value: Some(value),
            ..self
        }
    }
}

/// 400 body shared by every validation failure: the collected error records
/// plus an `index` link pointing back to the API root.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorsResponse {
    pub errors: Vec<ErrorRecord>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl ErrorsResponse {
    pub fn new(errors: Vec<ErrorRecord>) -> Self {
        ErrorsResponse {
            errors,
            links: Links::new().add("index", INDEX_PATH),
        }
    }
}

impl IntoResponse for ErrorsResponse {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrorsResponse;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(v) => Ok(Json(v.0)),
            Err(err) => {
                let mut record = ErrorRecord::object("request", "invalid", err.to_string());

                if let Some(inner) = err.source() {
                    if let Some(inner) = inner.source() {
                        record.default_message = format!("{}: {}", err, inner);
                        if let JsonRejection::JsonDataError(_) = err {
                            lazy_static! {
                                static ref FIELD_RX: Regex =
                                    Regex::new(r"(\w+?) field `(.+?)`").unwrap();
                            }
                            if let Some(captures) = FIELD_RX.captures(inner.to_string().as_str()) {
                                record.field = Some(captures[2].to_string());
                                record.code = captures[1].to_string();
                            }
                        }
                    }
                }

                Err(ErrorsResponse::new(vec![record]))
            }
        }
    }
}

impl<T> IntoResponse for Json<T>
where T: Serialize
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Like `Json`, but marks the body as hypermedia.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hal<T>(pub T);

impl<T> IntoResponse for Hal<T>
where T: Serialize
{
    fn into_response(self) -> Response {
        let mut res = axum::Json(self.0).into_response();
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_HAL_JSON),
        );
        res
    }
}

pub async fn print_request_response(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    tracing::debug!("{} {}", req.method(), req.uri());
    let (parts, body) = req.into_parts();
    let bytes = buffer_and_print("request", body).await?;
    let req = Request::from_parts(parts, Body::from(bytes));

    let res = next.run(req).await;

    Ok(res)
}

async fn buffer_and_print(
    direction: &str,
    body: Body,
) -> std::result::Result<Bytes, (StatusCode, String)> {
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    if let Ok(body) = std::str::from_utf8(&bytes) {
        tracing::debug!("{direction} body = {body}");
    }

    Ok(bytes)
}
