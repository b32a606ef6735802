//! Fetch transport for the image generation service.

use precision_print_core::generate::{
    parse_http_response, request_body, GenerationConfig, API_KEY_HEADER,
};
use precision_print_core::ImageSource;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Ask the service for an image.
///
/// Resolves to `Ok(None)` when no API key is configured or the service
/// answered without an image. Transport and protocol failures are errors.
pub(crate) async fn fetch_generated_image(
    prompt: &str,
    config: &GenerationConfig,
) -> Result<Option<ImageSource>, JsValue> {
    let Some(api_key) = config.api_key() else {
        log::warn!("Image generation API key is missing. Skipping generation.");
        return Ok(None);
    };

    let body = request_body(prompt).map_err(to_js_error)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&config.request_url(), &init)?;
    request.headers().set("Content-Type", "application/json")?;
    request.headers().set(API_KEY_HEADER, api_key)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    parse_http_response(response.status(), &text).map_err(|e| {
        log::error!("Error generating image: {e}");
        to_js_error(e)
    })
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
