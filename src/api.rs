use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::{describe_js, ClientError};
use crate::types::{FieldValue, FormPayload};

/// HTTP calls the page makes. Only the status of a POST matters.
#[async_trait(?Send)]
pub trait Transport {
    async fn post_form(&self, url: &str, payload: &FormPayload) -> Result<(), ClientError>;

    async fn get_text(&self, url: &str) -> Result<String, ClientError>;
}

/// `window.fetch` without timeouts or credentials overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, request: web_sys::Request, url: &str) -> Result<web_sys::Response, ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::missing("window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::Network(describe_js(&e)))?;
        let resp: web_sys::Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        Ok(resp)
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_form(&self, url: &str, payload: &FormPayload) -> Result<(), ClientError> {
        let form = to_form_data(payload)?;
        let opts = web_sys::RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form.into());

        let request = web_sys::Request::new_with_str_and_init(url, &opts)?;
        self.send(request, url).await?;
        Ok(())
    }

    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        let opts = web_sys::RequestInit::new();
        opts.set_method("GET");

        let request = web_sys::Request::new_with_str_and_init(url, &opts)?;
        let resp = self.send(request, url).await?;
        let text = JsFuture::from(resp.text()?)
            .await
            .map_err(|e| ClientError::Network(describe_js(&e)))?;
        text.as_string()
            .ok_or_else(|| ClientError::Decode("response body is not text".to_string()))
    }
}

/// Snapshot of a form's current fields, files included.
pub fn read_form(form: &web_sys::HtmlFormElement) -> Result<FormPayload, ClientError> {
    let data = web_sys::FormData::new_with_form(form)?;
    let mut payload = FormPayload::new();
    let entries = js_sys::try_iter(&data)?
        .ok_or_else(|| ClientError::Js("FormData is not iterable".to_string()))?;
    for entry in entries {
        let pair = js_sys::Array::from(&entry?);
        let name = pair.get(0).as_string().unwrap_or_default();
        let value = pair.get(1);
        match value.as_string() {
            Some(text) => payload.push_text(name, text),
            None => payload.push_file(name, value.dyn_into::<web_sys::File>()?),
        }
    }
    Ok(payload)
}

fn to_form_data(payload: &FormPayload) -> Result<web_sys::FormData, ClientError> {
    let form = web_sys::FormData::new()?;
    for (name, value) in payload.fields() {
        match value {
            FieldValue::Text(text) => form.append_with_str(name, text)?,
            FieldValue::File { file_name, file } => {
                form.append_with_blob_and_filename(name, file, file_name)?
            }
        }
    }
    Ok(form)
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn post_form(&self, url: &str, payload: &FormPayload) -> Result<(), ClientError> {
        (**self).post_form(url, payload).await
    }

    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        (**self).get_text(url).await
    }
}
