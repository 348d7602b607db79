//! Browser-side loaders: photo fetch, image decode, font load and export.
//!
//! Each loader is an `async fn` over `JsFuture`. Callers take a request
//! token from the canvas before awaiting and hand the decoded image back
//! with it, so completions that arrive out of order are dropped.

use mk_core::{MemeError, is_image_mime};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FontFace, HtmlCanvasElement, HtmlImageElement, Response, Url};

pub(crate) fn to_js(err: MemeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Fetch a remote photo and decode it.
///
/// The photo endpoint answers with a redirect; the image is loaded from the
/// final URL with anonymous CORS so the canvas stays exportable.
#[wasm_bindgen]
pub async fn fetch_photo(url: String) -> Result<HtmlImageElement, JsValue> {
    log::debug!("fetching photo {url}");
    let response = JsFuture::from(window()?.fetch_with_str(&url)).await?;
    let response: Response = response.dyn_into()?;
    if !response.ok() {
        return Err(to_js(MemeError::ImageLoad(format!(
            "{url}: HTTP {}",
            response.status()
        ))));
    }
    load_image(response.url(), true).await
}

/// Decode a user-dropped file. Non-image files are rejected before any
/// decoding happens.
#[wasm_bindgen]
pub async fn load_image_file(file: File) -> Result<HtmlImageElement, JsValue> {
    let mime = file.type_();
    if !is_image_mime(&mime) {
        log::debug!("ignoring dropped {:?} ({mime})", file.name());
        return Err(to_js(MemeError::NotAnImage(mime)));
    }

    let url = Url::create_object_url_with_blob(&file)?;
    let result = load_image(url.clone(), false).await;
    let _ = Url::revoke_object_url(&url);
    result
}

/// Decode the image at `src`, resolving once `onload` fires.
#[wasm_bindgen]
pub async fn load_image(src: String, cross_origin: bool) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    if cross_origin {
        img.set_cross_origin(Some("anonymous"));
    }

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let img_onload = img.clone();
        let onload = Closure::once(move || {
            let _ = resolve.call1(&JsValue::NULL, &img_onload);
        });
        let src_for_onerror = src.clone();
        let onerror = Closure::once(move || {
            let err = MemeError::ImageLoad(src_for_onerror);
            let _ = reject.call1(&JsValue::NULL, &to_js(err));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(&src);
        onload.forget();
        onerror.forget();
    });

    let value = JsFuture::from(promise).await?;
    let img: HtmlImageElement = value.dyn_into()?;
    log::debug!(
        "decoded image {}x{}",
        img.natural_width(),
        img.natural_height()
    );
    Ok(img)
}

/// Load a web font and register it with the document so the caption can
/// use it.
#[wasm_bindgen]
pub async fn load_font(family: String, url: String) -> Result<(), JsValue> {
    let face = FontFace::new_with_str(&family, &format!("url({url})"))?;
    JsFuture::from(face.load()?).await?;
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document.fonts().add(&face)?;
    log::debug!("font {family:?} loaded from {url}");
    Ok(())
}

/// Serialize the canvas for download.
#[wasm_bindgen]
pub fn export_data_url(canvas: &HtmlCanvasElement, mime: &str) -> Result<String, JsValue> {
    let data_url = canvas.to_data_url_with_type(mime)?;
    Ok(as_download(&data_url))
}

/// Swap a data URL's media type for `image/octet-stream`, which makes the
/// browser download it instead of displaying it.
pub fn as_download(data_url: &str) -> String {
    let Some(body) = data_url.strip_prefix("data:") else {
        return data_url.to_string();
    };
    let end = body.find([';', ',']).unwrap_or(body.len());
    format!("data:image/octet-stream{}", &body[end..])
}
