use wasm_bindgen::JsValue;

/// Build a unique-enough id with the given prefix. Prefers the browser's
/// `crypto.randomUUID`; environments without it get a millisecond timestamp
/// plus a random salt. Uniqueness is probabilistic either way, and an
/// (astronomically unlikely) collision is tolerated rather than handled.
pub fn generate_id(prefix: &str) -> String {
    if let Some(uuid) = crypto_uuid() {
        return format!("{prefix}-{uuid}");
    }
    let millis = js_sys::Date::now() as u64;
    let salt = (js_sys::Math::random() * 1_000_000.0) as u32;
    format!("{prefix}-{millis}-{salt}")
}

fn crypto_uuid() -> Option<String> {
    let crypto = web_sys::window()?.crypto().ok()?;
    Some(crypto.random_uuid())
}

/// Current instant as an ISO-8601 string.
pub fn now_iso() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

/// Millisecond epoch timestamp rendered as an ISO-8601 string.
pub fn iso_from_millis(millis: f64) -> String {
    String::from(js_sys::Date::new(&JsValue::from_f64(millis)).to_iso_string())
}

/// Short random hex suffix for synthetic ids.
pub fn random_suffix() -> String {
    format!("{:06x}", (js_sys::Math::random() * 16_777_216.0) as u32)
}

/// Time-of-day display form of a stored timestamp.
pub fn format_time(value: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(value));
    String::from(date.to_locale_time_string("en-US"))
}

/// Date plus time display form of a stored timestamp.
pub fn format_date_time(value: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(value));
    String::from(date.to_locale_string("en-US", &JsValue::UNDEFINED))
}
