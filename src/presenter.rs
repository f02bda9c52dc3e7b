// Result presenter

use crate::dom::Dom;
use crate::error::AppError;
use log::warn;

pub const ERROR_CLASS: &str = "result-error";

pub fn show_result(dom: &mut dyn Dom, region: &str, text: &str) {
    dom.set_text(region, text);
    dom.remove_class(region, ERROR_CLASS);
}

pub fn show_error(dom: &mut dyn Dom, region: &str, err: &AppError) {
    let message = err.to_string();
    let message = if message.trim().is_empty() {
        "Invalid input"
    } else {
        message.as_str()
    };
    warn!("{}: {}", region, message);
    dom.set_text(region, &format!("Error: {}", message));
    dom.add_class(region, ERROR_CLASS);
}
