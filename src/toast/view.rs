//! Toast rendering
//!
//! Maps toasts to render-tree nodes. Class names match the dashboard
//! stylesheet: `.toast.<kind>` slides in when `.show` is present and the
//! `.toast-progress` bar carries the countdown transition.

use std::time::Duration;

use super::types::{Toast, ToastKind};
use crate::view::{Element, Node};

/// Id of the container element
pub const CONTAINER_ID: &str = "toastContainer";

const CLOSE_ICON_PATH: &str = "M6 18L18 6M6 6l12 12";

/// Render the toast container with its toasts in insertion order
pub fn container(toasts: &[Toast], now: Duration) -> Node {
    Element::new("div")
        .class("toast-container")
        .attr("id", CONTAINER_ID)
        .children(toasts.iter().map(|t| toast(t, now)))
        .into()
}

/// Render a single toast
pub fn toast(toast: &Toast, now: Duration) -> Element {
    let id = toast.handle().id().to_string();

    Element::new("div")
        .class("toast")
        .class(toast.kind().as_str())
        .class_if("show", toast.is_visible())
        .attr("data-toast-id", id.clone())
        .attr("data-state", toast.state().as_str())
        .child(icon(toast.kind()))
        .child(
            Element::new("div")
                .class("toast-content")
                .child(Element::new("span").class("toast-message").text(toast.message())),
        )
        .child(
            Element::new("button")
                .class("toast-close")
                .attr("type", "button")
                .attr("data-action", "dismiss")
                .attr("data-toast-id", id)
                .attr("aria-label", "Dismiss")
                .child(svg(None, CLOSE_ICON_PATH)),
        )
        .child(
            Element::new("div")
                .class("toast-progress")
                .attr("style", toast.countdown().style(now)),
        )
}

fn icon(kind: ToastKind) -> Element {
    svg(Some("toast-icon"), kind.icon_path())
}

fn svg(class: Option<&str>, path: &str) -> Element {
    let el = Element::new("svg");
    let el = match class {
        Some(class) => el.class(class),
        None => el,
    };
    el.attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .child(
            Element::new("path")
                .attr("d", path)
                .attr("stroke-width", "2")
                .attr("stroke-linecap", "round")
                .attr("stroke-linejoin", "round"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ManualScheduler, ToastManager, ToastState};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_toast_structure() {
        let mut toasts = ToastManager::new(ManualScheduler::new());
        let h = toasts.notify("Transaction added successfully", ToastKind::Success);

        let root = toasts.render();
        let container = root.as_element().unwrap();
        assert_eq!(container.get_attr("id"), Some(CONTAINER_ID));

        let el = container.find_by_class("toast").unwrap();
        assert!(el.has_class("success"));
        assert!(!el.has_class("show"), "pending toast has not entered");
        assert_eq!(el.get_attr("data-toast-id"), Some(h.id().to_string().as_str()));
        assert_eq!(el.get_attr("data-state"), Some("pending"));
        assert_eq!(
            el.find_by_class("toast-message").unwrap().text_content(),
            "Transaction added successfully"
        );
        assert_eq!(
            el.find_by_class("toast-close").unwrap().get_attr("data-action"),
            Some("dismiss")
        );

        toasts.advance(Duration::ZERO);
        let root = toasts.render();
        let el = root.as_element().unwrap().find_by_class("toast").unwrap();
        assert!(el.has_class("show"));
        assert_eq!(
            el.find_by_class("toast-progress").unwrap().get_attr("style"),
            Some("width: 100%; transition: width 3000ms linear")
        );
    }

    #[test]
    fn test_paused_progress_is_frozen() {
        let mut toasts = ToastManager::new(ManualScheduler::new());
        let h = toasts.notify_for("x", ToastKind::Info, ms(1000));
        toasts.advance(ms(250));
        toasts.pause(h);

        let root = toasts.render();
        let bar = root
            .as_element()
            .unwrap()
            .find_by_class("toast-progress")
            .unwrap()
            .clone();
        assert_eq!(bar.get_attr("style"), Some("width: 75%; transition: none"));
    }

    #[test]
    fn test_dismissing_toast_loses_show_class() {
        let mut toasts = ToastManager::new(ManualScheduler::new());
        let h = toasts.notify("x", ToastKind::Warning);
        toasts.advance(ms(10));
        toasts.dismiss(h);

        let root = toasts.render();
        let el = root.as_element().unwrap().find_by_class("toast").unwrap();
        assert_eq!(toasts.state(h), ToastState::Dismissing);
        assert!(!el.has_class("show"));
        assert!(el.has_class("warning"));
    }

    #[test]
    fn test_message_is_escaped() {
        let mut toasts = ToastManager::new(ManualScheduler::new());
        toasts.notify("<img src=x onerror=alert(1)>", ToastKind::Error);

        let html = toasts.render().render_html();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn test_toasts_render_in_insertion_order() {
        let mut toasts = ToastManager::new(ManualScheduler::new());
        toasts.notify("first", ToastKind::Info);
        toasts.notify("second", ToastKind::Info);

        let root = toasts.render();
        let messages: Vec<String> = root
            .as_element()
            .unwrap()
            .find_all_by_class("toast-message")
            .into_iter()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
