//! Browser glue: listener subscriptions, the card observer, and the handful of
//! DOM reads and writes the page needs.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    Window,
};

use crate::{
    error::PageError,
    navigation::SectionOffset,
    reveal::REVEAL_ID_ATTRIBUTE,
    theme::ThemeMode,
};

const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub fn browser_window() -> Result<Window, PageError> {
    window().ok_or(PageError::MissingWindow)
}

pub fn document() -> Result<Document, PageError> {
    browser_window()?.document().ok_or(PageError::MissingDocument)
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}

pub fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .is_some_and(|list| list.matches())
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

/// Text of the embedded config script, empty when the page has none.
pub fn element_text(id: &str) -> String {
    document()
        .ok()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

pub fn body_classes() -> Vec<String> {
    document()
        .ok()
        .and_then(|d| d.body())
        .map(|body| {
            body.class_name()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Current document offsets of the given section ids, in document order.
/// Sections missing from the page are skipped.
pub fn section_offsets<'a>(ids: &[&'a str]) -> Vec<SectionOffset<'a>> {
    let Ok(document) = document() else {
        return Vec::new();
    };

    ids.iter()
        .filter_map(|&id| {
            let element = document
                .get_element_by_id(id)?
                .dyn_into::<HtmlElement>()
                .ok()?;
            Some(SectionOffset {
                id,
                top: f64::from(element.offset_top()),
            })
        })
        .collect()
}

pub fn section_exists(id: &str) -> bool {
    document()
        .ok()
        .and_then(|d| d.get_element_by_id(id))
        .is_some()
}

pub fn scroll_to_section(id: &str) -> Result<(), PageError> {
    let target = document()?
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement(format!("#{id}")))?;

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

pub fn apply_body_theme(mode: ThemeMode) {
    let Some(body) = document().ok().and_then(|d| d.body()) else {
        return;
    };

    let classes = body.class_list();
    for class in mode.stale_body_classes() {
        let _ = classes.remove_1(class);
    }
    if let Some(class) = mode.body_class() {
        let _ = classes.add_1(class);
    }
}

/// Runs `update` inside `document.startViewTransition` when the browser has
/// it. Without one, or when the call throws, `update` runs directly.
pub fn run_in_view_transition(update: impl FnOnce() + Copy + 'static) {
    let start = document().ok().and_then(|document| {
        let document: JsValue = document.into();
        let start = Reflect::get(&document, &JsValue::from_str("startViewTransition"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some((document, start))
    });

    let Some((document, start)) = start else {
        update();
        return;
    };
    if let Err(err) = start.call1(&document, &Closure::once_into_js(update)) {
        log::debug!("view transition refused: {:?}", err);
        update();
    }
}

/// Swaps the body classes, animated unless reduced motion is requested.
pub fn apply_body_theme_with_transition(mode: ThemeMode) {
    if prefers_reduced_motion() {
        apply_body_theme(mode);
    } else {
        run_in_view_transition(move || apply_body_theme(mode));
    }
}

/// A registered DOM listener. Dropping it removes the listener.
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn listen(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, PageError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Intersection observer over every element carrying a reveal id. Each
/// element is unobserved after its first intersection. Dropping the value
/// disconnects the observer.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn observe_all(
        selector: &str,
        threshold: f64,
        root_margin: &str,
        mut on_reveal: impl FnMut(String) + 'static,
    ) -> Result<Self, PageError> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    observer.unobserve(&target);
                    if let Some(id) = target.get_attribute(REVEAL_ID_ATTRIBUTE) {
                        on_reveal(id);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let elements = document()?.query_selector_all(selector)?;
        for index in 0..elements.length() {
            if let Some(element) = elements
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                observer.observe(&element);
            }
        }
        log::debug!("observing {} cards for reveal", elements.length());

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
